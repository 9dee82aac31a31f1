//! The absolute layout of a whole model, as handed to renderers.

use serde::Serialize;

use strata_core::{
    direction::Direction,
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::structure::Endpoint;

/// What a positioned box stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// A declared entity without children.
    Entity,
    /// A declared entity whose children are laid out inside its box.
    Container,
    /// A synthetic node standing in for an unresolved relation endpoint.
    External,
}

/// A node with its absolute box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedNode {
    id: Id,
    path: Id,
    label: String,
    kind: NodeKind,
    parent: Option<Id>,
    depth: usize,
    bounds: Bounds,
    entity_kind: Option<String>,
}

impl PositionedNode {
    pub(crate) fn new(
        id: Id,
        path: Id,
        label: String,
        kind: NodeKind,
        parent: Option<Id>,
        depth: usize,
        bounds: Bounds,
    ) -> Self {
        Self {
            id,
            path,
            label,
            kind,
            parent,
            depth,
            bounds,
            entity_kind: None,
        }
    }

    pub(crate) fn with_entity_kind(mut self, entity_kind: Option<&str>) -> Self {
        self.entity_kind = entity_kind.map(str::to_string);
        self
    }

    /// Returns the id as declared in its scope.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the qualified path (`backend.api`), unique across the diagram.
    pub fn path(&self) -> Id {
        self.path
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Returns the path of the enclosing container, `None` at the top level.
    pub fn parent(&self) -> Option<Id> {
        self.parent
    }

    /// Returns the nesting depth; top-level nodes are at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the absolute box.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns the declared entity type (`database`, `person`, ...), if any.
    pub fn entity_kind(&self) -> Option<&str> {
        self.entity_kind.as_deref()
    }
}

/// A retained edge with its anchor points on the endpoint boxes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedEdge {
    source: Endpoint,
    target: Endpoint,
    scope: Option<Id>,
    source_anchor: Point,
    target_anchor: Point,
    label: Option<String>,
}

impl PositionedEdge {
    pub(crate) fn new(
        source: Endpoint,
        target: Endpoint,
        scope: Option<Id>,
        (source_anchor, target_anchor): (Point, Point),
        label: Option<String>,
    ) -> Self {
        Self {
            source,
            target,
            scope,
            source_anchor,
            target_anchor,
            label,
        }
    }

    /// Returns the source endpoint, carrying the node's qualified path.
    pub fn source(&self) -> Endpoint {
        self.source
    }

    /// Returns the target endpoint, carrying the node's qualified path.
    pub fn target(&self) -> Endpoint {
        self.target
    }

    /// Returns the container whose scope laid this edge out, `None` for the root.
    pub fn scope(&self) -> Option<Id> {
        self.scope
    }

    pub fn source_anchor(&self) -> Point {
        self.source_anchor
    }

    pub fn target_anchor(&self) -> Point {
        self.target_anchor
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Absolute layout of a model: canvas size, every node box and every edge.
///
/// Nodes are listed parent first, each container followed by its descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramLayout {
    size: Size,
    direction: Direction,
    nodes: Vec<PositionedNode>,
    edges: Vec<PositionedEdge>,
}

impl DiagramLayout {
    pub(crate) fn new(
        size: Size,
        direction: Direction,
        nodes: Vec<PositionedNode>,
        edges: Vec<PositionedEdge>,
    ) -> Self {
        Self {
            size,
            direction,
            nodes,
            edges,
        }
    }

    pub fn width(&self) -> u32 {
        self.size.width()
    }

    pub fn height(&self) -> u32 {
        self.size.height()
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns the direction of the root scope.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[PositionedEdge] {
        &self.edges
    }

    /// Finds a node by its qualified path.
    pub fn node(&self, path: impl Into<Id>) -> Option<&PositionedNode> {
        let path = path.into();
        self.nodes.iter().find(|node| node.path == path)
    }

    /// Returns the direct children of the container at `path`.
    pub fn children_of(&self, path: Id) -> impl Iterator<Item = &PositionedNode> {
        self.nodes
            .iter()
            .filter(move |node| node.parent == Some(path))
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

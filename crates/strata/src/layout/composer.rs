//! Hierarchical composition of scope layouts.
//!
//! Composition is a two-phase process:
//! 1. Lay out every containment scope in post-order (innermost first). A
//!    container's box in its parent scope is its child canvas wrapped in the
//!    container frame.
//! 2. Walk the scopes top-down from the root, translating each child canvas by
//!    the absolute origin of its container box plus the frame's content offset.

use std::collections::HashMap;

use log::{debug, info};

use strata_core::{
    direction::Direction,
    geometry::{Point, Size},
    identifier::Id,
    model::{Entity, Model},
};

use super::{
    DiagramLayout, LayoutOptions, LayoutResult, NodeKind, PositionedEdge, PositionedNode,
    layout_graph,
};
use crate::{
    config::{AppConfig, ContainerConfig, NodeConfig},
    structure::{ContainmentScope, GraphBuilder, LayoutGraph, ScopeTree},
};

/// Title band and inner padding a container adds around its child canvas.
///
/// ```
/// # use strata::layout::ContainerFrame;
/// # use strata_core::geometry::{Point, Size};
/// let frame = ContainerFrame::new(30, 20);
/// assert_eq!(frame.wrap(Size::new(200, 100)), Size::new(250, 150));
/// assert_eq!(frame.content_offset(), Point::new(25, 30));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerFrame {
    title_margin: u32,
    inner_padding: u32,
}

impl Default for ContainerFrame {
    fn default() -> Self {
        Self::from_config(&ContainerConfig::default())
    }
}

impl ContainerFrame {
    pub fn new(title_margin: u32, inner_padding: u32) -> Self {
        Self {
            title_margin,
            inner_padding,
        }
    }

    pub fn from_config(config: &ContainerConfig) -> Self {
        Self::new(config.title_margin(), config.inner_padding())
    }

    /// Returns the container size for a child canvas of size `content`.
    pub fn wrap(&self, content: Size) -> Size {
        let frame = self.title_margin.saturating_add(self.inner_padding);
        Size::new(
            content.width().saturating_add(frame),
            content.height().saturating_add(frame),
        )
    }

    /// Returns the child canvas origin relative to the container's top-left corner.
    pub fn content_offset(&self) -> Point {
        Point::new(
            self.title_margin.saturating_add(self.inner_padding) / 2,
            self.title_margin,
        )
    }
}

/// A laid out scope, kept until the top-down pass has placed it.
struct ScopeLayout<'s, 'a> {
    scope: &'s ContainmentScope<'a>,
    graph: LayoutGraph,
    result: LayoutResult,
}

/// Runs the layout pipeline over every scope of a model and composes the
/// results into one absolute [`DiagramLayout`].
#[derive(Debug, Clone, Default)]
pub struct Composer {
    options: LayoutOptions,
    node: NodeConfig,
    frame: ContainerFrame,
}

impl Composer {
    /// Create a composer with default spacing, sizing and frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a composer from the configuration; the direction is supplied per call.
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            options: LayoutOptions::from_config(config.layout(), Direction::default()),
            node: config.node().clone(),
            frame: ContainerFrame::from_config(config.container()),
        }
    }

    /// Set the per-scope layout options; their direction is ignored.
    pub fn with_options(mut self, options: LayoutOptions) -> Self {
        self.options = options;
        self
    }

    /// Set how leaf entities are sized.
    pub fn with_node_config(mut self, node: NodeConfig) -> Self {
        self.node = node;
        self
    }

    /// Set the container frame.
    pub fn with_frame(mut self, frame: ContainerFrame) -> Self {
        self.frame = frame;
        self
    }

    /// Lays out `model` with its root scope in `direction`.
    pub fn compose(&self, model: &Model, direction: Direction) -> DiagramLayout {
        info!(
            entities = model.entity_count(),
            relations = model.relations().len(),
            direction:% = direction;
            "Composing layout"
        );
        let tree = ScopeTree::from_model(model, direction);

        // First phase: lay out every scope, innermost first.
        let mut layouts: HashMap<Option<Id>, ScopeLayout> = HashMap::new();
        for scope in tree.scopes() {
            let key = scope.container_id();
            if layouts.contains_key(&key) {
                debug!(container:? = key; "Skipping duplicate container scope");
                continue;
            }
            let layout = self.layout_scope(model, scope, &layouts);
            layouts.insert(key, layout);
        }

        // Second phase: place every scope at its absolute origin.
        let mut nodes = Vec::new();
        let mut edges = Vec::new();
        let size = match layouts.get(&None) {
            Some(root) => {
                self.place_scope(root, &layouts, Point::default(), &mut nodes, &mut edges);
                root.result.size()
            }
            None => Size::default(),
        };

        info!(
            nodes = nodes.len(),
            edges = edges.len(),
            width = size.width(),
            height = size.height();
            "Layout composed"
        );
        DiagramLayout::new(size, direction, nodes, edges)
    }

    fn layout_scope<'s, 'a>(
        &self,
        model: &Model,
        scope: &'s ContainmentScope<'a>,
        layouts: &HashMap<Option<Id>, ScopeLayout>,
    ) -> ScopeLayout<'s, 'a> {
        let mut builder =
            GraphBuilder::for_scope(scope.path(), scope.entities(), self.node.default_size());

        for entity in scope.entities() {
            let size = self.entity_size(scope, entity, layouts);
            builder.add_node(entity.id(), size);
        }
        for relation in model.relations() {
            builder.add_relation(relation);
        }

        let graph = builder.build();
        let options = self.options.with_direction(scope.direction());
        let result = layout_graph(&graph, &options);
        debug!(
            container:? = scope.container_id(),
            depth = scope.depth(),
            width = result.width(),
            height = result.height();
            "Scope laid out"
        );

        ScopeLayout {
            scope,
            graph,
            result,
        }
    }

    fn entity_size(
        &self,
        scope: &ContainmentScope,
        entity: &Entity,
        layouts: &HashMap<Option<Id>, ScopeLayout>,
    ) -> Size {
        match self.child_layout(scope, Some(entity), layouts) {
            Some(child) => self.frame.wrap(child.result.size()),
            None => self.node.size_for(entity),
        }
    }

    /// Returns the non-empty inner layout of `entity`, if it is a container.
    ///
    /// A leaf kept for a duplicate id never takes the scope of a later container.
    fn child_layout<'l, 's, 'a>(
        &self,
        scope: &ContainmentScope,
        entity: Option<&Entity>,
        layouts: &'l HashMap<Option<Id>, ScopeLayout<'s, 'a>>,
    ) -> Option<&'l ScopeLayout<'s, 'a>> {
        let entity = entity.filter(|entity| entity.is_container())?;
        layouts
            .get(&Some(scope.qualify(entity.id())))
            .filter(|child| !child.result.is_empty())
    }

    fn place_scope(
        &self,
        layout: &ScopeLayout,
        layouts: &HashMap<Option<Id>, ScopeLayout>,
        origin: Point,
        nodes: &mut Vec<PositionedNode>,
        edges: &mut Vec<PositionedEdge>,
    ) {
        let scope = layout.scope;
        let container = scope.container_id();

        for (_, node) in layout.graph.nodes() {
            let Some(position) = layout.result.position(node.id()) else {
                continue;
            };
            let bounds = origin.add_point(position).to_bounds(node.size());
            let path = scope.qualify(node.id());
            let entity = scope
                .entities()
                .iter()
                .find(|entity| entity.id() == node.id());
            let child = self.child_layout(scope, entity.filter(|_| !node.is_external()), layouts);

            let (kind, label) = match entity {
                _ if node.is_external() => (NodeKind::External, node.id().to_string()),
                Some(entity) if child.is_some() => (NodeKind::Container, entity.display_text()),
                Some(entity) => (NodeKind::Entity, entity.display_text()),
                None => (NodeKind::Entity, node.id().to_string()),
            };
            nodes.push(
                PositionedNode::new(
                    node.id(),
                    path,
                    label,
                    kind,
                    container,
                    scope.depth(),
                    bounds,
                )
                .with_entity_kind(entity.and_then(Entity::kind)),
            );

            if let Some(child) = child {
                let child_origin = bounds.min_point().add_point(self.frame.content_offset());
                debug!(container:% = path, offset:? = child_origin; "Placing child scope");
                self.place_scope(child, layouts, child_origin, nodes, edges);
            }
        }

        let (source_side, target_side) = scope.direction().anchor_sides();
        for (source, target, edge) in layout.graph.edges() {
            let source_node = layout.graph.node(source);
            let target_node = layout.graph.node(target);
            let (Some(source_bounds), Some(target_bounds)) = (
                layout.result.bounds(&layout.graph, source_node.id()),
                layout.result.bounds(&layout.graph, target_node.id()),
            ) else {
                continue;
            };

            let anchors = (
                source_side.anchor(source_bounds.translate(origin)),
                target_side.anchor(target_bounds.translate(origin)),
            );
            edges.push(PositionedEdge::new(
                source_node
                    .endpoint()
                    .with_id(scope.qualify(source_node.id())),
                target_node
                    .endpoint()
                    .with_id(scope.qualify(target_node.id())),
                container,
                anchors,
                edge.label().map(str::to_string),
            ));
        }
    }
}

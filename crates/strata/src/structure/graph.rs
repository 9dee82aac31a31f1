//! Graph Builder: the simplified directed graph one layout call works on.
//!
//! This module turns the entities of one nesting scope and the relation
//! endpoints that touch it into a [`LayoutGraph`]: an arena of sized nodes with
//! stable [`NodeIndex`] handles and a deduplicated, self-loop-free edge set.
//!
//! # Resolution
//!
//! Relation endpoints are dot-qualified paths. [`GraphBuilder::resolve`] maps a
//! path to the node that represents it in the current scope:
//!
//! - Paths outside the scope do not participate (the ancestor scope that holds
//!   both endpoints lays the relation out instead).
//! - The first segment below the scope path names the candidate.
//! - A candidate declared in the scope resolves to [`Endpoint::Known`].
//! - A candidate nested somewhere below a declared entity resolves to that
//!   entity, also [`Endpoint::Known`].
//! - Anything else becomes [`Endpoint::External`] and a synthetic node is created
//!   for it, so no edge ever dangles and malformed input never errors.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace, warn};
use petgraph::{
    Direction as EdgeDirection,
    graph::{DiGraph, NodeIndex},
};

use strata_core::{
    geometry::Size,
    identifier::Id,
    model::{self, Entity, Relation},
};

/// A resolved relation endpoint.
///
/// Renderers use the variant to style external dependencies without
/// re-deriving which ids the model declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The endpoint resolved to a node declared in the scope.
    Known(Id),
    /// The endpoint named nothing the scope declares; a synthetic node stands in for it.
    External(Id),
}

impl Endpoint {
    /// Returns the id of the node this endpoint resolved to.
    pub fn id(self) -> Id {
        match self {
            Self::Known(id) | Self::External(id) => id,
        }
    }

    /// Returns true for synthesized external endpoints.
    pub fn is_external(self) -> bool {
        matches!(self, Self::External(_))
    }

    /// Returns the same kind of endpoint with a different id.
    pub fn with_id(self, id: Id) -> Self {
        match self {
            Self::Known(_) => Self::Known(id),
            Self::External(_) => Self::External(id),
        }
    }
}

/// A sized node of one layout call. Immutable once the graph is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutNode {
    id: Id,
    size: Size,
    external: bool,
}

impl LayoutNode {
    /// Returns the node id, unique within its graph.
    pub fn id(&self) -> Id {
        self.id
    }

    /// Returns the node's box size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Returns true if the node was synthesized for an unresolved endpoint.
    pub fn is_external(&self) -> bool {
        self.external
    }

    /// Returns the endpoint form of this node.
    pub fn endpoint(&self) -> Endpoint {
        if self.external {
            Endpoint::External(self.id)
        } else {
            Endpoint::Known(self.id)
        }
    }
}

/// A retained edge; its endpoints are the arena edge's source and target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutEdge {
    label: Option<String>,
}

impl LayoutEdge {
    /// Returns the label of the first relation that produced this edge.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// Simplified directed graph consumed by the layout stages.
///
/// Node handles are assigned once, in declaration order, and are the only key
/// later stages use; [`LayoutGraph::handle`] maps an id back to its handle.
#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    graph: DiGraph<LayoutNode, LayoutEdge>,
    handles: IndexMap<Id, NodeIndex>,
}

impl LayoutGraph {
    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of retained edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Returns the node stored under `handle`.
    ///
    /// # Panics
    /// Panics if the handle does not belong to this graph.
    pub fn node(&self, handle: NodeIndex) -> &LayoutNode {
        &self.graph[handle]
    }

    /// Returns the handle of the node with the given id.
    pub fn handle(&self, id: Id) -> Option<NodeIndex> {
        self.handles.get(&id).copied()
    }

    /// Returns all node handles in declaration order.
    pub fn handles(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Returns all nodes with their handles in declaration order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &LayoutNode)> {
        self.graph
            .node_indices()
            .map(move |handle| (handle, &self.graph[handle]))
    }

    /// Returns all retained edges as `(source, target, edge)` in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeIndex, NodeIndex, &LayoutEdge)> {
        self.graph
            .raw_edges()
            .iter()
            .map(|edge| (edge.source(), edge.target(), &edge.weight))
    }

    /// Returns the direct predecessors of `handle`.
    pub fn predecessors(&self, handle: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(handle, EdgeDirection::Incoming)
    }

    /// Returns the direct successors of `handle`.
    pub fn successors(&self, handle: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(handle, EdgeDirection::Outgoing)
    }

    /// Returns the number of incoming edges of `handle`.
    pub fn in_degree(&self, handle: NodeIndex) -> usize {
        self.predecessors(handle).count()
    }

    /// Borrow the underlying arena, for graph algorithms.
    pub(crate) fn inner(&self) -> &DiGraph<LayoutNode, LayoutEdge> {
        &self.graph
    }
}

/// Builds a [`LayoutGraph`] for one scope.
///
/// A builder is owned by a single layout call and consumed by [`GraphBuilder::build`].
///
/// # Examples
///
/// ```
/// use strata::structure::{Endpoint, GraphBuilder};
/// use strata_core::{geometry::Size, identifier::Id};
///
/// let a = Id::new("a");
/// let b = Id::new("b");
///
/// let mut builder = GraphBuilder::new(Size::new(100, 50));
/// builder.add_node(a, Size::new(80, 40));
/// builder.add_node(b, Size::new(80, 40));
/// builder.add_edge(Endpoint::Known(a), Endpoint::Known(b), None);
/// builder.add_edge(Endpoint::Known(a), Endpoint::Known(b), None); // duplicate
/// builder.add_edge(Endpoint::Known(a), Endpoint::Known(a), None); // self-loop
///
/// let graph = builder.build();
/// assert_eq!(graph.node_count(), 2);
/// assert_eq!(graph.edge_count(), 1);
/// ```
#[derive(Debug)]
pub struct GraphBuilder<'a> {
    scope_path: Vec<Id>,
    entities: &'a [Entity],
    external_size: Size,
    graph: LayoutGraph,
    edge_set: HashSet<(NodeIndex, NodeIndex)>,
}

impl<'a> GraphBuilder<'a> {
    /// Creates a builder that declares nodes explicitly and sizes synthesized
    /// external nodes with `external_size`.
    pub fn new(external_size: Size) -> Self {
        Self {
            scope_path: Vec::new(),
            entities: &[],
            external_size,
            graph: LayoutGraph::default(),
            edge_set: HashSet::new(),
        }
    }

    /// Creates a builder for the scope at `scope_path` declaring `entities`.
    ///
    /// The entities are only used for endpoint resolution; each still has to be
    /// added with [`GraphBuilder::add_node`] once its size is known.
    pub fn for_scope(scope_path: &[Id], entities: &'a [Entity], external_size: Size) -> Self {
        Self {
            scope_path: scope_path.to_vec(),
            entities,
            ..Self::new(external_size)
        }
    }

    /// Adds a declared node and returns its handle.
    ///
    /// Ids are unique per graph: re-adding an id keeps the first declaration.
    pub fn add_node(&mut self, id: Id, size: Size) -> NodeIndex {
        self.insert_node(id, size, false)
    }

    /// Resolves a dot-qualified endpoint path against this scope.
    ///
    /// Returns `None` if the path lies outside the scope.
    pub fn resolve(&self, path: &str) -> Option<Endpoint> {
        let mut segments = model::path_segments(path);
        for scope_segment in &self.scope_path {
            let segment = segments.next()?;
            if *scope_segment != segment {
                return None;
            }
        }
        let candidate = Id::new(segments.next()?);

        if self.entities.iter().any(|entity| entity.id() == candidate) {
            return Some(Endpoint::Known(candidate));
        }

        let owner = self
            .entities
            .iter()
            .find(|entity| entity.contains_descendant(candidate));
        Some(match owner {
            Some(owner) => Endpoint::Known(owner.id()),
            None => Endpoint::External(candidate),
        })
    }

    /// Resolves both endpoints of `relation` and adds the resulting edge.
    ///
    /// Returns the resolved endpoints when the relation participates in this
    /// scope, even if the edge itself was dropped as a self-loop or duplicate.
    pub fn add_relation(&mut self, relation: &Relation) -> Option<(Endpoint, Endpoint)> {
        let (Some(source), Some(target)) =
            (self.resolve(relation.from()), self.resolve(relation.to()))
        else {
            trace!(from = relation.from(), to = relation.to(); "Relation outside scope");
            return None;
        };
        self.add_edge(source, target, relation.label().map(str::to_string));
        Some((source, target))
    }

    /// Adds an edge between two endpoints.
    ///
    /// Missing endpoint nodes are synthesized as external nodes. Self-loops and
    /// repeated ordered pairs are dropped; returns true if the edge was added.
    pub fn add_edge(&mut self, source: Endpoint, target: Endpoint, label: Option<String>) -> bool {
        let source = self.ensure_node(source);
        let target = self.ensure_node(target);

        if source == target {
            debug!(node:% = self.graph.node(source).id(); "Dropping self-loop");
            return false;
        }
        if !self.edge_set.insert((source, target)) {
            trace!(
                source:% = self.graph.node(source).id(),
                target:% = self.graph.node(target).id();
                "Dropping duplicate edge"
            );
            return false;
        }

        self.graph.graph.add_edge(source, target, LayoutEdge { label });
        true
    }

    /// Consumes the builder and returns the finished graph.
    pub fn build(self) -> LayoutGraph {
        debug!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count();
            "Layout graph built"
        );
        self.graph
    }

    fn ensure_node(&mut self, endpoint: Endpoint) -> NodeIndex {
        match self.graph.handle(endpoint.id()) {
            Some(handle) => handle,
            None => {
                debug!(id:% = endpoint.id(); "Synthesizing external node");
                self.insert_node(endpoint.id(), self.external_size, true)
            }
        }
    }

    fn insert_node(&mut self, id: Id, size: Size, external: bool) -> NodeIndex {
        if let Some(existing) = self.graph.handle(id) {
            warn!(id:% = id; "Duplicate node id in scope, keeping first declaration");
            return existing;
        }
        let handle = self
            .graph
            .graph
            .add_node(LayoutNode { id, size, external });
        self.graph.handles.insert(id, handle);
        handle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size() -> Size {
        Size::new(100, 50)
    }

    fn scope_entities() -> Vec<Entity> {
        vec![
            Entity::new("web"),
            Entity::new("backend").with_children(vec![
                Entity::new("api"),
                Entity::new("workers").with_children(vec![Entity::new("mailer")]),
            ]),
            Entity::new("db"),
        ]
    }

    #[test]
    fn test_empty_builder() {
        let graph = GraphBuilder::new(size()).build();
        assert!(graph.is_empty());
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_handles_follow_declaration_order() {
        let mut builder = GraphBuilder::new(size());
        let ids = ["c", "a", "b"].map(Id::new);
        for id in ids {
            builder.add_node(id, size());
        }
        let graph = builder.build();

        let declared: Vec<Id> = graph.nodes().map(|(_, node)| node.id()).collect();
        assert_eq!(declared, ids);
        for id in ids {
            let handle = graph.handle(id).expect("declared node has a handle");
            assert_eq!(graph.node(handle).id(), id);
        }
    }

    #[test]
    fn test_duplicate_node_keeps_first() {
        let mut builder = GraphBuilder::new(size());
        let id = Id::new("dup");
        let first = builder.add_node(id, Size::new(10, 10));
        let second = builder.add_node(id, Size::new(99, 99));
        let graph = builder.build();

        assert_eq!(first, second);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.node(first).size(), Size::new(10, 10));
    }

    #[test]
    fn test_self_loops_and_duplicates_dropped() {
        let mut builder = GraphBuilder::new(size());
        let a = Id::new("a");
        let b = Id::new("b");
        builder.add_node(a, size());
        builder.add_node(b, size());

        assert!(builder.add_edge(Endpoint::Known(a), Endpoint::Known(b), None));
        assert!(!builder.add_edge(Endpoint::Known(a), Endpoint::Known(b), None));
        assert!(!builder.add_edge(Endpoint::Known(b), Endpoint::Known(b), None));
        assert!(builder.add_edge(Endpoint::Known(b), Endpoint::Known(a), None));

        let graph = builder.build();
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_first_label_wins() {
        let mut builder = GraphBuilder::new(size());
        let a = Id::new("a");
        let b = Id::new("b");
        builder.add_edge(Endpoint::Known(a), Endpoint::Known(b), Some("reads".into()));
        builder.add_edge(Endpoint::Known(a), Endpoint::Known(b), Some("writes".into()));
        let graph = builder.build();

        let labels: Vec<_> = graph.edges().map(|(_, _, edge)| edge.label()).collect();
        assert_eq!(labels, vec![Some("reads")]);
    }

    #[test]
    fn test_unknown_endpoints_become_external_nodes() {
        let mut builder = GraphBuilder::new(size());
        let known = Id::new("known");
        builder.add_node(known, Size::new(10, 10));
        builder.add_edge(
            Endpoint::Known(known),
            Endpoint::External(Id::new("elsewhere")),
            None,
        );
        // A "known" endpoint nobody declared still never dangles.
        builder.add_edge(
            Endpoint::Known(Id::new("undeclared")),
            Endpoint::Known(known),
            None,
        );
        let graph = builder.build();

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);

        let external = graph.handle(Id::new("elsewhere")).unwrap();
        assert!(graph.node(external).is_external());
        assert_eq!(graph.node(external).size(), size());
        assert_eq!(
            graph.node(external).endpoint(),
            Endpoint::External(Id::new("elsewhere"))
        );
        assert!(!graph.node(graph.handle(known).unwrap()).is_external());
    }

    #[test]
    fn test_resolve_at_root_scope() {
        let entities = scope_entities();
        let builder = GraphBuilder::for_scope(&[], &entities, size());

        assert_eq!(builder.resolve("web"), Some(Endpoint::Known(Id::new("web"))));
        // Nested paths resolve to their owning top-level entity.
        assert_eq!(
            builder.resolve("backend.api"),
            Some(Endpoint::Known(Id::new("backend")))
        );
        // Bare ids of nested containers are discoverable.
        assert_eq!(
            builder.resolve("mailer"),
            Some(Endpoint::Known(Id::new("backend")))
        );
        assert_eq!(
            builder.resolve("stripe.charges"),
            Some(Endpoint::External(Id::new("stripe")))
        );
        assert_eq!(builder.resolve(""), None);
    }

    #[test]
    fn test_resolve_at_inner_scope() {
        let entities = scope_entities();
        let backend = &entities[1];
        let scope_path = [Id::new("backend")];
        let builder = GraphBuilder::for_scope(&scope_path, backend.children(), size());

        assert_eq!(
            builder.resolve("backend.api"),
            Some(Endpoint::Known(Id::new("api")))
        );
        assert_eq!(
            builder.resolve("backend.workers.mailer"),
            Some(Endpoint::Known(Id::new("workers")))
        );
        assert_eq!(
            builder.resolve("backend.cache"),
            Some(Endpoint::External(Id::new("cache")))
        );
        // Outside the scope, or the container itself: not participating.
        assert_eq!(builder.resolve("web"), None);
        assert_eq!(builder.resolve("backend"), None);
    }

    #[test]
    fn test_add_relation_collapses_to_self_loop() {
        let entities = scope_entities();
        let mut builder = GraphBuilder::for_scope(&[], &entities, size());
        for entity in &entities {
            builder.add_node(entity.id(), size());
        }

        let resolved = builder.add_relation(&Relation::new("backend.api", "backend.workers"));
        assert_eq!(
            resolved,
            Some((
                Endpoint::Known(Id::new("backend")),
                Endpoint::Known(Id::new("backend"))
            ))
        );
        builder.add_relation(&Relation::new("web", "backend.api"));
        builder.add_relation(&Relation::new("web", "ghost"));

        let graph = builder.build();
        assert_eq!(graph.node_count(), 4);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_neighbors() {
        let mut builder = GraphBuilder::new(size());
        let [a, b, c] = ["a", "b", "c"].map(Id::new);
        builder.add_edge(Endpoint::Known(a), Endpoint::Known(b), None);
        builder.add_edge(Endpoint::Known(c), Endpoint::Known(b), None);
        let graph = builder.build();

        let hb = graph.handle(b).unwrap();
        let mut preds: Vec<Id> = graph
            .predecessors(hb)
            .map(|h| graph.node(h).id())
            .collect();
        preds.sort();
        assert_eq!(preds, vec![a, c]);
        assert_eq!(graph.in_degree(hb), 2);
        assert_eq!(graph.successors(hb).count(), 0);
    }
}

//! Layered layout of architecture graphs.
//!
//! One scope is laid out by three stages run in sequence over a
//! [`LayoutGraph`]:
//!
//! 1. [`assign_layers`] gives every node a discrete layer.
//! 2. [`reduce_crossings`] orders each layer with the barycenter heuristic.
//! 3. [`assign_coordinates`] places the ordered layers on a grid.
//!
//! [`layout_graph`] runs the three stages on a single graph. The [`Composer`]
//! runs them once per containment scope of a model, sizes containers from their
//! child layouts and produces the absolute [`DiagramLayout`].

mod composer;
mod coordinates;
mod diagram;
mod layering;
mod ordering;

pub use composer::{Composer, ContainerFrame};
pub use coordinates::assign_coordinates;
pub use diagram::{DiagramLayout, NodeKind, PositionedEdge, PositionedNode};
pub use layering::{LayerAssignment, assign_layers};
pub use ordering::{LayerOrdering, count_crossings, reduce_crossings};

use indexmap::IndexMap;
use log::debug;

use strata_core::{
    direction::Direction,
    geometry::{Bounds, Point, Size},
    identifier::Id,
};

use crate::{config::LayoutConfig, structure::LayoutGraph};

/// Number of crossing-reduction rounds; each runs one downward and one upward sweep.
pub const DEFAULT_ITERATIONS: usize = 8;

/// Parameters of a single-scope layout call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutOptions {
    direction: Direction,
    padding: u32,
    layer_spacing: u32,
    node_spacing: u32,
    iterations: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self::new(Direction::default())
    }
}

impl LayoutOptions {
    /// Creates options for `direction` with the default spacing.
    pub fn new(direction: Direction) -> Self {
        Self::from_config(&LayoutConfig::default(), direction)
    }

    /// Creates options from the layout section of the configuration.
    pub fn from_config(config: &LayoutConfig, direction: Direction) -> Self {
        Self {
            direction,
            padding: config.padding(),
            layer_spacing: config.layer_spacing(),
            node_spacing: config.node_spacing(),
            iterations: DEFAULT_ITERATIONS,
        }
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_layer_spacing(mut self, layer_spacing: u32) -> Self {
        self.layer_spacing = layer_spacing;
        self
    }

    pub fn with_node_spacing(mut self, node_spacing: u32) -> Self {
        self.node_spacing = node_spacing;
        self
    }

    /// Sets the number of crossing-reduction rounds.
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    pub fn layer_spacing(&self) -> u32 {
        self.layer_spacing
    }

    pub fn node_spacing(&self) -> u32 {
        self.node_spacing
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }
}

/// Canvas size and top-left position of every node of one scope.
///
/// Positions are relative to the scope's canvas origin and keep the graph's
/// declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutResult {
    size: Size,
    positions: IndexMap<Id, Point>,
}

impl LayoutResult {
    pub(crate) fn new(size: Size, positions: IndexMap<Id, Point>) -> Self {
        Self { size, positions }
    }

    /// Returns the canvas size.
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn width(&self) -> u32 {
        self.size.width()
    }

    pub fn height(&self) -> u32 {
        self.size.height()
    }

    /// Returns the top-left position of every node.
    pub fn positions(&self) -> &IndexMap<Id, Point> {
        &self.positions
    }

    /// Returns the top-left position of the node with the given id.
    pub fn position(&self, id: Id) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    /// Returns the box of the node with the given id, sized from `graph`.
    pub fn bounds(&self, graph: &LayoutGraph, id: Id) -> Option<Bounds> {
        let handle = graph.handle(id)?;
        let position = self.position(id)?;
        Some(position.to_bounds(graph.node(handle).size()))
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Lays out a single graph: layering, crossing reduction and coordinates.
///
/// The call never fails. Cycles fall back to breadth-first layering and an
/// empty graph yields a zero-size result.
///
/// # Examples
///
/// ```
/// use strata::layout::{LayoutOptions, layout_graph};
/// use strata::structure::{Endpoint, GraphBuilder};
/// use strata_core::{direction::Direction, geometry::Size, identifier::Id};
///
/// let (a, b) = (Id::new("a"), Id::new("b"));
/// let mut builder = GraphBuilder::new(Size::new(100, 50));
/// builder.add_node(a, Size::new(100, 50));
/// builder.add_node(b, Size::new(100, 50));
/// builder.add_edge(Endpoint::Known(a), Endpoint::Known(b), None);
/// let graph = builder.build();
///
/// let result = layout_graph(&graph, &LayoutOptions::new(Direction::TopToBottom));
/// assert!(result.position(b).unwrap().y() > result.position(a).unwrap().y());
/// ```
pub fn layout_graph(graph: &LayoutGraph, options: &LayoutOptions) -> LayoutResult {
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        direction:% = options.direction();
        "Laying out graph"
    );
    let assignment = assign_layers(graph);
    let ordering = reduce_crossings(graph, &assignment, options.iterations());
    assign_coordinates(graph, &ordering, options)
}

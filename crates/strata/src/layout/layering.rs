//! Layering: assigns every node a discrete layer.
//!
//! For an acyclic graph the assignment is the longest path from a source:
//! `layer(n) = 1 + max(layer(p))` over predecessors `p`, `0` for sources, so
//! every edge points from a lower to a strictly higher layer.
//!
//! A graph with a cycle has no topological order. It is layered breadth-first
//! instead: sources (or the first declared node when there is none) seed
//! layer 0 and layers propagate along forward edges. Edges into a node that
//! has already been dequeued are back edges and are skipped, which bounds the
//! traversal on every finite graph.

use std::collections::{BTreeSet, VecDeque};

use log::{debug, trace, warn};
use petgraph::{algo, graph::NodeIndex};

use crate::structure::LayoutGraph;

/// Layer of every node of one [`LayoutGraph`], indexed by node handle.
///
/// Used layers are contiguous from 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerAssignment {
    layers: Vec<usize>,
    layer_count: usize,
}

impl LayerAssignment {
    /// Returns the layer of the node with the given handle.
    ///
    /// # Panics
    /// Panics if the handle does not belong to the layered graph.
    pub fn layer(&self, handle: NodeIndex) -> usize {
        self.layers[handle.index()]
    }

    /// Returns the number of layers in use.
    pub fn layer_count(&self) -> usize {
        self.layer_count
    }

    /// Returns the number of layered nodes.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Groups node handles by layer, each group in declaration order.
    pub fn layers(&self) -> Vec<Vec<NodeIndex>> {
        let mut grouped = vec![Vec::new(); self.layer_count];
        for (index, &layer) in self.layers.iter().enumerate() {
            grouped[layer].push(NodeIndex::new(index));
        }
        grouped
    }

    fn compacted(layers: Vec<usize>) -> Self {
        let used: BTreeSet<usize> = layers.iter().copied().collect();
        let dense: Vec<usize> = layers
            .iter()
            .map(|&layer| used.range(..layer).count())
            .collect();
        Self {
            layers: dense,
            layer_count: used.len(),
        }
    }
}

/// Assigns a layer to every node of `graph`.
///
/// # Examples
///
/// ```
/// use strata::layout::assign_layers;
/// use strata::structure::{Endpoint, GraphBuilder};
/// use strata_core::{geometry::Size, identifier::Id};
///
/// let [a, b, c] = ["a", "b", "c"].map(Id::new);
/// let mut builder = GraphBuilder::new(Size::new(10, 10));
/// builder.add_edge(Endpoint::Known(a), Endpoint::Known(b), None);
/// builder.add_edge(Endpoint::Known(b), Endpoint::Known(c), None);
/// builder.add_edge(Endpoint::Known(a), Endpoint::Known(c), None);
/// let graph = builder.build();
///
/// let layers = assign_layers(&graph);
/// assert_eq!(layers.layer(graph.handle(c).unwrap()), 2);
/// assert_eq!(layers.layer_count(), 3);
/// ```
pub fn assign_layers(graph: &LayoutGraph) -> LayerAssignment {
    if graph.is_empty() {
        return LayerAssignment::default();
    }

    let layers = match algo::toposort(graph.inner(), None) {
        Ok(order) => longest_path_layers(graph, &order),
        Err(cycle) => {
            warn!(
                node:% = graph.node(cycle.node_id()).id();
                "Cycle detected, falling back to breadth-first layering"
            );
            breadth_first_layers(graph)
        }
    };

    let assignment = LayerAssignment::compacted(layers);
    debug!(
        nodes = assignment.len(),
        layers = assignment.layer_count();
        "Layers assigned"
    );
    trace!(assignment:?; "Layer assignment");
    assignment
}

fn longest_path_layers(graph: &LayoutGraph, order: &[NodeIndex]) -> Vec<usize> {
    let mut layers = vec![0; graph.node_count()];
    for &handle in order {
        layers[handle.index()] = graph
            .predecessors(handle)
            .map(|pred| layers[pred.index()] + 1)
            .max()
            .unwrap_or(0);
    }
    layers
}

fn breadth_first_layers(graph: &LayoutGraph) -> Vec<usize> {
    let node_count = graph.node_count();
    let mut layers = vec![0; node_count];
    let mut queued = vec![false; node_count];
    let mut finalized = vec![false; node_count];
    let mut queue = VecDeque::new();

    for handle in graph.handles().filter(|&handle| graph.in_degree(handle) == 0) {
        queued[handle.index()] = true;
        queue.push_back(handle);
    }

    let mut next_seed = 0;
    loop {
        while let Some(current) = queue.pop_front() {
            finalized[current.index()] = true;
            let next_layer = layers[current.index()] + 1;
            for successor in graph.successors(current) {
                let index = successor.index();
                if finalized[index] {
                    continue;
                }
                layers[index] = layers[index].max(next_layer);
                if !queued[index] {
                    queued[index] = true;
                    queue.push_back(successor);
                }
            }
        }

        // Islands with no entry point are seeded in declaration order.
        let Some(seed) = (next_seed..node_count).find(|&index| !queued[index]) else {
            break;
        };
        debug!(node:% = graph.node(NodeIndex::new(seed)).id(); "Seeding unreached node");
        next_seed = seed + 1;
        queued[seed] = true;
        queue.push_back(NodeIndex::new(seed));
    }

    layers
}

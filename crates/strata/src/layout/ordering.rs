//! Crossing reduction: orders the nodes inside each layer.
//!
//! Layer membership is fixed; only the order within a layer changes. Each
//! iteration runs a downward sweep, reordering every layer by the mean
//! position of its predecessors in the layer above, then an upward sweep using
//! successors in the layer below (the barycenter heuristic). A node with no
//! neighbor in the adjacent layer keeps its pre-sweep index as its value, and
//! ties break by id so the result is reproducible.
//!
//! The result is the ordering with the fewest adjacent-layer crossings seen,
//! the initial declaration order included.

use log::{debug, trace};
use petgraph::graph::NodeIndex;

use super::LayerAssignment;
use crate::structure::LayoutGraph;

/// Ordered layers of one graph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerOrdering {
    layers: Vec<Vec<NodeIndex>>,
}

impl LayerOrdering {
    /// Wraps explicit layer orders.
    pub fn new(layers: Vec<Vec<NodeIndex>>) -> Self {
        Self { layers }
    }

    /// Returns the layers, each in its final order.
    pub fn layers(&self) -> &[Vec<NodeIndex>] {
        &self.layers
    }

    /// Returns the number of layers.
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

#[derive(Debug, Clone, Copy)]
enum Sweep {
    Down,
    Up,
}

/// Reorders each layer of `assignment` to reduce edge crossings.
///
/// Runs `iterations` rounds of one downward and one upward sweep and returns
/// the best ordering found.
pub fn reduce_crossings(
    graph: &LayoutGraph,
    assignment: &LayerAssignment,
    iterations: usize,
) -> LayerOrdering {
    let mut current = assignment.layers();
    let mut best = current.clone();
    let mut best_crossings = count_crossings(graph, &best);
    debug!(crossings = best_crossings; "Initial layer ordering");

    'rounds: for iteration in 0..iterations {
        for sweep in [Sweep::Down, Sweep::Up] {
            if best_crossings == 0 {
                break 'rounds;
            }
            run_sweep(graph, assignment, &mut current, sweep);

            let crossings = count_crossings(graph, &current);
            trace!(iteration, sweep:?, crossings; "Sweep finished");
            if crossings < best_crossings {
                best_crossings = crossings;
                best.clone_from(&current);
            }
        }
    }

    debug!(crossings = best_crossings; "Crossings reduced");
    trace!(layers:? = best; "Final layer ordering");
    LayerOrdering::new(best)
}

/// Counts pairwise crossings between edges joining adjacent layers.
///
/// Edges are counted regardless of their direction; edges spanning more than
/// one layer or staying inside one layer are ignored.
pub fn count_crossings(graph: &LayoutGraph, layers: &[Vec<NodeIndex>]) -> usize {
    let mut placement = vec![(usize::MAX, 0); graph.node_count()];
    for (layer, nodes) in layers.iter().enumerate() {
        for (index, &node) in nodes.iter().enumerate() {
            placement[node.index()] = (layer, index);
        }
    }

    let mut segments: Vec<Vec<(usize, usize)>> = vec![Vec::new(); layers.len()];
    for (source, target, _) in graph.edges() {
        let (source_layer, source_index) = placement[source.index()];
        let (target_layer, target_index) = placement[target.index()];
        if source_layer == usize::MAX || target_layer == usize::MAX {
            continue;
        }
        if target_layer == source_layer + 1 {
            segments[source_layer].push((source_index, target_index));
        } else if source_layer == target_layer + 1 {
            segments[target_layer].push((target_index, source_index));
        }
    }

    segments
        .iter()
        .map(|between| {
            between
                .iter()
                .enumerate()
                .map(|(i, &(upper_a, lower_a))| {
                    between[i + 1..]
                        .iter()
                        .filter(|&&(upper_b, lower_b)| {
                            (upper_a < upper_b && lower_a > lower_b)
                                || (upper_a > upper_b && lower_a < lower_b)
                        })
                        .count()
                })
                .sum::<usize>()
        })
        .sum()
}

fn run_sweep(
    graph: &LayoutGraph,
    assignment: &LayerAssignment,
    layers: &mut [Vec<NodeIndex>],
    sweep: Sweep,
) {
    let layer_count = layers.len();
    if layer_count < 2 {
        return;
    }

    let mut index_of = vec![0usize; graph.node_count()];
    for nodes in layers.iter() {
        for (index, &node) in nodes.iter().enumerate() {
            index_of[node.index()] = index;
        }
    }

    let order: Vec<usize> = match sweep {
        Sweep::Down => (1..layer_count).collect(),
        Sweep::Up => (0..layer_count - 1).rev().collect(),
    };

    for layer in order {
        let mut keyed: Vec<(f64, NodeIndex)> = layers[layer]
            .iter()
            .map(|&node| {
                let (neighbors, adjacent): (Vec<NodeIndex>, usize) = match sweep {
                    Sweep::Down => (graph.predecessors(node).collect(), layer - 1),
                    Sweep::Up => (graph.successors(node).collect(), layer + 1),
                };
                let positions: Vec<usize> = neighbors
                    .into_iter()
                    .filter(|neighbor| assignment.layer(*neighbor) == adjacent)
                    .map(|neighbor| index_of[neighbor.index()])
                    .collect();

                let barycenter = if positions.is_empty() {
                    index_of[node.index()] as f64
                } else {
                    positions.iter().sum::<usize>() as f64 / positions.len() as f64
                };
                (barycenter, node)
            })
            .collect();

        keyed.sort_by(|(a_value, a_node), (b_value, b_node)| {
            a_value
                .total_cmp(b_value)
                .then_with(|| graph.node(*a_node).id().cmp(&graph.node(*b_node).id()))
        });

        layers[layer] = keyed.into_iter().map(|(_, node)| node).collect();
        for (index, &node) in layers[layer].iter().enumerate() {
            index_of[node.index()] = index;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{assign_layers, layering::test_graphs::*};

    fn ids(graph: &LayoutGraph, layer: &[NodeIndex]) -> Vec<String> {
        layer
            .iter()
            .map(|&handle| graph.node(handle).id().to_string())
            .collect()
    }

    #[test]
    fn test_empty_graph() {
        let graph = build(0, &[]);
        let ordering = reduce_crossings(&graph, &assign_layers(&graph), 8);
        assert_eq!(ordering.layer_count(), 0);
    }

    #[test]
    fn test_count_crossings_simple_x() {
        // n0 -> n3 and n1 -> n2 cross when both layers are in declaration order.
        let graph = build(4, &[(0, 3), (1, 2)]);
        let layers = assign_layers(&graph).layers();
        assert_eq!(count_crossings(&graph, &layers), 1);

        let h = |i| graph.handle(node_id(i)).unwrap();
        let untangled = vec![vec![h(0), h(1)], vec![h(3), h(2)]];
        assert_eq!(count_crossings(&graph, &untangled), 0);
    }

    #[test]
    fn test_removes_simple_crossing() {
        let graph = build(4, &[(0, 3), (1, 2)]);
        let assignment = assign_layers(&graph);
        let ordering = reduce_crossings(&graph, &assignment, 8);

        assert_eq!(count_crossings(&graph, ordering.layers()), 0);
        assert_eq!(ids(&graph, &ordering.layers()[0]), ["n0", "n1"]);
        assert_eq!(ids(&graph, &ordering.layers()[1]), ["n3", "n2"]);
    }

    #[test]
    fn test_membership_is_preserved() {
        let graph = build(6, &[(0, 4), (1, 3), (2, 5), (0, 5), (3, 4)]);
        let assignment = assign_layers(&graph);
        let ordering = reduce_crossings(&graph, &assignment, 8);

        for (layer, nodes) in ordering.layers().iter().enumerate() {
            for &node in nodes {
                assert_eq!(assignment.layer(node), layer);
            }
        }
        let mut before = assignment.layers();
        let mut after = ordering.layers().to_vec();
        before.iter_mut().for_each(|layer| layer.sort());
        after.iter_mut().for_each(|layer| layer.sort());
        assert_eq!(before, after);
    }

    #[test]
    fn test_zero_iterations_keeps_declaration_order() {
        let graph = build(4, &[(0, 3), (1, 2)]);
        let assignment = assign_layers(&graph);
        let ordering = reduce_crossings(&graph, &assignment, 0);
        assert_eq!(ordering.layers(), assignment.layers().as_slice());
    }

    #[test]
    fn test_layer_membership_is_kept() {
        let graph = build(3, &[(0, 1), (0, 2)]);
        let ordering = reduce_crossings(&graph, &assign_layers(&graph), 8);
        let h0 = graph.handle(node_id(0)).unwrap();
        assert_eq!(ordering.layer_count(), 2);
        assert_eq!(ordering.layers()[0], [h0]);
        assert_eq!(ordering.layers()[1].len(), 2);
    }

    #[test]
    fn test_deterministic() {
        let edges = [(0, 5), (1, 4), (2, 3), (0, 3), (2, 5), (1, 6), (6, 3)];
        let graph = build(7, &edges);
        let assignment = assign_layers(&graph);

        let first = reduce_crossings(&graph, &assignment, 8);
        let second = reduce_crossings(&graph, &assignment, 8);
        assert_eq!(first, second);
    }
}

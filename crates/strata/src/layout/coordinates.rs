//! Coordinate assignment: turns ordered layers into absolute positions.
//!
//! Nodes are placed on a grid. Along the primary axis (x for LR/RL, y for
//! TB/BT) there is one track per layer, as deep as the largest node in that
//! layer. Along the cross axis there is one track per in-layer index, as wide
//! as the largest node holding that index in any layer. Tracks are separated
//! by the configured spacing and the grid is surrounded by padding.
//!
//! A node sits at the start of its primary track and is centered in its cross
//! track. Reversed directions mirror the primary coordinate inside the canvas
//! without touching the ordering.

use log::debug;
use petgraph::graph::NodeIndex;

use strata_core::geometry::{Point, Size};

use super::{LayerOrdering, LayoutOptions, LayoutResult};
use crate::structure::LayoutGraph;

/// Track offsets and total extent along one axis.
#[derive(Debug, Default)]
struct Tracks {
    starts: Vec<u32>,
    sizes: Vec<u32>,
    extent: u32,
}

impl Tracks {
    fn new(sizes: Vec<u32>, padding: u32, spacing: u32) -> Self {
        let mut starts = Vec::with_capacity(sizes.len());
        let mut cursor = padding;
        for (index, size) in sizes.iter().enumerate() {
            if index > 0 {
                cursor = cursor.saturating_add(spacing);
            }
            starts.push(cursor);
            cursor = cursor.saturating_add(*size);
        }
        Self {
            starts,
            sizes,
            extent: cursor.saturating_add(padding),
        }
    }
}

/// Split of a size into its primary- and cross-axis extents.
fn extents(size: Size, horizontal: bool) -> (u32, u32) {
    if horizontal {
        (size.width(), size.height())
    } else {
        (size.height(), size.width())
    }
}

/// Places every node of `ordering` and sizes the canvas.
///
/// An empty ordering yields a zero-size result with no positions.
pub fn assign_coordinates(
    graph: &LayoutGraph,
    ordering: &LayerOrdering,
    options: &LayoutOptions,
) -> LayoutResult {
    if graph.is_empty() {
        return LayoutResult::default();
    }

    let direction = options.direction();
    let horizontal = direction.is_horizontal();
    let extents_of = |handle: NodeIndex| extents(graph.node(handle).size(), horizontal);

    let layer_sizes: Vec<u32> = ordering
        .layers()
        .iter()
        .map(|nodes| {
            nodes
                .iter()
                .map(|&handle| extents_of(handle).0)
                .max()
                .unwrap_or(0)
        })
        .collect();

    let widest_layer = ordering.layers().iter().map(Vec::len).max().unwrap_or(0);
    let mut cross_sizes = vec![0; widest_layer];
    for nodes in ordering.layers() {
        for (index, &handle) in nodes.iter().enumerate() {
            cross_sizes[index] = cross_sizes[index].max(extents_of(handle).1);
        }
    }

    let primary = Tracks::new(layer_sizes, options.padding(), options.layer_spacing());
    let cross = Tracks::new(cross_sizes, options.padding(), options.node_spacing());

    let mut placed = vec![None; graph.node_count()];
    for (layer, nodes) in ordering.layers().iter().enumerate() {
        for (index, &handle) in nodes.iter().enumerate() {
            let (primary_extent, cross_extent) = extents_of(handle);

            let mut p = primary.starts[layer];
            if direction.is_reversed() {
                p = primary.extent.saturating_sub(p).saturating_sub(primary_extent);
            }
            let c = cross.starts[index].saturating_add((cross.sizes[index] - cross_extent) / 2);

            placed[handle.index()] = Some(if horizontal {
                Point::new(p, c)
            } else {
                Point::new(c, p)
            });
        }
    }

    let size = if horizontal {
        Size::new(primary.extent, cross.extent)
    } else {
        Size::new(cross.extent, primary.extent)
    };

    // Declaration order; a node missing from the ordering falls back to the padding corner.
    let positions = graph
        .nodes()
        .map(|(handle, node)| {
            let point = placed[handle.index()]
                .unwrap_or_else(|| Point::new(options.padding(), options.padding()));
            (node.id(), point)
        })
        .collect();

    debug!(
        direction:% = direction,
        width = size.width(),
        height = size.height();
        "Coordinates assigned"
    );
    LayoutResult::new(size, positions)
}

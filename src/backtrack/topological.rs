//! Dense single-pass backtracker.
//!
//! Processes nodes Kahn-style in topological order, keeping one slot per grid position.
//! O(grid area) memory; the engine of choice for small inputs and the baseline solver the
//! subdivider uses on two-row slices.

use alloc::vec;
use alloc::vec::Vec;

#[cfg(debug_assertions)]
use fixedbitset::FixedBitSet;

use crate::backtrack::slot::Slot;
use crate::graph::AlignmentGraph;
use crate::grid::{Edge, Node};
use crate::measure::Measure;

/// Maximum-weight path from `start` to `end`.
///
/// `start` must be the graph's root. An unreachable `end` yields an empty path with
/// weight `-∞`; callers that cannot rule unreachability out must check for it.
///
/// # Example
/// ```
/// use gridalign::graph::{AlignmentGraph, GlobalGraph};
/// use gridalign::backtrack::find_max_path;
/// use gridalign::SimpleScorer;
///
/// let g = GlobalGraph::<_, _, _, _, f64>::new(
///     "ab",
///     "ab",
///     SimpleScorer::substitution(1.0, -1.0),
///     SimpleScorer::gap(-1.0),
/// );
/// let (path, weight) = find_max_path(&g, (&g).root_node(), (&g).leaf_node());
/// assert_eq!(weight, 2.0);
/// assert_eq!(path.len(), 2);
/// ```
pub fn find_max_path<G: AlignmentGraph>(graph: G, start: Node, end: Node) -> (Vec<Edge>, G::K) {
    let root = graph.root_node();
    debug_assert_eq!(start, root, "start node must be the graph root");
    debug_assert!(graph.has_node(end));

    let depth_cnt = graph.grid_depth_cnt();
    let width = graph.grid_right_cnt();
    let slot_cnt = graph.grid_down_cnt() * width * depth_cnt;
    let index = |node: Node| -> usize {
        let rank = if depth_cnt == 1 {
            0
        } else {
            node.layer.cell_rank()
        };
        ((node.down - root.down) * width + (node.right - root.right)) * depth_cnt + rank
    };

    let mut slots: Vec<Slot<G::K>> = vec![Slot::unreachable(); slot_cnt];
    slots[index(start)] = Slot::start();

    // Unprocessed-parent counters; a node is ready once its count reaches zero.
    let mut pending: Vec<usize> = vec![0; slot_cnt];
    for node in graph.nodes() {
        pending[index(node)] = graph.in_degree(node);
    }
    let mut ready: Vec<Node> = graph.nodes().filter(|n| pending[index(*n)] == 0).collect();

    #[cfg(debug_assertions)]
    let mut processed = FixedBitSet::with_capacity(slot_cnt);

    while let Some(node) = ready.pop() {
        #[cfg(debug_assertions)]
        {
            assert!(!processed.contains(index(node)), "node processed twice");
            processed.insert(index(node));
        }
        // the start node keeps its seed; in a bounded slice it can have in-box inputs
        // (same-cell gap-close edges) that must not displace it
        if node != start {
            let mut best: Option<(Edge, G::K)> = None;
            for edge in graph.inputs(node) {
                let source_weight = slots[index(edge.source)].weight;
                if !(source_weight > <G::K>::minus_infinity()) {
                    // unreachable sources donate no edge; an unreachable end node then
                    // reconstructs to an empty path
                    continue;
                }
                let candidate = source_weight.accumulate(graph.edge_weight(&edge));
                // ties go to the first edge in enumeration order
                if best.map_or(true, |(_, weight)| candidate > weight) {
                    best = Some((edge, candidate));
                }
            }
            if let Some((edge, weight)) = best {
                slots[index(node)] = Slot {
                    edge: Some(edge),
                    weight,
                };
            }
        }
        for edge in graph.outputs(node) {
            let dest = index(edge.destination);
            debug_assert!(pending[dest] > 0);
            pending[dest] -= 1;
            if pending[dest] == 0 {
                ready.push(edge.destination);
            }
        }
    }

    let mut path = Vec::new();
    let mut cursor = end;
    while let Some(edge) = slots[index(cursor)].edge {
        path.push(edge);
        cursor = edge.source;
    }
    path.reverse();
    (path, slots[index(end)].weight)
}

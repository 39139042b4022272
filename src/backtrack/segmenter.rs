//! Resident segmenter: splits the optimal path into free-ride hops and real segments.
//!
//! For flavors with free-rides, the optimal path has the shape
//! `[entry hop?] real edges [exit hop?]`; hops only ever leave the root or enter the
//! leaf. The segmenter finds both hops and the real stretch between them, so the
//! subdivider can recover each real stretch independently.
//!
//! The exit is read off the leaf's forward slot. The entry is then read off the root's
//! backward slot over the graph bounded at the exit node; bounding first guarantees the
//! two choices lie on one common optimal path even when several optima tie.

use alloc::vec::Vec;

use log::debug;

use crate::backtrack::backward::BackwardWalker;
use crate::backtrack::forward::ForwardWalker;
use crate::graph::AlignmentGraph;
use crate::grid::{Edge, EdgeKind, Node};
#[cfg(debug_assertions)]
use crate::measure::Measure;

/// One piece of a segmented optimal path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathPart {
    /// A free-ride edge of the optimal path, emitted verbatim.
    Hop(Edge),
    /// A stretch of the optimal path to be recovered between two nodes.
    Segment { from: Node, to: Node },
}

/// Segment the optimal root-to-leaf path of `graph`.
///
/// Returns the parts in path order together with the optimal weight. `epsilon` bounds
/// the forward/backward weight disagreement tolerated by the debug-build consistency
/// check; zero is appropriate for integer weights.
pub fn backtrack_segmentation_points<G>(graph: G, epsilon: G::K) -> (Vec<PathPart>, G::K)
where
    G: AlignmentGraph + Send,
    G::K: Send,
{
    let root = graph.root_node();
    let leaf = graph.leaf_node();
    if root == leaf {
        return (Vec::new(), G::K::zero());
    }

    let forward = ForwardWalker::new_converged(graph, leaf.down);
    let leaf_slot = forward.find(leaf);
    let total = leaf_slot.weight;
    let Some(last_edge) = leaf_slot.edge else {
        debug_assert!(false, "leaf of a non-degenerate alignment graph is unreachable");
        return (Vec::new(), total);
    };

    let (exit_hop, exit) = if last_edge.kind == EdgeKind::FreeRide {
        (Some(last_edge), last_edge.source)
    } else {
        (None, leaf)
    };

    if exit == root {
        // the optimal path is a single free-ride
        debug!("segmented into a lone hop, weight {total:?}");
        let mut parts = Vec::new();
        if let Some(hop) = exit_hop {
            parts.push(PathPart::Hop(hop));
        }
        return (parts, total);
    }

    let bounded = graph.middle_slice(root, exit);
    let backward = BackwardWalker::new_converged(bounded, root.down);
    let root_slot = backward.find(root);
    #[cfg(debug_assertions)]
    {
        let hop_weight = exit_hop.map_or(G::K::zero(), |hop| graph.edge_weight(&hop));
        let rejoined = root_slot.weight.accumulate(hop_weight);
        debug_assert!(
            weights_agree(rejoined, total, epsilon),
            "forward total {total:?} and backward total {rejoined:?} disagree"
        );
    }
    let _ = epsilon;

    let (entry_hop, entry) = match root_slot.edge {
        Some(edge) if edge.kind == EdgeKind::FreeRide => (Some(edge), edge.destination),
        _ => (None, root),
    };

    debug!("segmented: entry {entry}, exit {exit}, weight {total:?}");
    let mut parts = Vec::new();
    if let Some(hop) = entry_hop {
        parts.push(PathPart::Hop(hop));
    }
    if entry != exit {
        parts.push(PathPart::Segment {
            from: entry,
            to: exit,
        });
    }
    if let Some(hop) = exit_hop {
        parts.push(PathPart::Hop(hop));
    }
    (parts, total)
}

#[cfg(debug_assertions)]
fn weights_agree<K: Measure>(a: K, b: K, epsilon: K) -> bool {
    !(a.accumulate(epsilon) < b) && !(b.accumulate(epsilon) < a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{FittingGraph, GlobalGraph, LocalGraph, OverlapGraph};
    use crate::scorer::SimpleScorer;

    #[test]
    fn global_is_one_segment() {
        let g = GlobalGraph::<_, _, _, _, f64>::new(
            "abc",
            "azc",
            SimpleScorer::substitution(1.0, -1.0),
            SimpleScorer::gap(0.0),
        );
        let (parts, total) = backtrack_segmentation_points(&g, 1e-6);
        assert_eq!(total, 2.0);
        assert_eq!(
            parts,
            alloc::vec![PathPart::Segment {
                from: Node::new(0, 0),
                to: Node::new(3, 3),
            }]
        );
    }

    #[test]
    fn overlap_is_hop_segment_hop() {
        let g = OverlapGraph::<_, _, _, _, _, f64>::new(
            "aaaaalmn",
            "lmnzzzzz",
            SimpleScorer::substitution(1.0, -1.0),
            SimpleScorer::gap(-1.0),
            SimpleScorer::freeride(0.0),
        );
        let (parts, total) = backtrack_segmentation_points(&g, 1e-6);
        assert_eq!(total, 3.0);
        assert_eq!(
            parts,
            alloc::vec![
                PathPart::Hop(Edge::free_ride(Node::new(0, 0), Node::new(5, 0))),
                PathPart::Segment {
                    from: Node::new(5, 0),
                    to: Node::new(8, 3),
                },
                PathPart::Hop(Edge::free_ride(Node::new(8, 3), Node::new(8, 8))),
            ]
        );
    }

    #[test]
    fn fitting_hops_skip_a_prefix_and_suffix_of_v() {
        let g = FittingGraph::<_, _, _, _, _, f64>::new(
            "aaalmnaaa",
            "lmn",
            SimpleScorer::substitution(1.0, -1.0),
            SimpleScorer::gap(-1.0),
            SimpleScorer::freeride(0.0),
        );
        let (parts, total) = backtrack_segmentation_points(&g, 1e-6);
        assert_eq!(total, 3.0);
        assert_eq!(
            parts,
            alloc::vec![
                PathPart::Hop(Edge::free_ride(Node::new(0, 0), Node::new(3, 0))),
                PathPart::Segment {
                    from: Node::new(3, 0),
                    to: Node::new(6, 3),
                },
                PathPart::Hop(Edge::free_ride(Node::new(6, 3), Node::new(9, 3))),
            ]
        );
    }

    #[test]
    fn disjoint_local_degenerates_to_hops() {
        let g = LocalGraph::<_, _, _, _, _, f64>::new(
            "aaa",
            "zzz",
            SimpleScorer::substitution(1.0, -1.0),
            SimpleScorer::gap(-1.0),
            SimpleScorer::freeride(2.0),
        );
        let (parts, total) = backtrack_segmentation_points(&g, 1e-6);
        assert_eq!(total, 4.0);
        // two free-rides, an empty segment between them
        assert_eq!(parts.len(), 2);
        let (PathPart::Hop(entry), PathPart::Hop(exit)) = (parts[0], parts[1]) else {
            panic!("expected two hops, got {parts:?}");
        };
        assert_eq!(entry.source, Node::new(0, 0));
        assert_eq!(exit.destination, Node::new(3, 3));
        assert_eq!(entry.destination, exit.source);
    }
}

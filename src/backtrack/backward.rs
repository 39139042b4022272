//! Streaming backward walker: the dual of [`ForwardWalker`](crate::backtrack::ForwardWalker).
//!
//! Walks rows leaf-side first in reverse topological order. After the walk has passed a
//! row, `find` answers for that row's nodes and every resident: the weight of the best
//! node-to-leaf path and the *outgoing* edge it starts with.

use crate::backtrack::slot::{ResidentTable, RowWindow, Slot};
use crate::graph::AlignmentGraph;
use crate::grid::Node;
use crate::measure::Measure;

pub struct BackwardWalker<G: AlignmentGraph> {
    graph: G,
    window: RowWindow<G::K>,
    residents: ResidentTable<G::K>,
}

impl<G: AlignmentGraph> BackwardWalker<G> {
    /// Walk from the leaf back through `target_row` (an absolute row index).
    pub fn new_converged(graph: G, target_row: usize) -> BackwardWalker<G> {
        let root = graph.root_node();
        let leaf = graph.leaf_node();
        debug_assert!(target_row >= root.down && target_row <= leaf.down);
        let width = (leaf.right - root.right + 1) * graph.grid_depth_cnt();
        let mut walker = BackwardWalker {
            graph,
            window: RowWindow::new(width, root.right, graph.grid_depth_cnt(), leaf.down),
            residents: ResidentTable::new(graph.resident_nodes()),
        };
        if let Some(slot) = walker.residents.get_mut(leaf) {
            *slot = Slot::start();
        } else if let Some(slot) = walker.window.get_mut(leaf) {
            *slot = Slot::start();
        }
        walker.process_row(leaf.down);
        let mut down = leaf.down;
        while down > target_row {
            down -= 1;
            walker.window.advance(down);
            walker.process_row(down);
        }
        walker
    }

    /// Best-suffix slot of `node`, which must be a resident or lie in one of the two most
    /// recently walked rows.
    pub fn find(&self, node: Node) -> Slot<G::K> {
        match self.find_ref(node) {
            Some(slot) => *slot,
            None => panic!("node is neither resident nor inside the walked window"),
        }
    }

    fn find_ref(&self, node: Node) -> Option<&Slot<G::K>> {
        self.residents.get(node).or_else(|| self.window.get(node))
    }

    fn process_row(&mut self, down: usize) {
        let graph = self.graph;
        for node in graph.row_nodes(down).rev() {
            self.process_node(node);
        }
    }

    fn process_node(&mut self, node: Node) {
        let graph = self.graph;
        // the leaf keeps its seed: in a bounded slice it can have in-box outputs
        // (same-cell gap-close edges) that must not displace it
        if node != graph.leaf_node() && !self.residents.contains(node) {
            let mut best: Option<Slot<G::K>> = None;
            for edge in graph.outputs(node) {
                let Some(dest_slot) = self.find_ref(edge.destination) else {
                    debug_assert!(
                        false,
                        "output destination {} fell outside the window",
                        edge.destination
                    );
                    continue;
                };
                if !(dest_slot.weight > <G::K>::minus_infinity()) {
                    continue;
                }
                let candidate = graph.edge_weight(&edge).accumulate(dest_slot.weight);
                if best.map_or(true, |b| candidate > b.weight) {
                    best = Some(Slot {
                        edge: Some(edge),
                        weight: candidate,
                    });
                }
            }
            if let Some(slot) = best {
                if let Some(target) = self.window.get_mut(node) {
                    *target = slot;
                }
            }
        }
        let weight = match self.find_ref(node) {
            Some(slot) => slot.weight,
            None => return,
        };
        if !(weight > G::K::minus_infinity()) {
            return;
        }
        for edge in graph.inputs_from_residents(node) {
            let candidate = graph.edge_weight(&edge).accumulate(weight);
            if !(candidate > G::K::minus_infinity()) {
                continue;
            }
            let Some(slot) = self.residents.get_mut(edge.source) else {
                debug_assert!(false, "resident edge from a non-resident {}", edge.source);
                continue;
            };
            // >= so the last tied candidate wins; rows are walked in descending order,
            // leaving the smallest source node in place deterministically
            if candidate >= slot.weight {
                *slot = Slot {
                    edge: Some(edge),
                    weight: candidate,
                };
            }
        }
    }
}

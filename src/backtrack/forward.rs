//! Streaming forward walker.
//!
//! Walks rows root-side first, keeping only two adjacent rows of slots plus the resident
//! table. After the walk has passed a row, `find` answers for that row's nodes and for
//! every resident: the weight of the best root-to-node path and its final edge.

use crate::backtrack::slot::{ResidentTable, RowWindow, Slot};
use crate::graph::AlignmentGraph;
use crate::grid::Node;
use crate::measure::Measure;

pub struct ForwardWalker<G: AlignmentGraph> {
    graph: G,
    window: RowWindow<G::K>,
    residents: ResidentTable<G::K>,
}

impl<G: AlignmentGraph> ForwardWalker<G> {
    /// Walk from the root through `target_row` (an absolute row index).
    pub fn new_converged(graph: G, target_row: usize) -> ForwardWalker<G> {
        let root = graph.root_node();
        let leaf = graph.leaf_node();
        debug_assert!(target_row >= root.down && target_row <= leaf.down);
        let width = (leaf.right - root.right + 1) * graph.grid_depth_cnt();
        let mut walker = ForwardWalker {
            graph,
            window: RowWindow::new(width, root.right, graph.grid_depth_cnt(), root.down),
            residents: ResidentTable::new(graph.resident_nodes()),
        };
        // only the designated start carries an initial weight; everything else is -inf
        if let Some(slot) = walker.residents.get_mut(root) {
            *slot = Slot::start();
        } else if let Some(slot) = walker.window.get_mut(root) {
            *slot = Slot::start();
        }
        walker.process_row(root.down);
        let mut down = root.down;
        while down < target_row {
            down += 1;
            walker.window.advance(down);
            walker.process_row(down);
        }
        walker
    }

    /// Best-path slot of `node`, which must be a resident or lie in one of the two most
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
        for node in graph.row_nodes(down) {
            self.process_node(node);
        }
    }

    fn process_node(&mut self, node: Node) {
        let graph = self.graph;
        // Residents accumulate through outputs_to_residents as their sources are walked,
        // never through a one-shot input scan. The root keeps its seed: in a bounded
        // slice it can have in-box inputs (same-cell gap-close edges).
        if node != graph.root_node() && !self.residents.contains(node) {
            let mut best: Option<Slot<G::K>> = None;
            for edge in graph.inputs(node) {
                let Some(source_slot) = self.find_ref(edge.source) else {
                    debug_assert!(false, "input source {} fell outside the window", edge.source);
                    continue;
                };
                if !(source_slot.weight > <G::K>::minus_infinity()) {
                    continue;
                }
                let candidate = source_slot.weight.accumulate(graph.edge_weight(&edge));
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
            // unreachable nodes contribute nothing
            return;
        }
        for edge in graph.outputs_to_residents(node) {
            let candidate = weight.accumulate(graph.edge_weight(&edge));
            let Some(slot) = self.residents.get_mut(edge.destination) else {
                debug_assert!(false, "resident edge to a non-resident {}", edge.destination);
                continue;
            };
            if candidate > slot.weight {
                *slot = Slot {
                    edge: Some(edge),
                    weight: candidate,
                };
            }
        }
    }
}

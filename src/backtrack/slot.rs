//! Backtracking slots and the containers the streaming walkers keep them in.
//!
//! A slot is the per-node state of a walk: the best edge chosen so far and the weight
//! accumulated through it. Walkers hold two kinds of slot storage: a two-row sliding
//! window indexed by grid position, and a small ordered table for resident nodes whose
//! slots must survive the whole walk.

use alloc::vec;
use alloc::vec::Vec;

use hashbrown::hash_map::DefaultHashBuilder;
use indexmap::IndexMap;

use crate::graph::NodeList;
use crate::grid::{Edge, Node};
use crate::measure::Measure;

/// Best-edge-so-far state of one node during a walk.
///
/// For a forward walk `edge` is the incoming edge on the best root-to-node path; for a
/// backward walk it is the outgoing edge on the best node-to-leaf path. `edge == None`
/// with weight zero marks the walk's start node; with weight `-∞` an untouched node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slot<K> {
    pub edge: Option<Edge>,
    pub weight: K,
}

impl<K: Measure> Slot<K> {
    /// Slot of a node no path has reached yet.
    pub fn unreachable() -> Slot<K> {
        Slot {
            edge: None,
            weight: K::minus_infinity(),
        }
    }

    /// Slot of the designated start node.
    pub fn start() -> Slot<K> {
        Slot {
            edge: None,
            weight: K::zero(),
        }
    }
}

/// Two adjacent rows of slots, indexed by `(right, cell rank)` relative to the walk's
/// grid origin. Advancing recycles the older row's storage; slots of rows that slid out
/// of the window are gone.
#[derive(Debug)]
pub(crate) struct RowWindow<K> {
    prev: Vec<Slot<K>>,
    cur: Vec<Slot<K>>,
    prev_down: Option<usize>,
    cur_down: usize,
    base_right: usize,
    depth_cnt: usize,
}

impl<K: Measure> RowWindow<K> {
    pub(crate) fn new(
        width: usize,
        base_right: usize,
        depth_cnt: usize,
        start_down: usize,
    ) -> RowWindow<K> {
        RowWindow {
            prev: vec![Slot::unreachable(); width],
            cur: vec![Slot::unreachable(); width],
            prev_down: None,
            cur_down: start_down,
            base_right,
            depth_cnt,
        }
    }

    #[inline]
    fn index(&self, node: Node) -> usize {
        let rank = if self.depth_cnt == 1 {
            0
        } else {
            node.layer.cell_rank()
        };
        (node.right - self.base_right) * self.depth_cnt + rank
    }

    /// Make `down` the current row; the old current row becomes the previous one.
    pub(crate) fn advance(&mut self, down: usize) {
        core::mem::swap(&mut self.prev, &mut self.cur);
        self.prev_down = Some(self.cur_down);
        self.cur_down = down;
        self.cur.fill(Slot::unreachable());
    }

    pub(crate) fn get(&self, node: Node) -> Option<&Slot<K>> {
        if node.down == self.cur_down {
            self.cur.get(self.index(node))
        } else if Some(node.down) == self.prev_down {
            self.prev.get(self.index(node))
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, node: Node) -> Option<&mut Slot<K>> {
        let index = self.index(node);
        if node.down == self.cur_down {
            self.cur.get_mut(index)
        } else if Some(node.down) == self.prev_down {
            self.prev.get_mut(index)
        } else {
            None
        }
    }
}

/// Slots of the resident nodes, keyed by node, iterable in insertion order.
#[derive(Debug)]
pub(crate) struct ResidentTable<K> {
    slots: IndexMap<Node, Slot<K>, DefaultHashBuilder>,
}

impl<K: Measure> ResidentTable<K> {
    pub(crate) fn new(residents: NodeList) -> ResidentTable<K> {
        let mut slots = IndexMap::with_capacity_and_hasher(residents.len(), Default::default());
        for node in residents {
            slots.insert(node, Slot::unreachable());
        }
        ResidentTable { slots }
    }

    pub(crate) fn contains(&self, node: Node) -> bool {
        self.slots.contains_key(&node)
    }

    pub(crate) fn get(&self, node: Node) -> Option<&Slot<K>> {
        self.slots.get(&node)
    }

    pub(crate) fn get_mut(&mut self, node: Node) -> Option<&mut Slot<K>> {
        self.slots.get_mut(&node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Layer;

    #[test]
    fn window_tracks_two_rows() {
        let mut window: RowWindow<f64> = RowWindow::new(4, 0, 1, 0);
        window.get_mut(Node::new(0, 2)).unwrap().weight = 5.0;
        window.advance(1);
        assert_eq!(window.get(Node::new(0, 2)).unwrap().weight, 5.0);
        assert_eq!(
            window.get(Node::new(1, 2)).unwrap().weight,
            f64::minus_infinity()
        );
        window.advance(2);
        // row 0 slid out
        assert!(window.get(Node::new(0, 2)).is_none());
        assert!(window.get(Node::new(1, 2)).is_some());
    }

    #[inline]
    fn idx_probe(window: &RowWindow<f64>, node: Node) -> usize {
        window.index(node)
    }

    #[test]
    fn layered_indexing_orders_gap_layers_first() {
        let window: RowWindow<f64> = RowWindow::new(9, 1, 3, 0);
        let cell = 1;
        let a = idx_probe(&window, Node::in_layer(Layer::InsertDown, 0, cell + 1));
        let b = idx_probe(&window, Node::in_layer(Layer::InsertRight, 0, cell + 1));
        let c = idx_probe(&window, Node::new(0, cell + 1));
        assert!(a < b && b < c);
        assert!(c < 9);
    }

    #[test]
    fn resident_table_round_trip() {
        let mut residents = NodeList::new();
        residents.push(Node::new(0, 0));
        residents.push(Node::new(3, 3));
        let mut table: ResidentTable<f64> = ResidentTable::new(residents);
        assert!(table.contains(Node::new(0, 0)));
        assert!(!table.contains(Node::new(1, 1)));
        table.get_mut(Node::new(3, 3)).unwrap().weight = 2.0;
        assert_eq!(table.get(Node::new(3, 3)).unwrap().weight, 2.0);
    }
}

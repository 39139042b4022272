//! Local (Smith–Waterman) alignment graph: free-rides let the optimal path skip any
//! prefix and suffix of both sequences, so the root reaches every node and every node
//! reaches the leaf.

use core::marker::PhantomData;

use crate::graph::{
    is_normal_step, normal_inputs, normal_outputs, AdjacentEdges, AlignmentGraph, EdgesIter,
    FreeRideIter, GridNodes, NodeList, NormalEdges, RowNodes,
};
use crate::grid::{Edge, EdgeKind, Layer, Node};
use crate::measure::Measure;
use crate::scorer::Scorer;
use crate::sequence::Sequence;

/// Alignment graph for local alignment.
pub struct LocalGraph<'a, V: ?Sized, W: ?Sized, SS, GS, FS, K> {
    v: &'a V,
    w: &'a W,
    substitution: SS,
    gap: GS,
    freeride: FS,
    down_cnt: usize,
    right_cnt: usize,
    _weight: PhantomData<K>,
}

impl<'a, V, W, SS, GS, FS, K> LocalGraph<'a, V, W, SS, GS, FS, K>
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
{
    pub fn new(v: &'a V, w: &'a W, substitution: SS, gap: GS, freeride: FS) -> Self {
        LocalGraph {
            down_cnt: v.len() + 1,
            right_cnt: w.len() + 1,
            v,
            w,
            substitution,
            gap,
            freeride,
            _weight: PhantomData,
        }
    }

    /// Longest path: all gaps plus the entry and exit free-rides.
    pub const fn max_path_edge_count(down_cnt: usize, right_cnt: usize) -> usize {
        (down_cnt - 1) + (right_cnt - 1) + 2
    }

    pub const fn max_slice_nodes_cnt(_down_cnt: usize, right_cnt: usize) -> usize {
        right_cnt
    }
}

impl<'a, V, W, SS, GS, FS, K> AlignmentGraph for &'a LocalGraph<'a, V, W, SS, GS, FS, K>
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K>,
    GS: Scorer<V::Elem, W::Elem, K>,
    FS: Scorer<V::Elem, W::Elem, K>,
    K: Measure,
{
    type K = K;
    type Nodes = GridNodes;
    type Edges = EdgesIter;
    type Inputs = AdjacentEdges;
    type Outputs = AdjacentEdges;
    type RowNodes = RowNodes;

    fn grid_down_cnt(self) -> usize {
        self.down_cnt
    }

    fn grid_right_cnt(self) -> usize {
        self.right_cnt
    }

    fn grid_depth_cnt(self) -> usize {
        1
    }

    fn root_node(self) -> Node {
        Node::new(0, 0)
    }

    fn leaf_node(self) -> Node {
        Node::new(self.down_cnt - 1, self.right_cnt - 1)
    }

    fn has_node(self, node: Node) -> bool {
        node.layer == Layer::Diagonal && node.down < self.down_cnt && node.right < self.right_cnt
    }

    fn has_edge(self, edge: &Edge) -> bool {
        match edge.kind {
            EdgeKind::Normal => is_normal_step(edge, self.down_cnt, self.right_cnt),
            EdgeKind::FreeRide => {
                let (root, leaf) = (self.root_node(), self.leaf_node());
                let in_bounds = self.has_node(edge.source) && self.has_node(edge.destination);
                in_bounds
                    && ((edge.source == root && edge.destination != root)
                        || (edge.destination == leaf && edge.source != leaf))
            }
        }
    }

    fn nodes(self) -> GridNodes {
        GridNodes::all(self.down_cnt, self.right_cnt)
    }

    fn edges(self) -> EdgesIter {
        let (root, leaf) = (self.root_node(), self.leaf_node());
        // the root→leaf ride is carried by the entry family; trim it off the exit family
        let mut exits = FreeRideIter::box_to_leaf(leaf, root, leaf);
        exits.next();
        EdgesIter::new(
            NormalEdges::new(self.down_cnt, self.right_cnt),
            FreeRideIter::root_to_box(root, root, leaf),
            exits,
        )
    }

    fn inputs(self, node: Node) -> AdjacentEdges {
        self.inputs_bounded(node, self.root_node(), self.leaf_node())
    }

    fn outputs(self, node: Node) -> AdjacentEdges {
        self.outputs_bounded(node, self.root_node(), self.leaf_node())
    }

    // The leaf's fan-in (and the root's fan-out) covers the whole grid; a bounded view
    // generates only the requested box instead of filtering the full family.
    fn inputs_bounded(self, node: Node, from: Node, to: Node) -> AdjacentEdges {
        debug_assert!(self.has_node(node));
        let (root, leaf) = (self.root_node(), self.leaf_node());
        let frees = if node == leaf {
            FreeRideIter::box_to_leaf(leaf, from, to)
        } else if node != root {
            FreeRideIter::single(Edge::free_ride(root, node))
        } else {
            FreeRideIter::empty()
        };
        AdjacentEdges::new(
            normal_inputs(node, self.down_cnt, self.right_cnt),
            frees,
            FreeRideIter::empty(),
        )
    }

    fn outputs_bounded(self, node: Node, from: Node, to: Node) -> AdjacentEdges {
        debug_assert!(self.has_node(node));
        let (root, leaf) = (self.root_node(), self.leaf_node());
        let frees = if node == root {
            FreeRideIter::root_to_box(root, from, to)
        } else if node != leaf {
            FreeRideIter::single(Edge::free_ride(node, leaf))
        } else {
            FreeRideIter::empty()
        };
        AdjacentEdges::new(
            normal_outputs(node, self.down_cnt, self.right_cnt),
            frees,
            FreeRideIter::empty(),
        )
    }

    fn edge_weight(self, edge: &Edge) -> K {
        debug_assert!(self.has_edge(edge));
        if edge.kind == EdgeKind::FreeRide {
            return self.freeride.score(edge, None, None);
        }
        let (d_off, r_off) = edge.element_offsets();
        let d_elem = d_off.map(|i| self.v.get(i));
        let r_elem = r_off.map(|i| self.w.get(i));
        if d_elem.is_some() && r_elem.is_some() {
            self.substitution.score(edge, d_elem, r_elem)
        } else {
            self.gap.score(edge, d_elem, r_elem)
        }
    }

    fn row_nodes(self, down: usize) -> RowNodes {
        debug_assert!(down < self.down_cnt);
        RowNodes::new(down, 0..self.right_cnt)
    }

    fn nodes_bounded(self, from: Node, to: Node) -> GridNodes {
        GridNodes::boxed(from, to)
    }

    fn row_nodes_bounded(self, down: usize, from: Node, to: Node) -> RowNodes {
        RowNodes::new(down, from.right..to.right + 1)
    }

    fn resident_nodes(self) -> NodeList {
        let mut residents = NodeList::new();
        residents.push(self.root_node());
        residents.push(self.leaf_node());
        residents
    }
}

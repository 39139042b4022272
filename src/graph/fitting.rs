//! Fitting alignment graph: all of `w` is aligned inside a substring of `v`. Free-rides
//! skip a prefix of `v` (root into column 0) and a suffix of `v` (last column into the
//! leaf).

use core::marker::PhantomData;

use crate::graph::{
    is_normal_step, normal_inputs, normal_outputs, AdjacentEdges, AlignmentGraph, EdgesIter,
    FreeRideIter, GridNodes, NodeList, NormalEdges, RowNodes,
};
use crate::grid::{Edge, EdgeKind, Layer, Node};
use crate::measure::Measure;
use crate::scorer::Scorer;
use crate::sequence::Sequence;

/// Alignment graph for fitting alignment.
pub struct FittingGraph<'a, V: ?Sized, W: ?Sized, SS, GS, FS, K> {
    v: &'a V,
    w: &'a W,
    substitution: SS,
    gap: GS,
    freeride: FS,
    down_cnt: usize,
    right_cnt: usize,
    _weight: PhantomData<K>,
}

impl<'a, V, W, SS, GS, FS, K> FittingGraph<'a, V, W, SS, GS, FS, K>
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
{
    pub fn new(v: &'a V, w: &'a W, substitution: SS, gap: GS, freeride: FS) -> Self {
        FittingGraph {
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

    pub const fn max_path_edge_count(down_cnt: usize, right_cnt: usize) -> usize {
        (down_cnt - 1) + (right_cnt - 1) + 2
    }

    pub const fn max_slice_nodes_cnt(_down_cnt: usize, right_cnt: usize) -> usize {
        right_cnt
    }
}

impl<'a, V, W, SS, GS, FS, K> AlignmentGraph for &'a FittingGraph<'a, V, W, SS, GS, FS, K>
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
                    && ((edge.source == root
                        && edge.destination.right == 0
                        && edge.destination != root)
                        || (edge.destination == leaf
                            && edge.source.right == self.right_cnt - 1
                            && edge.source != leaf))
            }
        }
    }

    fn nodes(self) -> GridNodes {
        GridNodes::all(self.down_cnt, self.right_cnt)
    }

    fn edges(self) -> EdgesIter {
        EdgesIter::new(
            NormalEdges::new(self.down_cnt, self.right_cnt),
            FreeRideIter::root_to_column(1..self.down_cnt, 0, self.root_node()),
            FreeRideIter::column_to_leaf(
                0..self.down_cnt - 1,
                self.right_cnt - 1,
                self.leaf_node(),
            ),
        )
    }

    fn inputs(self, node: Node) -> AdjacentEdges {
        self.inputs_bounded(node, self.root_node(), self.leaf_node())
    }

    fn outputs(self, node: Node) -> AdjacentEdges {
        self.outputs_bounded(node, self.root_node(), self.leaf_node())
    }

    // The leaf's exit column (and the root's entry column) spans every row; bounded
    // views clip the row range to the box at generation time.
    fn inputs_bounded(self, node: Node, from: Node, to: Node) -> AdjacentEdges {
        debug_assert!(self.has_node(node));
        let (root, leaf) = (self.root_node(), self.leaf_node());
        let entry = if node.right == 0 && node != root {
            FreeRideIter::single(Edge::free_ride(root, node))
        } else {
            FreeRideIter::empty()
        };
        let exit = if node == leaf {
            let tail = (to.down + 1).min(self.down_cnt - 1);
            FreeRideIter::column_to_leaf(from.down..tail, self.right_cnt - 1, leaf)
        } else {
            FreeRideIter::empty()
        };
        AdjacentEdges::new(
            normal_inputs(node, self.down_cnt, self.right_cnt),
            entry,
            exit,
        )
    }

    fn outputs_bounded(self, node: Node, from: Node, to: Node) -> AdjacentEdges {
        debug_assert!(self.has_node(node));
        let (root, leaf) = (self.root_node(), self.leaf_node());
        let entry = if node == root {
            let head = from.down.max(1);
            FreeRideIter::root_to_column(head..to.down + 1, 0, root)
        } else {
            FreeRideIter::empty()
        };
        let exit = if node.right == self.right_cnt - 1 && node != leaf {
            FreeRideIter::single(Edge::free_ride(node, leaf))
        } else {
            FreeRideIter::empty()
        };
        AdjacentEdges::new(
            normal_outputs(node, self.down_cnt, self.right_cnt),
            entry,
            exit,
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

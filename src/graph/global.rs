//! Global (Needleman–Wunsch) alignment graph: every element of both sequences is
//! consumed, so the grid carries normal edges only and has no residents.

use core::marker::PhantomData;

use crate::graph::{
    is_normal_step, normal_inputs, normal_outputs, AlignmentGraph, EdgeListIter,
    GridNodes, NodeList, NormalEdges, RowNodes,
};
use crate::grid::{Edge, Node};
use crate::measure::Measure;
use crate::scorer::Scorer;
use crate::sequence::Sequence;

/// Alignment graph for global alignment.
///
/// # Example
/// ```
/// use gridalign::graph::{AlignmentGraph, GlobalGraph};
/// use gridalign::SimpleScorer;
///
/// let v = "ab";
/// let w = "ab";
/// let g = GlobalGraph::<_, _, _, _, f64>::new(
///     v,
///     w,
///     SimpleScorer::substitution(1.0, -1.0),
///     SimpleScorer::gap(-1.0),
/// );
/// assert_eq!((&g).grid_down_cnt(), 3);
/// assert_eq!((&g).in_degree((&g).leaf_node()), 3);
/// ```
pub struct GlobalGraph<'a, V: ?Sized, W: ?Sized, SS, GS, K> {
    v: &'a V,
    w: &'a W,
    substitution: SS,
    gap: GS,
    down_cnt: usize,
    right_cnt: usize,
    _weight: PhantomData<K>,
}

impl<'a, V, W, SS, GS, K> GlobalGraph<'a, V, W, SS, GS, K>
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
{
    pub fn new(v: &'a V, w: &'a W, substitution: SS, gap: GS) -> Self {
        GlobalGraph {
            down_cnt: v.len() + 1,
            right_cnt: w.len() + 1,
            v,
            w,
            substitution,
            gap,
            _weight: PhantomData,
        }
    }

    /// Edge count of the longest possible root-to-leaf path.
    pub const fn max_path_edge_count(down_cnt: usize, right_cnt: usize) -> usize {
        (down_cnt - 1) + (right_cnt - 1)
    }

    /// Node count of the widest row slice.
    pub const fn max_slice_nodes_cnt(_down_cnt: usize, right_cnt: usize) -> usize {
        right_cnt
    }
}

impl<'a, V, W, SS, GS, K> AlignmentGraph for &'a GlobalGraph<'a, V, W, SS, GS, K>
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K>,
    GS: Scorer<V::Elem, W::Elem, K>,
    K: Measure,
{
    type K = K;
    type Nodes = GridNodes;
    type Edges = NormalEdges;
    type Inputs = EdgeListIter;
    type Outputs = EdgeListIter;
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
        node.layer == crate::grid::Layer::Diagonal
            && node.down < self.down_cnt
            && node.right < self.right_cnt
    }

    fn has_edge(self, edge: &Edge) -> bool {
        is_normal_step(edge, self.down_cnt, self.right_cnt)
    }

    fn nodes(self) -> GridNodes {
        GridNodes::all(self.down_cnt, self.right_cnt)
    }

    fn edges(self) -> NormalEdges {
        NormalEdges::new(self.down_cnt, self.right_cnt)
    }

    fn inputs(self, node: Node) -> EdgeListIter {
        debug_assert!(self.has_node(node));
        normal_inputs(node, self.down_cnt, self.right_cnt).into_iter()
    }

    fn outputs(self, node: Node) -> EdgeListIter {
        debug_assert!(self.has_node(node));
        normal_outputs(node, self.down_cnt, self.right_cnt).into_iter()
    }

    fn edge_weight(self, edge: &Edge) -> K {
        debug_assert!(self.has_edge(edge));
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
        NodeList::new()
    }

    fn in_degree(self, node: Node) -> usize {
        normal_inputs(node, self.down_cnt, self.right_cnt).len()
    }

    fn out_degree(self, node: Node) -> usize {
        normal_outputs(node, self.down_cnt, self.right_cnt).len()
    }
}

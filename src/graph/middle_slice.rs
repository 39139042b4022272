//! Componentwise-bounded view of an alignment graph.
//!
//! The subdivider recovers path segments by repeatedly bounding the graph between two
//! nodes on the optimal path. A [`MiddleSlice`] restricts every operation to the box
//! `from ≤ n ≤ to` (componentwise on `down`/`right`); the bounded `from` acts as the
//! root and `to` as the leaf. Free-rides survive only when both endpoints stay inside,
//! which strips entry/exit hops off interior slices.

use crate::graph::{AlignmentGraph, NodeList};
use crate::grid::{Edge, Node};

/// A bounded view of `G` between two of its nodes.
#[derive(Clone, Copy, Debug)]
pub struct MiddleSlice<G> {
    graph: G,
    from: Node,
    to: Node,
}

impl<G: AlignmentGraph> MiddleSlice<G> {
    pub fn new(graph: G, from: Node, to: Node) -> MiddleSlice<G> {
        debug_assert!(graph.has_node(from) && graph.has_node(to));
        debug_assert!(from.down <= to.down && from.right <= to.right);
        MiddleSlice { graph, from, to }
    }

    #[inline]
    fn contains(&self, node: Node) -> bool {
        node.down >= self.from.down
            && node.down <= self.to.down
            && node.right >= self.from.right
            && node.right <= self.to.right
    }

    #[inline]
    fn contains_edge(&self, edge: &Edge) -> bool {
        self.contains(edge.source) && self.contains(edge.destination)
    }

    /// Intersect a requested box with this slice's own.
    #[inline]
    fn clamp_box(&self, from: Node, to: Node) -> (Node, Node) {
        let from = Node {
            down: from.down.max(self.from.down),
            right: from.right.max(self.from.right),
            layer: from.layer,
        };
        let to = Node {
            down: to.down.min(self.to.down),
            right: to.right.min(self.to.right),
            layer: to.layer,
        };
        debug_assert!(from.down <= to.down && from.right <= to.right);
        (from, to)
    }
}

impl<G: AlignmentGraph> AlignmentGraph for MiddleSlice<G> {
    type K = G::K;
    type Nodes = SliceNodes<G::Nodes>;
    type Edges = SliceEdges<G::Edges>;
    type Inputs = SliceEdges<G::Inputs>;
    type Outputs = SliceEdges<G::Outputs>;
    type RowNodes = SliceNodes<G::RowNodes>;

    fn grid_down_cnt(self) -> usize {
        self.to.down - self.from.down + 1
    }

    fn grid_right_cnt(self) -> usize {
        self.to.right - self.from.right + 1
    }

    fn grid_depth_cnt(self) -> usize {
        self.graph.grid_depth_cnt()
    }

    fn root_node(self) -> Node {
        self.from
    }

    fn leaf_node(self) -> Node {
        self.to
    }

    fn has_node(self, node: Node) -> bool {
        self.contains(node) && self.graph.has_node(node)
    }

    fn has_edge(self, edge: &Edge) -> bool {
        self.contains_edge(edge) && self.graph.has_edge(edge)
    }

    fn nodes(self) -> Self::Nodes {
        SliceNodes {
            inner: self.graph.nodes_bounded(self.from, self.to),
            slice: SliceBounds::of(&self),
        }
    }

    fn edges(self) -> Self::Edges {
        SliceEdges {
            inner: self.graph.edges(),
            slice: SliceBounds::of(&self),
        }
    }

    // Adjacency goes through the bounded variants so a box that happens to share the
    // underlying root or leaf never regenerates that node's whole-grid free-ride
    // family; the residual filter only clips normal edges at the box border.
    fn inputs(self, node: Node) -> Self::Inputs {
        debug_assert!(self.has_node(node));
        SliceEdges {
            inner: self.graph.inputs_bounded(node, self.from, self.to),
            slice: SliceBounds::of(&self),
        }
    }

    fn outputs(self, node: Node) -> Self::Outputs {
        debug_assert!(self.has_node(node));
        SliceEdges {
            inner: self.graph.outputs_bounded(node, self.from, self.to),
            slice: SliceBounds::of(&self),
        }
    }

    fn edge_weight(self, edge: &Edge) -> G::K {
        debug_assert!(self.has_edge(edge));
        self.graph.edge_weight(edge)
    }

    fn row_nodes(self, down: usize) -> Self::RowNodes {
        debug_assert!(down >= self.from.down && down <= self.to.down);
        SliceNodes {
            inner: self.graph.row_nodes_bounded(down, self.from, self.to),
            slice: SliceBounds::of(&self),
        }
    }

    // Nested slices intersect the boxes and hand the tightened box to the underlying
    // graph, so bounding stays box-proportional at any nesting depth.
    fn nodes_bounded(self, from: Node, to: Node) -> Self::Nodes {
        let (from, to) = self.clamp_box(from, to);
        SliceNodes {
            inner: self.graph.nodes_bounded(from, to),
            slice: SliceBounds::of(&self),
        }
    }

    fn row_nodes_bounded(self, down: usize, from: Node, to: Node) -> Self::RowNodes {
        let (from, to) = self.clamp_box(from, to);
        SliceNodes {
            inner: self.graph.row_nodes_bounded(down, from, to),
            slice: SliceBounds::of(&self),
        }
    }

    fn inputs_bounded(self, node: Node, from: Node, to: Node) -> Self::Inputs {
        let (from, to) = self.clamp_box(from, to);
        SliceEdges {
            inner: self.graph.inputs_bounded(node, from, to),
            slice: SliceBounds::of(&self),
        }
    }

    fn outputs_bounded(self, node: Node, from: Node, to: Node) -> Self::Outputs {
        let (from, to) = self.clamp_box(from, to);
        SliceEdges {
            inner: self.graph.outputs_bounded(node, from, to),
            slice: SliceBounds::of(&self),
        }
    }

    fn resident_nodes(self) -> NodeList {
        let mut residents = NodeList::new();
        for node in self.graph.resident_nodes() {
            if self.contains(node) {
                residents.push(node);
            }
        }
        residents
    }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct SliceBounds {
    down_lo: usize,
    down_hi: usize,
    right_lo: usize,
    right_hi: usize,
}

impl SliceBounds {
    fn of<G: AlignmentGraph>(slice: &MiddleSlice<G>) -> SliceBounds {
        SliceBounds {
            down_lo: slice.from.down,
            down_hi: slice.to.down,
            right_lo: slice.from.right,
            right_hi: slice.to.right,
        }
    }

    #[inline]
    fn contains(&self, node: Node) -> bool {
        node.down >= self.down_lo
            && node.down <= self.down_hi
            && node.right >= self.right_lo
            && node.right <= self.right_hi
    }
}

/// Node iterator filtered to a slice's box.
#[derive(Clone, Debug)]
pub struct SliceNodes<I> {
    inner: I,
    slice: SliceBounds,
}

impl<I: Iterator<Item = Node>> Iterator for SliceNodes<I> {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        let bounds = self.slice;
        self.inner.by_ref().find(|n| bounds.contains(*n))
    }
}

impl<I: DoubleEndedIterator<Item = Node>> DoubleEndedIterator for SliceNodes<I> {
    fn next_back(&mut self) -> Option<Node> {
        let bounds = self.slice;
        while let Some(node) = self.inner.next_back() {
            if bounds.contains(node) {
                return Some(node);
            }
        }
        None
    }
}

/// Edge iterator filtered to edges with both endpoints inside a slice's box.
#[derive(Clone, Debug)]
pub struct SliceEdges<I> {
    inner: I,
    slice: SliceBounds,
}

impl<I: Iterator<Item = Edge>> Iterator for SliceEdges<I> {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        let bounds = self.slice;
        self.inner
            .by_ref()
            .find(|e| bounds.contains(e.source) && bounds.contains(e.destination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::LocalGraph;
    use crate::grid::EdgeKind;
    use crate::scorer::SimpleScorer;
    use alloc::vec::Vec;

    fn local() -> LocalGraph<
        'static,
        str,
        str,
        SimpleScorer<f64>,
        SimpleScorer<f64>,
        SimpleScorer<f64>,
        f64,
    > {
        LocalGraph::new(
            "abcde",
            "vwxyz",
            SimpleScorer::substitution(1.0, -1.0),
            SimpleScorer::gap(-1.0),
            SimpleScorer::freeride(0.0),
        )
    }

    #[test]
    fn interior_slice_has_no_free_rides() {
        let g = local();
        let slice = (&g).middle_slice(Node::new(1, 1), Node::new(4, 4));
        assert_eq!(slice.grid_down_cnt(), 4);
        assert_eq!(slice.root_node(), Node::new(1, 1));
        assert!(slice.edges().all(|e| e.kind == EdgeKind::Normal));
        assert!(slice.resident_nodes().is_empty());
        // the slice root behaves like a root
        assert_eq!(slice.in_degree(Node::new(1, 1)), 0);
        assert_eq!(slice.out_degree(Node::new(4, 4)), 0);
    }

    #[test]
    fn root_anchored_slice_keeps_entry_free_rides() {
        let g = local();
        let slice = (&g).middle_slice(Node::new(0, 0), Node::new(3, 3));
        let frees: Vec<_> = slice
            .edges()
            .filter(|e| e.kind == EdgeKind::FreeRide)
            .collect();
        // root → every other node of the 4x4 box; leaf-bound rides all left the box
        assert_eq!(frees.len(), 15);
        assert!(frees.iter().all(|e| e.source == Node::new(0, 0)));
        let residents: Vec<_> = slice.resident_nodes().into_iter().collect();
        assert_eq!(residents, alloc::vec![Node::new(0, 0)]);
    }

    #[test]
    fn row_iteration_is_clipped() {
        let g = local();
        let slice = (&g).middle_slice(Node::new(1, 2), Node::new(4, 4));
        let row: Vec<_> = slice.row_nodes(2).collect();
        assert_eq!(row.len(), 3);
        assert_eq!(row[0], Node::new(2, 2));
        assert_eq!(row[2], Node::new(2, 4));
        let rev: Vec<_> = slice.row_nodes(2).rev().collect();
        assert_eq!(rev[0], Node::new(2, 4));
    }

    #[test]
    fn adjacency_is_clipped() {
        let g = local();
        let slice = (&g).middle_slice(Node::new(1, 1), Node::new(4, 4));
        let inputs: Vec<_> = slice.inputs(Node::new(2, 1)).collect();
        // only the down-gap from (1,1) survives; left and diagonal sources are outside
        assert_eq!(inputs.len(), 1);
        assert_eq!(inputs[0].source, Node::new(1, 1));
    }

    #[test]
    fn anchored_slices_scope_the_endpoint_families_to_the_box() {
        let g = local();
        let root = Node::new(0, 0);
        let slice = (&g).middle_slice(root, Node::new(2, 2));
        // the root's fan-out inside the slice is the 3x3 box, nothing beyond it
        let frees: Vec<_> = slice
            .outputs(root)
            .filter(|e| e.kind == EdgeKind::FreeRide)
            .collect();
        assert_eq!(frees.len(), 8);
        assert!(frees
            .iter()
            .all(|e| e.destination.down <= 2 && e.destination.right <= 2));
        let leaf = Node::new(5, 5);
        let slice = (&g).middle_slice(Node::new(3, 3), leaf);
        let frees: Vec<_> = slice
            .inputs(leaf)
            .filter(|e| e.kind == EdgeKind::FreeRide)
            .collect();
        assert_eq!(frees.len(), 8);
        assert!(frees.iter().all(|e| e.source.down >= 3 && e.source.right >= 3));
    }

    #[test]
    fn nested_slices_intersect_their_boxes() {
        let g = local();
        let outer = (&g).middle_slice(Node::new(0, 0), Node::new(4, 4));
        let inner = outer.middle_slice(Node::new(0, 0), Node::new(2, 2));
        assert_eq!(inner.nodes().count(), 9);
        let frees: Vec<_> = inner
            .outputs(Node::new(0, 0))
            .filter(|e| e.kind == EdgeKind::FreeRide)
            .collect();
        assert_eq!(frees.len(), 8);
        let row: Vec<_> = inner.row_nodes(1).collect();
        assert_eq!(row.len(), 3);
        assert_eq!(row[0], Node::new(1, 0));
        assert_eq!(row[2], Node::new(1, 2));
    }
}

//! Four-layer affine-gap alignment graph.
//!
//! Gap runs pay an opening weight once and an extension weight per further element. The
//! grid is tripled: the diagonal layer holds match states, one insert layer per gap
//! direction holds running gaps. Opening crosses from the diagonal layer into an insert
//! layer (consuming one element), extending stays inside it, and closing crosses back
//! within the same cell as a zero-weight free-ride.

use core::marker::PhantomData;
use core::ops::Range;

use crate::graph::{AlignmentGraph, EdgeList, EdgeListIter, NodeList};
use crate::grid::{Edge, EdgeKind, Layer, Node};
use crate::measure::Measure;
use crate::scorer::Scorer;
use crate::sequence::Sequence;

/// Alignment graph for global alignment with affine (open + extend) gap weights.
pub struct ExtendedGapGraph<'a, V: ?Sized, W: ?Sized, SS, OS, ES, K> {
    v: &'a V,
    w: &'a W,
    substitution: SS,
    gap_open: OS,
    gap_extend: ES,
    down_cnt: usize,
    right_cnt: usize,
    _weight: PhantomData<K>,
}

impl<'a, V, W, SS, OS, ES, K> ExtendedGapGraph<'a, V, W, SS, OS, ES, K>
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
{
    pub fn new(v: &'a V, w: &'a W, substitution: SS, gap_open: OS, gap_extend: ES) -> Self {
        ExtendedGapGraph {
            down_cnt: v.len() + 1,
            right_cnt: w.len() + 1,
            v,
            w,
            substitution,
            gap_open,
            gap_extend,
            _weight: PhantomData,
        }
    }

    /// Longest path: every consumed element can cost a gap edge plus a close edge.
    pub const fn max_path_edge_count(down_cnt: usize, right_cnt: usize) -> usize {
        2 * (down_cnt - 1) + 2 * (right_cnt - 1)
    }

    pub const fn max_slice_nodes_cnt(_down_cnt: usize, right_cnt: usize) -> usize {
        right_cnt * 3
    }
}

fn layer_exists(layer: Layer, down: usize, right: usize) -> bool {
    match layer {
        Layer::Diagonal => true,
        Layer::InsertDown => down >= 1,
        Layer::InsertRight => right >= 1,
    }
}

fn extended_inputs(node: Node, _down_cnt: usize, _right_cnt: usize) -> EdgeList {
    let mut list = EdgeList::new();
    let Node { down, right, layer } = node;
    match layer {
        Layer::Diagonal => {
            if down > 0 && right > 0 {
                list.push(Edge::normal(Node::new(down - 1, right - 1), node));
            }
            if down > 0 {
                list.push(Edge::free_ride(
                    Node::in_layer(Layer::InsertDown, down, right),
                    node,
                ));
            }
            if right > 0 {
                list.push(Edge::free_ride(
                    Node::in_layer(Layer::InsertRight, down, right),
                    node,
                ));
            }
        }
        Layer::InsertDown => {
            list.push(Edge::normal(Node::new(down - 1, right), node));
            if down > 1 {
                list.push(Edge::normal(
                    Node::in_layer(Layer::InsertDown, down - 1, right),
                    node,
                ));
            }
        }
        Layer::InsertRight => {
            list.push(Edge::normal(Node::new(down, right - 1), node));
            if right > 1 {
                list.push(Edge::normal(
                    Node::in_layer(Layer::InsertRight, down, right - 1),
                    node,
                ));
            }
        }
    }
    list
}

fn extended_outputs(node: Node, down_cnt: usize, right_cnt: usize) -> EdgeList {
    let mut list = EdgeList::new();
    let Node { down, right, layer } = node;
    match layer {
        Layer::Diagonal => {
            if down + 1 < down_cnt && right + 1 < right_cnt {
                list.push(Edge::normal(node, Node::new(down + 1, right + 1)));
            }
            if down + 1 < down_cnt {
                list.push(Edge::normal(
                    node,
                    Node::in_layer(Layer::InsertDown, down + 1, right),
                ));
            }
            if right + 1 < right_cnt {
                list.push(Edge::normal(
                    node,
                    Node::in_layer(Layer::InsertRight, down, right + 1),
                ));
            }
        }
        Layer::InsertDown => {
            list.push(Edge::free_ride(node, Node::new(down, right)));
            if down + 1 < down_cnt {
                list.push(Edge::normal(
                    node,
                    Node::in_layer(Layer::InsertDown, down + 1, right),
                ));
            }
        }
        Layer::InsertRight => {
            list.push(Edge::free_ride(node, Node::new(down, right)));
            if right + 1 < right_cnt {
                list.push(Edge::normal(
                    node,
                    Node::in_layer(Layer::InsertRight, down, right + 1),
                ));
            }
        }
    }
    list
}

impl<'a, V, W, SS, OS, ES, K> AlignmentGraph for &'a ExtendedGapGraph<'a, V, W, SS, OS, ES, K>
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K>,
    OS: Scorer<V::Elem, W::Elem, K>,
    ES: Scorer<V::Elem, W::Elem, K>,
    K: Measure,
{
    type K = K;
    type Nodes = ExtendedNodes;
    type Edges = ExtendedEdges;
    type Inputs = EdgeListIter;
    type Outputs = EdgeListIter;
    type RowNodes = ExtendedRowNodes;

    fn grid_down_cnt(self) -> usize {
        self.down_cnt
    }

    fn grid_right_cnt(self) -> usize {
        self.right_cnt
    }

    fn grid_depth_cnt(self) -> usize {
        3
    }

    fn root_node(self) -> Node {
        Node::new(0, 0)
    }

    fn leaf_node(self) -> Node {
        Node::new(self.down_cnt - 1, self.right_cnt - 1)
    }

    fn has_node(self, node: Node) -> bool {
        node.down < self.down_cnt
            && node.right < self.right_cnt
            && layer_exists(node.layer, node.down, node.right)
    }

    fn has_edge(self, edge: &Edge) -> bool {
        if !self.has_node(edge.source) || !self.has_node(edge.destination) {
            return false;
        }
        let (s, d) = (edge.source, edge.destination);
        let step_down = d.down == s.down + 1 && d.right == s.right;
        let step_right = d.right == s.right + 1 && d.down == s.down;
        let step_diag = d.down == s.down + 1 && d.right == s.right + 1;
        let same_cell = d.down == s.down && d.right == s.right;
        match (s.layer, d.layer, edge.kind) {
            (Layer::Diagonal, Layer::Diagonal, EdgeKind::Normal) => step_diag,
            (Layer::Diagonal, Layer::InsertDown, EdgeKind::Normal) => step_down,
            (Layer::Diagonal, Layer::InsertRight, EdgeKind::Normal) => step_right,
            (Layer::InsertDown, Layer::InsertDown, EdgeKind::Normal) => step_down,
            (Layer::InsertRight, Layer::InsertRight, EdgeKind::Normal) => step_right,
            (Layer::InsertDown, Layer::Diagonal, EdgeKind::FreeRide) => same_cell,
            (Layer::InsertRight, Layer::Diagonal, EdgeKind::FreeRide) => same_cell,
            _ => false,
        }
    }

    fn nodes(self) -> ExtendedNodes {
        ExtendedNodes::boxed(self.root_node(), self.leaf_node())
    }

    fn edges(self) -> ExtendedEdges {
        ExtendedEdges {
            nodes: self.nodes(),
            down_cnt: self.down_cnt,
            right_cnt: self.right_cnt,
            current: EdgeListIter::empty(),
        }
    }

    fn inputs(self, node: Node) -> EdgeListIter {
        debug_assert!(self.has_node(node));
        extended_inputs(node, self.down_cnt, self.right_cnt).into_iter()
    }

    fn outputs(self, node: Node) -> EdgeListIter {
        debug_assert!(self.has_node(node));
        extended_outputs(node, self.down_cnt, self.right_cnt).into_iter()
    }

    fn edge_weight(self, edge: &Edge) -> K {
        debug_assert!(self.has_edge(edge));
        let (d_off, r_off) = edge.element_offsets();
        let d_elem = d_off.map(|i| self.v.get(i));
        let r_elem = r_off.map(|i| self.w.get(i));
        match (edge.source.layer, edge.destination.layer) {
            (Layer::Diagonal, Layer::Diagonal) => self.substitution.score(edge, d_elem, r_elem),
            (Layer::Diagonal, _) => self.gap_open.score(edge, d_elem, r_elem),
            (Layer::InsertDown, Layer::InsertDown) | (Layer::InsertRight, Layer::InsertRight) => {
                self.gap_extend.score(edge, d_elem, r_elem)
            }
            // gap-close
            _ => K::zero(),
        }
    }

    fn row_nodes(self, down: usize) -> ExtendedRowNodes {
        debug_assert!(down < self.down_cnt);
        ExtendedRowNodes {
            down,
            pos: 0..self.right_cnt * 3,
        }
    }

    fn nodes_bounded(self, from: Node, to: Node) -> ExtendedNodes {
        ExtendedNodes::boxed(from, to)
    }

    fn row_nodes_bounded(self, down: usize, from: Node, to: Node) -> ExtendedRowNodes {
        ExtendedRowNodes {
            down,
            pos: from.right * 3..(to.right + 1) * 3,
        }
    }

    fn resident_nodes(self) -> NodeList {
        let mut residents = NodeList::new();
        residents.push(self.root_node());
        residents.push(self.leaf_node());
        residents
    }
}

/// All nodes of a four-layer node box in topological order.
#[derive(Clone, Debug)]
pub struct ExtendedNodes {
    pos: Range<usize>,
    down_lo: usize,
    right_lo: usize,
    width: usize,
}

impl ExtendedNodes {
    fn boxed(from: Node, to: Node) -> ExtendedNodes {
        let width = to.right - from.right + 1;
        let height = to.down - from.down + 1;
        ExtendedNodes {
            pos: 0..width * height * 3,
            down_lo: from.down,
            right_lo: from.right,
            width,
        }
    }
}

impl Iterator for ExtendedNodes {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        while let Some(p) = self.pos.next() {
            let cell = p / 3;
            let layer = Layer::from_cell_rank(p % 3);
            let down = self.down_lo + cell / self.width;
            let right = self.right_lo + cell % self.width;
            if layer_exists(layer, down, right) {
                return Some(Node::in_layer(layer, down, right));
            }
        }
        None
    }
}

/// All edges of a four-layer graph.
#[derive(Clone, Debug)]
pub struct ExtendedEdges {
    nodes: ExtendedNodes,
    down_cnt: usize,
    right_cnt: usize,
    current: EdgeListIter,
}

impl Iterator for ExtendedEdges {
    type Item = Edge;

    fn next(&mut self) -> Option<Edge> {
        loop {
            if let Some(edge) = self.current.next() {
                return Some(edge);
            }
            let node = self.nodes.next()?;
            self.current = extended_outputs(node, self.down_cnt, self.right_cnt).into_iter();
        }
    }
}

/// One row of a four-layer graph in `(right, cell rank)` order.
#[derive(Clone, Debug)]
pub struct ExtendedRowNodes {
    down: usize,
    pos: Range<usize>,
}

impl ExtendedRowNodes {
    fn decode(&self, p: usize) -> Option<Node> {
        let right = p / 3;
        let layer = Layer::from_cell_rank(p % 3);
        layer_exists(layer, self.down, right).then(|| Node::in_layer(layer, self.down, right))
    }
}

impl Iterator for ExtendedRowNodes {
    type Item = Node;

    fn next(&mut self) -> Option<Node> {
        while let Some(p) = self.pos.next() {
            if let Some(node) = self.decode(p) {
                return Some(node);
            }
        }
        None
    }
}

impl DoubleEndedIterator for ExtendedRowNodes {
    fn next_back(&mut self) -> Option<Node> {
        while let Some(p) = self.pos.next_back() {
            if let Some(node) = self.decode(p) {
                return Some(node);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::SimpleScorer;
    use alloc::vec::Vec;

    type G = ExtendedGapGraph<
        'static,
        str,
        str,
        SimpleScorer<f64>,
        SimpleScorer<f64>,
        SimpleScorer<f64>,
        f64,
    >;

    fn graph() -> G {
        ExtendedGapGraph::new(
            "ab",
            "cd",
            SimpleScorer::substitution(1.0, -1.0),
            SimpleScorer::gap(-4.0),
            SimpleScorer::gap(-1.0),
        )
    }

    #[test]
    fn layer_domains() {
        let g = graph();
        let g = &g;
        assert!(g.has_node(Node::new(0, 0)));
        assert!(!g.has_node(Node::in_layer(Layer::InsertDown, 0, 1)));
        assert!(!g.has_node(Node::in_layer(Layer::InsertRight, 1, 0)));
        assert!(g.has_node(Node::in_layer(Layer::InsertDown, 1, 0)));
        // 3x3 diag + 2x3 insert-down + 3x2 insert-right
        assert_eq!(g.nodes().count(), 9 + 6 + 6);
    }

    #[test]
    fn nodes_enumerate_in_topological_order() {
        let g = graph();
        let g = &g;
        let nodes: Vec<_> = g.nodes().collect();
        assert!(nodes.windows(2).all(|w| w[0] < w[1]));
        for e in g.edges() {
            assert!(e.source < e.destination, "{e}");
        }
    }

    #[test]
    fn gap_run_shape() {
        let g = graph();
        let g = &g;
        // open into the insert-down layer consumes v[0]
        let open = Edge::normal(Node::new(0, 0), Node::in_layer(Layer::InsertDown, 1, 0));
        assert!(g.has_edge(&open));
        assert_eq!(open.element_offsets(), (Some(0), None));
        assert_eq!(g.edge_weight(&open), -4.0);
        // extend consumes v[1]
        let extend = Edge::normal(
            Node::in_layer(Layer::InsertDown, 1, 0),
            Node::in_layer(Layer::InsertDown, 2, 0),
        );
        assert!(g.has_edge(&extend));
        assert_eq!(g.edge_weight(&extend), -1.0);
        // close is free and stays in the cell
        let close = Edge::free_ride(Node::in_layer(Layer::InsertDown, 2, 0), Node::new(2, 0));
        assert!(g.has_edge(&close));
        assert_eq!(g.edge_weight(&close), 0.0);
    }

    #[test]
    fn edge_enumeration_is_consistent_with_adjacency() {
        let g = graph();
        let g = &g;
        let edges: Vec<_> = g.edges().collect();
        for e in &edges {
            assert!(g.has_edge(e), "{e}");
            assert!(g.inputs(e.destination).any(|i| i == *e));
            assert!(g.outputs(e.source).any(|o| o == *e));
        }
        let total: usize = g.nodes().map(|n| g.in_degree(n)).sum();
        assert_eq!(edges.len(), total);
    }

    #[test]
    fn row_iteration_orders_gap_layers_before_diagonal() {
        let g = graph();
        let g = &g;
        let row: Vec<_> = g.row_nodes(1).collect();
        // cell (1,0): insert-down then diagonal; cell (1,1): all three layers
        assert_eq!(row[0], Node::in_layer(Layer::InsertDown, 1, 0));
        assert_eq!(row[1], Node::new(1, 0));
        assert_eq!(row[2], Node::in_layer(Layer::InsertDown, 1, 1));
        assert_eq!(row[3], Node::in_layer(Layer::InsertRight, 1, 1));
        assert_eq!(row[4], Node::new(1, 1));
        assert!(row.windows(2).all(|w| w[0] < w[1]));
    }
}

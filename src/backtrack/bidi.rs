//! Bidirectional walker: a forward and a backward walk converged at one row.
//!
//! For any node in the convergence row (or any resident), the pair of slots gives the
//! best prefix into the node and the best suffix out of it; their sum is the weight of
//! the best root-to-leaf path through that node. The two halves are independent, so they
//! run as one fork/join pair on the work-stealing pool when the `rayon` feature is on.

use crate::backtrack::backward::BackwardWalker;
use crate::backtrack::forward::ForwardWalker;
use crate::backtrack::slot::Slot;
use crate::graph::AlignmentGraph;
use crate::grid::Node;
use crate::par;

/// Forward and backward slots of one node, as returned by [`BidiWalker::find`].
#[derive(Clone, Copy, Debug)]
pub struct BidiSlots<K> {
    pub forward: Slot<K>,
    pub backward: Slot<K>,
}

pub struct BidiWalker<G: AlignmentGraph> {
    forward: ForwardWalker<G>,
    backward: BackwardWalker<G>,
}

impl<G> BidiWalker<G>
where
    G: AlignmentGraph + Send,
    G::K: Send,
{
    /// Converge both walks at `mid_row` (an absolute row index).
    pub fn new_converged(graph: G, mid_row: usize) -> BidiWalker<G> {
        let (forward, backward) = par::join(
            move || ForwardWalker::new_converged(graph, mid_row),
            move || BackwardWalker::new_converged(graph, mid_row),
        );
        BidiWalker { forward, backward }
    }
}

impl<G: AlignmentGraph> BidiWalker<G> {
    /// Both slots of `node`, which must lie in the convergence row or be a resident.
    pub fn find(&self, node: Node) -> BidiSlots<G::K> {
        BidiSlots {
            forward: self.forward.find(node),
            backward: self.backward.find(node),
        }
    }

    pub fn forward(&self) -> &ForwardWalker<G> {
        &self.forward
    }

    pub fn backward(&self) -> &BackwardWalker<G> {
        &self.backward
    }
}

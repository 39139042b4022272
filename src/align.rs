//! Alignment entry points.
//!
//! One pair of functions per flavor: the plain variant runs the dense backtracker
//! (O(grid-area) memory), the `_sliced` variant the subdivider (O(row-width) working
//! memory). Both return the optimal edge path and its weight; feed the path through
//! [`edges_to_element_pairs`] to read the aligned elements off it.

use alloc::vec::Vec;

use crate::backtrack::{find_max_path, subdivide};
use crate::graph::{
    AlignmentGraph, ExtendedGapGraph, FittingGraph, GlobalGraph, LocalGraph, OverlapGraph,
};
use crate::grid::Edge;
use crate::measure::Measure;
use crate::scorer::Scorer;
use crate::sequence::Sequence;

macro_rules! run_dense {
    ($graph:expr) => {{
        let graph = $graph;
        let (root, leaf) = ((&graph).root_node(), (&graph).leaf_node());
        find_max_path(&graph, root, leaf)
    }};
}

macro_rules! run_sliced {
    ($graph:expr) => {{
        let graph = $graph;
        let (path, weight) = subdivide(&graph);
        (path.walk_forward().collect(), weight)
    }};
}

/// Global alignment, dense backtracker.
///
/// # Example
/// ```
/// use gridalign::{align_global, edges_to_element_pairs, SimpleScorer};
///
/// let v = "abc";
/// let w = "azc";
/// let (path, weight) = align_global(
///     v,
///     w,
///     SimpleScorer::<f64>::substitution(1.0, -1.0),
///     SimpleScorer::gap(0.0),
/// );
/// assert_eq!(weight, 2.0);
/// let pairs: Vec<_> = edges_to_element_pairs(&path, v, w).collect();
/// assert_eq!(pairs.first(), Some(&(Some(&b'a'), Some(&b'a'))));
/// ```
pub fn align_global<V, W, SS, GS, K>(
    v: &V,
    w: &W,
    substitution: SS,
    gap: GS,
) -> (Vec<Edge>, K)
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K>,
    GS: Scorer<V::Elem, W::Elem, K>,
    K: Measure,
{
    run_dense!(GlobalGraph::new(v, w, substitution, gap))
}

/// Global alignment, linear-space subdivider.
pub fn align_global_sliced<V, W, SS, GS, K>(
    v: &V,
    w: &W,
    substitution: SS,
    gap: GS,
) -> (Vec<Edge>, K)
where
    V: Sequence + Sync + ?Sized,
    W: Sequence + Sync + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K> + Sync,
    GS: Scorer<V::Elem, W::Elem, K> + Sync,
    K: Measure + Send + Sync,
{
    run_sliced!(GlobalGraph::new(v, w, substitution, gap))
}

/// Local alignment, dense backtracker.
pub fn align_local<V, W, SS, GS, FS, K>(
    v: &V,
    w: &W,
    substitution: SS,
    gap: GS,
    freeride: FS,
) -> (Vec<Edge>, K)
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K>,
    GS: Scorer<V::Elem, W::Elem, K>,
    FS: Scorer<V::Elem, W::Elem, K>,
    K: Measure,
{
    run_dense!(LocalGraph::new(v, w, substitution, gap, freeride))
}

/// Local alignment, linear-space subdivider.
pub fn align_local_sliced<V, W, SS, GS, FS, K>(
    v: &V,
    w: &W,
    substitution: SS,
    gap: GS,
    freeride: FS,
) -> (Vec<Edge>, K)
where
    V: Sequence + Sync + ?Sized,
    W: Sequence + Sync + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K> + Sync,
    GS: Scorer<V::Elem, W::Elem, K> + Sync,
    FS: Scorer<V::Elem, W::Elem, K> + Sync,
    K: Measure + Send + Sync,
{
    run_sliced!(LocalGraph::new(v, w, substitution, gap, freeride))
}

/// Fitting alignment (all of `w` inside a substring of `v`), dense backtracker.
pub fn align_fitting<V, W, SS, GS, FS, K>(
    v: &V,
    w: &W,
    substitution: SS,
    gap: GS,
    freeride: FS,
) -> (Vec<Edge>, K)
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K>,
    GS: Scorer<V::Elem, W::Elem, K>,
    FS: Scorer<V::Elem, W::Elem, K>,
    K: Measure,
{
    run_dense!(FittingGraph::new(v, w, substitution, gap, freeride))
}

/// Fitting alignment, linear-space subdivider.
pub fn align_fitting_sliced<V, W, SS, GS, FS, K>(
    v: &V,
    w: &W,
    substitution: SS,
    gap: GS,
    freeride: FS,
) -> (Vec<Edge>, K)
where
    V: Sequence + Sync + ?Sized,
    W: Sequence + Sync + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K> + Sync,
    GS: Scorer<V::Elem, W::Elem, K> + Sync,
    FS: Scorer<V::Elem, W::Elem, K> + Sync,
    K: Measure + Send + Sync,
{
    run_sliced!(FittingGraph::new(v, w, substitution, gap, freeride))
}

/// Overlap alignment (a suffix of `v` against a prefix of `w`), dense backtracker.
pub fn align_overlap<V, W, SS, GS, FS, K>(
    v: &V,
    w: &W,
    substitution: SS,
    gap: GS,
    freeride: FS,
) -> (Vec<Edge>, K)
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K>,
    GS: Scorer<V::Elem, W::Elem, K>,
    FS: Scorer<V::Elem, W::Elem, K>,
    K: Measure,
{
    run_dense!(OverlapGraph::new(v, w, substitution, gap, freeride))
}

/// Overlap alignment, linear-space subdivider.
pub fn align_overlap_sliced<V, W, SS, GS, FS, K>(
    v: &V,
    w: &W,
    substitution: SS,
    gap: GS,
    freeride: FS,
) -> (Vec<Edge>, K)
where
    V: Sequence + Sync + ?Sized,
    W: Sequence + Sync + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K> + Sync,
    GS: Scorer<V::Elem, W::Elem, K> + Sync,
    FS: Scorer<V::Elem, W::Elem, K> + Sync,
    K: Measure + Send + Sync,
{
    run_sliced!(OverlapGraph::new(v, w, substitution, gap, freeride))
}

/// Global alignment with affine gaps, dense backtracker.
///
/// A gap of length `k` weighs `gap_open + (k − 1) · gap_extend`; the closing transition
/// is free.
pub fn align_extended_gap<V, W, SS, OS, ES, K>(
    v: &V,
    w: &W,
    substitution: SS,
    gap_open: OS,
    gap_extend: ES,
) -> (Vec<Edge>, K)
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K>,
    OS: Scorer<V::Elem, W::Elem, K>,
    ES: Scorer<V::Elem, W::Elem, K>,
    K: Measure,
{
    run_dense!(ExtendedGapGraph::new(v, w, substitution, gap_open, gap_extend))
}

/// Global alignment with affine gaps, linear-space subdivider.
pub fn align_extended_gap_sliced<V, W, SS, OS, ES, K>(
    v: &V,
    w: &W,
    substitution: SS,
    gap_open: OS,
    gap_extend: ES,
) -> (Vec<Edge>, K)
where
    V: Sequence + Sync + ?Sized,
    W: Sequence + Sync + ?Sized,
    SS: Scorer<V::Elem, W::Elem, K> + Sync,
    OS: Scorer<V::Elem, W::Elem, K> + Sync,
    ES: Scorer<V::Elem, W::Elem, K> + Sync,
    K: Measure + Send + Sync,
{
    run_sliced!(ExtendedGapGraph::new(v, w, substitution, gap_open, gap_extend))
}

/// Translate a path into aligned element pairs.
///
/// Diagonal edges yield both elements, gap edges one, free-rides none (they are skipped,
/// including the affine flavor's gap-close transitions).
pub fn edges_to_element_pairs<'s, 'p, V, W>(
    path: &'p [Edge],
    v: &'s V,
    w: &'s W,
) -> ElementPairs<'s, 'p, V, W>
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
{
    ElementPairs {
        edges: path.iter(),
        v,
        w,
    }
}

/// Iterator returned by [`edges_to_element_pairs`].
#[derive(Clone, Debug)]
pub struct ElementPairs<'s, 'p, V: ?Sized, W: ?Sized> {
    edges: core::slice::Iter<'p, Edge>,
    v: &'s V,
    w: &'s W,
}

impl<'s, 'p, V, W> Iterator for ElementPairs<'s, 'p, V, W>
where
    V: Sequence + ?Sized,
    W: Sequence + ?Sized,
{
    type Item = (Option<&'s V::Elem>, Option<&'s W::Elem>);

    fn next(&mut self) -> Option<Self::Item> {
        for edge in self.edges.by_ref() {
            let (d_off, r_off) = edge.element_offsets();
            if d_off.is_none() && r_off.is_none() {
                continue;
            }
            return Some((
                d_off.map(|i| self.v.get(i)),
                r_off.map(|i| self.w.get(i)),
            ));
        }
        None
    }
}

//! Element-pair scorers.
//!
//! A scorer turns one edge-weight request into a weight: it receives the edge plus the
//! sequence elements the edge consumes (`None` on the gap side of a gap edge, both `None`
//! for free-rides). Scorers must be pure; graphs call them on demand, possibly from
//! several threads at once.

use hashbrown::HashMap;

use crate::grid::Edge;
use crate::measure::Measure;

/// Scores one edge given the elements it consumes.
///
/// `D` and `R` are the element types of the downward and rightward sequences (possibly
/// unsized, e.g. `[T]` chunks). Any `Fn(&Edge, Option<&D>, Option<&R>) -> K` closure is
/// a scorer.
pub trait Scorer<D: ?Sized, R: ?Sized, K> {
    fn score(&self, edge: &Edge, down_elem: Option<&D>, right_elem: Option<&R>) -> K;
}

impl<D, R, K, F> Scorer<D, R, K> for F
where
    D: ?Sized,
    R: ?Sized,
    F: Fn(&Edge, Option<&D>, Option<&R>) -> K,
{
    #[inline]
    fn score(&self, edge: &Edge, down_elem: Option<&D>, right_elem: Option<&R>) -> K {
        self(edge, down_elem, right_elem)
    }
}

/// Fixed-weight scorer covering the four element shapes.
///
/// The constructors mirror how alignments are usually parameterized: one scorer instance
/// per concern (substitution, gap, free-ride), each leaving the weights it does not care
/// about at zero.
#[derive(Clone, Copy, Debug)]
pub struct SimpleScorer<K> {
    match_weight: K,
    mismatch_weight: K,
    indel_weight: K,
    freeride_weight: K,
}

impl<K: Measure> SimpleScorer<K> {
    pub fn new(match_weight: K, mismatch_weight: K, indel_weight: K, freeride_weight: K) -> Self {
        SimpleScorer {
            match_weight,
            mismatch_weight,
            indel_weight,
            freeride_weight,
        }
    }

    /// Scores diagonal edges; gaps and free-rides weigh zero.
    pub fn substitution(match_weight: K, mismatch_weight: K) -> Self {
        SimpleScorer::new(match_weight, mismatch_weight, K::zero(), K::zero())
    }

    /// Scores gap edges; everything else weighs zero.
    pub fn gap(indel_weight: K) -> Self {
        SimpleScorer::new(K::zero(), K::zero(), indel_weight, K::zero())
    }

    /// Scores free-ride edges; everything else weighs zero.
    pub fn freeride(freeride_weight: K) -> Self {
        SimpleScorer::new(K::zero(), K::zero(), K::zero(), freeride_weight)
    }

    /// Levenshtein-style weights: match 0, mismatch −1, gap −1.
    pub fn levenshtein() -> Self {
        SimpleScorer::new(K::zero(), K::from_i32(-1), K::from_i32(-1), K::zero())
    }
}

impl<D, R, K> Scorer<D, R, K> for SimpleScorer<K>
where
    D: PartialEq<R> + ?Sized,
    R: ?Sized,
    K: Measure,
{
    #[inline]
    fn score(&self, _edge: &Edge, down_elem: Option<&D>, right_elem: Option<&R>) -> K {
        match (down_elem, right_elem) {
            (Some(d), Some(r)) => {
                if *d == *r {
                    self.match_weight
                } else {
                    self.mismatch_weight
                }
            }
            (Some(_), None) | (None, Some(_)) => self.indel_weight,
            (None, None) => self.freeride_weight,
        }
    }
}

/// Table-driven scorer over `(Option<D>, Option<R>)` keys.
///
/// Keys with a `None` component score the corresponding gap column, `(None, None)` the
/// free-ride weight. Pairs absent from the table score [`missing`](Self::with_missing),
/// which defaults to `-∞` (the transition is effectively forbidden).
#[derive(Clone, Debug)]
pub struct SubstitutionMapScorer<D, R, K>
where
    D: Eq + core::hash::Hash,
    R: Eq + core::hash::Hash,
{
    map: HashMap<(Option<D>, Option<R>), K>,
    missing: K,
}

impl<D, R, K> SubstitutionMapScorer<D, R, K>
where
    D: Eq + core::hash::Hash,
    R: Eq + core::hash::Hash,
    K: Measure,
{
    pub fn new(map: HashMap<(Option<D>, Option<R>), K>) -> Self {
        Self::with_missing(map, K::minus_infinity())
    }

    pub fn with_missing(map: HashMap<(Option<D>, Option<R>), K>, missing: K) -> Self {
        SubstitutionMapScorer { map, missing }
    }
}

impl<D, R, K> Scorer<D, R, K> for SubstitutionMapScorer<D, R, K>
where
    D: Eq + core::hash::Hash + Clone,
    R: Eq + core::hash::Hash + Clone,
    K: Measure,
{
    #[inline]
    fn score(&self, _edge: &Edge, down_elem: Option<&D>, right_elem: Option<&R>) -> K {
        let key = (down_elem.cloned(), right_elem.cloned());
        self.map.get(&key).copied().unwrap_or(self.missing)
    }
}

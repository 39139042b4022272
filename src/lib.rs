//! **gridalign** computes optimal pairwise sequence alignments as maximum-weight paths
//! through procedurally-defined grid DAGs.
//!
//! Five graph flavors cover the usual alignment modes ([global](align_global),
//! [local](align_local), [fitting](align_fitting), [overlap](align_overlap) and
//! [affine-gap](align_extended_gap)), each backed by two engines: a dense backtracker
//! (O(grid-area) memory) and a Hirschberg-style subdivider (O(row-width) working
//! memory). Graphs are iterator factories, not data structures: adjacency, weights and
//! node enumeration are computed from coordinates on demand, so nothing quadratic is
//! ever allocated except by the dense engine's slot table.
//!
//! ```
//! use gridalign::{align_global_sliced, edges_to_element_pairs, SimpleScorer};
//!
//! let v = "hello";
//! let w = "mellow";
//! let (path, weight) = align_global_sliced(
//!     v,
//!     w,
//!     SimpleScorer::<f64>::new(1.0, 0.0, 0.0, 0.0),
//!     SimpleScorer::gap(-1.0),
//! );
//! assert_eq!(weight, 3.0);
//! let rendered: String = edges_to_element_pairs(&path, v, w)
//!     .map(|(a, _)| a.map(|&b| b as char).unwrap_or('-'))
//!     .collect();
//! assert_eq!(rendered, "hello-");
//! ```
//!
//! Scorers are pure callbacks from an edge and the consumed elements to a weight; see
//! [`Scorer`]. Weight types implement [`Measure`] (`f32`/`f64` and the signed integers
//! are provided). With the `rayon` feature the two halves of every bidirectional walk
//! run on rayon's work-stealing pool.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod align;
pub mod backtrack;
pub mod graph;
pub mod grid;
mod measure;
mod par;
pub mod scorer;
pub mod sequence;

pub use crate::align::{
    align_extended_gap, align_extended_gap_sliced, align_fitting, align_fitting_sliced,
    align_global, align_global_sliced, align_local, align_local_sliced, align_overlap,
    align_overlap_sliced, edges_to_element_pairs, ElementPairs,
};
pub use crate::grid::{Edge, EdgeKind, Layer, Node};
pub use crate::measure::Measure;
pub use crate::scorer::{Scorer, SimpleScorer, SubstitutionMapScorer};
pub use crate::sequence::{ChunkedSequence, Sequence};

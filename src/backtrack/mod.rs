//! Backtracking engines over alignment graphs.
//!
//! Two engines recover maximum-weight paths: [`find_max_path`] walks the whole grid with
//! one slot per node (fast, O(area) memory), and [`subdivide`] recovers the same path in
//! O(row-width) memory by Hirschberg-style subdivision built on the streaming walkers.

mod backward;
mod bidi;
mod forward;
mod path_container;
mod segmenter;
mod slot;
mod subdivider;
mod topological;

pub use self::backward::BackwardWalker;
pub use self::bidi::{BidiSlots, BidiWalker};
pub use self::forward::ForwardWalker;
pub use self::path_container::{PathContainer, PathWalk};
pub use self::segmenter::{backtrack_segmentation_points, PathPart};
pub use self::slot::Slot;
pub use self::subdivider::subdivide;
pub use self::topological::find_max_path;

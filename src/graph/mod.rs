//! The immutable attributed relational graph (ARG).
//!
//! Once built, an [`Arg`] never changes: this lets the matching engine treat
//! adjacency as plain sorted slices searched by binary search, exactly as
//! the original VF3 `ARGraph` does, rather than paying for a mutable
//! adjacency-matrix or hash-map representation while it searches.

mod arg;
mod builder;

pub use arg::Arg;
pub use builder::ArgSource;

/// Sentinel for "no node" (an unmapped slot in a partial mapping, or the
/// absent predecessor of a pattern's first-chosen node).
pub const NIL: u32 = u32::MAX;

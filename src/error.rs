//! Typed error hierarchy for the crate.
//!
//! Every fallible boundary in `argiso` (loaders, graph construction, the CLI)
//! returns [`ArgIsoError`] rather than a bare `String`, following the pack's
//! idiom of deriving `std::error::Error` impls with `thiserror` instead of
//! hand-writing `Display`.

use thiserror::Error;

/// Unifies the Input-format, Invariant-violation, Allocation-failure and
/// Semantic "no match" failure kinds.
#[derive(Error, Debug)]
pub enum ArgIsoError {
    /// A graph file did not conform to the format it claimed to be in.
    #[error("malformed {format} input at {location}: {reason}")]
    InputFormat {
        format: &'static str,
        location: String,
        reason: String,
    },

    /// A loader produced data that violates an ARG invariant (out-of-range
    /// node id, mismatched attribute count, duplicate edge).
    #[error("inconsistent graph data: {0}")]
    Inconsistent(String),

    /// A requested allocation (state arrays, worker pool) could not be
    /// satisfied, typically because a graph is larger than `u32::MAX - 1`
    /// nodes or a `-c` value is zero.
    #[error("allocation failure: {0}")]
    Allocation(String),

    /// The matching engine produced zero solutions. Not an error condition
    /// by itself; surfaced only where the CLI's contract calls for a
    /// distinct exit code on "no match" versus "at least one match".
    #[error("no match found")]
    NoMatch,

    /// Wraps I/O failures encountered while reading a graph file or writing
    /// a trace file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wraps JSON (de)serialization failures from the `serde_json` cache
    /// round-trip path.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

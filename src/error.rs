//! Crate-wide error type.
//!
//! Follows the same shape as a typical layout-error enum: one variant per
//! precondition the core refuses to paper over. There is no retry or
//! partial-recovery path — builders
//! stop as soon as one of these is produced.

use thiserror::Error;

use crate::position::NodePos;

/// Errors surfaced while building a trie over a sequence graph.
#[derive(Error, Debug)]
pub enum TrieGraphError {
    /// The graph handed to the core violates a structural precondition
    /// (e.g. an edge referencing a node id outside `[0, num_nodes)`).
    #[error("graph shape precondition violated: {0}")]
    GraphShapeViolation(String),

    /// A builder was given a start position outside the graph's domain.
    #[error("start position out of range: {0:?}")]
    StartOutOfRange(NodePos),

    /// `2 * sigma^k` does not fit in the counter type chosen for the
    /// estimator; this is a construction-time configuration error, not a
    /// runtime condition (the steady-state saturating-add never errors).
    #[error("sigma^k is too large for the configured counter width")]
    CeilingOverflow,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, TrieGraphError>;

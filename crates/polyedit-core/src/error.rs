//! Error handling for Polyedit
//!
//! Provides [`ChainError`], raised for structural problems found while
//! building a point chain from external data. File and settings failures are
//! reported by the crates that do the I/O.
//!
//! Precondition violations inside the editor itself are programming errors
//! and panic instead; shape invalidity is reported as a value, not an error.

use thiserror::Error;

/// Point-chain error type
///
/// Raised when a chain is assembled from persisted or caller-supplied points
/// and the result would break the vertex/filler interleaving.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChainError {
    /// A gap between two vertices holds something other than one MID or two CURVE points
    #[error("Broken filler after vertex at index {index}: {reason}")]
    BrokenFiller {
        /// Chain index of the vertex that opens the broken gap.
        index: usize,
        /// What was found in the gap.
        reason: String,
    },

    /// An open chain must start and end on a vertex
    #[error("Open chain must start and end with a vertex")]
    DanglingFiller,

    /// Not enough vertices for the requested shape kind
    #[error("Too few vertices: {count} (minimum {min})")]
    TooFewVertices {
        /// Number of vertices present.
        count: usize,
        /// Required minimum.
        min: usize,
    },
}

/// Result type using ChainError
pub type Result<T> = std::result::Result<T, ChainError>;

//! MorseError: Unified error type for conley-morse public APIs
//!
//! Contract violations inside the graph algorithms (an adjacency index outside
//! `[0, vertex_count)`) are bugs in the caller's digraph adapter and panic instead;
//! this type covers the recoverable conditions.

use thiserror::Error;

/// Unified error type for conley-morse operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MorseError {
    /// The configuration file could not be read.
    #[error("Could not read configuration `{path}`: {reason}")]
    ConfigIo { path: String, reason: String },
    /// The configuration file was read but is not valid JSON for the schema.
    #[error("Could not parse configuration: {0}")]
    ConfigParse(String),
    /// A configuration value is out of its admissible range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Two regions (or a region and a grid) disagree on dimension.
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// A Morse graph vertex id was not in `0..vertex_count`.
    #[error("Vertex {vertex} out of range (graph has {count} vertices)")]
    VertexOutOfRange { vertex: usize, count: usize },
    /// A grid cell handle does not name a live cell.
    #[error("Unknown grid cell {0}")]
    UnknownCell(usize),
    /// Reading or writing the persisted Morse graph failed.
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// The external invariant module failed on one vertex.
    #[error("Invariant computation failed: {0}")]
    Invariant(String),
    /// A structural invariant of a result type does not hold.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<serde_json::Error> for MorseError {
    fn from(e: serde_json::Error) -> Self {
        MorseError::Serialization(e.to_string())
    }
}

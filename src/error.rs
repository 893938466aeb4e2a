//! Error types for cube assembly and slice extraction

use crate::slice::SliceAxis;
use thiserror::Error;

/// Main error type for seiscube operations
#[derive(Error, Debug)]
pub enum CubeError {
    /// No trace resolved to a usable grid placement, so the volume axes
    /// would be empty. Fatal to the ingestion run that raised it.
    #[error("Empty grid: {0}")]
    EmptyGrid(String),

    /// Slice index outside `[0, len)` for the requested axis.
    #[error("Index {index} out of range for {axis} axis (length {len})")]
    IndexOutOfRange {
        axis: SliceAxis,
        index: i64,
        len: usize,
    },

    /// An operation needed a cube before any ingestion succeeded.
    #[error("No cube loaded")]
    NotLoaded,

    /// Two traces resolved to the same grid cell under
    /// [`CollisionPolicy::Reject`](crate::assemble::CollisionPolicy::Reject).
    #[error("Duplicate placement at inline {inline}, crossline {crossline}")]
    DuplicatePlacement { inline: i32, crossline: i32 },

    /// A slice-axis name that is not `inline`, `crossline`/`xline`, or
    /// `sample`.
    #[error("Unknown slice axis: {0}")]
    UnknownAxis(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CubeError {
    /// Stable machine-readable tag for the request-handling collaborator's
    /// error payloads.
    pub fn kind(&self) -> &'static str {
        match self {
            CubeError::EmptyGrid(_) => "empty_grid",
            CubeError::IndexOutOfRange { .. } => "range",
            CubeError::NotLoaded => "not_loaded",
            CubeError::DuplicatePlacement { .. } => "duplicate_placement",
            CubeError::UnknownAxis(_) => "unknown_axis",
            CubeError::Serialization(_) => "serialization",
        }
    }
}

/// Specialized Result type for seiscube operations
pub type Result<T> = std::result::Result<T, CubeError>;

impl From<serde_json::Error> for CubeError {
    fn from(err: serde_json::Error) -> Self {
        CubeError::Serialization(err.to_string())
    }
}

// ============================================================================
// vsumm-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Error types for the vsumm-core library
//
// All errors are local to a single summarization call. None of them leave the
// shared kernel matrix in a modified state.
//
// AI-ASSISTANT-INFO: Error taxonomy for segmentation, kernels and selection

use thiserror::Error;

/// Custom error types for vsumm-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dimension mismatch at vector {index}: expected {expected} values, found {found}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Empty input: {0}")]
    EmptyInput(String),

    #[error("Unsupported objective: {0}")]
    UnsupportedObjective(String),

    #[error("{mode} selection is not supported for the {objective} objective, which is not monotone submodular on this kernel")]
    UnsupportedConstraint {
        objective: String,
        mode: String,
    },

    #[error("Feature vector {index} has zero norm and cannot be normalized")]
    DegenerateVector { index: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for vsumm-core operations
pub type CoreResult<T> = std::result::Result<T, CoreError>;

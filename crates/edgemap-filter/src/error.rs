//! Error types for edgemap-filter

use thiserror::Error;

/// Errors that can occur during filtering operations
#[derive(Debug, Error)]
pub enum FilterError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] edgemap_core::Error),

    /// Invalid kernel, or a kernel that does not fit the field
    #[error("invalid kernel: {0}")]
    InvalidKernel(String),

    /// Horizontal and vertical responses differ in shape
    #[error("shape mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    ShapeMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Operator configuration could not be read or applied
    #[error("config error: {0}")]
    Config(String),
}

/// Result type for filter operations
pub type FilterResult<T> = Result<T, FilterError>;

use thiserror::Error;

/// Custom error type for the sampleset crates.
#[derive(Error, Debug, PartialEq, Clone)] // PartialEq for easier testing
pub enum SampleSetError {
    #[error("Index out of bounds: index {index} for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A dataset source was neither a dataset instance nor a build-spec mapping.
    #[error("Invalid dataset source: expected a dataset instance or a build spec mapping, but got {found}")]
    InvalidSource { found: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Dataset accessed before full initialization: {0}")]
    UninitializedAccess(String),

    #[error("Unknown dataset type: {0}")]
    UnknownDatasetType(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),
}

impl SampleSetError {
    /// Shorthand for building a [`SampleSetError::Configuration`].
    pub fn config(message: impl Into<String>) -> Self {
        SampleSetError::Configuration(message.into())
    }
}

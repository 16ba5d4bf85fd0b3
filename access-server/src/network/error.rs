//! Network dataset error types.

/// Errors that can occur when loading a network dataset.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The dataset file could not be read
    #[error("failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not valid JSON of the expected shape
    #[error("invalid dataset: {0}")]
    Json(#[from] serde_json::Error),
}

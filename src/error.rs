//! Error types for the procflow pipeline

use thiserror::Error;

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A blocking queue wait was woken by a stop request. This is the
    /// one-shot unwind path for workers, never retried.
    #[error("Blocking wait interrupted by stop request")]
    Interrupted,

    #[error("Queue capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),

    #[error("Failed to spawn worker thread '{name}': {source}")]
    WorkerSpawnFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

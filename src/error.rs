//! Unified error type for memebridge.

use thiserror::Error;

/// Errors that can occur while talking to the meme engine or collecting
/// generation parameters.
#[derive(Debug, Error)]
pub enum MemeError {
    /// The engine returned an error response.
    #[error("Engine error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the engine.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// A worker-thread offload was cancelled or panicked.
    #[error("Engine task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Failure inside an embedded engine implementation.
    #[error("Engine failure: {0}")]
    Engine(String),

    /// The host's parameter collector could not assemble the inputs.
    #[error("Parameter collection failed: {0}")]
    Collect(String),
}

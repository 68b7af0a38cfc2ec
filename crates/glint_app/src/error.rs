//! Error types for glint_app

use glint_platform::PlatformError;
use thiserror::Error;

/// Errors that can occur while running the shell
#[derive(Error, Debug)]
pub enum ShellError {
    /// Native windowing failure (window creation, event loop)
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// Failed to build the dispatch runtime
    #[error("Runtime initialization failed: {0}")]
    Runtime(#[source] std::io::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The dispatch loop is gone; nothing will answer
    #[error("Dispatch loop disconnected")]
    Disconnected,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<anyhow::Error> for ShellError {
    fn from(err: anyhow::Error) -> Self {
        ShellError::Other(format!("{err:#}"))
    }
}

/// Result type for glint_app operations
pub type Result<T> = std::result::Result<T, ShellError>;

//! Error types for icspipe.

use thiserror::Error;

/// Errors that can occur while loading a chain or transforming a calendar.
#[derive(Error, Debug)]
pub enum IcsPipeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Plugin '{name}' not found. Available: {available}")]
    PluginNotFound { name: String, available: String },

    #[error("ICS parse error: {0}")]
    IcsParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for icspipe operations.
pub type IcsPipeResult<T> = Result<T, IcsPipeError>;

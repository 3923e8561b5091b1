//! Terminal UI error types

use thiserror::Error;

/// Errors that can occur while running the terminal UI
#[derive(Debug, Error)]
pub enum TuiError {
    /// Terminal setup, drawing or event polling failed
    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for terminal UI operations
pub type Result<T> = std::result::Result<T, TuiError>;

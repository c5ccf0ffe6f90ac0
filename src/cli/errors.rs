//! CLI error types
//!
//! All CLI errors are terminal: main prints them to stderr and exits
//! nonzero.

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file missing, unreadable, or invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Filesystem failure while initializing
    #[error("io error: {0}")]
    Io(String),

    /// Init refused to overwrite an existing configuration
    #[error("already initialized: {0}")]
    AlreadyInitialized(String),

    /// Store or server failed to come up
    #[error("boot failed: {0}")]
    Boot(String),
}

//! Error types for memcmd
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::protocol::SupportedCommand;

/// Result type alias using MemcmdError
pub type Result<T> = std::result::Result<T, MemcmdError>;

/// Unified error type for memcmd operations
#[derive(Debug, Error)]
pub enum MemcmdError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Reply exceeded {limit} bytes")]
    ReplyTooLarge { limit: usize },

    #[error("Connection closed before any reply was received")]
    EmptyReply,

    /// Something panicked while a request was in flight: a failure
    /// listener or the reply handling itself
    #[error("Panic while sending request: {0}")]
    SendPanicked(String),

    // -------------------------------------------------------------------------
    // Command Construction Errors
    // -------------------------------------------------------------------------
    #[error("No command template registered for {0:?}")]
    UnknownCommand(SupportedCommand),

    #[error("Template [{template}] references argument {{{placeholder}}} but only {supplied} were supplied")]
    Template {
        template: String,
        placeholder: usize,
        supplied: usize,
    },

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Serialization error: {0}")]
    Serialization(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<bincode::Error> for MemcmdError {
    fn from(err: bincode::Error) -> Self {
        MemcmdError::Serialization(err.to_string())
    }
}

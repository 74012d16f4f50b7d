//! Error types and handling for the MCP server.
//!
//! This module defines a unified error type that can represent errors from
//! the prompts domain, the transport layer and startup.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the prompts domain.
    #[error("Prompt error: {0}")]
    Prompt(#[from] crate::domains::prompts::PromptError),

    /// Error originating from the transport layer.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Configuration-related errors.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O errors from file operations or network communication.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a new configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<Error> for rmcp::ErrorData {
    fn from(err: Error) -> Self {
        match err {
            Error::Prompt(e) => e.into(),
            other => rmcp::ErrorData::internal_error(other.to_string(), None),
        }
    }
}

impl From<crate::domains::prompts::PromptError> for rmcp::ErrorData {
    fn from(err: crate::domains::prompts::PromptError) -> Self {
        if err.is_client_error() {
            rmcp::ErrorData::invalid_params(err.to_string(), None)
        } else {
            rmcp::ErrorData::internal_error(err.to_string(), None)
        }
    }
}

//! Prompt-specific error types.

use thiserror::Error;

/// Errors that can occur while compiling, registering or invoking prompts.
///
/// Missing placeholders and malformed templates are not represented here:
/// those are reported to the caller as rendered text.
#[derive(Debug, Error)]
pub enum PromptError {
    /// The requested prompt was not found.
    #[error("Prompt not found: {0}")]
    NotFound(String),

    /// The parameter schema type does not describe an object.
    #[error("Invalid parameter schema for prompt '{prompt}': {reason}")]
    InvalidSchema { prompt: String, reason: String },

    /// A parameter name cannot be used as a placeholder.
    #[error("Invalid parameter name '{parameter}' for prompt '{prompt}'")]
    InvalidParameterName { prompt: String, parameter: String },

    /// A parameter name appears twice in one contract.
    #[error("Duplicate parameter '{parameter}' for prompt '{prompt}'")]
    DuplicateParameter { prompt: String, parameter: String },

    /// The registry references an executor that does not exist.
    #[error("Unknown executor '{executor}' for prompt '{prompt}'")]
    UnknownExecutor { prompt: String, executor: String },

    /// An argument was supplied that the prompt signature does not declare.
    #[error("Unexpected argument '{argument}' for prompt '{prompt}'")]
    UnexpectedArgument { prompt: String, argument: String },

    /// The host already holds a prompt with this name.
    #[error("Prompt already registered: {0}")]
    AlreadyRegistered(String),

    /// A registry entry could not be compiled or registered.
    #[error("Failed to register prompt '{name}': {source}")]
    Registration {
        name: String,
        #[source]
        source: Box<PromptError>,
    },

    /// A custom executor failed.
    #[error("Executor for prompt '{prompt}' failed: {message}")]
    Executor { prompt: String, message: String },

    /// The registry file could not be read or parsed.
    #[error("Registry file error: {0}")]
    RegistryFile(String),
}

impl PromptError {
    /// Create a new "not found" error.
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }

    /// Create a new "invalid schema" error.
    pub fn invalid_schema(prompt: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            prompt: prompt.into(),
            reason: reason.into(),
        }
    }

    /// Create a new "executor failed" error.
    pub fn executor(prompt: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Executor {
            prompt: prompt.into(),
            message: message.into(),
        }
    }

    /// Create a new "registry file" error.
    pub fn registry_file(msg: impl Into<String>) -> Self {
        Self::RegistryFile(msg.into())
    }

    /// Tag an error with the registry entry it came from.
    pub fn registration(name: impl Into<String>, source: PromptError) -> Self {
        Self::Registration {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Whether this error was caused by the request rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::UnexpectedArgument { .. })
    }
}

//! Configuration management for the MCP server.
//!
//! Configuration is populated from defaults, then overridden by environment
//! variables (a `.env` file is honoured).

use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{info, warn};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Prompts domain configuration.
    pub prompts: PromptsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the prompts domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptsConfig {
    /// Whether the prompts in `domains/prompts/definitions` are registered.
    pub include_builtin: bool,

    /// Optional JSON registry file compiled after the built-in prompts.
    pub registry_file: Option<PathBuf>,

    /// Markdown rules appended by the `naming_smiles` prompt.
    pub naming_rules_path: Option<PathBuf>,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            include_builtin: true,
            registry_file: None,
            naming_rules_path: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "prompt-registry-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            prompts: PromptsConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            transport: TransportConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables are expected to be prefixed with `MCP_`.
    /// For example: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`, `MCP_PROMPTS_FILE`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        config.transport = TransportConfig::from_env();
        config.prompts = PromptsConfig::from_env();

        config
    }
}

impl PromptsConfig {
    /// Load the prompts configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(flag) = std::env::var("MCP_PROMPTS_BUILTIN") {
            config.include_builtin = !matches!(flag.to_lowercase().as_str(), "false" | "0");
            if !config.include_builtin {
                info!("Built-in prompts disabled");
            }
        }

        if let Ok(path) = std::env::var("MCP_PROMPTS_FILE") {
            info!("Prompt registry file: {}", path);
            config.registry_file = Some(PathBuf::from(path));
        }

        match std::env::var("MCP_NAMING_RULES_PATH") {
            Ok(path) => config.naming_rules_path = Some(PathBuf::from(path)),
            Err(_) if config.include_builtin => {
                warn!("MCP_NAMING_RULES_PATH not set - naming_smiles will render without rules");
            }
            Err(_) => {}
        }

        config
    }
}

//! Prompt Registry MCP Server entry point.
//!
//! Loads configuration, initializes logging, compiles the prompt registry
//! and starts the configured transport.

use anyhow::Result;
use tracing::{info, warn};

use prompt_registry_mcp::core::{Config, McpServer, TransportService, init_logging};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env();

    init_logging(&config.logging.level);

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone());

    info!("Server initialized with {} prompt(s)", server.prompts().len());
    for (name, err) in server.prompts().failures() {
        warn!("Prompt '{}' not registered: {}", name, err);
    }

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

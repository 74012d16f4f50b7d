//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to the prompt service. Prompts are compiled once
//! when the server is created; every request afterwards only reads them.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::prompts::{ExecutorTable, PromptService};

/// The main MCP server handler.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Service hosting the compiled prompts.
    prompt_service: Arc<PromptService>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        Self::with_executors(config, ExecutorTable::new())
    }

    /// Create a server whose registry file may reference additional executors.
    pub fn with_executors(config: Config, executors: ExecutorTable) -> Self {
        let prompt_service = PromptService::with_executors(config.prompts.clone(), executors);
        Self::from_service(config, prompt_service)
    }

    /// Create a server around an already populated prompt service.
    pub fn from_service(config: Config, prompt_service: PromptService) -> Self {
        Self {
            config: Arc::new(config),
            prompt_service: Arc::new(prompt_service),
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Get the server configuration.
    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Get the prompt service.
    pub fn prompts(&self) -> &PromptService {
        &self.prompt_service
    }

    fn instructions(&self) -> String {
        format!(
            "{} exposes {} prompt(s). Use prompts/list to discover them and prompts/get to render one.",
            self.name(),
            self.prompt_service.len()
        )
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// List all available prompts as JSON.
    pub async fn list_prompts_json(&self) -> Vec<serde_json::Value> {
        self.prompt_service
            .list_prompts()
            .await
            .into_iter()
            .map(|p| {
                serde_json::json!({
                    "name": p.name,
                    "title": p.title,
                    "description": p.description,
                    "arguments": p.arguments
                })
            })
            .collect()
    }

    /// Render a prompt from JSON arguments.
    ///
    /// Arguments must be a JSON object. Non-string values are passed as
    /// their JSON text.
    pub async fn get_prompt_json(
        &self,
        name: &str,
        arguments: Option<serde_json::Value>,
    ) -> Result<serde_json::Value, McpError> {
        let args = match arguments {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::Object(obj)) => Some(string_arguments(obj)),
            Some(_) => {
                return Err(McpError::invalid_params(
                    "Prompt arguments must be an object",
                    None,
                ));
            }
        };

        let result = self.prompt_service.get_prompt(name, args).await?;
        Ok(serde_json::json!({
            "description": result.description,
            "messages": result.messages
        }))
    }

    /// The JSON body of an `initialize` response.
    pub fn initialize_json(&self, protocol_version: &str) -> serde_json::Value {
        serde_json::json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "prompts": {}
            },
            "serverInfo": {
                "name": self.name(),
                "version": self.version()
            },
            "instructions": self.instructions()
        })
    }
}

/// Convert MCP argument values to the text form prompts accept.
fn string_arguments(map: JsonObject) -> HashMap<String, String> {
    map.into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| match v {
            serde_json::Value::String(s) => (k, s),
            other => (k, other.to_string()),
        })
        .collect()
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder().enable_prompts().build(),
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        info!("Listing prompts");
        let prompts = self.prompt_service.list_prompts().await;
        Ok(ListPromptsResult {
            prompts,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        info!("Getting prompt: {}", request.name);
        let arguments = request.arguments.map(string_arguments);
        self.prompt_service
            .get_prompt(&request.name, arguments)
            .await
            .map_err(McpError::from)
    }
}

//! Prompt Registry MCP Server
//!
//! An MCP server that turns declarative prompt specifications into
//! registered, callable prompts.
//!
//! # Architecture
//!
//! - **core**: Configuration, error handling, logging, the server handler and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **prompts**: Prompt specifications, the compiler that turns them into
//!     callable prompts, and the service that hosts them
//!
//! # Example
//!
//! ```rust,no_run
//! use prompt_registry_mcp::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     let server = McpServer::new(config);
//!     println!("{} prompt(s) registered", server.prompts().len());
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

pub use core::{Config, Error, McpServer, Result};

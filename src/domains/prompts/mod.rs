//! Prompts domain module.
//!
//! Prompts are declared as data in a [`PromptRegistry`] and compiled once, at
//! startup, into [`CompiledPrompt`]s that the MCP server lists and invokes.
//!
//! ## Architecture
//!
//! - `spec.rs` - Declarative registry entries
//! - `contract.rs` - Parameter contracts extracted from schema types
//! - `signature.rs` - Client-facing argument descriptors and call binding
//! - `renderer.rs` - Template substitution and custom executors
//! - `compiler.rs` - Registry compiler and the host registration contract
//! - `registry_file.rs` - JSON registry files
//! - `definitions/` - Built-in prompts (one file per prompt)
//! - `registry.rs` - Built-in registry
//! - `service.rs` - Prompt service for listing and rendering
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file in `definitions/` (e.g., `my_prompt.rs`)
//! 2. Implement the `PromptDefinition` trait
//! 3. Export in `definitions/mod.rs`
//! 4. Register in `registry.rs`
//!
//! Prompts can also be added without code through `MCP_PROMPTS_FILE`.

pub mod compiler;
pub mod contract;
pub mod definitions;
mod error;
mod registry;
pub mod registry_file;
pub mod renderer;
mod service;
pub mod signature;
pub mod spec;

pub use compiler::{CompileReport, CompiledPrompt, PromptCompiler, PromptHost};
pub use contract::{ParameterContract, ParameterField};
pub use definitions::PromptDefinition;
pub use error::PromptError;
pub use registry::{builtin_registry, prompt_names};
pub use renderer::{FnExecutor, PromptExecutor, executor_fn};
pub use service::PromptService;
pub use signature::{PromptArguments, PromptSignature};
pub use spec::{ExecutorTable, PromptRegistry, PromptSpec};

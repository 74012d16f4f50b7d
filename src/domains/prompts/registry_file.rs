//! File-based prompt registries.
//!
//! A registry file is a JSON object mapping prompt names to entries:
//!
//! ```json
//! {
//!   "greet": {
//!     "title": "Greeter",
//!     "description": "Say hello",
//!     "message": "Hello {name}!",
//!     "parameters": [{ "name": "name", "required": true, "description": "Who to greet" }]
//!   },
//!   "rules": { "message": "Rules:", "executor": "naming_rules" }
//! }
//! ```
//!
//! Entry order in the file is kept. Executors are referenced by name and
//! resolved when the registry is compiled.

use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

use super::contract::ParameterField;
use super::error::PromptError;
use super::spec::{ExecutorRef, ParameterSource, PromptRegistry, PromptSpec};

/// One entry as written in a registry file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct PromptEntry {
    title: Option<String>,
    description: Option<String>,
    #[serde(default, alias = "template")]
    message: String,
    parameters: Option<Vec<ParameterField>>,
    executor: Option<String>,
}

impl From<PromptEntry> for PromptSpec {
    fn from(entry: PromptEntry) -> Self {
        PromptSpec {
            title: entry.title,
            description: entry.description,
            template: entry.message,
            parameters: entry.parameters.map(ParameterSource::Fields),
            executor: entry.executor.map(ExecutorRef::Named),
        }
    }
}

/// A parsed registry file.
#[derive(Debug, Default)]
pub struct RegistryFile {
    /// Entries that parsed, in file order.
    pub registry: PromptRegistry,

    /// Entries that did not parse, each with its reason.
    pub rejected: Vec<(String, PromptError)>,
}

/// Parse a registry from JSON text.
///
/// Only a document that is not a JSON object fails as a whole. A malformed
/// entry is rejected on its own and the other entries still load.
pub fn parse_registry(json: &str) -> Result<RegistryFile, PromptError> {
    let entries: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(json).map_err(|e| PromptError::registry_file(e.to_string()))?;

    let mut file = RegistryFile::default();
    for (name, value) in entries {
        match serde_json::from_value::<PromptEntry>(value) {
            Ok(entry) => file.registry.insert(name, entry.into()),
            Err(e) => {
                warn!("Rejecting registry entry '{}': {}", name, e);
                let err = PromptError::registry_file(format!("entry '{name}': {e}"));
                file.rejected.push((name, err));
            }
        }
    }

    Ok(file)
}

/// Load a registry from a JSON file.
pub fn load_registry(path: &Path) -> Result<RegistryFile, PromptError> {
    let json = std::fs::read_to_string(path)
        .map_err(|e| PromptError::registry_file(format!("{}: {}", path.display(), e)))?;
    let file = parse_registry(&json)?;
    info!(
        "Loaded {} prompt(s) from {} ({} rejected)",
        file.registry.len(),
        path.display(),
        file.rejected.len()
    );
    Ok(file)
}

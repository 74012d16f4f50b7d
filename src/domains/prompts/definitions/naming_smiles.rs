//! Chemical naming prompt definition.
//!
//! The template is rendered normally and the chemical naming rules are read
//! from disk on every call, so edits to the rules file apply without a
//! restart.

use async_trait::async_trait;
use schemars::JsonSchema;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::warn;

use super::PromptDefinition;
use crate::core::config::PromptsConfig;
use crate::domains::prompts::error::PromptError;
use crate::domains::prompts::renderer::{PlaceholderPolicy, PromptExecutor, render_template};
use crate::domains::prompts::signature::PromptArguments;
use crate::domains::prompts::spec::PromptSpec;

/// Text used when no rules file is available.
pub const RULES_NOT_FOUND: &str = "Chemical naming rules file not found.";

/// Parameters for the naming prompt.
#[allow(non_snake_case)]
#[derive(Debug, JsonSchema)]
pub struct NamingSmilesParams {
    /// The molecule expressed as a SMILES string
    pub SMILES: String,
}

/// Renders the template and appends the naming rules file.
#[derive(Debug, Clone)]
pub struct NamingRulesExecutor {
    rules_path: Option<PathBuf>,
}

impl NamingRulesExecutor {
    pub fn new(rules_path: Option<PathBuf>) -> Self {
        Self { rules_path }
    }

    async fn load_rules(&self) -> String {
        let Some(path) = &self.rules_path else {
            return RULES_NOT_FOUND.to_string();
        };

        match tokio::fs::read_to_string(path).await {
            Ok(rules) => rules,
            Err(e) => {
                warn!("Failed to read naming rules {}: {}", path.display(), e);
                RULES_NOT_FOUND.to_string()
            }
        }
    }
}

#[async_trait]
impl PromptExecutor for NamingRulesExecutor {
    async fn execute(
        &self,
        prompt_name: &str,
        arguments: &PromptArguments,
        template: &str,
    ) -> Result<String, PromptError> {
        let body = render_template(prompt_name, template, arguments, PlaceholderPolicy::Strict);
        let rules = self.load_rules().await;
        Ok(format!("{body}\n\n{rules}\n"))
    }
}

/// Name a molecule given as SMILES.
pub struct NamingSmilesPrompt;

impl PromptDefinition for NamingSmilesPrompt {
    const NAME: &'static str = "naming_smiles";
    const TITLE: &'static str = "Naming chemicals";
    const DESCRIPTION: &'static str = "Given a molecule expressed as SMILES, give it a name";

    fn template() -> &'static str {
        "Please name the molecule {SMILES} by first matching a compound in PubChem.
Use the PubChem CID to retrieve the list of names for the compound and its IUPAC name.
Pick a name from that list and reformat it as needed so that it follows the naming
rules given below, examining the rules step by step. After naming the chemical,
check the name against the rules again."
    }

    fn spec(config: &PromptsConfig) -> PromptSpec {
        PromptSpec::new(Self::template())
            .title(Self::TITLE)
            .description(Self::DESCRIPTION)
            .parameters::<NamingSmilesParams>()
            .executor(Arc::new(NamingRulesExecutor::new(
                config.naming_rules_path.clone(),
            )))
    }
}

//! Prompt Registry - the built-in registry entries.
//!
//! When adding a new prompt:
//! 1. Create the prompt file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `builtin_registry()`

use super::definitions::{
    CodeReviewPrompt, FindMatchingTrialsPrompt, NamingSmilesPrompt, PromptDefinition,
    SummarizePrompt,
};
use super::spec::PromptRegistry;
use crate::core::config::PromptsConfig;

/// Add the entry for `P` to `registry`.
fn register<P: PromptDefinition>(registry: &mut PromptRegistry, config: &PromptsConfig) {
    registry.insert(P::NAME, P::spec(config));
}

/// Build the registry of built-in prompts.
pub fn builtin_registry(config: &PromptsConfig) -> PromptRegistry {
    let mut registry = PromptRegistry::new();
    register::<FindMatchingTrialsPrompt>(&mut registry, config);
    register::<NamingSmilesPrompt>(&mut registry, config);
    register::<CodeReviewPrompt>(&mut registry, config);
    register::<SummarizePrompt>(&mut registry, config);
    registry
}

/// Get the list of all built-in prompt names.
pub fn prompt_names() -> Vec<&'static str> {
    vec![
        FindMatchingTrialsPrompt::NAME,
        NamingSmilesPrompt::NAME,
        CodeReviewPrompt::NAME,
        SummarizePrompt::NAME,
    ]
}

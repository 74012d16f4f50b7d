//! Prompt definitions module.
//!
//! Each built-in prompt lives in its own file and describes itself as a
//! declarative [`PromptSpec`]. Nothing here renders anything: the specs are
//! compiled by [`PromptCompiler`](super::PromptCompiler) at startup.
//!
//! ## Adding a New Prompt
//!
//! 1. Create a new file (e.g., `my_prompt.rs`)
//! 2. Implement the `PromptDefinition` trait
//! 3. Export it here
//! 4. Register in `registry.rs`

use super::spec::PromptSpec;
use crate::core::config::PromptsConfig;

mod code_review;
mod find_matching_trials;
mod naming_smiles;
mod summarize;

pub use code_review::{CodeReviewParams, CodeReviewPrompt};
pub use find_matching_trials::FindMatchingTrialsPrompt;
pub use naming_smiles::{NamingRulesExecutor, NamingSmilesParams, NamingSmilesPrompt};
pub use summarize::{SummarizeParams, SummarizePrompt};

/// Trait for built-in prompt definitions.
pub trait PromptDefinition {
    /// The unique name of the prompt.
    const NAME: &'static str;

    /// Display title shown to clients.
    const TITLE: &'static str;

    /// A description of what the prompt does.
    const DESCRIPTION: &'static str;

    /// The template string with `{field}` placeholders.
    fn template() -> &'static str;

    /// The registry entry for this prompt.
    fn spec(_config: &PromptsConfig) -> PromptSpec {
        PromptSpec::new(Self::template())
            .title(Self::TITLE)
            .description(Self::DESCRIPTION)
    }
}

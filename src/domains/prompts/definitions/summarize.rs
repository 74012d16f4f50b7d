//! Summarize prompt definition.

use schemars::JsonSchema;

use super::PromptDefinition;
use crate::core::config::PromptsConfig;
use crate::domains::prompts::spec::PromptSpec;

/// Parameters for the summarize prompt.
#[derive(Debug, JsonSchema)]
pub struct SummarizeParams {
    /// The content to summarize
    pub content: String,

    /// Desired length: brief, medium, or detailed
    #[serde(default)]
    pub length: String,
}

/// Summarize text or content.
pub struct SummarizePrompt;

impl PromptDefinition for SummarizePrompt {
    const NAME: &'static str = "summarize";
    const TITLE: &'static str = "Summarize";
    const DESCRIPTION: &'static str = "Summarize text or content";

    fn template() -> &'static str {
        "Please write a {length} summary of the following content:\n\n{content}"
    }

    fn spec(_config: &PromptsConfig) -> PromptSpec {
        PromptSpec::new(Self::template())
            .title(Self::TITLE)
            .description(Self::DESCRIPTION)
            .parameters::<SummarizeParams>()
    }
}

//! Code review prompt definition.

use schemars::JsonSchema;

use super::PromptDefinition;
use crate::core::config::PromptsConfig;
use crate::domains::prompts::spec::PromptSpec;

/// Parameters for the code review prompt.
#[derive(Debug, JsonSchema)]
pub struct CodeReviewParams {
    /// The programming language of the code
    pub language: String,

    /// The code to review
    pub code: String,

    /// Specific areas to focus on (e.g., security, performance)
    pub focus: Option<String>,
}

/// A code review prompt template.
pub struct CodeReviewPrompt;

impl PromptDefinition for CodeReviewPrompt {
    const NAME: &'static str = "code_review";
    const TITLE: &'static str = "Code Review";
    const DESCRIPTION: &'static str = "Review a code snippet for quality, bugs and security";

    fn template() -> &'static str {
        r#"Please review the following {language} code:

```{language}
{code}
```

Cover code quality, potential bugs, performance and security.
Focus areas requested by the author: {focus}"#
    }

    fn spec(_config: &PromptsConfig) -> PromptSpec {
        PromptSpec::new(Self::template())
            .title(Self::TITLE)
            .description(Self::DESCRIPTION)
            .parameters::<CodeReviewParams>()
    }
}

//! Clinical trial matching prompt definition.

use super::PromptDefinition;

/// Instructions for finding and ranking clinical trials for a patient.
pub struct FindMatchingTrialsPrompt;

impl PromptDefinition for FindMatchingTrialsPrompt {
    const NAME: &'static str = "find_matching_trials";
    const TITLE: &'static str = "Find Matching Clinical Trials";
    const DESCRIPTION: &'static str = "Search and rank appropriate clinical trials";

    fn template() -> &'static str {
        r#"You are a physician looking for clinical trials that could help a patient.
Be thorough and conservative in your judgement.

1. Review the patient's history: condition, age, sex and location.
   If the location is not given, ask for it before searching.
2. Search the clinical trials database:
   a. Build synonyms for the condition, preferably from MeSH or SNOMED CT,
      and OR them across the Condition and Keyword fields.
   b. Filter on age where relevant. Ages need units, e.g.
      `AREA[MaximumAge] RANGE[66 years,MAX]`.
   c. Expand the patient's location to nearby regions.
   d. Keep studies that are recruiting, active, or not yet recruiting.
   e. Match the patient's sex when it is known.
   f. Request only the fields needed for the analysis. Use the
      studies_metadata endpoint when unsure which fields exist.
   g. Sort by relevance (@relevance:desc).
3. For each returned study:
   a. Exclude it if sex or age requirements do not match.
   b. Walk the exclusion criteria one by one, marking each with
      ✅ (explicitly met), ❌ (explicitly not met) or ❓ (insufficient data).
      Never predict missing clinical data; ask instead.
   c. Walk the inclusion criteria the same way.
4. Rank the remaining studies by likelihood of eligibility and expected
   benefit, explaining the reasons for each position.
5. List questions the patient can ask their doctors to confirm eligibility."#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::PromptsConfig;
    use crate::domains::prompts::compiler::PromptCompiler;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_trials_prompt_takes_no_arguments() {
        let spec = FindMatchingTrialsPrompt::spec(&PromptsConfig::default());
        let prompt = PromptCompiler::new()
            .compile(FindMatchingTrialsPrompt::NAME, &spec)
            .unwrap();

        assert!(prompt.arguments().is_none());
        assert_eq!(prompt.title(), "Find Matching Clinical Trials");

        let text = prompt.invoke(HashMap::new()).await.unwrap();
        assert_eq!(text, FindMatchingTrialsPrompt::template());
    }
}

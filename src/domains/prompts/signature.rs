//! Prompt signatures.
//!
//! A signature is the client-facing shape of a compiled prompt: one
//! [`PromptArgument`] descriptor per contract field, in contract order. Hosts
//! derive their argument schema from these descriptors, so the signature is
//! built once at compile time and binding a call is checked against it.

use rmcp::model::PromptArgument;
use std::collections::HashMap;

use super::contract::ParameterContract;
use super::error::PromptError;

/// Argument values realized against a signature.
///
/// Every declared field is present; fields the caller omitted hold `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptArguments {
    values: Vec<(String, Option<String>)>,
}

impl PromptArguments {
    /// The value of `name`, or `None` when it is absent or undeclared.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.lookup(name).flatten()
    }

    /// `None` when `name` is undeclared, `Some(None)` when it was omitted.
    pub fn lookup(&self, name: &str) -> Option<Option<&str>> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for PromptArguments {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// The argument shape of one compiled prompt.
#[derive(Debug, Clone)]
pub struct PromptSignature {
    prompt: String,
    contract: ParameterContract,
    arguments: Vec<PromptArgument>,
}

impl PromptSignature {
    /// Build the signature for `prompt` from its contract.
    ///
    /// Field names must be usable as `{placeholder}` identifiers.
    pub fn synthesize(prompt: &str, contract: ParameterContract) -> Result<Self, PromptError> {
        if let Some(field) = contract
            .fields()
            .iter()
            .find(|field| !is_placeholder_name(&field.name))
        {
            return Err(PromptError::InvalidParameterName {
                prompt: prompt.to_string(),
                parameter: field.name.clone(),
            });
        }

        let arguments = contract
            .fields()
            .iter()
            .map(|field| PromptArgument {
                name: field.name.clone(),
                title: None,
                description: Some(field.description.clone()),
                required: Some(field.required),
            })
            .collect();

        Ok(Self {
            prompt: prompt.to_string(),
            contract,
            arguments,
        })
    }

    /// Argument descriptors in contract order.
    pub fn arguments(&self) -> &[PromptArgument] {
        &self.arguments
    }

    pub fn contract(&self) -> &ParameterContract {
        &self.contract
    }

    /// Whether the prompt takes no arguments at all.
    pub fn is_empty(&self) -> bool {
        self.contract.is_empty()
    }

    /// Bind caller-supplied values to this signature.
    ///
    /// Omitted fields are bound as absent. Names the signature does not
    /// declare are rejected.
    pub fn bind(&self, mut supplied: HashMap<String, String>) -> Result<PromptArguments, PromptError> {
        let values: Vec<_> = self
            .contract
            .fields()
            .iter()
            .map(|field| (field.name.clone(), supplied.remove(&field.name)))
            .collect();

        if let Some(argument) = supplied.into_keys().min() {
            return Err(PromptError::UnexpectedArgument {
                prompt: self.prompt.clone(),
                argument,
            });
        }

        Ok(PromptArguments { values })
    }

    /// First required field bound as absent, in contract order.
    pub fn first_missing<'a>(&'a self, arguments: &PromptArguments) -> Option<&'a str> {
        self.contract
            .fields()
            .iter()
            .filter(|field| field.required)
            .find(|field| arguments.get(&field.name).is_none())
            .map(|field| field.name.as_str())
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn is_placeholder_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::prompts::contract::ParameterField;

    fn signature(fields: Vec<ParameterField>) -> PromptSignature {
        let contract = ParameterContract::from_fields("greet", fields).unwrap();
        PromptSignature::synthesize("greet", contract).unwrap()
    }

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_descriptors_follow_contract() {
        let sig = signature(vec![
            ParameterField::required("name", "Name to greet"),
            ParameterField::optional("suffix", "Optional suffix"),
        ]);

        let descriptors = sig.arguments();
        assert_eq!(descriptors.len(), 2);
        assert_eq!(descriptors[0].name, "name");
        assert_eq!(descriptors[0].required, Some(true));
        assert_eq!(descriptors[1].name, "suffix");
        assert_eq!(descriptors[1].required, Some(false));
        assert_eq!(descriptors[1].description.as_deref(), Some("Optional suffix"));
    }

    #[test]
    fn test_invalid_names_rejected_at_synthesis() {
        for bad in ["first-name", "1st", "", "a b", "{x}"] {
            let contract =
                ParameterContract::from_fields("p", vec![ParameterField::required(bad, "d")])
                    .unwrap();
            let result = PromptSignature::synthesize("p", contract);
            assert!(
                matches!(result, Err(PromptError::InvalidParameterName { .. })),
                "expected rejection of {bad:?}"
            );
        }
    }

    #[test]
    fn test_bind_marks_omitted_fields_absent() {
        let sig = signature(vec![
            ParameterField::required("name", ""),
            ParameterField::optional("suffix", ""),
        ]);

        let bound = sig.bind(args(&[("name", "World")])).unwrap();
        assert_eq!(bound.len(), 2);
        assert_eq!(bound.lookup("name"), Some(Some("World")));
        assert_eq!(bound.lookup("suffix"), Some(None));
        assert_eq!(bound.lookup("other"), None);
    }

    #[test]
    fn test_bind_rejects_undeclared_argument() {
        let sig = signature(vec![ParameterField::required("name", "")]);
        let result = sig.bind(args(&[("name", "x"), ("extra", "y")]));
        assert!(matches!(
            result,
            Err(PromptError::UnexpectedArgument { ref argument, .. }) if argument == "extra"
        ));
    }

    #[test]
    fn test_first_missing_reports_required_only() {
        let sig = signature(vec![
            ParameterField::optional("style", ""),
            ParameterField::required("name", ""),
        ]);

        let bound = sig.bind(HashMap::new()).unwrap();
        assert_eq!(sig.first_missing(&bound), Some("name"));

        let bound = sig.bind(args(&[("name", "Ada")])).unwrap();
        assert_eq!(sig.first_missing(&bound), None);
    }
}

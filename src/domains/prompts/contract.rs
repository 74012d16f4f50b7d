//! Parameter contracts.
//!
//! A contract is the ordered list of fields a prompt accepts. It is read once
//! from the prompt's parameter schema when the prompt is compiled and never
//! changes afterwards.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

use super::error::PromptError;
use super::spec::{ParameterSource, SchemaSource};

/// One field of a parameter contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterField {
    pub name: String,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub description: String,
}

impl ParameterField {
    pub fn required(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: true,
            description: description.into(),
        }
    }

    pub fn optional(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            required: false,
            description: description.into(),
        }
    }
}

/// Ordered, immutable list of the fields a prompt accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterContract {
    fields: Vec<ParameterField>,
}

impl ParameterContract {
    /// Extract the contract for `prompt` from its parameter source.
    ///
    /// No source yields an empty contract.
    pub fn extract(prompt: &str, source: Option<&ParameterSource>) -> Result<Self, PromptError> {
        match source {
            None => Ok(Self::default()),
            Some(ParameterSource::Schema(schema)) => Self::from_schema(prompt, schema),
            Some(ParameterSource::Fields(fields)) => Self::from_fields(prompt, fields.clone()),
        }
    }

    /// Read the fields of an object schema in declaration order.
    pub fn from_schema(prompt: &str, source: &SchemaSource) -> Result<Self, PromptError> {
        let schema = serde_json::to_value(source.schema())
            .map_err(|e| PromptError::invalid_schema(prompt, e.to_string()))?;

        let is_object = schema.get("type").and_then(Value::as_str) == Some("object");
        if !is_object {
            return Err(PromptError::invalid_schema(
                prompt,
                format!("{} is not an object schema", source.type_name()),
            ));
        }

        let required: HashSet<&str> = schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();

        let fields = schema
            .get("properties")
            .and_then(Value::as_object)
            .map(|properties| {
                properties
                    .iter()
                    .map(|(name, property)| ParameterField {
                        name: name.clone(),
                        required: required.contains(name.as_str()),
                        description: property
                            .get("description")
                            .and_then(Value::as_str)
                            .unwrap_or_default()
                            .to_string(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self::from_fields(prompt, fields)
    }

    /// Build a contract from explicitly declared fields.
    ///
    /// Blank descriptions become `Parameter <name>`.
    pub fn from_fields(prompt: &str, fields: Vec<ParameterField>) -> Result<Self, PromptError> {
        let mut seen = HashSet::new();
        let mut contract = Vec::with_capacity(fields.len());

        for mut field in fields {
            if !seen.insert(field.name.clone()) {
                return Err(PromptError::DuplicateParameter {
                    prompt: prompt.to_string(),
                    parameter: field.name,
                });
            }
            if field.description.trim().is_empty() {
                field.description = format!("Parameter {}", field.name);
            }
            contract.push(field);
        }

        Ok(Self { fields: contract })
    }

    pub fn fields(&self) -> &[ParameterField] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&ParameterField> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

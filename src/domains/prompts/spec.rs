//! Declarative prompt specifications.
//!
//! A [`PromptRegistry`] is plain data: an ordered mapping from prompt name to
//! [`PromptSpec`]. Nothing here is executable until the registry is handed to
//! the [`PromptCompiler`](super::compiler::PromptCompiler).

use schemars::JsonSchema;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::contract::ParameterField;
use super::renderer::PromptExecutor;

/// Generates the JSON schema for a parameter type.
fn generate_schema<T: JsonSchema>() -> schemars::Schema {
    schemars::schema_for!(T)
}

/// A parameter schema type captured without keeping the type around.
#[derive(Clone, Copy)]
pub struct SchemaSource {
    type_name: &'static str,
    generate: fn() -> schemars::Schema,
}

impl SchemaSource {
    /// Capture the schema of `T`.
    pub fn of<T: JsonSchema>() -> Self {
        Self {
            type_name: std::any::type_name::<T>(),
            generate: generate_schema::<T>,
        }
    }

    /// The Rust type name the schema was taken from.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Generate the schema.
    pub fn schema(&self) -> schemars::Schema {
        (self.generate)()
    }
}

impl fmt::Debug for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SchemaSource").field(&self.type_name).finish()
    }
}

/// Where a prompt's parameter contract comes from.
#[derive(Debug, Clone)]
pub enum ParameterSource {
    /// Derived from a schema type.
    Schema(SchemaSource),

    /// Declared field by field (file-based registries).
    Fields(Vec<ParameterField>),
}

/// A custom executor attached to a prompt.
#[derive(Clone)]
pub enum ExecutorRef {
    /// An executor supplied directly in code.
    Bound(Arc<dyn PromptExecutor>),

    /// An executor looked up by name in the compiler's [`ExecutorTable`].
    Named(String),
}

impl fmt::Debug for ExecutorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bound(_) => f.write_str("Bound(..)"),
            Self::Named(name) => f.debug_tuple("Named").field(name).finish(),
        }
    }
}

/// Named executors that file-based registries may reference.
#[derive(Clone, Default)]
pub struct ExecutorTable {
    executors: HashMap<String, Arc<dyn PromptExecutor>>,
}

impl ExecutorTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an executor under `name`, replacing any previous one.
    pub fn with(mut self, name: impl Into<String>, executor: Arc<dyn PromptExecutor>) -> Self {
        self.executors.insert(name.into(), executor);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn PromptExecutor>> {
        self.executors.get(name).cloned()
    }

    pub fn names(&self) -> Vec<&str> {
        self.executors.keys().map(String::as_str).collect()
    }
}

impl fmt::Debug for ExecutorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutorTable")
            .field("executors", &self.names())
            .finish()
    }
}

/// One declarative registry entry.
#[derive(Debug, Clone, Default)]
pub struct PromptSpec {
    /// Display label. Derived from the prompt name when unset.
    pub title: Option<String>,

    /// Free text shown to clients.
    pub description: Option<String>,

    /// Template with `{field}` placeholders.
    pub template: String,

    /// Parameter contract source. `None` means the prompt takes no arguments.
    pub parameters: Option<ParameterSource>,

    /// Custom executor replacing template substitution.
    pub executor: Option<ExecutorRef>,
}

impl PromptSpec {
    /// Create a spec rendering `template`.
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            ..Default::default()
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Take the parameter contract from the schema of `T`.
    pub fn parameters<T: JsonSchema>(mut self) -> Self {
        self.parameters = Some(ParameterSource::Schema(SchemaSource::of::<T>()));
        self
    }

    /// Declare the parameter contract explicitly.
    pub fn fields(mut self, fields: Vec<ParameterField>) -> Self {
        self.parameters = Some(ParameterSource::Fields(fields));
        self
    }

    /// Render through `executor` instead of the template.
    pub fn executor(mut self, executor: Arc<dyn PromptExecutor>) -> Self {
        self.executor = Some(ExecutorRef::Bound(executor));
        self
    }

    /// Render through the executor registered under `name`.
    pub fn named_executor(mut self, name: impl Into<String>) -> Self {
        self.executor = Some(ExecutorRef::Named(name.into()));
        self
    }

    /// The title, falling back to the title-cased prompt name.
    pub fn resolved_title(&self, name: &str) -> String {
        self.title.clone().unwrap_or_else(|| default_title(name))
    }
}

/// Title-case a prompt name: `naming_smiles` becomes `Naming Smiles`.
pub fn default_title(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Insertion-ordered mapping from prompt name to spec.
#[derive(Debug, Clone, Default)]
pub struct PromptRegistry {
    entries: Vec<(String, PromptSpec)>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. An existing name keeps its position and gets the new spec.
    pub fn insert(&mut self, name: impl Into<String>, spec: PromptSpec) {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = spec,
            None => self.entries.push((name, spec)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, spec: PromptSpec) -> Self {
        self.insert(name, spec);
        self
    }

    /// Append every entry of `other`.
    pub fn extend(&mut self, other: PromptRegistry) {
        for (name, spec) in other.entries {
            self.insert(name, spec);
        }
    }

    pub fn get(&self, name: &str) -> Option<&PromptSpec> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, spec)| spec)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PromptSpec)> {
        self.entries.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

//! Prompt service implementation.
//!
//! The PromptService is the host of compiled prompts. At construction it
//! compiles the built-in registry and, when configured, a registry file.
//! Entries that fail to compile or register are logged and skipped.

use rmcp::model::{GetPromptResult, Prompt, PromptMessage, PromptMessageRole};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

use super::compiler::{CompileReport, CompiledPrompt, PromptCompiler, PromptHost};
use super::definitions::NamingRulesExecutor;
use super::error::PromptError;
use super::registry::builtin_registry;
use super::registry_file::load_registry;
use super::spec::{ExecutorTable, PromptRegistry};
use crate::core::config::PromptsConfig;

/// Name under which registry files can reference the naming rules executor.
pub const NAMING_RULES_EXECUTOR: &str = "naming_rules";

/// Service for hosting and invoking compiled prompts.
#[derive(Debug, Default)]
pub struct PromptService {
    /// Compiled prompts by name.
    prompts: HashMap<String, CompiledPrompt>,

    /// Registration order, used for listing.
    order: Vec<String>,

    /// Entries that were not registered, tagged with their prompt name.
    failures: Vec<(String, PromptError)>,
}

impl PromptService {
    /// Create a new PromptService with the given configuration.
    pub fn new(config: PromptsConfig) -> Self {
        Self::with_executors(config, ExecutorTable::new())
    }

    /// Create a PromptService whose registry file may also reference `executors`.
    pub fn with_executors(config: PromptsConfig, executors: ExecutorTable) -> Self {
        info!("Initializing PromptService");

        let executors = executors.with(
            NAMING_RULES_EXECUTOR,
            Arc::new(NamingRulesExecutor::new(config.naming_rules_path.clone())),
        );
        let compiler = PromptCompiler::new().with_executors(executors);
        let mut service = Self::default();

        if config.include_builtin {
            let report = service.compile(&compiler, &builtin_registry(&config));
            service.failures.extend(report.failures);
        }

        if let Some(path) = &config.registry_file {
            match load_registry(path) {
                Ok(file) => {
                    service.failures.extend(file.rejected);
                    let report = service.compile(&compiler, &file.registry);
                    service.failures.extend(report.failures);
                }
                Err(e) => {
                    warn!("Prompt registry file ignored: {}", e);
                    service.failures.push((path.display().to_string(), e));
                }
            }
        }

        info!(
            "{} prompt(s) available, {} rejected",
            service.len(),
            service.failures.len()
        );
        service
    }

    /// Compile `registry` into this service.
    pub fn compile(&mut self, compiler: &PromptCompiler, registry: &PromptRegistry) -> CompileReport {
        let report = compiler.compile_registry(registry, self);
        if !report.is_clean() {
            warn!(
                "{} of {} prompt(s) were not registered",
                report.failures.len(),
                registry.len()
            );
        }
        report
    }

    /// Look up a compiled prompt.
    pub fn prompt(&self, name: &str) -> Option<&CompiledPrompt> {
        self.prompts.get(name)
    }

    /// Entries rejected while building this service.
    ///
    /// A registry file that could not be read at all is reported under its
    /// path.
    pub fn failures(&self) -> &[(String, PromptError)] {
        &self.failures
    }

    /// Registered prompt names in registration order.
    pub fn names(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// List all available prompts.
    pub async fn list_prompts(&self) -> Vec<Prompt> {
        self.order
            .iter()
            .filter_map(|name| self.prompts.get(name))
            .map(|prompt| Prompt {
                name: prompt.name().to_string(),
                title: Some(prompt.title().to_string()),
                description: Some(prompt.description().to_string()),
                arguments: prompt.arguments(),
                icons: None,
                meta: None,
            })
            .collect()
    }

    /// Invoke a prompt and wrap its text as a user message.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: Option<HashMap<String, String>>,
    ) -> Result<GetPromptResult, PromptError> {
        let prompt = self
            .prompts
            .get(name)
            .ok_or_else(|| PromptError::not_found(name))?;

        let content = prompt.invoke(arguments.unwrap_or_default()).await?;

        Ok(GetPromptResult {
            description: Some(prompt.description().to_string()),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, content)],
        })
    }
}

impl PromptHost for PromptService {
    fn add_prompt(&mut self, prompt: CompiledPrompt) -> Result<(), PromptError> {
        if self.prompts.contains_key(prompt.name()) {
            return Err(PromptError::AlreadyRegistered(prompt.name().to_string()));
        }

        info!("Registering prompt: {}", prompt.name());
        self.order.push(prompt.name().to_string());
        self.prompts.insert(prompt.name().to_string(), prompt);
        Ok(())
    }
}

//! Prompt Registry Compiler.
//!
//! Turns each [`PromptSpec`] of a [`PromptRegistry`] into a [`CompiledPrompt`]
//! and hands it to a [`PromptHost`]. Compilation runs once, synchronously,
//! at startup. A failing entry is reported and skipped; the rest of the
//! registry still compiles.

use rmcp::model::PromptArgument;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use super::contract::ParameterContract;
use super::error::PromptError;
use super::renderer::{
    PlaceholderPolicy, RenderFn, RenderTarget, missing_parameter_message,
};
use super::signature::PromptSignature;
use super::spec::{ExecutorRef, ExecutorTable, PromptRegistry, PromptSpec};

/// Registration contract of whatever hosts compiled prompts.
pub trait PromptHost {
    /// Take ownership of one compiled prompt.
    fn add_prompt(&mut self, prompt: CompiledPrompt) -> Result<(), PromptError>;
}

/// A registry entry compiled into an invocable unit.
#[derive(Clone)]
pub struct CompiledPrompt {
    name: String,
    title: String,
    description: String,
    signature: PromptSignature,
    render: RenderFn,
}

impl CompiledPrompt {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Argument descriptors, or `None` for a prompt without parameters.
    pub fn arguments(&self) -> Option<Vec<PromptArgument>> {
        if self.signature.is_empty() {
            None
        } else {
            Some(self.signature.arguments().to_vec())
        }
    }

    /// Invoke the prompt with caller-supplied arguments.
    ///
    /// A missing required argument yields the missing-parameter text. Only
    /// arguments the signature does not declare and executor failures are
    /// returned as errors.
    pub async fn invoke(&self, arguments: HashMap<String, String>) -> Result<String, PromptError> {
        let bound = self.signature.bind(arguments)?;

        if let Some(missing) = self.signature.first_missing(&bound) {
            debug!("Prompt '{}' invoked without '{}'", self.name, missing);
            return Ok(missing_parameter_message(missing, &self.name));
        }

        (self.render)(bound).await
    }
}

impl fmt::Debug for CompiledPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledPrompt")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Outcome of compiling a whole registry.
#[must_use]
#[derive(Debug, Default)]
pub struct CompileReport {
    /// Names accepted by the host, in registry order.
    pub registered: Vec<String>,

    /// Entries that failed, each with its reason.
    pub failures: Vec<(String, PromptError)>,
}

impl CompileReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fail with the first failure, tagged with its prompt name.
    pub fn into_result(self) -> Result<Vec<String>, PromptError> {
        match self.failures.into_iter().next() {
            Some((name, err)) => Err(PromptError::registration(name, err)),
            None => Ok(self.registered),
        }
    }
}

/// Compiles prompt specs.
#[derive(Debug, Clone, Default)]
pub struct PromptCompiler {
    executors: ExecutorTable,
}

impl PromptCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `executors` to resolve [`ExecutorRef::Named`] references.
    pub fn with_executors(mut self, executors: ExecutorTable) -> Self {
        self.executors = executors;
        self
    }

    /// Compile one spec.
    pub fn compile(&self, name: &str, spec: &PromptSpec) -> Result<CompiledPrompt, PromptError> {
        let contract = ParameterContract::extract(name, spec.parameters.as_ref())?;
        let signature = PromptSignature::synthesize(name, contract)?;

        let executor = match &spec.executor {
            None => None,
            Some(ExecutorRef::Bound(executor)) => Some(Arc::clone(executor)),
            Some(ExecutorRef::Named(executor)) => Some(self.executors.get(executor).ok_or_else(
                || PromptError::UnknownExecutor {
                    prompt: name.to_string(),
                    executor: executor.clone(),
                },
            )?),
        };

        let policy = if signature.is_empty() {
            PlaceholderPolicy::Blank
        } else {
            PlaceholderPolicy::Strict
        };

        let render = RenderTarget {
            name: Arc::from(name),
            template: Arc::from(spec.template.as_str()),
            executor,
            policy,
        }
        .into_render_fn();

        Ok(CompiledPrompt {
            name: name.to_string(),
            title: spec.resolved_title(name),
            description: spec.description.clone().unwrap_or_default(),
            signature,
            render,
        })
    }

    /// Compile every entry of `registry` in order and register it with `host`.
    pub fn compile_registry<H>(&self, registry: &PromptRegistry, host: &mut H) -> CompileReport
    where
        H: PromptHost + ?Sized,
    {
        info!("Compiling {} prompt(s)", registry.len());
        let mut report = CompileReport::default();

        for (name, spec) in registry.iter() {
            let outcome = self
                .compile(name, spec)
                .and_then(|prompt| host.add_prompt(prompt));

            match outcome {
                Ok(()) => {
                    debug!("Registered prompt: {}", name);
                    report.registered.push(name.to_string());
                }
                Err(e) => {
                    warn!("Skipping prompt '{}': {}", name, e);
                    report.failures.push((name.to_string(), e));
                }
            }
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::prompts::contract::ParameterField;
    use crate::domains::prompts::renderer::executor_fn;
    use schemars::JsonSchema;

    #[allow(dead_code)]
    #[derive(JsonSchema)]
    struct GreetParams {
        /// Name to greet
        name: String,
        /// Optional suffix
        suffix: Option<String>,
    }

    /// Collects prompts, rejecting any name listed in `reject`.
    #[derive(Default)]
    struct StubHost {
        prompts: Vec<CompiledPrompt>,
        reject: Vec<&'static str>,
    }

    impl PromptHost for StubHost {
        fn add_prompt(&mut self, prompt: CompiledPrompt) -> Result<(), PromptError> {
            if self.reject.iter().any(|name| *name == prompt.name()) {
                return Err(PromptError::AlreadyRegistered(prompt.name().to_string()));
            }
            self.prompts.push(prompt);
            Ok(())
        }
    }

    impl StubHost {
        fn get(&self, name: &str) -> &CompiledPrompt {
            self.prompts.iter().find(|p| p.name() == name).unwrap()
        }
    }

    fn args(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn compile(name: &str, spec: PromptSpec) -> CompiledPrompt {
        PromptCompiler::new().compile(name, &spec).unwrap()
    }

    #[tokio::test]
    async fn test_schema_prompt_renders() {
        let prompt = compile(
            "greet",
            PromptSpec::new("Hello {name}{suffix}!")
                .title("Greeter")
                .description("Say hello")
                .parameters::<GreetParams>(),
        );

        assert_eq!(prompt.title(), "Greeter");
        assert_eq!(prompt.description(), "Say hello");
        let arguments = prompt.arguments().unwrap();
        assert_eq!(arguments.len(), 2);
        assert_eq!(arguments[0].required, Some(true));
        assert_eq!(arguments[1].required, Some(false));

        let text = prompt
            .invoke(args(&[("name", "World"), ("suffix", "")]))
            .await
            .unwrap();
        assert_eq!(text, "Hello World!");
    }

    #[tokio::test]
    async fn test_missing_required_returns_message() {
        let prompt = compile(
            "greet",
            PromptSpec::new("Hello {name}!").parameters::<GreetParams>(),
        );

        let text = prompt.invoke(HashMap::new()).await.unwrap();
        assert_eq!(text, "Error: Missing parameter 'name' for prompt 'greet'");
    }

    #[tokio::test]
    async fn test_omitted_optional_renders_empty() {
        let prompt = compile(
            "greet",
            PromptSpec::new("Hello {name}{suffix}!").parameters::<GreetParams>(),
        );

        let text = prompt.invoke(args(&[("name", "Ada")])).await.unwrap();
        assert_eq!(text, "Hello Ada!");
    }

    #[tokio::test]
    async fn test_no_parameters_blanks_placeholders() {
        let prompt = compile("plain", PromptSpec::new("Value: [{value}]"));
        assert!(prompt.arguments().is_none());
        assert_eq!(prompt.title(), "Plain");
        assert_eq!(prompt.description(), "");
        assert_eq!(prompt.invoke(HashMap::new()).await.unwrap(), "Value: []");

        let verbatim = compile("verbatim", PromptSpec::new("Just text."));
        assert_eq!(verbatim.invoke(HashMap::new()).await.unwrap(), "Just text.");
    }

    #[tokio::test]
    async fn test_custom_executor() {
        let executor = executor_fn(|name, arguments, _template| async move {
            Ok(format!("{}:{}", name, arguments.get("x").unwrap_or_default()))
        });
        let prompt = compile(
            "echo",
            PromptSpec::new("unused")
                .fields(vec![ParameterField::required("x", "")])
                .executor(executor),
        );

        let text = prompt.invoke(args(&[("x", "42")])).await.unwrap();
        assert_eq!(text, "echo:42");
    }

    #[tokio::test]
    async fn test_executor_error_propagates() {
        let executor = executor_fn(|name, _arguments, _template| async move {
            Err(PromptError::executor(name, "upstream unavailable"))
        });
        let prompt = compile("broken", PromptSpec::new("").executor(executor));

        let result = prompt.invoke(HashMap::new()).await;
        assert!(matches!(result, Err(PromptError::Executor { .. })));
    }

    #[tokio::test]
    async fn test_unexpected_argument_is_error() {
        let prompt = compile("plain", PromptSpec::new("Hi"));
        let result = prompt.invoke(args(&[("nope", "1")])).await;
        assert!(matches!(result, Err(PromptError::UnexpectedArgument { .. })));
    }

    #[test]
    fn test_named_executor_resolution() {
        let spec = PromptSpec::new("x").named_executor("rules");

        let result = PromptCompiler::new().compile("p", &spec);
        assert!(matches!(
            result,
            Err(PromptError::UnknownExecutor { ref executor, .. }) if executor == "rules"
        ));

        let table = ExecutorTable::new().with(
            "rules",
            executor_fn(|_, _, _| async { Ok(String::from("ok")) }),
        );
        let compiler = PromptCompiler::new().with_executors(table);
        assert!(compiler.compile("p", &spec).is_ok());
    }

    #[tokio::test]
    async fn test_closures_capture_their_own_entry() {
        let registry = PromptRegistry::new()
            .with("a", PromptSpec::new("A"))
            .with("b", PromptSpec::new("B"));

        let mut host = StubHost::default();
        let report = PromptCompiler::new().compile_registry(&registry, &mut host);
        assert!(report.is_clean());

        assert_eq!(host.get("a").invoke(HashMap::new()).await.unwrap(), "A");
        assert_eq!(host.get("b").invoke(HashMap::new()).await.unwrap(), "B");
        assert_eq!(host.get("a").invoke(HashMap::new()).await.unwrap(), "A");
    }

    #[tokio::test]
    async fn test_repeated_invocation_is_stable() {
        let prompt = compile(
            "greet",
            PromptSpec::new("Hello {name}{suffix}!").parameters::<GreetParams>(),
        );
        let first = prompt.invoke(args(&[("name", "X")])).await.unwrap();
        let second = prompt.invoke(args(&[("name", "X")])).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_concurrent_invocations_are_independent() {
        let prompt = compile(
            "greet",
            PromptSpec::new("Hello {name}!").parameters::<GreetParams>(),
        );

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let prompt = prompt.clone();
                tokio::spawn(async move {
                    let name = i.to_string();
                    let text = prompt
                        .invoke(args(&[("name", name.as_str())]))
                        .await
                        .unwrap();
                    (i, text)
                })
            })
            .collect();

        for handle in handles {
            let (i, text) = handle.await.unwrap();
            assert_eq!(text, format!("Hello {i}!"));
        }
    }

    #[tokio::test]
    async fn test_registration_failures_are_isolated() {
        let registry = PromptRegistry::new()
            .with("a", PromptSpec::new("A"))
            .with("b", PromptSpec::new("B"))
            .with("c", PromptSpec::new("C"));

        let mut host = StubHost {
            reject: vec!["b"],
            ..Default::default()
        };
        let report = PromptCompiler::new().compile_registry(&registry, &mut host);

        assert_eq!(report.registered, vec!["a", "c"]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, "b");
        assert_eq!(host.get("a").invoke(HashMap::new()).await.unwrap(), "A");
        assert_eq!(host.get("c").invoke(HashMap::new()).await.unwrap(), "C");

        let err = report.into_result().unwrap_err();
        assert!(matches!(err, PromptError::Registration { ref name, .. } if name == "b"));
    }

    #[test]
    fn test_configuration_errors_do_not_stop_batch() {
        let registry = PromptRegistry::new()
            .with(
                "bad_name",
                PromptSpec::new("{first-name}")
                    .fields(vec![ParameterField::required("first-name", "")]),
            )
            .with("bad_schema", PromptSpec::new("").parameters::<String>())
            .with("good", PromptSpec::new("ok"));

        let mut host = StubHost::default();
        let report = PromptCompiler::new().compile_registry(&registry, &mut host);

        assert_eq!(report.registered, vec!["good"]);
        let failed: Vec<_> = report.failures.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(failed, vec!["bad_name", "bad_schema"]);
    }

    #[test]
    fn test_compiling_twice_gives_distinct_units() {
        let registry = PromptRegistry::new().with("a", PromptSpec::new("A"));
        let compiler = PromptCompiler::new();

        let mut first = StubHost::default();
        let mut second = StubHost::default();
        assert!(compiler.compile_registry(&registry, &mut first).is_clean());
        assert!(compiler.compile_registry(&registry, &mut second).is_clean());

        assert_eq!(first.prompts.len(), 1);
        assert_eq!(second.prompts.len(), 1);
        assert!(!Arc::ptr_eq(&first.prompts[0].render, &second.prompts[0].render));
    }
}

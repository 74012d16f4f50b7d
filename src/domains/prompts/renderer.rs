//! Prompt rendering.
//!
//! Templates use `{field}` placeholders; `{{` and `}}` produce literal braces.
//! Rendering problems caused by the caller's input are returned as text so the
//! calling agent can read them, never as errors.

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

use super::error::PromptError;
use super::signature::PromptArguments;

/// Custom render function attached to a prompt.
///
/// Receives the prompt name, the bound arguments and the prompt's template.
#[async_trait]
pub trait PromptExecutor: Send + Sync {
    async fn execute(
        &self,
        prompt_name: &str,
        arguments: &PromptArguments,
        template: &str,
    ) -> Result<String, PromptError>;
}

/// Adapts an async closure into a [`PromptExecutor`].
pub struct FnExecutor<F> {
    f: F,
}

/// Wrap `f` as a shareable executor.
pub fn executor_fn<F, Fut>(f: F) -> Arc<dyn PromptExecutor>
where
    F: Fn(String, PromptArguments, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<String, PromptError>> + Send + 'static,
{
    Arc::new(FnExecutor { f })
}

#[async_trait]
impl<F, Fut> PromptExecutor for FnExecutor<F>
where
    F: Fn(String, PromptArguments, String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<String, PromptError>> + Send,
{
    async fn execute(
        &self,
        prompt_name: &str,
        arguments: &PromptArguments,
        template: &str,
    ) -> Result<String, PromptError> {
        (self.f)(
            prompt_name.to_string(),
            arguments.clone(),
            template.to_string(),
        )
        .await
    }
}

/// Generic render function held by a compiled prompt.
pub type RenderFn =
    Arc<dyn Fn(PromptArguments) -> BoxFuture<'static, Result<String, PromptError>> + Send + Sync>;

/// How placeholders without a matching argument are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderPolicy {
    /// Unknown placeholders produce the missing-parameter message.
    Strict,

    /// Unknown placeholders render as empty text. Used for prompts without
    /// a parameter contract.
    Blank,
}

/// A template substitution failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateFault {
    /// The template names a placeholder with no argument.
    MissingParameter(String),

    /// The template itself is malformed.
    Malformed(String),
}

impl fmt::Display for TemplateFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingParameter(name) => write!(f, "missing parameter '{name}'"),
            Self::Malformed(msg) => f.write_str(msg),
        }
    }
}

/// Text returned when a parameter is missing.
pub fn missing_parameter_message(parameter: &str, prompt: &str) -> String {
    format!("Error: Missing parameter '{parameter}' for prompt '{prompt}'")
}

/// Text returned for any other substitution failure.
pub fn formatting_error_message(prompt: &str, message: &str) -> String {
    format!("Error formatting prompt '{prompt}': {message}")
}

/// Substitute `arguments` into `template`.
///
/// Absent arguments substitute as empty text.
pub fn substitute(
    template: &str,
    arguments: &PromptArguments,
    policy: PlaceholderPolicy,
) -> Result<String, TemplateFault> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("{{") {
            out.push('{');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("}}") {
            out.push('}');
            rest = after;
        } else if tail.starts_with('}') {
            return Err(TemplateFault::Malformed(
                "Single '}' encountered in format string".to_string(),
            ));
        } else {
            let body = &tail[1..];
            let end = body
                .find(['{', '}'])
                .filter(|&i| body[i..].starts_with('}'))
                .ok_or_else(|| {
                    TemplateFault::Malformed("expected '}' before end of string".to_string())
                })?;
            let name = placeholder_name(&body[..end])?;

            match (arguments.lookup(name), policy) {
                (Some(value), _) => out.push_str(value.unwrap_or_default()),
                (None, PlaceholderPolicy::Blank) => {}
                (None, PlaceholderPolicy::Strict) => {
                    return Err(TemplateFault::MissingParameter(name.to_string()));
                }
            }
            rest = &body[end + 1..];
        }
    }

    out.push_str(rest);
    Ok(out)
}

/// Validate the text between `{` and `}`.
fn placeholder_name(field: &str) -> Result<&str, TemplateFault> {
    if field.is_empty() || field.chars().all(|c| c.is_ascii_digit()) {
        return Err(TemplateFault::Malformed(format!(
            "positional placeholder '{{{field}}}' is not supported, use a parameter name"
        )));
    }
    if field.contains([':', '!']) {
        return Err(TemplateFault::Malformed(format!(
            "format specifiers are not supported in placeholder '{{{field}}}'"
        )));
    }
    if field.contains(['.', '[', ']']) {
        return Err(TemplateFault::Malformed(format!(
            "attribute or index access is not supported in placeholder '{{{field}}}'"
        )));
    }
    Ok(field)
}

/// Render `template`, converting every fault into text.
pub fn render_template(
    prompt: &str,
    template: &str,
    arguments: &PromptArguments,
    policy: PlaceholderPolicy,
) -> String {
    match substitute(template, arguments, policy) {
        Ok(text) => text,
        Err(TemplateFault::MissingParameter(name)) => {
            debug!("Prompt '{}' references missing parameter '{}'", prompt, name);
            missing_parameter_message(&name, prompt)
        }
        Err(TemplateFault::Malformed(msg)) => {
            debug!("Prompt '{}' has a malformed template: {}", prompt, msg);
            formatting_error_message(prompt, &msg)
        }
    }
}

/// Everything one compiled prompt needs at render time, owned by value.
#[derive(Clone)]
pub struct RenderTarget {
    pub name: Arc<str>,
    pub template: Arc<str>,
    pub executor: Option<Arc<dyn PromptExecutor>>,
    pub policy: PlaceholderPolicy,
}

impl RenderTarget {
    /// Turn the target into the render function stored on the compiled prompt.
    pub fn into_render_fn(self) -> RenderFn {
        let target = Arc::new(self);
        Arc::new(move |arguments: PromptArguments| {
            let target = Arc::clone(&target);
            async move { target.render(arguments).await }.boxed()
        })
    }

    async fn render(&self, arguments: PromptArguments) -> Result<String, PromptError> {
        match &self.executor {
            Some(executor) => {
                executor
                    .execute(&self.name, &arguments, &self.template)
                    .await
            }
            None => Ok(render_template(
                &self.name,
                &self.template,
                &arguments,
                self.policy,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(pairs: &[(&str, Option<&str>)]) -> PromptArguments {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    fn strict(template: &str, arguments: &PromptArguments) -> String {
        render_template("p", template, arguments, PlaceholderPolicy::Strict)
    }

    #[test]
    fn test_simple_substitution() {
        let a = args(&[("name", Some("World")), ("suffix", Some(""))]);
        assert_eq!(strict("Hello {name}{suffix}!", &a), "Hello World!");
    }

    #[test]
    fn test_absent_value_renders_empty() {
        let a = args(&[("name", Some("World")), ("suffix", None)]);
        assert_eq!(strict("Hello {name}{suffix}!", &a), "Hello World!");
    }

    #[test]
    fn test_escaped_braces() {
        let a = args(&[("x", Some("1"))]);
        assert_eq!(strict("{{literal}} {x} }}", &a), "{literal} 1 }");
    }

    #[test]
    fn test_missing_placeholder_returns_message() {
        let a = args(&[("name", Some("World"))]);
        assert_eq!(
            strict("Hi {name} from {place}", &a),
            "Error: Missing parameter 'place' for prompt 'p'"
        );
    }

    #[test]
    fn test_blank_policy_drops_unknown_placeholders() {
        let a = PromptArguments::default();
        let text = render_template("p", "A{x}B{y}C", &a, PlaceholderPolicy::Blank);
        assert_eq!(text, "ABC");
    }

    #[test]
    fn test_malformed_templates_return_message() {
        let a = args(&[("x", Some("1"))]);
        for template in ["{x", "x}", "{}", "{0}", "{x:>4}", "{x!r}", "{x.y}", "{a{x}}"] {
            let text = strict(template, &a);
            assert!(
                text.starts_with("Error formatting prompt 'p': "),
                "unexpected output for {template:?}: {text}"
            );
        }
    }

    #[test]
    fn test_missing_reported_before_later_malformation() {
        let a = PromptArguments::default();
        assert_eq!(
            strict("{who} then {", &a),
            "Error: Missing parameter 'who' for prompt 'p'"
        );
    }

    #[test]
    fn test_template_without_placeholders_is_verbatim() {
        let a = PromptArguments::default();
        assert_eq!(strict("No placeholders here.", &a), "No placeholders here.");
        assert_eq!(strict("", &a), "");
    }

    #[tokio::test]
    async fn test_render_fn_uses_executor() {
        let executor = executor_fn(|name, arguments, _template| async move {
            Ok(format!("{}:{}", name, arguments.get("x").unwrap_or_default()))
        });
        let render = RenderTarget {
            name: Arc::from("echo"),
            template: Arc::from("unused"),
            executor: Some(executor),
            policy: PlaceholderPolicy::Strict,
        }
        .into_render_fn();

        let text = render(args(&[("x", Some("42"))])).await.unwrap();
        assert_eq!(text, "echo:42");
    }

    #[tokio::test]
    async fn test_executor_receives_template() {
        let executor = executor_fn(|_name, _arguments, template| async move {
            Ok(template.to_uppercase())
        });
        let render = RenderTarget {
            name: Arc::from("shout"),
            template: Arc::from("quiet"),
            executor: Some(executor),
            policy: PlaceholderPolicy::Strict,
        }
        .into_render_fn();

        assert_eq!(render(PromptArguments::default()).await.unwrap(), "QUIET");
    }
}

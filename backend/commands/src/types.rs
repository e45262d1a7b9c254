/// Command signature types.
use serde_json::Value;

use crate::coerce::Coercion;

/// Name of the implicit context parameter every signature must start with.
pub const MESSAGE_PARAMETER: &str = "message";

// ---------------------------------------------------------------------------
// Parameter
// ---------------------------------------------------------------------------

/// One declared command parameter.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    pub name: String,
    /// Value a handler sees when the invoker did not supply this parameter.
    pub default: Option<Value>,
    /// Applied to the raw token during binding; `None` keeps the token as a string.
    pub coercion: Option<Coercion>,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self { name: name.into(), default: None, coercion: None }
    }

    pub fn optional(name: impl Into<String>, default: Value) -> Self {
        Self { name: name.into(), default: Some(default), coercion: None }
    }

    pub fn with_coercion(mut self, coercion: Coercion) -> Self {
        self.coercion = Some(coercion);
        self
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// `name` for required parameters, `name:default` otherwise.
    pub fn usage(&self) -> String {
        match &self.default {
            None => self.name.clone(),
            Some(default) => format!("{}:{}", self.name, display_default(default)),
        }
    }
}

fn display_default(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "none".to_string(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// The declared parameter list of a handler, including the leading `message`.
///
/// Built once at startup and validated when the command is registered:
///
/// ```ignore
/// let sig = Signature::new()
///     .message()
///     .param("text")
///     .optional_typed("times", json!(2), Coercion::integer());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Signature {
    params: Vec<ParamSpec>,
}

impl Signature {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_params(params: impl IntoIterator<Item = ParamSpec>) -> Self {
        Self { params: params.into_iter().collect() }
    }

    /// Declare the message context parameter.
    pub fn message(self) -> Self {
        self.push(ParamSpec::required(MESSAGE_PARAMETER))
    }

    pub fn param(self, name: impl Into<String>) -> Self {
        self.push(ParamSpec::required(name))
    }

    pub fn typed(self, name: impl Into<String>, coercion: Coercion) -> Self {
        self.push(ParamSpec::required(name).with_coercion(coercion))
    }

    pub fn optional(self, name: impl Into<String>, default: Value) -> Self {
        self.push(ParamSpec::optional(name, default))
    }

    pub fn optional_typed(self, name: impl Into<String>, default: Value, coercion: Coercion) -> Self {
        self.push(ParamSpec::optional(name, default).with_coercion(coercion))
    }

    pub fn push(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// All declared parameters, `message` included.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn into_params(self) -> Vec<ParamSpec> {
        self.params
    }
}

// ---------------------------------------------------------------------------
// Parsed invocation
// ---------------------------------------------------------------------------

/// A message that carried the prefix, split into command name and argument tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub name: String,
    pub args: Vec<String>,
}

/// Argument coercions: turn a raw token into a typed JSON value.
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

/// A token could not be converted by a parameter's coercion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert `{input}` to {coercion}: {reason}")]
pub struct CoercionError {
    pub coercion: String,
    pub input: String,
    pub reason: String,
}

impl CoercionError {
    pub fn new(coercion: impl Into<String>, input: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self {
            coercion: coercion.into(),
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}

type CoerceFn = dyn Fn(&str) -> Result<Value, CoercionError> + Send + Sync;

/// A named conversion applied to a parameter's raw token during binding.
#[derive(Clone)]
pub struct Coercion {
    name: String,
    func: Arc<CoerceFn>,
}

impl Coercion {
    /// Wrap `func` as a named coercion.
    ///
    /// Report bad input through `Err`; a panic inside `func` unwinds out of
    /// [`CommandDispatcher::invoke`](crate::dispatch::CommandDispatcher::invoke).
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&str) -> Result<Value, CoercionError> + Send + Sync + 'static,
    {
        Self { name: name.into(), func: Arc::new(func) }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, raw: &str) -> Result<Value, CoercionError> {
        (self.func)(raw)
    }

    /// Signed 64-bit integer. Surrounding whitespace is ignored.
    pub fn integer() -> Self {
        Self::new("int", |raw| {
            raw.trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| CoercionError::new("int", raw, e))
        })
    }

    /// Finite floating point number.
    pub fn float() -> Self {
        Self::new("float", |raw| {
            let parsed = raw
                .trim()
                .parse::<f64>()
                .map_err(|e| CoercionError::new("float", raw, e))?;
            serde_json::Number::from_f64(parsed)
                .map(Value::Number)
                .ok_or_else(|| CoercionError::new("float", raw, "not a finite number"))
        })
    }

    /// `true/yes/on/1` or `false/no/off/0`, case-insensitive.
    pub fn boolean() -> Self {
        Self::new("bool", |raw| match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Ok(Value::Bool(true)),
            "false" | "no" | "off" | "0" => Ok(Value::Bool(false)),
            _ => Err(CoercionError::new("bool", raw, "expected true or false")),
        })
    }

    /// Identity conversion; the token is kept as a string.
    pub fn text() -> Self {
        Self::new("str", |raw| Ok(Value::String(raw.to_string())))
    }

    /// Accept only one of the listed values.
    pub fn choice(choices: &[&str]) -> Self {
        let choices: Vec<String> = choices.iter().map(|c| c.to_string()).collect();
        Self::new("choice", move |raw| {
            if choices.iter().any(|c| c == raw) {
                Ok(Value::String(raw.to_string()))
            } else {
                Err(CoercionError::new(
                    "choice",
                    raw,
                    format!("expected one of {}", choices.join(", ")),
                ))
            }
        })
    }
}

impl fmt::Debug for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Coercion").field(&self.name).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn integer_accepts_padded_digits() {
        assert_eq!(Coercion::integer().apply(" 42").unwrap(), json!(42));
        assert_eq!(Coercion::integer().apply("-7").unwrap(), json!(-7));
    }

    #[test]
    fn integer_rejects_words() {
        let err = Coercion::integer().apply("four").unwrap_err();
        assert_eq!(err.coercion, "int");
        assert_eq!(err.input, "four");
    }

    #[test]
    fn float_rejects_non_finite() {
        assert_eq!(Coercion::float().apply("1.5").unwrap(), json!(1.5));
        assert!(Coercion::float().apply("inf").is_err());
        assert!(Coercion::float().apply("NaN").is_err());
    }

    #[test]
    fn boolean_is_case_insensitive() {
        assert_eq!(Coercion::boolean().apply("YES").unwrap(), json!(true));
        assert_eq!(Coercion::boolean().apply("off").unwrap(), json!(false));
        assert!(Coercion::boolean().apply("maybe").is_err());
    }

    #[test]
    fn choice_lists_valid_values_on_error() {
        let mode = Coercion::choice(&["on", "off"]);
        assert_eq!(mode.apply("on").unwrap(), json!("on"));
        let err = mode.apply("loud").unwrap_err();
        assert!(err.to_string().contains("on, off"));
    }

    #[test]
    fn custom_coercion_keeps_its_name() {
        let upper = Coercion::new("upper", |raw| Ok(Value::String(raw.to_uppercase())));
        assert_eq!(upper.name(), "upper");
        assert_eq!(upper.apply("abc").unwrap(), json!("ABC"));
        assert_eq!(format!("{upper:?}"), "Coercion(\"upper\")");
    }
}

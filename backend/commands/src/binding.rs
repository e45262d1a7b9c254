/// Argument binding: pair tokens with declared parameters and coerce them.
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::coerce::CoercionError;
use crate::types::ParamSpec;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("invalid argument for `{parameter}`: {source}")]
    InvalidArgument {
        parameter: String,
        #[source]
        source: CoercionError,
    },
}

/// Bind `tokens` positionally onto `params`.
///
/// The result has `min(params.len(), tokens.len())` entries: surplus tokens are
/// dropped and missing trailing parameters are simply absent. The caller is
/// responsible for checking the required count beforehand.
pub fn bind(params: &[ParamSpec], tokens: &[String]) -> Result<Vec<Value>, BindError> {
    params
        .iter()
        .zip(tokens)
        .map(|(param, token)| match &param.coercion {
            Some(coercion) => coercion.apply(token).map_err(|source| BindError::InvalidArgument {
                parameter: param.name.clone(),
                source,
            }),
            None => Ok(Value::String(token.clone())),
        })
        .collect()
}

/// Bound arguments handed to a command handler.
///
/// Lookups by name fall back to the parameter's declared default when the
/// invoker did not supply a value.
#[derive(Debug, Clone)]
pub struct Arguments {
    params: Arc<[ParamSpec]>,
    values: Vec<Value>,
}

impl Arguments {
    pub fn new(params: Arc<[ParamSpec]>, values: Vec<Value>) -> Self {
        Self { params, values }
    }

    /// Number of values the invoker actually supplied.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Supplied values in parameter order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn positional(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn is_supplied(&self, name: &str) -> bool {
        self.index_of(name).is_some_and(|i| i < self.values.len())
    }

    /// Supplied value for `name`, or its default.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.index_of(name)?;
        self.values
            .get(index)
            .or_else(|| self.params[index].default.as_ref())
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Deserialize the value for `name` into `T`.
    pub fn parse<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let value = self
            .get(name)
            .ok_or_else(|| anyhow!("missing argument `{name}`"))?;
        serde_json::from_value(value.clone())
            .with_context(|| format!("argument `{name}` has an unexpected type"))
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }
}

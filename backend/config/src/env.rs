//! Environment handling for config values.
//!
//! Two mechanisms:
//! - `${VAR_NAME}` references inside string values, resolved at load time.
//!   Only uppercase `[A-Z_][A-Z0-9_]*` names are matched; `$${VAR}` is kept
//!   literally as `${VAR}`.
//! - `HERALD_*` / `DISCORD_TOKEN` overrides applied on top of the parsed file.

use anyhow::{bail, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::HashMap;

use crate::schema::{DiscordConfig, HeraldConfig};

/// Matches `${VAR}` with an optional extra leading `$` for escapes.
static ENV_REF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\$?)\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references using the process environment.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    resolve_env_vars_with(value, &std::env::vars().collect())
}

/// Substitute `${VAR}` references using `env`. Unset or empty variables are an error.
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    resolve_at(value, env, "")
}

fn resolve_at(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    Ok(match value {
        Value::String(s) => Value::String(substitute(s, env, path)?),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, v)| resolve_at(v, env, &format!("{path}[{i}]")))
                .collect::<Result<_>>()?,
        ),
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, v) in map {
                let child = if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
                out.insert(key.clone(), resolve_at(v, env, &child)?);
            }
            Value::Object(out)
        }
        other => other.clone(),
    })
}

fn substitute(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    if !s.contains("${") {
        return Ok(s.to_string());
    }

    let mut missing: Option<String> = None;
    let replaced = ENV_REF.replace_all(s, |caps: &Captures| {
        let name = &caps[2];
        if !caps[1].is_empty() {
            return format!("${{{name}}}");
        }
        match env.get(name) {
            Some(v) if !v.is_empty() => v.clone(),
            _ => {
                missing.get_or_insert_with(|| name.to_string());
                String::new()
            }
        }
    });

    if let Some(var_name) = missing {
        bail!(MissingEnvVarError { var_name, config_path: path.to_string() });
    }
    Ok(replaced.into_owned())
}

/// Apply environment overrides. Unparseable booleans are ignored.
pub fn apply_env_overrides(config: &mut HeraldConfig, env: &HashMap<String, String>) {
    if let Some(prefix) = env.get("HERALD_PREFIX") {
        config.commands.prefix = prefix.clone();
    }
    if let Some(delimiter) = env.get("HERALD_QUOTE_DELIMITER") {
        config.commands.quote_delimiter = delimiter.clone();
    }
    if let Some(flag) = env.get("HERALD_PRINT_COMMAND_ERRORS").and_then(|v| parse_bool(v)) {
        config.commands.print_command_errors = flag;
    }
    if let Some(level) = env.get("HERALD_LOG_LEVEL") {
        config.logging.level = level.clone();
    }
    if let Some(dir) = env.get("HERALD_LOG_DIR") {
        config.logging.dir = Some(dir.clone());
    }
    if let Some(token) = env.get("DISCORD_TOKEN").filter(|t| !t.is_empty()) {
        config.discord = Some(DiscordConfig { token: token.clone() });
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

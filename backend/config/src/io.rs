//! Config file location and loading.

use crate::env::resolve_env_vars_with;
use crate::schema::HeraldConfig;
use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the Herald config directory.
/// Priority: `HERALD_CONFIG_DIR` env > `~/.herald/` > `./.herald`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HERALD_CONFIG_DIR") {
        return PathBuf::from(dir);
    }
    match dirs::home_dir() {
        Some(home) => home.join(".herald"),
        None => PathBuf::from(".herald"),
    }
}

pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Load a config file, substituting `${VAR}` references from `env`.
///
/// A missing or empty file yields the defaults.
pub async fn load_config(path: &Path, env: &HashMap<String, String>) -> Result<HeraldConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(HeraldConfig::default());
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config = parse_config(&raw, env)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(config)
}

/// Parse YAML text into a config, substituting `${VAR}` references first.
pub fn parse_config(raw: &str, env: &HashMap<String, String>) -> Result<HeraldConfig> {
    if raw.trim().is_empty() {
        return Ok(HeraldConfig::default());
    }
    let value: Value = serde_yaml::from_str(raw)?;
    if value.is_null() {
        return Ok(HeraldConfig::default());
    }
    let value = resolve_env_vars_with(&value, env)?;
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(parse_config("", &HashMap::new()).unwrap(), HeraldConfig::default());
    }

    #[test]
    fn env_references_resolve_before_typing() {
        let raw = "discord:\n  token: ${DISCORD_TOKEN}\n";
        let config = parse_config(raw, &env(&[("DISCORD_TOKEN", "secret")])).unwrap();
        assert_eq!(config.discord.unwrap().token, "secret");
    }

    #[test]
    fn wrong_type_is_an_error() {
        let raw = "commands:\n  printCommandErrors: [1, 2]\n";
        assert!(parse_config(raw, &HashMap::new()).is_err());
    }

    #[tokio::test]
    async fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.yaml"), &HashMap::new())
            .await
            .unwrap();
        assert_eq!(config, HeraldConfig::default());
    }

    #[tokio::test]
    async fn loads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        tokio::fs::write(&path, "commands:\n  prefix: \"b.\"\nlogging:\n  level: debug\n")
            .await
            .unwrap();

        let config = load_config(&path, &HashMap::new()).await.unwrap();

        assert_eq!(config.commands.prefix, "b.");
        assert_eq!(config.logging.level, "debug");
    }
}

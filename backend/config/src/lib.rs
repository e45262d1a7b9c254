//! `herald-config`: Herald runtime configuration.
//!
//! Provides:
//! - Typed config schema with defaults for every section
//! - YAML loading with `${ENV_VAR}` substitution
//! - `HERALD_*` environment overrides
//! - Validation with per-field error paths

pub mod env;
pub mod io;
pub mod schema;
pub mod validation;

pub use env::{apply_env_overrides, resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, parse_config};
pub use schema::{CommandsConfig, DiscordConfig, HeraldConfig, LoggingConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Load, apply env overrides, and validate a config file.
///
/// This is the main entry point for loading a config at runtime.
pub async fn load_and_prepare(path: &Path) -> Result<HeraldConfig> {
    let env: HashMap<String, String> = std::env::vars().collect();
    prepare_with(path, &env).await
}

/// [`load_and_prepare`] with an explicit environment.
pub async fn prepare_with(path: &Path, env: &HashMap<String, String>) -> Result<HeraldConfig> {
    let mut config = load_config(path, env).await?;
    apply_env_overrides(&mut config, env);

    let report = validate(&config);
    for warning in &report.warnings {
        warn!("{}", warning);
    }
    if let Some(first) = report.errors.into_iter().next() {
        bail!(first);
    }
    Ok(config)
}

//! Config validation with field paths in every message.

use crate::schema::HeraldConfig;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// Everything found in one validation pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError { path: path.into(), message: message.into() });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError { path: path.into(), message: message.into() });
    }
}

pub fn validate(config: &HeraldConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_commands(config, &mut report);
    validate_discord(config, &mut report);
    report
}

fn validate_commands(config: &HeraldConfig, report: &mut ValidationReport) {
    let commands = &config.commands;

    if commands.prefix.is_empty() {
        report.error("commands.prefix", "Prefix must not be empty");
    } else if commands.prefix.chars().any(char::is_whitespace) {
        report.warn(
            "commands.prefix",
            "Prefix contains whitespace; command names will be cut by character count",
        );
    }

    if commands.quote_delimiter.is_empty() {
        report.error("commands.quoteDelimiter", "Quote delimiter must not be empty");
        return;
    }
    if commands.quote_delimiter.chars().any(char::is_whitespace) {
        report.error("commands.quoteDelimiter", "Quote delimiter must not contain whitespace");
    }
    if commands.prefix.contains(commands.quote_delimiter.as_str()) {
        report.error(
            "commands.prefix",
            format!("Prefix must not contain the quote delimiter {:?}", commands.quote_delimiter),
        );
    }
}

fn validate_discord(config: &HeraldConfig, report: &mut ValidationReport) {
    let Some(discord) = &config.discord else { return };
    if discord.token.trim().is_empty() {
        report.error("discord.token", "Discord token is empty");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::DiscordConfig;

    #[test]
    fn defaults_are_valid() {
        let report = validate(&HeraldConfig::default());
        assert!(report.is_valid());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn empty_prefix_and_delimiter_are_errors() {
        let mut config = HeraldConfig::default();
        config.commands.prefix.clear();
        config.commands.quote_delimiter.clear();
        let report = validate(&config);
        let paths: Vec<_> = report.errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["commands.prefix", "commands.quoteDelimiter"]);
    }

    #[test]
    fn prefix_may_not_contain_delimiter() {
        let mut config = HeraldConfig::default();
        config.commands.prefix = "\"go".to_string();
        assert!(!validate(&config).is_valid());
    }

    #[test]
    fn whitespace_prefix_is_only_a_warning() {
        let mut config = HeraldConfig::default();
        config.commands.prefix = "hey bot ".to_string();
        let report = validate(&config);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn blank_discord_token_is_rejected() {
        let config = HeraldConfig {
            discord: Some(DiscordConfig { token: "  ".to_string() }),
            ..Default::default()
        };
        let report = validate(&config);
        assert_eq!(report.errors[0].path, "discord.token");
    }
}

/// Command descriptors: the registration-time view of one handler.
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use herald_core::ConfigurationError;

use crate::dispatch::CommandHandler;
use crate::types::{ParamSpec, Signature, MESSAGE_PARAMETER};

/// Immutable metadata for a registered command.
pub struct Command<M> {
    name: String,
    params: Arc<[ParamSpec]>,
    required: usize,
    usage: String,
    description: String,
    handler: Arc<dyn CommandHandler<M>>,
}

impl<M> Command<M> {
    /// Validate `signature` and derive the descriptor.
    ///
    /// The signature must declare `message` first. The required count is the
    /// length of the leading run of parameters without defaults; a parameter
    /// without a default that follows a defaulted one is not counted.
    pub fn new(
        name: impl Into<String>,
        signature: Signature,
        handler: Arc<dyn CommandHandler<M>>,
    ) -> Result<Self, ConfigurationError> {
        let name = name.into();
        let mut params = signature.into_params();

        match params.iter().position(|p| p.name == MESSAGE_PARAMETER) {
            None => return Err(ConfigurationError::MissingMessageParameter),
            Some(0) => {}
            Some(position) => return Err(ConfigurationError::MessageNotFirst { position }),
        }

        let mut seen = HashSet::new();
        for param in &params {
            if !seen.insert(param.name.as_str()) {
                return Err(ConfigurationError::DuplicateParameter { name: param.name.clone() });
            }
        }

        params.remove(0);
        let required = params.iter().take_while(|p| !p.has_default()).count();
        let usage = render_usage(&params);
        let description = match handler.doc() {
            Some(doc) => clean_doc(doc),
            None => format!("Command `{name}` has no description :("),
        };

        Ok(Self {
            name,
            params: params.into(),
            required,
            usage,
            description,
            handler,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameters, excluding `message`.
    pub fn parameters(&self) -> &[ParamSpec] {
        &self.params
    }

    pub(crate) fn shared_parameters(&self) -> Arc<[ParamSpec]> {
        Arc::clone(&self.params)
    }

    pub fn required_count(&self) -> usize {
        self.required
    }

    pub fn usage(&self) -> &str {
        &self.usage
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn handler(&self) -> &Arc<dyn CommandHandler<M>> {
        &self.handler
    }
}

impl<M> fmt::Debug for Command<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("usage", &self.usage)
            .field("required", &self.required)
            .finish_non_exhaustive()
    }
}

/// Space-joined parameter usage, e.g. `text times:2`.
pub fn render_usage(params: &[ParamSpec]) -> String {
    params.iter().map(ParamSpec::usage).collect::<Vec<_>>().join(" ")
}

/// Normalize a doc string: strip the indentation shared by all lines after
/// the first, trim the first line, and drop blank lines at either end.
///
/// Indentation is counted in characters, so any Unicode whitespace counts
/// as one column.
pub fn clean_doc(doc: &str) -> String {
    let lines: Vec<&str> = doc.lines().collect();
    let indent = lines
        .iter()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .map(|l| leading_whitespace(l))
        .min()
        .unwrap_or(0);

    let mut cleaned: Vec<String> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| {
            if i == 0 {
                l.trim().to_string()
            } else {
                skip_chars(l, indent).trim_end().to_string()
            }
        })
        .collect();

    while cleaned.last().is_some_and(|l| l.is_empty()) {
        cleaned.pop();
    }
    let leading = cleaned.iter().take_while(|l| l.is_empty()).count();
    cleaned.drain(..leading);
    cleaned.join("\n")
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn skip_chars(line: &str, count: usize) -> &str {
    match line.char_indices().nth(count) {
        Some((offset, _)) => &line[offset..],
        None => "",
    }
}

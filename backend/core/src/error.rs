use thiserror::Error;

/// Raised when a command definition is rejected at registration time.
///
/// This is the only error that escapes the dispatcher; every runtime failure
/// is folded into a dispatch result instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("missing required message parameter in command definition")]
    MissingMessageParameter,

    #[error("message must be the first parameter in the command definition (found at position {position})")]
    MessageNotFirst { position: usize },

    #[error("duplicate parameter `{name}` in command definition")]
    DuplicateParameter { name: String },
}

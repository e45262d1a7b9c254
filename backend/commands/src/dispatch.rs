/// Command dispatch: classify inbound messages and run the matching handler.
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use herald_core::{ConfigurationError, MessageLike};

use crate::binding::{bind, Arguments};
use crate::command::Command;
use crate::detection::detect_command;
use crate::registry::CommandRegistry;
use crate::types::Signature;

// ---------------------------------------------------------------------------
// Handler trait
// ---------------------------------------------------------------------------

/// An asynchronous command body.
///
/// `message` is the inbound message exactly as the transport delivered it.
#[async_trait]
pub trait CommandHandler<M>: Send + Sync {
    async fn handle(&self, message: &M, args: Arguments) -> Result<()>;

    /// Documentation shown as the command description.
    fn doc(&self) -> Option<&str> {
        None
    }
}

/// Adapter turning an async closure into a [`CommandHandler`].
pub struct FnHandler<F> {
    func: F,
    doc: Option<String>,
}

impl<F> FnHandler<F> {
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }
}

/// Wrap `func` as a handler. The closure receives its own clone of the message.
pub fn handler_fn<M, F, Fut>(func: F) -> FnHandler<F>
where
    F: Fn(M, Arguments) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    FnHandler { func, doc: None }
}

#[async_trait]
impl<M, F, Fut> CommandHandler<M> for FnHandler<F>
where
    M: Clone + Send + Sync + 'static,
    F: Fn(M, Arguments) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    async fn handle(&self, message: &M, args: Arguments) -> Result<()> {
        (self.func)(message.clone(), args).await
    }

    fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// How an invocation attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultKind {
    Success,
    NotACommand,
    UnknownCommand,
    NotEnoughArguments,
    InvalidArgument,
    CommandError,
}

impl ResultKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ResultKind::Success => "success",
            ResultKind::NotACommand => "not_a_command",
            ResultKind::UnknownCommand => "unknown_command",
            ResultKind::NotEnoughArguments => "not_enough_arguments",
            ResultKind::InvalidArgument => "invalid_argument",
            ResultKind::CommandError => "command_error",
        }
    }

    /// The invoker got the arguments wrong; showing usage is the usual answer.
    pub fn is_usage_error(self) -> bool {
        matches!(self, ResultKind::NotEnoughArguments | ResultKind::InvalidArgument)
    }
}

/// Outcome of [`CommandDispatcher::invoke`].
///
/// `command` is `None` exactly when `kind` is `NotACommand` or `UnknownCommand`.
pub struct DispatchResult<M> {
    pub command: Option<Arc<Command<M>>>,
    pub kind: ResultKind,
    pub message_content: String,
}

impl<M> DispatchResult<M> {
    fn new(command: Option<Arc<Command<M>>>, kind: ResultKind, message_content: String) -> Self {
        Self { command, kind, message_content }
    }

    /// `Usage: <prefix><name> <usage>` for usage errors, `None` otherwise.
    pub fn usage_hint(&self, prefix: &str) -> Option<String> {
        if !self.kind.is_usage_error() {
            return None;
        }
        let command = self.command.as_ref()?;
        let hint = format!("Usage: {}{} {}", prefix, command.name(), command.usage());
        Some(hint.trim_end().to_string())
    }
}

impl<M> Clone for DispatchResult<M> {
    fn clone(&self) -> Self {
        Self {
            command: self.command.clone(),
            kind: self.kind,
            message_content: self.message_content.clone(),
        }
    }
}

impl<M> fmt::Debug for DispatchResult<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchResult")
            .field("command", &self.command.as_ref().map(|c| c.name()))
            .field("kind", &self.kind)
            .field("message_content", &self.message_content)
            .finish()
    }
}

/// Prefix and quote delimiter an adapter invokes the dispatcher with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchSettings {
    pub prefix: String,
    pub quote_delimiter: String,
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

pub struct CommandDispatcher<M> {
    registry: CommandRegistry<M>,
    print_command_errors: bool,
}

impl<M> CommandDispatcher<M>
where
    M: MessageLike + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self { registry: CommandRegistry::new(), print_command_errors: true }
    }

    /// Whether handler failures are logged at `error` level. On by default.
    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.print_command_errors = enabled;
        self
    }

    /// Build a descriptor for `handler` and register it under `name`,
    /// replacing any earlier command of the same name.
    pub fn register<H>(
        &mut self,
        name: impl Into<String>,
        signature: Signature,
        handler: H,
    ) -> Result<Arc<Command<M>>, ConfigurationError>
    where
        H: CommandHandler<M> + 'static,
    {
        let command = Command::new(name, signature, Arc::new(handler))?;
        Ok(self.register_command(command))
    }

    pub fn register_command(&mut self, command: Command<M>) -> Arc<Command<M>> {
        let command = Arc::new(command);
        if self.registry.insert(Arc::clone(&command)).is_some() {
            debug!("[Commands] Replaced command {}", command.name());
        }
        command
    }

    pub fn get(&self, name: &str) -> Option<Arc<Command<M>>> {
        self.registry.get(name).cloned()
    }

    /// Registered commands sorted by name.
    pub fn commands(&self) -> Vec<Arc<Command<M>>> {
        self.registry.all()
    }

    /// Classify `message` and, if it names a registered command with
    /// acceptable arguments, run the handler to completion.
    ///
    /// Handler errors and panics become `CommandError`. Coercions run
    /// before the handler and are not guarded; see
    /// [`Coercion::new`](crate::coerce::Coercion::new).
    pub async fn invoke(&self, prefix: &str, quote_delimiter: &str, message: &M) -> DispatchResult<M> {
        let content = message.system_content().to_string();

        let Some(invocation) = detect_command(prefix, quote_delimiter, &content) else {
            return DispatchResult::new(None, ResultKind::NotACommand, content);
        };

        let Some(command) = self.get(&invocation.name) else {
            debug!("[Commands] Unknown command {:?}", invocation.name);
            return DispatchResult::new(None, ResultKind::UnknownCommand, content);
        };

        if invocation.args.len() < command.required_count() {
            debug!(
                "[Commands] {} needs {} argument(s), got {}",
                command.name(),
                command.required_count(),
                invocation.args.len()
            );
            return DispatchResult::new(Some(command), ResultKind::NotEnoughArguments, content);
        }

        let values = match bind(command.parameters(), &invocation.args) {
            Ok(values) => values,
            Err(err) => {
                debug!("[Commands] {}: {}", command.name(), err);
                return DispatchResult::new(Some(command), ResultKind::InvalidArgument, content);
            }
        };
        let args = Arguments::new(command.shared_parameters(), values);

        info!("[Commands] Dispatching {} with {} argument(s)", command.name(), args.len());
        let outcome = AssertUnwindSafe(command.handler().handle(message, args))
            .catch_unwind()
            .await;

        let kind = match outcome {
            Ok(Ok(())) => ResultKind::Success,
            Ok(Err(err)) => {
                if self.print_command_errors {
                    error!(command = %command.name(), error = ?err, "Command handler failed");
                }
                ResultKind::CommandError
            }
            Err(panic) => {
                if self.print_command_errors {
                    error!(
                        command = %command.name(),
                        panic = %panic_message(panic.as_ref()),
                        "Command handler panicked"
                    );
                }
                ResultKind::CommandError
            }
        };
        DispatchResult::new(Some(command), kind, content)
    }
}

impl<M> Default for CommandDispatcher<M>
where
    M: MessageLike + Send + Sync + 'static,
{
    fn default() -> Self { Self::new() }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

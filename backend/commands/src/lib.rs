//! Prefix command dispatch for chat bots.
//!
//! An inbound message is checked for the prefix, split into quote-aware tokens,
//! matched against the registered commands, bound onto the command's declared
//! parameters and handed to its async handler. Every attempt ends in a
//! [`DispatchResult`] whose [`ResultKind`] tells the caller what happened.

pub mod binding;
pub mod coerce;
pub mod command;
pub mod detection;
pub mod dispatch;
pub mod handlers;
pub mod registry;
pub mod types;

pub use binding::{bind, Arguments, BindError};
pub use coerce::{Coercion, CoercionError};
pub use command::{clean_doc, render_usage, Command};
pub use detection::{detect_command, tokenize};
pub use dispatch::{
    handler_fn, CommandDispatcher, CommandHandler, DispatchResult, DispatchSettings, FnHandler,
    ResultKind,
};
pub use handlers::{register_help, HelpEntry, HelpHandler};
pub use registry::CommandRegistry;
pub use types::{CommandInvocation, ParamSpec, Signature, MESSAGE_PARAMETER};

pub use herald_core::{ConfigurationError, InboundMessage, MessageLike, Reply};

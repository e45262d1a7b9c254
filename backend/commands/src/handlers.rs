/// Built-in command handlers.
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;

use herald_core::{ConfigurationError, MessageLike, Reply};

use crate::binding::Arguments;
use crate::command::{render_usage, Command};
use crate::dispatch::{CommandDispatcher, CommandHandler};
use crate::types::Signature;

const HELP_DOC: &str = "List available commands, or show usage for one command.";

// ---------------------------------------------------------------------------
// help
// ---------------------------------------------------------------------------

/// What `help` knows about one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpEntry {
    pub name: String,
    pub usage: String,
    pub description: String,
}

impl HelpEntry {
    pub fn from_command<M>(command: &Command<M>) -> Self {
        Self {
            name: command.name().to_string(),
            usage: command.usage().to_string(),
            description: command.description().to_string(),
        }
    }

    fn invocation(&self, prefix: &str) -> String {
        format!("{}{} {}", prefix, self.name, self.usage).trim_end().to_string()
    }
}

/// Replies with the command list, or with the usage of a single command.
///
/// The list is a snapshot taken when the handler is built; use
/// [`register_help`] after every other command is registered.
pub struct HelpHandler {
    prefix: String,
    entries: Vec<HelpEntry>,
}

impl HelpHandler {
    pub fn new(prefix: impl Into<String>, mut entries: Vec<HelpEntry>) -> Self {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Self { prefix: prefix.into(), entries }
    }

    pub fn signature() -> Signature {
        Signature::new().message().optional("command", Value::Null)
    }

    pub fn render(&self, only: Option<&str>) -> String {
        let Some(requested) = only else {
            let mut lines = vec!["Available commands:".to_string()];
            for entry in &self.entries {
                let summary = entry.description.lines().next().unwrap_or_default();
                lines.push(format!("• `{}` - {}", entry.invocation(&self.prefix), summary));
            }
            return lines.join("\n");
        };

        let name = requested.strip_prefix(self.prefix.as_str()).unwrap_or(requested);
        match self.entries.iter().find(|e| e.name == name) {
            Some(entry) => format!("`{}`\n{}", entry.invocation(&self.prefix), entry.description),
            None => format!("No command named `{name}`."),
        }
    }
}

#[async_trait]
impl<M: Reply + Send + Sync> CommandHandler<M> for HelpHandler {
    async fn handle(&self, message: &M, args: Arguments) -> Result<()> {
        message.reply(&self.render(args.str("command"))).await
    }

    fn doc(&self) -> Option<&str> {
        Some(HELP_DOC)
    }
}

/// Register a `help` command listing everything registered so far, itself included.
pub fn register_help<M>(
    dispatcher: &mut CommandDispatcher<M>,
    name: &str,
    prefix: &str,
) -> Result<Arc<Command<M>>, ConfigurationError>
where
    M: MessageLike + Reply + Send + Sync + 'static,
{
    let signature = HelpHandler::signature();
    let mut entries: Vec<HelpEntry> = dispatcher
        .commands()
        .iter()
        .filter(|c| c.name() != name)
        .map(|c| HelpEntry::from_command(c.as_ref()))
        .collect();
    entries.push(HelpEntry {
        name: name.to_string(),
        usage: render_usage(signature.params().get(1..).unwrap_or_default()),
        description: HELP_DOC.to_string(),
    });

    dispatcher.register(name, signature, HelpHandler::new(prefix, entries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{handler_fn, ResultKind};
    use herald_core::InboundMessage;

    fn dispatcher() -> CommandDispatcher<InboundMessage> {
        let mut dispatcher = CommandDispatcher::new();
        dispatcher
            .register(
                "echo",
                Signature::new().message().param("text"),
                handler_fn(|_m: InboundMessage, _a: Arguments| async { Ok(()) })
                    .with_doc("Repeat the text back.\n\nQuote it to keep spaces."),
            )
            .unwrap();
        dispatcher
            .register(
                "ping",
                Signature::new().message(),
                handler_fn(|_m: InboundMessage, _a: Arguments| async { Ok(()) }),
            )
            .unwrap();
        register_help(&mut dispatcher, "help", "!").unwrap();
        dispatcher
    }

    #[tokio::test]
    async fn lists_every_command_including_itself() {
        let dispatcher = dispatcher();
        let message = InboundMessage::new("general", "ana", "!help");

        let result = dispatcher.invoke("!", "\"", &message).await;

        assert_eq!(result.kind, ResultKind::Success);
        let replies = message.replies().await;
        assert_eq!(
            replies[0],
            "Available commands:\n\
             • `!echo text` - Repeat the text back.\n\
             • `!help command:none` - List available commands, or show usage for one command.\n\
             • `!ping` - Command `ping` has no description :("
        );
    }

    #[tokio::test]
    async fn shows_single_command_usage() {
        let dispatcher = dispatcher();
        let message = InboundMessage::new("general", "ana", "!help !echo");

        dispatcher.invoke("!", "\"", &message).await;

        assert_eq!(
            message.replies().await,
            vec!["`!echo text`\nRepeat the text back.\n\nQuote it to keep spaces.".to_string()]
        );
    }

    #[tokio::test]
    async fn unknown_command_gets_a_polite_answer() {
        let dispatcher = dispatcher();
        let message = InboundMessage::new("general", "ana", "!help nope");

        dispatcher.invoke("!", "\"", &message).await;

        assert_eq!(message.replies().await, vec!["No command named `nope`.".to_string()]);
    }

    #[test]
    fn help_descriptor_is_documented() {
        let dispatcher = dispatcher();
        let help = dispatcher.get("help").unwrap();
        assert_eq!(help.required_count(), 0);
        assert_eq!(help.usage(), "command:none");
        assert_eq!(help.description(), HELP_DOC);
    }
}

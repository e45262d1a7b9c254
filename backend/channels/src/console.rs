//! Console adapter: reads commands from stdin, prints replies to stdout.
//!
//! Handy for trying commands locally without a chat service.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use herald_commands::{CommandDispatcher, DispatchSettings, ResultKind};
use herald_core::InboundMessage;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use crate::{report_outcome, ChannelAdapter};

pub struct ConsoleAdapter {
    dispatcher: Arc<CommandDispatcher<InboundMessage>>,
    settings: DispatchSettings,
    author: String,
}

impl ConsoleAdapter {
    pub fn new(dispatcher: Arc<CommandDispatcher<InboundMessage>>, settings: DispatchSettings) -> Self {
        let author = std::env::var("USER").unwrap_or_else(|_| "console".to_string());
        Self { dispatcher, settings, author }
    }

    /// Dispatch one input line and return everything that should be printed.
    pub async fn handle_line(&self, line: &str) -> Vec<String> {
        let message = InboundMessage::new("console", self.author.as_str(), line);
        let result = self
            .dispatcher
            .invoke(&self.settings.prefix, &self.settings.quote_delimiter, &message)
            .await;

        report_outcome("console", &self.settings, &result, &message).await;

        let mut output = message.take_replies().await;
        if result.kind == ResultKind::UnknownCommand {
            output.push(format!("Unknown command: {}", line.trim()));
        }
        output
    }
}

#[async_trait]
impl ChannelAdapter for ConsoleAdapter {
    fn name(&self) -> &str { "console" }

    async fn start(&self) -> Result<()> {
        info!(prefix = %self.settings.prefix, "Starting console adapter; Ctrl-D to quit");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await? {
            for text in self.handle_line(&line).await {
                stdout.write_all(text.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
            }
            stdout.flush().await?;
        }

        info!("Console input closed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use herald_commands::{handler_fn, Arguments, Coercion, Signature};
    use herald_core::Reply;

    fn adapter() -> ConsoleAdapter {
        let mut dispatcher = CommandDispatcher::new().with_error_reporting(false);
        dispatcher
            .register(
                "echo",
                Signature::new().message().param("text"),
                handler_fn(|message: InboundMessage, args: Arguments| async move {
                    let text = args.str("text").unwrap_or_default().to_string();
                    message.reply(&text).await
                }),
            )
            .unwrap();
        dispatcher
            .register(
                "double",
                Signature::new().message().typed("n", Coercion::integer()),
                handler_fn(|message: InboundMessage, args: Arguments| async move {
                    let n: i64 = args.parse("n")?;
                    message.reply(&(n * 2).to_string()).await
                }),
            )
            .unwrap();
        dispatcher
            .register(
                "fail",
                Signature::new().message(),
                handler_fn(|_message: InboundMessage, _args: Arguments| async move {
                    bail!("disk on fire")
                }),
            )
            .unwrap();

        let settings = DispatchSettings { prefix: "b.".into(), quote_delimiter: "\"".into() };
        ConsoleAdapter::new(Arc::new(dispatcher), settings)
    }

    #[tokio::test]
    async fn echoes_quoted_text() {
        let out = adapter().handle_line(r#"b.echo "two words""#).await;
        assert_eq!(out, vec!["two words".to_string()]);
    }

    #[tokio::test]
    async fn chatter_prints_nothing() {
        assert!(adapter().handle_line("just talking").await.is_empty());
    }

    #[tokio::test]
    async fn usage_errors_print_usage() {
        let adapter = adapter();
        assert_eq!(adapter.handle_line("b.echo").await, vec!["Usage: b.echo text".to_string()]);
        assert_eq!(adapter.handle_line("b.double x").await, vec!["Usage: b.double n".to_string()]);
        assert_eq!(adapter.handle_line("b.double 21").await, vec!["42".to_string()]);
    }

    #[tokio::test]
    async fn unknown_and_failing_commands_are_reported() {
        let adapter = adapter();
        assert_eq!(adapter.handle_line("b.nope").await, vec!["Unknown command: b.nope".to_string()]);
        assert_eq!(
            adapter.handle_line("b.fail").await,
            vec!["Something went wrong running `fail`.".to_string()]
        );
    }
}

use async_trait::async_trait;
use herald_commands::{DispatchResult, DispatchSettings, ResultKind};
use herald_core::Reply;
use herald_logging::{CommandEvent, EventLogger};
use tracing::warn;

pub mod console;
pub mod discord;

pub use console::ConsoleAdapter;
pub use discord::{DiscordAdapter, DiscordMessage};

/// All channel adapters implement this trait.
#[async_trait]
pub trait ChannelAdapter: Send + Sync {
    /// Human-readable adapter name for logging.
    fn name(&self) -> &str;

    /// Run the adapter until its connection or input ends.
    async fn start(&self) -> anyhow::Result<()>;
}

/// Log a dispatch outcome and answer the invoker where it helps them.
///
/// Usage errors get a usage line; handler failures get a short apology.
/// Plain chatter (`NotACommand`) is neither logged nor answered.
pub async fn report_outcome<M: Reply>(
    source: &str,
    settings: &DispatchSettings,
    result: &DispatchResult<M>,
    message: &M,
) {
    if result.kind == ResultKind::NotACommand {
        return;
    }

    EventLogger::log_event(
        source,
        CommandEvent {
            command: result.command.as_ref().map(|c| c.name().to_string()),
            outcome: result.kind.as_str().to_string(),
            content: result.message_content.clone(),
        },
    );

    let reply = match (result.kind, &result.command) {
        (ResultKind::CommandError, Some(command)) => {
            Some(format!("Something went wrong running `{}`.", command.name()))
        }
        _ => result.usage_hint(&settings.prefix),
    };

    if let Some(text) = reply {
        if let Err(e) = message.reply(&text).await {
            warn!("[{}] Failed to send reply: {:?}", source, e);
        }
    }
}

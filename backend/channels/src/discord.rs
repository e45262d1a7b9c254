use std::sync::Arc;

use crate::{report_outcome, ChannelAdapter};
use anyhow::Result;
use async_trait::async_trait;
use herald_commands::{CommandDispatcher, DispatchSettings};
use herald_core::{MessageLike, Reply};
use herald_logging::redact_sensitive_data;
use serenity::http::Http;
use serenity::model::channel::Message as SerenityMessage;
use serenity::model::gateway::Ready;
use serenity::prelude::*;
use tracing::{error, info};

/// A Discord message plus the HTTP handle needed to answer it.
#[derive(Clone)]
pub struct DiscordMessage {
    pub message: SerenityMessage,
    pub http: Arc<Http>,
}

impl MessageLike for DiscordMessage {
    fn system_content(&self) -> &str {
        &self.message.content
    }
}

#[async_trait]
impl Reply for DiscordMessage {
    async fn reply(&self, text: &str) -> Result<()> {
        self.message.channel_id.say(&self.http, text).await?;
        Ok(())
    }
}

struct Handler {
    dispatcher: Arc<CommandDispatcher<DiscordMessage>>,
    settings: DispatchSettings,
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: SerenityMessage) {
        if msg.author.bot {
            return;
        }

        let message = DiscordMessage { message: msg, http: Arc::clone(&ctx.http) };
        let result = self
            .dispatcher
            .invoke(&self.settings.prefix, &self.settings.quote_delimiter, &message)
            .await;

        report_outcome("discord", &self.settings, &result, &message).await;
    }

    async fn ready(&self, _: Context, ready: Ready) {
        info!("{} is connected!", ready.user.name);
    }
}

pub struct DiscordAdapter {
    token: String,
    dispatcher: Arc<CommandDispatcher<DiscordMessage>>,
    settings: DispatchSettings,
}

impl DiscordAdapter {
    pub fn new(
        token: String,
        dispatcher: Arc<CommandDispatcher<DiscordMessage>>,
        settings: DispatchSettings,
    ) -> Self {
        Self { token, dispatcher, settings }
    }
}

#[async_trait]
impl ChannelAdapter for DiscordAdapter {
    fn name(&self) -> &str { "discord" }

    async fn start(&self) -> Result<()> {
        info!(prefix = %self.settings.prefix, "Starting Discord adapter");

        let intents = GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let handler = Handler {
            dispatcher: Arc::clone(&self.dispatcher),
            settings: self.settings.clone(),
        };
        let mut client = Client::builder(&self.token, intents)
            .event_handler(handler)
            .await?;

        if let Err(why) = client.start().await {
            let why = redact_sensitive_data(&why.to_string());
            error!("Client error: {}", why);
            anyhow::bail!("Discord client error: {}", why);
        }

        Ok(())
    }
}

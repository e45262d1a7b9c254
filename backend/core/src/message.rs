use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

/// Anything the dispatcher can read command text from.
///
/// The value itself is opaque to the dispatcher and is handed to handlers untouched.
pub trait MessageLike {
    /// The literal text used for prefix matching and tokenizing.
    fn system_content(&self) -> &str;
}

/// A message that can be answered in the conversation it came from.
#[async_trait]
pub trait Reply: Send + Sync {
    async fn reply(&self, text: &str) -> Result<()>;
}

/// A transport-neutral inbound message.
///
/// Replies are buffered in memory and shared between clones, so the adapter
/// that created the message can drain them after dispatch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InboundMessage {
    pub channel: String,
    pub author: String,
    pub content: String,
    #[serde(skip)]
    replies: Arc<Mutex<Vec<String>>>,
}

impl InboundMessage {
    pub fn new(
        channel: impl Into<String>,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            channel: channel.into(),
            author: author.into(),
            content: content.into(),
            replies: Arc::default(),
        }
    }

    /// Snapshot of every reply sent so far.
    pub async fn replies(&self) -> Vec<String> {
        self.replies.lock().await.clone()
    }

    /// Drain buffered replies.
    pub async fn take_replies(&self) -> Vec<String> {
        std::mem::take(&mut *self.replies.lock().await)
    }
}

impl MessageLike for InboundMessage {
    fn system_content(&self) -> &str {
        &self.content
    }
}

#[async_trait]
impl Reply for InboundMessage {
    async fn reply(&self, text: &str) -> Result<()> {
        self.replies.lock().await.push(text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_shared_between_clones() {
        let msg = InboundMessage::new("general", "ana", "!ping");
        let clone = msg.clone();
        clone.reply("pong").await.unwrap();

        assert_eq!(msg.replies().await, vec!["pong".to_string()]);
        assert_eq!(msg.take_replies().await, vec!["pong".to_string()]);
        assert!(clone.replies().await.is_empty());
    }

    #[test]
    fn system_content_is_the_raw_text() {
        let msg = InboundMessage::new("general", "ana", "  !echo hi ");
        assert_eq!(msg.system_content(), "  !echo hi ");
    }
}

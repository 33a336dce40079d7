// Recent message snapshots
// The gateway delete event carries only ids, so content is remembered here.

use std::num::NonZeroUsize;

use lru::LruCache;
use poise::serenity_prelude as serenity;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedAttachment {
    pub filename: String,
    pub url: String,
}

/// What we keep about a message to log it after it is gone
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedMessage {
    pub message_id: u64,
    pub guild_id: Option<u64>,
    pub channel_id: u64,
    pub channel_name: Option<String>,
    pub author_id: u64,
    pub author_name: String,
    pub author_bot: bool,
    pub avatar_url: String,
    pub created_at: i64,
    pub content: String,
    pub attachments: Vec<TrackedAttachment>,
}

impl TrackedMessage {
    pub fn from_message(msg: &serenity::Message, channel_name: Option<String>) -> Self {
        Self {
            message_id: msg.id.get(),
            guild_id: msg.guild_id.map(|id| id.get()),
            channel_id: msg.channel_id.get(),
            channel_name,
            author_id: msg.author.id.get(),
            author_name: msg.author.name.clone(),
            author_bot: msg.author.bot,
            avatar_url: msg.author.face(),
            created_at: msg.id.created_at().unix_timestamp(),
            content: msg.content.clone(),
            attachments: msg
                .attachments
                .iter()
                .map(|a| TrackedAttachment {
                    filename: a.filename.clone(),
                    url: a.url.clone(),
                })
                .collect(),
        }
    }
}

/// Bounded LRU of recently seen guild messages
#[derive(Debug)]
pub struct MessageTracker {
    messages: Mutex<LruCache<u64, TrackedMessage>>,
}

impl MessageTracker {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            messages: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub async fn record(&self, message: TrackedMessage) {
        let mut messages = self.messages.lock().await;
        messages.put(message.message_id, message);
    }

    /// Remove and return a message that was deleted
    pub async fn take(&self, message_id: u64) -> Option<TrackedMessage> {
        let mut messages = self.messages.lock().await;
        messages.pop(&message_id)
    }

    /// Store the edited content, returning the snapshot as it was before
    pub async fn update_content(&self, message_id: u64, content: &str) -> Option<TrackedMessage> {
        let mut messages = self.messages.lock().await;
        let entry = messages.get_mut(&message_id)?;
        let before = entry.clone();
        entry.content = content.to_string();
        Some(before)
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.messages.lock().await.len()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_message(message_id: u64, content: &str) -> TrackedMessage {
        TrackedMessage {
            message_id,
            guild_id: Some(100),
            channel_id: 200,
            channel_name: Some("general".to_string()),
            author_id: 300,
            author_name: "alice".to_string(),
            author_bot: false,
            avatar_url: "https://cdn.discordapp.com/embed/avatars/0.png".to_string(),
            created_at: 1_700_000_000,
            content: content.to_string(),
            attachments: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_take_removes_message() {
        let tracker = MessageTracker::new(10);
        tracker.record(sample_message(1, "hello")).await;

        assert_eq!(tracker.take(1).await.map(|m| m.content), Some("hello".to_string()));
        assert_eq!(tracker.take(1).await, None);
    }

    #[tokio::test]
    async fn test_update_content_returns_previous() {
        let tracker = MessageTracker::new(10);
        tracker.record(sample_message(1, "before")).await;

        let old = tracker.update_content(1, "after").await.unwrap();
        assert_eq!(old.content, "before");
        assert_eq!(tracker.take(1).await.unwrap().content, "after");
        assert_eq!(tracker.update_content(2, "x").await, None);
    }

    #[tokio::test]
    async fn test_capacity_evicts_oldest() {
        let tracker = MessageTracker::new(2);
        tracker.record(sample_message(1, "a")).await;
        tracker.record(sample_message(2, "b")).await;
        tracker.record(sample_message(3, "c")).await;

        assert_eq!(tracker.len().await, 2);
        assert_eq!(tracker.take(1).await, None);
        assert!(tracker.take(3).await.is_some());
    }
}

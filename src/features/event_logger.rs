// Guild event logger
// Forwards guild events to each guild's configured log channel.

use std::future::Future;

use poise::serenity_prelude as serenity;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::models::log_event::{LogEvent, Severity};
use crate::models::log_settings::LogSettingsStore;
use crate::utils::formatters::{full_timestamp, user_mention};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeliveryError {
    #[error("missing permission to send in the log channel")]
    MissingPermissions,
    #[error("{0}")]
    Failed(String),
}

impl From<::serenity::Error> for DeliveryError {
    fn from(err: ::serenity::Error) -> Self {
        match &err {
            ::serenity::Error::Http(::serenity::http::HttpError::UnsuccessfulRequest(response))
                if response.status_code.as_u16() == 403 =>
            {
                DeliveryError::MissingPermissions
            }
            _ => DeliveryError::Failed(err.to_string()),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigureError {
    #[error("<#{0}> is not a channel in this server")]
    ChannelNotFound(u64),
    #[error("<#{0}> is not a text channel")]
    NotTextChannel(u64),
}

/// What a configured channel id resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Text or announcement channel; embeds can be posted here
    Text,
    /// Category, voice, forum, stage and anything else
    Other,
}

/// Successful `configure`; carries a warning when the test log could not be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigureOutcome {
    pub warning: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisableOutcome {
    Disabled,
    AlreadyDisabled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogStatus {
    pub enabled: bool,
    pub channel_id: Option<u64>,
    pub channel_resolvable: bool,
}

/// Where log entries go. Resolution is synchronous so that checking a channel
/// and evicting it happen without yielding in between.
pub trait LogTransport: Sync {
    /// None when the channel is not part of the guild
    fn channel_kind(&self, guild_id: u64, channel_id: u64) -> Option<ChannelKind>;

    fn deliver(
        &self,
        channel_id: u64,
        event: &LogEvent,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

/// Delivery through the gateway cache and REST client
pub struct SerenityTransport<'a> {
    cache: &'a serenity::Cache,
    http: &'a serenity::Http,
}

impl<'a> SerenityTransport<'a> {
    pub fn new(ctx: &'a serenity::Context) -> Self {
        Self {
            cache: &ctx.cache,
            http: &ctx.http,
        }
    }
}

impl LogTransport for SerenityTransport<'_> {
    fn channel_kind(&self, guild_id: u64, channel_id: u64) -> Option<ChannelKind> {
        if guild_id == 0 || channel_id == 0 {
            return None;
        }
        let guild = self.cache.guild(serenity::GuildId::new(guild_id))?;
        let channel = guild.channels.get(&serenity::ChannelId::new(channel_id))?;
        Some(match channel.kind {
            serenity::ChannelType::Text | serenity::ChannelType::News => ChannelKind::Text,
            _ => ChannelKind::Other,
        })
    }

    fn deliver(
        &self,
        channel_id: u64,
        event: &LogEvent,
    ) -> impl Future<Output = Result<(), DeliveryError>> + Send {
        let message = serenity::CreateMessage::new()
            .embed(event.to_embed())
            .allowed_mentions(serenity::CreateAllowedMentions::new());
        let http = self.http;
        async move {
            serenity::ChannelId::new(channel_id)
                .send_message(http, message)
                .await
                .map(|_| ())
                .map_err(DeliveryError::from)
        }
    }
}

/// Per-guild log channel bookkeeping plus the dispatch primitive every event
/// hook goes through
#[derive(Debug)]
pub struct GuildEventLogger {
    store: LogSettingsStore,
}

impl GuildEventLogger {
    pub fn new(store: LogSettingsStore) -> Self {
        if store.is_empty() {
            info!("Guild event logger initialized, no guild has logging enabled");
        } else {
            info!("Guild event logger initialized with {} configured guilds", store.len());
        }
        Self { store }
    }

    pub fn store(&self) -> &LogSettingsStore {
        &self.store
    }

    /// Point a guild's logs at `channel_id` and send a test entry there.
    /// Permission to run this is checked by the command framework.
    pub async fn configure<T: LogTransport>(
        &self,
        transport: &T,
        guild_id: u64,
        channel_id: u64,
        enabled_by: u64,
    ) -> Result<ConfigureOutcome, ConfigureError> {
        match transport.channel_kind(guild_id, channel_id) {
            Some(ChannelKind::Text) => {}
            Some(ChannelKind::Other) => return Err(ConfigureError::NotTextChannel(channel_id)),
            None => return Err(ConfigureError::ChannelNotFound(channel_id)),
        }

        self.store.set(guild_id, channel_id);
        info!("Logging enabled for guild {} in channel {}", guild_id, channel_id);

        let activated = LogEvent::new(
            "🔍 Logging System Activated",
            format!("Server logging has been enabled by {}", user_mention(enabled_by)),
            Severity::Info,
        )
        .field("Timestamp", full_timestamp(chrono::Utc::now().timestamp()), false);

        let warning = match transport.deliver(channel_id, &activated).await {
            Ok(()) => None,
            Err(DeliveryError::MissingPermissions) => {
                warn!("No permission to send in log channel {}", channel_id);
                Some("I don't have permission to send messages in the log channel.".to_string())
            }
            Err(DeliveryError::Failed(e)) => {
                warn!("Failed to send test log to {}: {}", channel_id, e);
                Some(format!("Error sending test log: {}", e))
            }
        };

        Ok(ConfigureOutcome { warning })
    }

    pub fn disable(&self, guild_id: u64) -> DisableOutcome {
        if self.store.unset(guild_id) {
            info!("Logging disabled for guild {}", guild_id);
            DisableOutcome::Disabled
        } else {
            DisableOutcome::AlreadyDisabled
        }
    }

    pub fn status<T: LogTransport>(&self, transport: &T, guild_id: u64) -> LogStatus {
        match self.store.get(guild_id) {
            Some(channel_id) => LogStatus {
                enabled: true,
                channel_id: Some(channel_id),
                channel_resolvable: transport.channel_kind(guild_id, channel_id)
                    == Some(ChannelKind::Text),
            },
            None => LogStatus {
                enabled: false,
                channel_id: None,
                channel_resolvable: false,
            },
        }
    }

    /// Send `event` to the guild's log channel, if one is configured.
    /// A channel that no longer exists is forgotten. Delivery errors are
    /// logged and never returned.
    pub async fn log<T: LogTransport>(&self, transport: &T, guild_id: u64, event: LogEvent) {
        let Some(channel_id) = self.store.get(guild_id) else {
            return;
        };

        if transport.channel_kind(guild_id, channel_id) != Some(ChannelKind::Text) {
            warn!(
                "Log channel {} for guild {} is gone or no longer a text channel, disabling logging",
                channel_id, guild_id
            );
            self.store.unset(guild_id);
            return;
        }

        match transport.deliver(channel_id, &event).await {
            Ok(()) => debug!("Logged '{}' for guild {}", event.title, guild_id),
            Err(e) => error!("Error sending log to channel {}: {}", channel_id, e),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use crate::features::log_events::message_deleted;
    use crate::features::message_tracker::tests::sample_message;

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    pub(crate) fn temp_settings_path() -> PathBuf {
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        std::env::temp_dir()
            .join(format!("event-logger-{}-{}", std::process::id(), n))
            .join("logging_settings.json")
    }

    /// In-memory transport recording everything delivered
    #[derive(Default)]
    pub(crate) struct FakeTransport {
        pub channels: Mutex<HashMap<(u64, u64), ChannelKind>>,
        pub sent: Mutex<Vec<(u64, LogEvent)>>,
        pub failure: Option<DeliveryError>,
    }

    impl FakeTransport {
        pub(crate) fn with_channel(guild_id: u64, channel_id: u64) -> Self {
            let transport = Self::default();
            transport.add_channel(guild_id, channel_id, ChannelKind::Text);
            transport
        }

        pub(crate) fn add_channel(&self, guild_id: u64, channel_id: u64, kind: ChannelKind) {
            self.channels.lock().unwrap().insert((guild_id, channel_id), kind);
        }

        pub(crate) fn delete_channel(&self, guild_id: u64, channel_id: u64) {
            self.channels.lock().unwrap().remove(&(guild_id, channel_id));
        }

        pub(crate) fn sent(&self) -> Vec<(u64, LogEvent)> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl LogTransport for FakeTransport {
        fn channel_kind(&self, guild_id: u64, channel_id: u64) -> Option<ChannelKind> {
            self.channels.lock().unwrap().get(&(guild_id, channel_id)).copied()
        }

        fn deliver(
            &self,
            channel_id: u64,
            event: &LogEvent,
        ) -> impl Future<Output = Result<(), DeliveryError>> + Send {
            let result = match &self.failure {
                Some(err) => Err(err.clone()),
                None => {
                    self.sent.lock().unwrap().push((channel_id, event.clone()));
                    Ok(())
                }
            };
            async move { result }
        }
    }

    fn logger() -> GuildEventLogger {
        GuildEventLogger::new(LogSettingsStore::open(temp_settings_path()))
    }

    #[test]
    fn test_unknown_guild_is_disabled() {
        let logger = logger();
        let status = logger.status(&FakeTransport::default(), 12345);
        assert!(!status.enabled);
        assert_eq!(status.channel_id, None);
    }

    #[tokio::test]
    async fn test_configure_then_status() {
        let logger = logger();
        let transport = FakeTransport::with_channel(100, 555);

        let outcome = logger.configure(&transport, 100, 555, 1).await.unwrap();
        assert_eq!(outcome.warning, None);

        let status = logger.status(&transport, 100);
        assert_eq!(
            status,
            LogStatus {
                enabled: true,
                channel_id: Some(555),
                channel_resolvable: true
            }
        );

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, 555);
        assert_eq!(sent[0].1.title, "🔍 Logging System Activated");
    }

    #[tokio::test]
    async fn test_configure_overwrites_channel() {
        let logger = logger();
        let transport = FakeTransport::with_channel(100, 555);
        transport.add_channel(100, 777, ChannelKind::Text);

        logger.configure(&transport, 100, 555, 1).await.unwrap();
        logger.configure(&transport, 100, 777, 1).await.unwrap();
        assert_eq!(logger.status(&transport, 100).channel_id, Some(777));
        assert_eq!(logger.store().len(), 1);
    }

    #[tokio::test]
    async fn test_configure_unknown_channel_changes_nothing() {
        let logger = logger();
        let transport = FakeTransport::default();

        let err = logger.configure(&transport, 100, 555, 1).await.unwrap_err();
        assert_eq!(err, ConfigureError::ChannelNotFound(555));
        assert!(!logger.status(&transport, 100).enabled);
    }

    #[tokio::test]
    async fn test_configure_category_is_rejected() {
        let logger = logger();
        let transport = FakeTransport::default();
        transport.add_channel(100, 900, ChannelKind::Other);

        let err = logger.configure(&transport, 100, 900, 1).await.unwrap_err();
        assert_eq!(err, ConfigureError::NotTextChannel(900));
        assert_eq!(logger.store().get(100), None);
        assert!(!logger.store().path().exists());
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_channel_turned_non_text_is_evicted() {
        let logger = logger();
        let transport = FakeTransport::with_channel(100, 555);
        logger.configure(&transport, 100, 555, 1).await.unwrap();
        transport.add_channel(100, 555, ChannelKind::Other);

        assert!(!logger.status(&transport, 100).channel_resolvable);
        logger
            .log(&transport, 100, LogEvent::new("t", "d", Severity::Info))
            .await;

        assert_eq!(logger.store().get(100), None);
        assert_eq!(transport.sent().len(), 1);
    }

    #[tokio::test]
    async fn test_configure_without_send_permission_warns() {
        let logger = logger();
        let mut transport = FakeTransport::with_channel(100, 555);
        transport.failure = Some(DeliveryError::MissingPermissions);

        let outcome = logger.configure(&transport, 100, 555, 1).await.unwrap();
        assert_eq!(
            outcome.warning.as_deref(),
            Some("I don't have permission to send messages in the log channel.")
        );
        assert!(logger.status(&transport, 100).enabled);
    }

    #[tokio::test]
    async fn test_configure_with_other_failure_warns() {
        let logger = logger();
        let mut transport = FakeTransport::with_channel(100, 555);
        transport.failure = Some(DeliveryError::Failed("timed out".to_string()));

        let outcome = logger.configure(&transport, 100, 555, 1).await.unwrap();
        assert_eq!(outcome.warning.as_deref(), Some("Error sending test log: timed out"));
    }

    #[tokio::test]
    async fn test_disable_is_idempotent() {
        let logger = logger();
        let transport = FakeTransport::with_channel(100, 555);
        logger.configure(&transport, 100, 555, 1).await.unwrap();

        assert_eq!(logger.disable(100), DisableOutcome::Disabled);
        assert!(!logger.status(&transport, 100).enabled);
        assert_eq!(logger.disable(100), DisableOutcome::AlreadyDisabled);
        assert_eq!(logger.disable(100), DisableOutcome::AlreadyDisabled);
    }

    #[tokio::test]
    async fn test_log_without_channel_is_noop() {
        let logger = logger();
        let transport = FakeTransport::with_channel(100, 555);
        logger
            .log(&transport, 100, LogEvent::new("t", "d", Severity::Info))
            .await;
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn test_deleted_channel_is_evicted() {
        let logger = logger();
        let transport = FakeTransport::with_channel(100, 555);
        logger.configure(&transport, 100, 555, 1).await.unwrap();
        transport.delete_channel(100, 555);

        logger
            .log(&transport, 100, LogEvent::new("t", "d", Severity::Info))
            .await;

        let status = logger.status(&transport, 100);
        assert!(!status.enabled);
        assert_eq!(transport.sent().len(), 1);
        assert!(LogSettingsStore::open(logger.store().path()).is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_swallowed() {
        let logger = logger();
        let mut transport = FakeTransport::with_channel(100, 555);
        logger.configure(&transport, 100, 555, 1).await.unwrap();
        transport.failure = Some(DeliveryError::Failed("boom".to_string()));

        logger
            .log(&transport, 100, LogEvent::new("t", "d", Severity::Info))
            .await;
        assert!(logger.status(&transport, 100).enabled);
    }

    #[tokio::test]
    async fn test_audit_channel_scenario() {
        let logger = logger();
        let transport = FakeTransport::with_channel(100, 555);

        assert!(!logger.status(&transport, 100).enabled);

        logger.configure(&transport, 100, 555, 1).await.unwrap();
        let raw = std::fs::read_to_string(logger.store().path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value, serde_json::json!({"log_channels": {"100": 555}}));

        let deleted = message_deleted(&sample_message(1, "gone")).unwrap();
        logger.log(&transport, 100, deleted).await;
        let sent = transport.sent();
        assert_eq!(sent.len(), 2);
        let (channel, event) = &sent[1];
        assert_eq!(*channel, 555);
        assert!(event.field_value("Channel").unwrap().contains("<#200>"));
        assert!(event.field_value("Author").unwrap().contains("<@300>"));
        assert_eq!(event.field_value("Content"), Some("gone"));

        assert_eq!(logger.disable(100), DisableOutcome::Disabled);
        assert_eq!(logger.store().get(100), None);

        let deleted = message_deleted(&sample_message(2, "also gone")).unwrap();
        logger.log(&transport, 100, deleted).await;
        assert_eq!(transport.sent().len(), 2);
    }
}

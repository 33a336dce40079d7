// Multipurpose Bot - Rust Edition
// Moderation, server event logging and Islamic reminders

mod api;
mod commands;
mod features;
mod models;
mod utils;

use std::env;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use poise::serenity_prelude as serenity;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::features::event_logger::GuildEventLogger;
use crate::features::message_tracker::MessageTracker;
use crate::models::log_settings::LogSettingsStore;
use crate::utils::config::BotConfig;

/// User data shared across all commands
pub struct Data {
    pub http_client: reqwest::Client,
    pub config: BotConfig,
    pub logger: GuildEventLogger,
    pub messages: MessageTracker,
    pub started_at: DateTime<Utc>,
}

// Manual Debug impl since reqwest::Client output is noise
impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("http_client", &"reqwest::Client")
            .field("prefix", &self.config.prefix)
            .field("log_channels", &self.logger.store().len())
            .field("started_at", &self.started_at)
            .finish()
    }
}

type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "multipurpose_bot=info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = BotConfig::from_env().context("Invalid bot configuration")?;

    info!("Starting Multipurpose Bot (Rust Edition)...");

    // Build HTTP client for API calls
    let http_client = reqwest::Client::builder()
        .user_agent(concat!("Multipurpose-Bot/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to create HTTP client")?;

    let store = LogSettingsStore::open(config.log_settings_path());
    info!("Log channel settings stored at {}", store.path().display());

    let token = config.token.clone();
    let prefix = config.prefix.clone();
    let message_cache_size = config.message_cache_size;

    // Setup framework
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(prefix),
                ..Default::default()
            },
            pre_command: |ctx| Box::pin(features::event_handler::log_command(ctx)),
            event_handler: |ctx, event, _framework, data| {
                Box::pin(features::event_handler::handle(ctx, event, data))
            },
            on_error: |error| {
                Box::pin(async move {
                    match error {
                        poise::FrameworkError::Command { error, ctx, .. } => {
                            error!("Command error: {:?}", error);
                            let _ = ctx.say(format!("❌ Error: {}", error)).await;
                        }
                        poise::FrameworkError::MissingUserPermissions { ctx, .. } => {
                            let _ = ctx
                                .say("❌ You don't have permission to use this command.")
                                .await;
                        }
                        err => {
                            if let Err(e) = poise::builtins::on_error(err).await {
                                error!("Framework error: {:?}", e);
                            }
                        }
                    }
                })
            },
            ..Default::default()
        })
        .setup(move |ctx, _ready, framework| {
            Box::pin(async move {
                info!("Bot is ready! Registering commands...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("Commands registered successfully!");

                Ok(Data {
                    http_client,
                    logger: GuildEventLogger::new(store),
                    messages: MessageTracker::new(message_cache_size),
                    started_at: Utc::now(),
                    config,
                })
            })
        })
        .build();

    // MESSAGE_CONTENT and GUILD_MEMBERS are privileged, enable them in the Discord Dev Portal
    let intents = serenity::GatewayIntents::GUILDS
        | serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT
        | serenity::GatewayIntents::GUILD_MEMBERS;

    let mut cache_settings = ::serenity::cache::Settings::default();
    cache_settings.max_messages = message_cache_size;

    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .cache_settings(cache_settings)
        .await
        .context("Failed to create client")?;

    // Run with graceful shutdown
    let shard_manager = client.shard_manager.clone();

    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to register Ctrl+C handler: {:?}", e);
            return;
        }
        info!("Shutting down...");
        shard_manager.shutdown_all().await;
    });

    if let Err(why) = client.start().await {
        error!("Client error: {:?}", why);
    }

    info!("Goodbye!");
    Ok(())
}

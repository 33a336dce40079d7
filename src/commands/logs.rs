// Logs command - manage the server logging channel

use poise::serenity_prelude as serenity;
use tracing::warn;

use crate::features::event_logger::{DisableOutcome, LogStatus, SerenityTransport};
use crate::utils::config::colors;
use crate::utils::formatters::channel_mention;
use crate::{Context, Error};

/// Human readable line describing a guild's logging status
pub fn describe_status(status: &LogStatus) -> String {
    match (status.enabled, status.channel_id) {
        (true, Some(channel_id)) if status.channel_resolvable => {
            format!("Logging is enabled and set to {}", channel_mention(channel_id))
        }
        (true, _) => {
            "Logging is enabled but the channel was not found. Please set a new channel.".to_string()
        }
        _ => "Logging is currently disabled.".to_string(),
    }
}

fn guild_id(ctx: &Context<'_>) -> Result<serenity::GuildId, Error> {
    ctx.guild_id()
        .ok_or_else(|| "This command can only be used in a server.".into())
}

/// Server logging commands
///
/// Use subcommands to manage the logging system:
/// - logs set #channel: Set the log channel
/// - logs off: Turn off logging
/// - logs status: Check logging status
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD",
    subcommands("set", "off", "status")
)]
pub async fn logs(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = guild_id(&ctx)?;
    let prefix = &ctx.data().config.prefix;
    let status = ctx
        .data()
        .logger
        .status(&SerenityTransport::new(ctx.serenity_context()), guild_id.get());

    let current = match status.channel_id {
        Some(channel_id) if status.channel_resolvable => {
            format!("Logs are being sent to {}", channel_mention(channel_id))
        }
        _ => describe_status(&status),
    };

    let embed = serenity::CreateEmbed::new()
        .title("📝 Server Logging")
        .description("Use the following subcommands to manage server logs:")
        .color(colors::DEFAULT)
        .field(
            "Commands",
            format!(
                "`{p}logs set #channel` - Set the logging channel\n\
                `{p}logs off` - Disable logging\n\
                `{p}logs status` - Check logging status",
                p = prefix
            ),
            false,
        )
        .field("Current Status", current, false);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Set the channel for server logs
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
pub async fn set(
    ctx: Context<'_>,
    #[description = "The text channel to send logs to"]
    #[channel_types("Text", "News")]
    channel: serenity::GuildChannel,
) -> Result<(), Error> {
    let guild_id = guild_id(&ctx)?;
    let channel_id = channel.id;

    let transport = SerenityTransport::new(ctx.serenity_context());
    let outcome = match ctx
        .data()
        .logger
        .configure(&transport, guild_id.get(), channel_id.get(), ctx.author().id.get())
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            let embed = serenity::CreateEmbed::new()
                .title("❌ Invalid Channel")
                .description(e.to_string())
                .color(colors::ERROR);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
            return Ok(());
        }
    };

    let mut embed = serenity::CreateEmbed::new()
        .title("✅ Logging Enabled")
        .description(format!("Server logs will now be sent to {}", channel_mention(channel_id.get())))
        .color(colors::SUCCESS)
        .field(
            "Logged Events",
            "• Message edits and deletions\n\
            • Member joins and leaves\n\
            • Nickname and role changes\n\
            • Command usage",
            false,
        );

    if let Some(warning) = outcome.warning {
        embed = embed.field("⚠️ Warning", warning, false);
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Disable server logging
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
pub async fn off(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = guild_id(&ctx)?;

    let embed = match ctx.data().logger.disable(guild_id.get()) {
        DisableOutcome::Disabled => serenity::CreateEmbed::new()
            .title("🛑 Logging Disabled")
            .description("Server logging has been turned off.")
            .color(colors::ERROR),
        DisableOutcome::AlreadyDisabled => serenity::CreateEmbed::new()
            .title("ℹ️ Already Disabled")
            .description("Server logging is already disabled.")
            .color(colors::INFO),
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Check logging status
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_GUILD"
)]
pub async fn status(ctx: Context<'_>) -> Result<(), Error> {
    let guild_id = guild_id(&ctx)?;
    let status = ctx
        .data()
        .logger
        .status(&SerenityTransport::new(ctx.serenity_context()), guild_id.get());

    let color = if status.enabled && !status.channel_resolvable {
        colors::WARNING
    } else {
        colors::INFO
    };

    let mut embed = serenity::CreateEmbed::new()
        .title("📊 Logging Status")
        .description(describe_status(&status))
        .color(color);

    if let (Some(channel_id), true) = (status.channel_id, status.channel_resolvable) {
        if !can_post_embeds(&ctx, guild_id, serenity::ChannelId::new(channel_id)) {
            embed = embed.field(
                "⚠️ Permission Warning",
                "I don't have permission to send messages or embeds in the log channel.",
                false,
            );
        }
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Whether the bot may send embeds in `channel_id`, according to the cache
fn can_post_embeds(ctx: &Context<'_>, guild_id: serenity::GuildId, channel_id: serenity::ChannelId) -> bool {
    let channel = ctx
        .cache()
        .guild(guild_id)
        .and_then(|guild| guild.channels.get(&channel_id).cloned());
    let Some(channel) = channel else {
        return false;
    };

    let bot_id = ctx.cache().current_user().id;
    match channel.permissions_for_user(ctx.serenity_context(), bot_id) {
        Ok(perms) => perms.send_messages() && perms.embed_links(),
        Err(e) => {
            warn!("Could not compute permissions in {}: {:?}", channel_id, e);
            false
        }
    }
}

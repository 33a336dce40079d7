// Info commands - latency and bot statistics

use std::time::Instant;

use poise::serenity_prelude as serenity;

use crate::utils::command_catalog::CommandCategory;
use crate::utils::config::colors;
use crate::utils::formatters::format_uptime;
use crate::{Context, Error};

/// Check the bot's latency
#[poise::command(slash_command, prefix_command)]
pub async fn ping(ctx: Context<'_>) -> Result<(), Error> {
    let started = Instant::now();
    let reply = ctx.say("Pinging...").await?;
    let message_latency = started.elapsed().as_millis();

    let gateway_latency = ctx.ping().await.as_millis();

    let embed = serenity::CreateEmbed::new()
        .title("🏓 Pong!")
        .color(colors::INFO)
        .field("API Latency", format!("{}ms", gateway_latency), true)
        .field("Message Latency", format!("{}ms", message_latency), true);

    reply
        .edit(ctx, poise::CreateReply::default().content("").embed(embed))
        .await?;

    Ok(())
}

struct CacheStats {
    servers: usize,
    users: usize,
    channels: usize,
}

fn cache_stats(cache: &serenity::Cache) -> CacheStats {
    let guild_ids = cache.guilds();
    let mut stats = CacheStats {
        servers: guild_ids.len(),
        users: 0,
        channels: 0,
    };
    for guild_id in guild_ids {
        if let Some(guild) = cache.guild(guild_id) {
            stats.users += guild.members.values().filter(|m| !m.user.bot).count();
            stats.channels += guild.channels.len();
        }
    }
    stats
}

/// Show information about the bot
#[poise::command(slash_command, prefix_command)]
pub async fn info(ctx: Context<'_>) -> Result<(), Error> {
    let data = ctx.data();
    let uptime = chrono::Utc::now() - data.started_at;
    let stats = cache_stats(ctx.cache());
    let command_count = ctx.framework().options().commands.len();

    let (bot_name, bot_id, avatar_url) = {
        let me = ctx.cache().current_user();
        (me.name.clone(), me.id, me.face())
    };

    let embed = serenity::CreateEmbed::new()
        .title(format!("{} Bot Information", bot_name))
        .description("A multipurpose Discord bot with moderation, server logging and Islamic reminders!")
        .color(colors::DEFAULT)
        .thumbnail(avatar_url)
        .field("📊 Bot ID", bot_id.to_string(), true)
        .field("⏱️ Uptime", format_uptime(uptime.num_seconds()), true)
        .field("🖥️ Servers", stats.servers.to_string(), true)
        .field("👥 Users", stats.users.to_string(), true)
        .field("📝 Channels", stats.channels.to_string(), true)
        .field(
            "⚙️ Commands",
            format!("{} commands in {} modules", command_count, CommandCategory::ALL.len()),
            true,
        )
        .field("📌 Prefix", format!("`{}`", data.config.prefix), true)
        .field(
            "🔧 Version",
            format!("v{}\nSerenity 0.12 + Poise 0.6", env!("CARGO_PKG_VERSION")),
            true,
        )
        .footer(serenity::CreateEmbedFooter::new("Rust Edition • Built with Serenity & Poise"));

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

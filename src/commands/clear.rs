// Clear command - bulk delete recent messages

use std::time::Duration;

use poise::serenity_prelude as serenity;
use tracing::{error, info};

use crate::utils::config::colors;
use crate::{Context, Error};

pub const DEFAULT_CLEAR_AMOUNT: i64 = 5;
pub const MAX_CLEAR_AMOUNT: u8 = 100;

/// Discord refuses bulk deletes of messages older than this
const BULK_DELETE_MAX_AGE_SECS: i64 = 14 * 24 * 60 * 60;

/// Seconds before confirmation notices remove themselves
const NOTICE_LIFETIME_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearAmount {
    Invalid,
    Accepted(u8),
    Limited(u8),
}

pub fn clamp_amount(requested: i64) -> ClearAmount {
    if requested < 1 {
        ClearAmount::Invalid
    } else if requested > i64::from(MAX_CLEAR_AMOUNT) {
        ClearAmount::Limited(MAX_CLEAR_AMOUNT)
    } else {
        ClearAmount::Accepted(requested as u8)
    }
}

/// Remove a message after a short delay without blocking the command
fn delete_later(ctx: Context<'_>, message: serenity::Message) {
    let http = ctx.serenity_context().http.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(NOTICE_LIFETIME_SECS)).await;
        let _ = message.channel_id.delete_message(&http, message.id).await;
    });
}

/// Clear a specified number of messages from the channel (max 100)
#[poise::command(
    slash_command,
    prefix_command,
    guild_only,
    required_permissions = "MANAGE_MESSAGES",
    required_bot_permissions = "MANAGE_MESSAGES"
)]
pub async fn clear(
    ctx: Context<'_>,
    #[description = "Number of messages to delete (default 5, max 100)"] amount: Option<i64>,
) -> Result<(), Error> {
    let amount = match clamp_amount(amount.unwrap_or(DEFAULT_CLEAR_AMOUNT)) {
        ClearAmount::Invalid => {
            let embed = serenity::CreateEmbed::new()
                .title("❌ Invalid Amount")
                .description("You must delete at least 1 message.")
                .color(colors::ERROR);
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
            return Ok(());
        }
        ClearAmount::Limited(n) => {
            let embed = serenity::CreateEmbed::new()
                .title("⚠️ Amount Limited")
                .description(format!(
                    "You can only delete up to {} messages at a time. Amount has been set to {}.",
                    MAX_CLEAR_AMOUNT, MAX_CLEAR_AMOUNT
                ))
                .color(colors::WARNING);
            let notice = ctx.send(poise::CreateReply::default().embed(embed)).await?;
            // Slash replies are the interaction response and go away with the command
            if let poise::Context::Prefix(_) = ctx {
                delete_later(ctx, notice.into_message().await?);
            }
            n
        }
        ClearAmount::Accepted(n) => n,
    };

    let channel_id = ctx.channel_id();
    if let poise::Context::Prefix(prefix_ctx) = ctx {
        prefix_ctx.msg.delete(ctx).await?;
    } else {
        ctx.defer_ephemeral().await?;
    }

    let messages = channel_id
        .messages(ctx, serenity::GetMessages::new().limit(amount))
        .await?;

    let now = chrono::Utc::now().timestamp();
    let (recent, old): (Vec<_>, Vec<_>) = messages
        .iter()
        .partition(|m| now - m.timestamp.unix_timestamp() < BULK_DELETE_MAX_AGE_SECS);

    let mut deleted = 0usize;
    match recent.len() {
        0 => {}
        // Bulk delete needs at least two messages
        1 => {
            recent[0].delete(ctx).await?;
            deleted += 1;
        }
        _ => {
            let ids: Vec<serenity::MessageId> = recent.iter().map(|m| m.id).collect();
            channel_id.delete_messages(ctx.http(), &ids).await?;
            deleted += ids.len();
        }
    }
    for message in old {
        match message.delete(ctx).await {
            Ok(()) => deleted += 1,
            Err(e) => error!("Failed to delete message {}: {:?}", message.id, e),
        }
    }

    info!("Cleared {} messages in channel {}", deleted, channel_id);

    let embed = serenity::CreateEmbed::new()
        .title("✅ Messages Deleted")
        .description(format!("Successfully deleted {} messages.", deleted))
        .color(colors::SUCCESS);

    match ctx {
        poise::Context::Prefix(_) => {
            let confirmation = channel_id
                .send_message(ctx, serenity::CreateMessage::new().embed(embed))
                .await?;
            delete_later(ctx, confirmation);
        }
        poise::Context::Application(_) => {
            ctx.send(poise::CreateReply::default().embed(embed).ephemeral(true))
                .await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_amount() {
        assert_eq!(clamp_amount(0), ClearAmount::Invalid);
        assert_eq!(clamp_amount(-3), ClearAmount::Invalid);
        assert_eq!(clamp_amount(1), ClearAmount::Accepted(1));
        assert_eq!(clamp_amount(DEFAULT_CLEAR_AMOUNT), ClearAmount::Accepted(5));
        assert_eq!(clamp_amount(100), ClearAmount::Accepted(100));
        assert_eq!(clamp_amount(101), ClearAmount::Limited(100));
        assert_eq!(clamp_amount(i64::MAX), ClearAmount::Limited(100));
    }
}

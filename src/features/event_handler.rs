// Gateway event dispatch for guild logging

use poise::serenity_prelude as serenity;
use tracing::{debug, info};

use crate::features::event_logger::SerenityTransport;
use crate::features::log_events::{self, CommandInvocation, MemberSnapshot};
use crate::features::message_tracker::TrackedMessage;
use crate::{Context, Data, Error};

/// Name of a guild channel as the cache knows it
fn channel_name(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    channel_id: serenity::ChannelId,
) -> Option<String> {
    ctx.cache
        .guild(guild_id)
        .and_then(|guild| guild.channels.get(&channel_id).map(|c| c.name.clone()))
}

pub async fn handle(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot } => {
            info!("{} is connected to {} guilds", data_about_bot.user.name, data_about_bot.guilds.len());
        }
        serenity::FullEvent::GuildCreate { guild, .. } => {
            // Member hooks need every member cached, not only the ones seen so far
            debug!("Requesting members of guild {}", guild.id);
            ctx.shard.chunk_guild(
                guild.id,
                None,
                false,
                ::serenity::gateway::ChunkGuildFilter::None,
                None,
            );
        }
        serenity::FullEvent::Message { new_message } => {
            if let Some(guild_id) = new_message.guild_id {
                if !new_message.author.bot {
                    let name = channel_name(ctx, guild_id, new_message.channel_id);
                    data.messages
                        .record(TrackedMessage::from_message(new_message, name))
                        .await;
                }
            }
        }
        serenity::FullEvent::MessageDelete {
            deleted_message_id,
            guild_id,
            ..
        } => {
            if let Some(guild_id) = guild_id {
                handle_message_delete(ctx, *guild_id, *deleted_message_id, data).await;
            }
        }
        serenity::FullEvent::MessageUpdate {
            old_if_available,
            event,
            ..
        } => {
            handle_message_edit(ctx, old_if_available.as_ref(), event, data).await;
        }
        serenity::FullEvent::GuildMemberAddition { new_member } => {
            let snapshot = MemberSnapshot::from_member(new_member);
            if let Some(entry) = log_events::member_joined(&snapshot, now()) {
                data.logger
                    .log(&SerenityTransport::new(ctx), new_member.guild_id.get(), entry)
                    .await;
            }
        }
        serenity::FullEvent::GuildMemberRemoval {
            guild_id,
            user,
            member_data_if_available,
        } => {
            let snapshot = match member_data_if_available {
                Some(member) => MemberSnapshot::from_member(member),
                None => MemberSnapshot::from_user(user),
            };
            if let Some(entry) = log_events::member_left(&snapshot, now()) {
                data.logger
                    .log(&SerenityTransport::new(ctx), guild_id.get(), entry)
                    .await;
            }
        }
        serenity::FullEvent::GuildMemberUpdate {
            old_if_available,
            new,
            event,
        } => {
            // Without the cached old member there is nothing to diff against
            let (Some(old), Some(new)) = (old_if_available, new) else {
                debug!("Member {} updated without cached state, skipping", event.user.id);
                return Ok(());
            };
            let entries = log_events::member_updated(
                &MemberSnapshot::from_member(old),
                &MemberSnapshot::from_member(new),
            );
            let transport = SerenityTransport::new(ctx);
            for entry in entries {
                data.logger.log(&transport, event.guild_id.get(), entry).await;
            }
        }
        _ => {}
    }
    Ok(())
}

async fn handle_message_delete(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    message_id: serenity::MessageId,
    data: &Data,
) {
    let Some(message) = data.messages.take(message_id.get()).await else {
        debug!("Deleted message {} was not tracked", message_id);
        return;
    };

    if let Some(entry) = log_events::message_deleted(&message) {
        data.logger
            .log(&SerenityTransport::new(ctx), guild_id.get(), entry)
            .await;
    }
}

async fn handle_message_edit(
    ctx: &serenity::Context,
    old_if_available: Option<&serenity::Message>,
    event: &serenity::MessageUpdateEvent,
    data: &Data,
) {
    let Some(guild_id) = event.guild_id else {
        return;
    };
    // Embed-only updates carry no content
    let Some(new_content) = event.content.as_deref() else {
        return;
    };

    let before = match data.messages.update_content(event.id.get(), new_content).await {
        Some(tracked) => tracked,
        None => match old_if_available {
            Some(old) => {
                let name = channel_name(ctx, guild_id, old.channel_id);
                TrackedMessage::from_message(old, name)
            }
            None => {
                debug!("Edited message {} was not cached", event.id);
                return;
            }
        },
    };

    let jump_url = event.id.link(event.channel_id, Some(guild_id));
    if let Some(entry) = log_events::message_edited(&before, new_content, &jump_url) {
        data.logger
            .log(&SerenityTransport::new(ctx), guild_id.get(), entry)
            .await;
    }
}

/// Pre-command hook: log every command used inside a guild
pub async fn log_command(ctx: Context<'_>) {
    let Some(guild_id) = ctx.guild_id() else {
        return;
    };

    let author = ctx.author();
    let invocation = CommandInvocation {
        guild_id: Some(guild_id.get()),
        author_id: author.id.get(),
        author_name: author.name.clone(),
        author_bot: author.bot,
        avatar_url: author.face(),
        channel_id: ctx.channel_id().get(),
        channel_name: channel_name(ctx.serenity_context(), guild_id, ctx.channel_id()),
        text: ctx.invocation_string(),
    };

    if let Some(entry) = log_events::command_invoked(&invocation) {
        ctx.data()
            .logger
            .log(&SerenityTransport::new(ctx.serenity_context()), guild_id.get(), entry)
            .await;
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

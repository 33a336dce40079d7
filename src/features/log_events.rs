// Builders turning guild occurrences into log entries.
// Each returns None (or nothing) when the occurrence should not be logged.

use poise::serenity_prelude as serenity;

use crate::features::message_tracker::TrackedMessage;
use crate::models::log_event::{LogEvent, Severity};
use crate::utils::config::{EMBED_FIELD_LIMIT, NEW_ACCOUNT_DAYS};
use crate::utils::formatters::{
    channel_mention, days_between, relative_timestamp, role_mention, truncate, user_mention,
};

const UNKNOWN: &str = "Unknown";

/// The parts of a guild member the hooks care about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSnapshot {
    pub user_id: u64,
    pub name: String,
    pub bot: bool,
    pub avatar_url: String,
    pub created_at: i64,
    pub joined_at: Option<i64>,
    pub nick: Option<String>,
    pub roles: Vec<u64>,
}

impl MemberSnapshot {
    pub fn from_member(member: &serenity::Member) -> Self {
        Self {
            user_id: member.user.id.get(),
            name: member.user.name.clone(),
            bot: member.user.bot,
            avatar_url: member.face(),
            created_at: member.user.created_at().unix_timestamp(),
            joined_at: member.joined_at.map(|t| t.unix_timestamp()),
            nick: member.nick.clone(),
            roles: member.roles.iter().map(|r| r.get()).collect(),
        }
    }

    /// Used when only the user is known (member left and was not cached)
    pub fn from_user(user: &serenity::User) -> Self {
        Self {
            user_id: user.id.get(),
            name: user.name.clone(),
            bot: user.bot,
            avatar_url: user.face(),
            created_at: user.created_at().unix_timestamp(),
            joined_at: None,
            nick: None,
            roles: Vec::new(),
        }
    }

    fn labelled_mention(&self) -> String {
        format!("{} `{}`", user_mention(self.user_id), self.name)
    }
}

/// A command as it was typed, with who typed it and where
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    pub guild_id: Option<u64>,
    pub author_id: u64,
    pub author_name: String,
    pub author_bot: bool,
    pub avatar_url: String,
    pub channel_id: u64,
    pub channel_name: Option<String>,
    pub text: String,
}

fn labelled_channel(channel_id: u64, channel_name: Option<&str>) -> String {
    match channel_name {
        Some(name) => format!("{} `#{}`", channel_mention(channel_id), name),
        None => channel_mention(channel_id),
    }
}

fn or_placeholder(text: &str, placeholder: &str) -> String {
    if text.is_empty() {
        placeholder.to_string()
    } else {
        text.to_string()
    }
}

pub fn message_deleted(msg: &TrackedMessage) -> Option<LogEvent> {
    if msg.guild_id.is_none() || msg.author_bot {
        return None;
    }

    let mut event = LogEvent::new(
        "🗑️ Message Deleted",
        format!("A message was deleted in {}", channel_mention(msg.channel_id)),
        Severity::Error,
    )
    .field("Channel", labelled_channel(msg.channel_id, msg.channel_name.as_deref()), true)
    .field("Author", format!("{} `{}`", user_mention(msg.author_id), msg.author_name), true)
    .field("Created", relative_timestamp(msg.created_at), true);

    if !msg.content.is_empty() {
        event = event.field("Content", &msg.content, false);
    }

    if !msg.attachments.is_empty() {
        let listing = msg
            .attachments
            .iter()
            .map(|a| format!("• `{}` - {}", a.filename, a.url))
            .collect::<Vec<_>>()
            .join("\n");
        event = event.field("Attachments", listing, false);
    }

    Some(event.thumbnail(Some(msg.avatar_url.clone())))
}

pub fn message_edited(before: &TrackedMessage, after_content: &str, jump_url: &str) -> Option<LogEvent> {
    if before.guild_id.is_none() || before.author_bot || before.content == after_content {
        return None;
    }

    let event = LogEvent::new(
        "✏️ Message Edited",
        format!("A message was edited in {}", channel_mention(before.channel_id)),
        Severity::Warning,
    )
    .field("Channel", labelled_channel(before.channel_id, before.channel_name.as_deref()), true)
    .field("Author", format!("{} `{}`", user_mention(before.author_id), before.author_name), true)
    .field("Jump to Message", format!("[Click Here]({})", jump_url), true)
    .field("Before", or_placeholder(&before.content, "*No content*"), false)
    .field("After", or_placeholder(after_content, "*No content*"), false)
    .thumbnail(Some(before.avatar_url.clone()));

    Some(event)
}

pub fn member_joined(member: &MemberSnapshot, now: i64) -> Option<LogEvent> {
    if member.bot {
        return None;
    }

    let age_days = days_between(member.created_at, now);
    let mut event = LogEvent::new(
        "👋 Member Joined",
        format!("{} joined the server", user_mention(member.user_id)),
        Severity::Success,
    )
    .field("User", member.labelled_mention(), true)
    .field("ID", format!("`{}`", member.user_id), true)
    .field(
        "Account Created",
        format!("{} ({} days old)", relative_timestamp(member.created_at), age_days),
        false,
    );

    if age_days < NEW_ACCOUNT_DAYS {
        event = event.field("Warning", "⚠️ **New Account Warning**", false);
    }

    Some(event.thumbnail(Some(member.avatar_url.clone())))
}

pub fn member_left(member: &MemberSnapshot, now: i64) -> Option<LogEvent> {
    if member.bot {
        return None;
    }

    // No join time means only the user was known
    let (joined, tenure) = match member.joined_at {
        Some(joined_at) => (
            relative_timestamp(joined_at),
            format!("{} days", days_between(joined_at, now)),
        ),
        None => (UNKNOWN.to_string(), UNKNOWN.to_string()),
    };
    let roles = if member.roles.is_empty() {
        let placeholder = if member.joined_at.is_some() { "No roles" } else { UNKNOWN };
        placeholder.to_string()
    } else {
        member
            .roles
            .iter()
            .map(|id| role_mention(*id))
            .collect::<Vec<_>>()
            .join(", ")
    };

    let event = LogEvent::new(
        "🚶 Member Left",
        format!("`{}` left the server", member.name),
        Severity::Error,
    )
    .field("User", format!("`{}` (`{}`)", member.name, member.user_id), true)
    .field("Joined Server", joined, true)
    .field("Member For", tenure, true)
    .field("Roles", roles, false)
    .thumbnail(Some(member.avatar_url.clone()));

    Some(event)
}

/// Nickname change, roles added and roles removed, in that order
pub fn member_updated(before: &MemberSnapshot, after: &MemberSnapshot) -> Vec<LogEvent> {
    let mut events = Vec::new();
    if before.bot {
        return events;
    }

    if before.nick != after.nick {
        events.push(
            LogEvent::new(
                "📝 Nickname Changed",
                format!("{} changed their nickname", user_mention(after.user_id)),
                Severity::Info,
            )
            .field("User", after.labelled_mention(), true)
            .field("Before", format!("`{}`", before.nick.as_deref().unwrap_or("No nickname")), true)
            .field("After", format!("`{}`", after.nick.as_deref().unwrap_or("No nickname")), true)
            .thumbnail(Some(after.avatar_url.clone())),
        );
    }

    let added: Vec<u64> = after
        .roles
        .iter()
        .filter(|id| !before.roles.contains(id))
        .copied()
        .collect();
    if !added.is_empty() {
        events.push(
            LogEvent::new(
                "🏷️ Roles Added",
                format!("{} was given new roles", user_mention(after.user_id)),
                Severity::Success,
            )
            .field("User", after.labelled_mention(), true)
            .field("Added Roles", join_roles(&added), true)
            .thumbnail(Some(after.avatar_url.clone())),
        );
    }

    let removed: Vec<u64> = before
        .roles
        .iter()
        .filter(|id| !after.roles.contains(id))
        .copied()
        .collect();
    if !removed.is_empty() {
        events.push(
            LogEvent::new(
                "🏷️ Roles Removed",
                format!("{} had roles removed", user_mention(after.user_id)),
                Severity::Error,
            )
            .field("User", after.labelled_mention(), true)
            .field("Removed Roles", join_roles(&removed), true)
            .thumbnail(Some(after.avatar_url.clone())),
        );
    }

    events
}

fn join_roles(ids: &[u64]) -> String {
    ids.iter()
        .map(|id| role_mention(*id))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn command_invoked(invocation: &CommandInvocation) -> Option<LogEvent> {
    if invocation.guild_id.is_none() || invocation.author_bot {
        return None;
    }

    let event = LogEvent::new(
        "🤖 Command Used",
        format!("{} used a command", user_mention(invocation.author_id)),
        Severity::Info,
    )
    .field("User", format!("{} `{}`", user_mention(invocation.author_id), invocation.author_name), true)
    .field("Channel", labelled_channel(invocation.channel_id, invocation.channel_name.as_deref()), true)
    .field(
        "Command",
        format!("`{}`", truncate(&invocation.text, EMBED_FIELD_LIMIT - 2)),
        false,
    )
    .thumbnail(Some(invocation.avatar_url.clone()));

    Some(event)
}

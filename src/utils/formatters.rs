// Formatting utilities

use crate::utils::config::EMBED_FIELD_LIMIT;

const ELLIPSIS: &str = "...";

/// Truncate string to `max_len` characters, ending with an ellipsis when cut
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(ELLIPSIS.len())).collect();
        format!("{}{}", kept, ELLIPSIS)
    }
}

/// Truncate free text so it fits in a single embed field value
pub fn truncate_field(s: &str) -> String {
    truncate(s, EMBED_FIELD_LIMIT)
}

/// Format uptime in seconds as "1d 2h 3m 4s"
pub fn format_uptime(total_seconds: i64) -> String {
    let total = total_seconds.max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = total % 60;
    format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
}

/// Discord timestamp markup rendered relative to the reader ("3 days ago")
pub fn relative_timestamp(unix_seconds: i64) -> String {
    format!("<t:{}:R>", unix_seconds)
}

/// Discord timestamp markup rendered as a full date and time
pub fn full_timestamp(unix_seconds: i64) -> String {
    format!("<t:{}:F>", unix_seconds)
}

/// Whole days elapsed between two unix timestamps, never negative
pub fn days_between(earlier: i64, later: i64) -> i64 {
    (later - earlier).max(0) / 86_400
}

pub fn user_mention(id: u64) -> String {
    format!("<@{}>", id)
}

pub fn channel_mention(id: u64) -> String {
    format!("<#{}>", id)
}

pub fn role_mention(id: u64) -> String {
    format!("<@&{}>", id)
}

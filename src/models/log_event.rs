use poise::serenity_prelude as serenity;

use crate::utils::config::colors;
use crate::utils::formatters::truncate_field;

/// How a log entry should be colored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn color(&self) -> u32 {
        match self {
            Severity::Info => colors::INFO,
            Severity::Success => colors::SUCCESS,
            Severity::Warning => colors::WARNING,
            Severity::Error => colors::ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// One notification for a guild's log channel. Built per occurrence and
/// dropped after delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub fields: Vec<LogField>,
    pub thumbnail_url: Option<String>,
}

impl LogEvent {
    pub fn new(title: impl Into<String>, description: impl Into<String>, severity: Severity) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
            fields: Vec::new(),
            thumbnail_url: None,
        }
    }

    /// Append a field; the value is cut to the embed field limit
    pub fn field(mut self, name: impl Into<String>, value: impl AsRef<str>, inline: bool) -> Self {
        self.fields.push(LogField {
            name: name.into(),
            value: truncate_field(value.as_ref()),
            inline,
        });
        self
    }

    pub fn thumbnail(mut self, url: Option<String>) -> Self {
        self.thumbnail_url = url;
        self
    }

    /// Look up a field value by name
    #[cfg(test)]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
    }

    pub fn to_embed(&self) -> serenity::CreateEmbed {
        let mut embed = serenity::CreateEmbed::new()
            .title(&self.title)
            .description(&self.description)
            .color(self.severity.color())
            .timestamp(serenity::Timestamp::now());

        for field in &self.fields {
            embed = embed.field(&field.name, &field.value, field.inline);
        }

        if let Some(url) = &self.thumbnail_url {
            embed = embed.thumbnail(url);
        }

        embed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_keep_order_and_truncate() {
        let event = LogEvent::new("Title", "Desc", Severity::Warning)
            .field("First", "one", true)
            .field("Second", "x".repeat(2000), false);

        assert_eq!(event.fields.len(), 2);
        assert_eq!(event.fields[0].name, "First");
        assert!(event.fields[0].inline);
        assert_eq!(event.field_value("Second").map(|v| v.chars().count()), Some(1024));
        assert_eq!(event.field_value("Missing"), None);
    }

    #[test]
    fn test_severity_colors() {
        assert_eq!(Severity::Info.color(), colors::INFO);
        assert_eq!(Severity::Error.color(), colors::ERROR);
        assert_ne!(Severity::Success.color(), Severity::Warning.color());
    }
}

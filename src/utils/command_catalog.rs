// Command catalog shown by the help menu
// Every entry carries an explicit category tag.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandCategory {
    General,
    Moderation,
    Islamic,
}

impl CommandCategory {
    pub const ALL: [CommandCategory; 3] = [
        CommandCategory::General,
        CommandCategory::Moderation,
        CommandCategory::Islamic,
    ];

    /// Stable id used in select menu values
    pub fn key(&self) -> &'static str {
        match self {
            CommandCategory::General => "general",
            CommandCategory::Moderation => "moderation",
            CommandCategory::Islamic => "islamic",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.key() == key)
    }

    pub fn label(&self) -> &'static str {
        match self {
            CommandCategory::General => "General",
            CommandCategory::Moderation => "Moderation",
            CommandCategory::Islamic => "Islamic",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CommandCategory::General => "General bot commands",
            CommandCategory::Moderation => "Server moderation and logging commands",
            CommandCategory::Islamic => "Islamic commands and resources",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            CommandCategory::General => "ℹ️",
            CommandCategory::Moderation => "🛡️",
            CommandCategory::Islamic => "☪️",
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            CommandCategory::General => 0x7289da,
            CommandCategory::Moderation => 0xe74c3c,
            CommandCategory::Islamic => 0x2ecc71,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CommandInfo {
    /// Qualified name, e.g. "logs set"
    pub name: &'static str,
    pub description: &'static str,
    /// Example invocation without the prefix
    pub usage: &'static str,
    pub category: CommandCategory,
}

pub const COMMANDS: &[CommandInfo] = &[
    CommandInfo {
        name: "help",
        description: "Shows this help menu",
        usage: "help [command]",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "ping",
        description: "Check the bot's latency",
        usage: "ping",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "info",
        description: "Get information about the bot",
        usage: "info",
        category: CommandCategory::General,
    },
    CommandInfo {
        name: "clear",
        description: "Clear messages from a channel",
        usage: "clear 20",
        category: CommandCategory::Moderation,
    },
    CommandInfo {
        name: "logs",
        description: "Show server logging commands and status",
        usage: "logs",
        category: CommandCategory::Moderation,
    },
    CommandInfo {
        name: "logs set",
        description: "Set the channel for server logs",
        usage: "logs set #audit-log",
        category: CommandCategory::Moderation,
    },
    CommandInfo {
        name: "logs off",
        description: "Disable server logging",
        usage: "logs off",
        category: CommandCategory::Moderation,
    },
    CommandInfo {
        name: "logs status",
        description: "Check logging status",
        usage: "logs status",
        category: CommandCategory::Moderation,
    },
    CommandInfo {
        name: "hadith",
        description: "Get a random hadith",
        usage: "hadith",
        category: CommandCategory::Islamic,
    },
    CommandInfo {
        name: "quran",
        description: "Get a Quran verse",
        usage: "quran 2:255",
        category: CommandCategory::Islamic,
    },
    CommandInfo {
        name: "dua",
        description: "Get a random dua or one by name",
        usage: "dua Before Eating",
        category: CommandCategory::Islamic,
    },
    CommandInfo {
        name: "islamic",
        description: "Islamic commands and information",
        usage: "islamic",
        category: CommandCategory::Islamic,
    },
    CommandInfo {
        name: "islamic reminder",
        description: "Get a random Quranic reminder",
        usage: "islamic reminder",
        category: CommandCategory::Islamic,
    },
    CommandInfo {
        name: "islamic calendar",
        description: "View the Islamic calendar date",
        usage: "islamic calendar",
        category: CommandCategory::Islamic,
    },
];

pub fn find(name: &str) -> Option<&'static CommandInfo> {
    let name = name.trim();
    COMMANDS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

pub fn in_category(category: CommandCategory) -> impl Iterator<Item = &'static CommandInfo> {
    COMMANDS.iter().filter(move |c| c.category == category)
}

/// Command list for one category, one example invocation per line
pub fn category_listing(category: CommandCategory, prefix: &str) -> String {
    let lines: Vec<String> = in_category(category)
        .map(|c| format!("`{}{}` - {}", prefix, c.usage, c.description))
        .collect();

    if lines.is_empty() {
        "No commands available in this category.".to_string()
    } else {
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_keys_round_trip() {
        for category in CommandCategory::ALL {
            assert_eq!(CommandCategory::from_key(category.key()), Some(category));
        }
        assert_eq!(CommandCategory::from_key("levels"), None);
    }

    #[test]
    fn test_every_category_has_commands() {
        for category in CommandCategory::ALL {
            assert!(in_category(category).count() > 0, "{:?} is empty", category);
        }
    }

    #[test]
    fn test_find_is_case_insensitive() {
        assert_eq!(find("LOGS SET").map(|c| c.name), Some("logs set"));
        assert_eq!(find(" ping ").map(|c| c.category), Some(CommandCategory::General));
        assert!(find("giveaway").is_none());
    }

    #[test]
    fn test_category_listing() {
        let listing = category_listing(CommandCategory::General, "!");
        assert!(listing.contains("`!ping` - Check the bot's latency"));
        assert_eq!(listing.lines().count(), 3);
    }

    #[test]
    fn test_catalog_matches_registered_commands() {
        let commands = crate::commands::all();
        for info in COMMANDS {
            let mut words = info.name.split_whitespace();
            let root = words.next().unwrap();
            let command = commands
                .iter()
                .find(|c| c.name == root)
                .unwrap_or_else(|| panic!("{} is not registered", info.name));
            if let Some(sub) = words.next() {
                assert!(
                    command.subcommands.iter().any(|s| s.name == sub),
                    "{} is not registered",
                    info.name
                );
            }
        }
    }
}

// Help command - interactive help menu with category dropdown

use std::time::Duration;

use futures::StreamExt;
use poise::serenity_prelude as serenity;
use tracing::error;

use crate::utils::command_catalog::{self, CommandCategory};
use crate::utils::config::{colors, HELP_MENU_TIMEOUT_SECS};
use crate::{Context, Data, Error};

const CATEGORY_SELECT_ID: &str = "help_category_select";
const HOME_BUTTON_ID: &str = "help_home_button";

/// Invite permissions requested for the bot
const INVITE_PERMISSIONS: u64 = 1_099_511_627_775;

type Command = poise::Command<Data, Error>;

/// Resolve "name" or "group sub" against registered commands, honoring aliases
/// on the top-level name
pub fn find_command<'a>(commands: &'a [Command], query: &str) -> Option<&'a Command> {
    let mut words = query.split_whitespace();
    let root = words.next()?;
    let mut command = commands.iter().find(|c| {
        c.name.eq_ignore_ascii_case(root) || c.aliases.iter().any(|a| a.eq_ignore_ascii_case(root))
    })?;
    for word in words {
        command = command
            .subcommands
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(word))?;
    }
    Some(command)
}

/// Parameter signature, e.g. "<channel>" or "[amount]"
pub fn signature(command: &Command) -> String {
    command
        .parameters
        .iter()
        .map(|p| {
            if p.required {
                format!("<{}>", p.name)
            } else {
                format!("[{}]", p.name)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn invite_url(bot_id: serenity::UserId) -> String {
    format!(
        "https://discord.com/api/oauth2/authorize?client_id={}&permissions={}&scope=bot%20applications.commands",
        bot_id, INVITE_PERMISSIONS
    )
}

struct MenuIdentity {
    name: String,
    avatar_url: String,
    prefix: String,
}

impl MenuIdentity {
    fn footer(&self) -> serenity::CreateEmbedFooter {
        serenity::CreateEmbedFooter::new(format!("{} • {}help <command> for details", self.name, self.prefix))
            .icon_url(&self.avatar_url)
    }
}

fn home_embed(identity: &MenuIdentity) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("Bot Help Menu")
        .description(format!(
            "My prefix is `{}`\nUse the dropdown menu below to browse commands.",
            identity.prefix
        ))
        .color(colors::DEFAULT)
        .footer(identity.footer())
}

fn category_embed(category: CommandCategory, identity: &MenuIdentity) -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title(format!("{} {} Commands", category.emoji(), category.label()))
        .description(format!(
            "Use {}help <command> for more details on a command.\n\n{}",
            identity.prefix,
            command_catalog::category_listing(category, &identity.prefix)
        ))
        .color(category.color())
        .footer(identity.footer())
}

fn menu_components(bot_id: serenity::UserId, support_url: Option<&str>) -> Vec<serenity::CreateActionRow> {
    let options = CommandCategory::ALL
        .iter()
        .map(|c| {
            serenity::CreateSelectMenuOption::new(c.label(), c.key())
                .description(c.description())
                .emoji(serenity::ReactionType::Unicode(c.emoji().to_string()))
        })
        .collect();

    let select = serenity::CreateSelectMenu::new(
        CATEGORY_SELECT_ID,
        serenity::CreateSelectMenuKind::String { options },
    )
    .placeholder("Select a command category...")
    .min_values(1)
    .max_values(1);

    let mut buttons = vec![
        serenity::CreateButton::new(HOME_BUTTON_ID)
            .label("Home")
            .emoji('🏠')
            .style(serenity::ButtonStyle::Secondary),
        serenity::CreateButton::new_link(invite_url(bot_id))
            .label("Invite")
            .emoji('📨'),
    ];
    if let Some(url) = support_url {
        buttons.push(serenity::CreateButton::new_link(url).label("Support").emoji('❓'));
    }

    vec![
        serenity::CreateActionRow::SelectMenu(select),
        serenity::CreateActionRow::Buttons(buttons),
    ]
}

/// Show the help menu with interactive dropdown
#[poise::command(slash_command, prefix_command)]
pub async fn help(
    ctx: Context<'_>,
    #[description = "Command to show details for"]
    #[rest]
    command: Option<String>,
) -> Result<(), Error> {
    if let Some(name) = command {
        return show_command_help(ctx, &name).await;
    }

    let (bot_id, identity) = {
        let me = ctx.cache().current_user();
        (
            me.id,
            MenuIdentity {
                name: me.name.clone(),
                avatar_url: me.face(),
                prefix: ctx.data().config.prefix.clone(),
            },
        )
    };
    let components = menu_components(bot_id, ctx.data().config.support_url.as_deref());

    let mut current = home_embed(&identity);
    let reply = ctx
        .send(
            poise::CreateReply::default()
                .embed(current.clone())
                .components(components),
        )
        .await?;
    let msg = reply.message().await?;

    let mut collector = msg
        .await_component_interactions(ctx.serenity_context())
        .timeout(Duration::from_secs(HELP_MENU_TIMEOUT_SECS))
        .author_id(ctx.author().id)
        .stream();

    while let Some(interaction) = collector.next().await {
        let next = match interaction.data.custom_id.as_str() {
            CATEGORY_SELECT_ID => match &interaction.data.kind {
                serenity::ComponentInteractionDataKind::StringSelect { values } => values
                    .first()
                    .and_then(|v| CommandCategory::from_key(v))
                    .map(|c| category_embed(c, &identity)),
                _ => None,
            },
            HOME_BUTTON_ID => Some(home_embed(&identity)),
            _ => None,
        };

        let Some(embed) = next else {
            continue;
        };
        current = embed.clone();

        if let Err(e) = interaction
            .create_response(
                ctx.http(),
                serenity::CreateInteractionResponse::UpdateMessage(
                    serenity::CreateInteractionResponseMessage::new().embed(embed),
                ),
            )
            .await
        {
            error!("Failed to update help menu: {:?}", e);
        }
    }

    // Menu expired: keep the last page, drop the controls
    reply
        .edit(
            ctx,
            poise::CreateReply::default().embed(current).components(vec![]),
        )
        .await?;

    Ok(())
}

async fn show_command_help(ctx: Context<'_>, name: &str) -> Result<(), Error> {
    let prefix = ctx.data().config.prefix.clone();
    let commands = &ctx.framework().options().commands;

    let Some(cmd) = find_command(commands, name) else {
        let embed = serenity::CreateEmbed::new()
            .title("Command Not Found")
            .description(format!(
                "Cannot find command `{}`. Use `{}help` to see all available commands.",
                name, prefix
            ))
            .color(colors::ERROR);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    };

    let description = cmd
        .help_text
        .clone()
        .or_else(|| cmd.description.clone())
        .unwrap_or_else(|| "No description available.".to_string());

    let mut embed = serenity::CreateEmbed::new()
        .title(format!("Help: {}{}", prefix, cmd.qualified_name))
        .description(description)
        .color(colors::DEFAULT);

    if !cmd.aliases.is_empty() {
        embed = embed.field("Aliases", cmd.aliases.join(", "), false);
    }

    let sig = signature(cmd);
    let usage = if sig.is_empty() {
        format!("{}{}", prefix, cmd.qualified_name)
    } else {
        format!("{}{} {}", prefix, cmd.qualified_name, sig)
    };
    embed = embed.field("Usage", format!("`{}`", usage), false);

    if let Some(info) = command_catalog::find(&cmd.qualified_name) {
        embed = embed
            .field("Example", format!("`{}{}`", prefix, info.usage), false)
            .field(
                "Category",
                format!("{} {}", info.category.emoji(), info.category.label()),
                true,
            );
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_command_and_subcommand() {
        let commands = crate::commands::all();
        assert_eq!(find_command(&commands, "ping").map(|c| c.name.as_str()), Some("ping"));
        assert_eq!(
            find_command(&commands, "LOGS set").map(|c| c.name.as_str()),
            Some("set")
        );
        assert!(find_command(&commands, "logs nope").is_none());
        assert!(find_command(&commands, "").is_none());
    }

    #[test]
    fn test_signature() {
        let commands = crate::commands::all();
        let set = find_command(&commands, "logs set").unwrap();
        assert_eq!(signature(set), "<channel>");
        let clear = find_command(&commands, "clear").unwrap();
        assert_eq!(signature(clear), "[amount]");
        let ping = find_command(&commands, "ping").unwrap();
        assert_eq!(signature(ping), "");
    }

    #[test]
    fn test_invite_url() {
        let url = invite_url(serenity::UserId::new(42));
        assert!(url.contains("client_id=42"));
        assert!(url.contains("scope=bot%20applications.commands"));
    }
}

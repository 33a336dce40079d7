// Islamic commands - hadith, duas, Quran verses and the Hijri calendar

use poise::serenity_prelude as serenity;
use thiserror::Error;
use tracing::{error, warn};

use crate::api::{hijri, quran};
use crate::utils::config::colors;
use crate::utils::formatters::truncate_field;
use crate::utils::islamic_content;
use crate::{Context, Error};

pub const SURAH_COUNT: u16 = 114;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerseReferenceError {
    #[error("expected surah:ayah")]
    Format,
    #[error("surah must be between 1 and 114")]
    SurahOutOfRange,
    #[error("ayah must be at least 1")]
    AyahOutOfRange,
}

/// Parse "2:255" into (surah, ayah)
pub fn parse_verse_reference(reference: &str) -> Result<(u16, u16), VerseReferenceError> {
    let (surah, ayah) = reference
        .trim()
        .split_once(':')
        .ok_or(VerseReferenceError::Format)?;
    let surah: u16 = surah.trim().parse().map_err(|_| VerseReferenceError::Format)?;
    let ayah: u16 = ayah.trim().parse().map_err(|_| VerseReferenceError::Format)?;

    if !(1..=SURAH_COUNT).contains(&surah) {
        return Err(VerseReferenceError::SurahOutOfRange);
    }
    if ayah == 0 {
        return Err(VerseReferenceError::AyahOutOfRange);
    }
    Ok((surah, ayah))
}

fn empty_content_embed() -> serenity::CreateEmbed {
    serenity::CreateEmbed::new()
        .title("⚠️ Nothing to show")
        .description("No content is available right now.")
        .color(colors::WARNING)
}

/// Islamic commands and information
#[poise::command(slash_command, prefix_command, subcommands("reminder", "calendar"))]
pub async fn islamic(ctx: Context<'_>) -> Result<(), Error> {
    let prefix = &ctx.data().config.prefix;
    let commands = [
        format!("`{}hadith` - Get a random hadith", prefix),
        format!("`{}quran <surah:ayah>` - Get a Quran verse", prefix),
        format!("`{}dua` - Get a random dua", prefix),
        format!("`{}islamic reminder` - Get a random Quranic reminder", prefix),
        format!("`{}islamic calendar` - View Islamic calendar date", prefix),
    ];

    let embed = serenity::CreateEmbed::new()
        .title("☪️ Islamic Commands")
        .description("Various Islamic commands and utilities")
        .color(colors::DEFAULT)
        .field("Available Commands", commands.join("\n"), false);

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Get a random Quranic reminder
#[poise::command(slash_command, prefix_command)]
pub async fn reminder(ctx: Context<'_>) -> Result<(), Error> {
    let embed = match islamic_content::random_verse() {
        Some(verse) => serenity::CreateEmbed::new()
            .title("📖 Quranic Reminder")
            .description(verse.text)
            .color(colors::DEFAULT)
            .footer(serenity::CreateEmbedFooter::new(format!("Surah {}", verse.reference))),
        None => empty_content_embed(),
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// View the Islamic calendar date
#[poise::command(slash_command, prefix_command)]
pub async fn calendar(ctx: Context<'_>) -> Result<(), Error> {
    let today = chrono::Utc::now().date_naive();

    let mut embed = serenity::CreateEmbed::new()
        .title("📅 Islamic Calendar")
        .description("Islamic date information")
        .color(colors::DEFAULT)
        .field("Gregorian Date", today.format("%d %B %Y").to_string(), true);

    match hijri::gregorian_to_hijri(&ctx.data().http_client, today).await {
        Ok(date) => {
            embed = embed
                .field("Hijri Date", date.display(), true)
                .field("Month", format!("{} ({})", date.month.en, date.month.ar), true)
                .field("Day", date.weekday.en.clone(), true);
            if !date.holidays.is_empty() {
                embed = embed.field("Observances", date.holidays.join("\n"), false);
            }
        }
        Err(e) => {
            warn!("Failed to fetch Hijri date: {:?}", e);
            embed = embed.field(
                "Note",
                "The Hijri date could not be fetched right now. Please try again later.",
                false,
            );
        }
    }

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Get a random hadith
#[poise::command(slash_command, prefix_command)]
pub async fn hadith(ctx: Context<'_>) -> Result<(), Error> {
    let embed = match islamic_content::random_hadith() {
        Some(hadith) => serenity::CreateEmbed::new()
            .title("📜 Hadith")
            .description(hadith.text)
            .color(colors::DEFAULT)
            .footer(serenity::CreateEmbedFooter::new(format!("Source: {}", hadith.source))),
        None => empty_content_embed(),
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Get a random dua or one by name
#[poise::command(slash_command, prefix_command)]
pub async fn dua(
    ctx: Context<'_>,
    #[description = "Name of the dua"]
    #[rest]
    name: Option<String>,
) -> Result<(), Error> {
    let found = match name.as_deref() {
        Some(query) => match islamic_content::find_dua(query) {
            Some(dua) => Some(dua),
            None => {
                let embed = serenity::CreateEmbed::new()
                    .title("❌ Dua Not Found")
                    .description(format!(
                        "Could not find a dua with the name '{}'. Try using one of the following:\n{}",
                        query,
                        islamic_content::dua_names()
                    ))
                    .color(colors::ERROR);
                ctx.send(poise::CreateReply::default().embed(embed)).await?;
                return Ok(());
            }
        },
        None => islamic_content::random_dua(),
    };

    let embed = match found {
        Some(dua) => serenity::CreateEmbed::new()
            .title(format!("🤲 {}", dua.name))
            .color(colors::DEFAULT)
            .field("Arabic", dua.arabic, false)
            .field("Translation", dua.translation, false),
        None => empty_content_embed(),
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

/// Get a Quran verse
#[poise::command(slash_command, prefix_command)]
pub async fn quran(
    ctx: Context<'_>,
    #[description = "Verse reference as surah:ayah, e.g. 2:255"] reference: Option<String>,
) -> Result<(), Error> {
    let prefix = ctx.data().config.prefix.clone();

    let Some(reference) = reference else {
        let embed = serenity::CreateEmbed::new()
            .title("❓ Quran Reference Required")
            .description(format!(
                "Please provide a Quran reference in the format `surah:ayah`.\nExample: `{}quran 2:255` for Ayatul Kursi.",
                prefix
            ))
            .color(colors::WARNING);
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        return Ok(());
    };

    let invalid_reference = |detail: String| {
        serenity::CreateEmbed::new()
            .title("⚠️ Could not process verse reference")
            .description(format!(
                "Please check your reference format (surah:ayah) and try again.\n{}",
                detail
            ))
            .color(colors::ERROR)
            .field("Example", format!("`{}quran 2:255`", prefix), false)
    };

    let (surah, ayah) = match parse_verse_reference(&reference) {
        Ok(parsed) => parsed,
        Err(e) => {
            let embed = invalid_reference(format!("`{}`: {}", reference, e));
            ctx.send(poise::CreateReply::default().embed(embed)).await?;
            return Ok(());
        }
    };

    ctx.defer().await?;

    let embed = match quran::get_verse(&ctx.data().http_client, surah, ayah).await {
        Ok(Some(verse)) => serenity::CreateEmbed::new()
            .title(format!(
                "📖 Surah {} ({}), Verse {}",
                verse.surah.english_name, verse.surah.number, verse.ayah
            ))
            .description(truncate_field(&verse.english))
            .color(colors::DEFAULT)
            .field("Arabic", truncate_field(&verse.arabic), false)
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} • Translation: Muhammad Asad",
                verse.surah.english_name_translation
            ))),
        Ok(None) => invalid_reference(format!("Surah {} has no verse {}.", surah, ayah)),
        Err(e) => {
            error!("Quran API request for {}:{} failed: {:?}", surah, ayah, e);
            serenity::CreateEmbed::new()
                .title("❌ Error")
                .description("Failed to fetch the verse. Please try again later.")
                .color(colors::ERROR)
        }
    };

    ctx.send(poise::CreateReply::default().embed(embed)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verse_reference() {
        assert_eq!(parse_verse_reference("2:255"), Ok((2, 255)));
        assert_eq!(parse_verse_reference(" 114 : 6 "), Ok((114, 6)));
        assert_eq!(parse_verse_reference("1:1"), Ok((1, 1)));
    }

    #[test]
    fn test_parse_verse_reference_rejects_bad_input() {
        assert_eq!(parse_verse_reference("2"), Err(VerseReferenceError::Format));
        assert_eq!(parse_verse_reference("a:b"), Err(VerseReferenceError::Format));
        assert_eq!(parse_verse_reference("2:-1"), Err(VerseReferenceError::Format));
        assert_eq!(parse_verse_reference("0:1"), Err(VerseReferenceError::SurahOutOfRange));
        assert_eq!(parse_verse_reference("115:1"), Err(VerseReferenceError::SurahOutOfRange));
        assert_eq!(parse_verse_reference("2:0"), Err(VerseReferenceError::AyahOutOfRange));
    }
}

// alquran.cloud API client
// For fetching a single ayah in Arabic and English

use anyhow::{anyhow, Result};
use serde::Deserialize;

pub const QURAN_API_BASE: &str = "https://api.alquran.cloud/v1";

/// Editions requested for every ayah: original text, then translation
pub const ARABIC_EDITION: &str = "quran-uthmani";
pub const ENGLISH_EDITION: &str = "en.asad";

#[derive(Debug, Clone, Deserialize)]
pub struct SurahInfo {
    #[serde(default)]
    pub number: u16,
    #[serde(rename = "englishName", default)]
    pub english_name: String,
    #[serde(rename = "englishNameTranslation", default)]
    pub english_name_translation: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditionInfo {
    #[serde(default)]
    pub identifier: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ayah {
    #[serde(default)]
    pub text: String,
    #[serde(rename = "numberInSurah", default)]
    pub number_in_surah: u16,
    pub surah: SurahInfo,
    pub edition: EditionInfo,
}

#[derive(Debug, Deserialize)]
struct AyahEditionsResponse {
    code: u16,
    #[serde(default)]
    data: Vec<Ayah>,
}

/// One ayah with its Arabic text and English translation
#[derive(Debug, Clone)]
pub struct VerseText {
    pub surah: SurahInfo,
    pub ayah: u16,
    pub arabic: String,
    pub english: String,
}

fn into_verse(ayahs: Vec<Ayah>) -> Result<VerseText> {
    let arabic = ayahs
        .iter()
        .find(|a| a.edition.identifier == ARABIC_EDITION)
        .ok_or_else(|| anyhow!("No Arabic text in Quran API response"))?;
    let english = ayahs
        .iter()
        .find(|a| a.edition.identifier == ENGLISH_EDITION)
        .ok_or_else(|| anyhow!("No translation in Quran API response"))?;

    Ok(VerseText {
        surah: arabic.surah.clone(),
        ayah: arabic.number_in_surah,
        arabic: arabic.text.clone(),
        english: english.text.clone(),
    })
}

/// Fetch `surah:ayah`. Returns None when the reference does not exist.
pub async fn get_verse(client: &reqwest::Client, surah: u16, ayah: u16) -> Result<Option<VerseText>> {
    let response = client
        .get(format!(
            "{}/ayah/{}:{}/editions/{},{}",
            QURAN_API_BASE, surah, ayah, ARABIC_EDITION, ENGLISH_EDITION
        ))
        .send()
        .await?;

    if response.status() == 404 || response.status() == 400 {
        return Ok(None);
    }

    if !response.status().is_success() {
        anyhow::bail!("Quran API error: {}", response.status());
    }

    let body: AyahEditionsResponse = response.json().await?;
    if body.code != 200 {
        return Ok(None);
    }

    into_verse(body.data).map(Some)
}

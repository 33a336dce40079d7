// aladhan.com API client
// For converting Gregorian dates to the Hijri calendar

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use serde::Deserialize;

pub const ALADHAN_API_BASE: &str = "https://api.aladhan.com/v1";

#[derive(Debug, Clone, Deserialize)]
pub struct HijriMonth {
    #[serde(default)]
    pub en: String,
    #[serde(default)]
    pub ar: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HijriWeekday {
    #[serde(default)]
    pub en: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HijriDate {
    #[serde(default)]
    pub day: String,
    pub weekday: HijriWeekday,
    pub month: HijriMonth,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub holidays: Vec<String>,
}

impl HijriDate {
    /// e.g. "17 Rabīʿ al-thānī 1448 AH"
    pub fn display(&self) -> String {
        format!("{} {} {} AH", self.day, self.month.en, self.year)
    }
}

#[derive(Debug, Deserialize)]
struct ConversionData {
    hijri: HijriDate,
}

#[derive(Debug, Deserialize)]
struct ConversionResponse {
    code: u16,
    data: Option<ConversionData>,
}

fn parse_conversion(raw: &str) -> Result<HijriDate> {
    let body: ConversionResponse = serde_json::from_str(raw)?;
    if body.code != 200 {
        return Err(anyhow!("Aladhan API returned code {}", body.code));
    }
    body.data
        .map(|d| d.hijri)
        .ok_or_else(|| anyhow!("No hijri date in Aladhan response"))
}

pub async fn gregorian_to_hijri(client: &reqwest::Client, date: NaiveDate) -> Result<HijriDate> {
    let response = client
        .get(format!("{}/gToH/{}", ALADHAN_API_BASE, date.format("%d-%m-%Y")))
        .send()
        .await?;

    if !response.status().is_success() {
        anyhow::bail!("Aladhan API error: {}", response.status());
    }

    let raw = response.text().await?;
    parse_conversion(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_conversion() {
        let raw = r#"{
            "code": 200,
            "status": "OK",
            "data": {
                "hijri": {
                    "date": "17-04-1448",
                    "format": "DD-MM-YYYY",
                    "day": "17",
                    "weekday": {"en": "Al Juma'a", "ar": "الجمعة"},
                    "month": {"number": 4, "en": "Rabīʿ al-thānī", "ar": "رَبيع الثاني"},
                    "year": "1448",
                    "designation": {"abbreviated": "AH", "expanded": "Anno Hegirae"},
                    "holidays": []
                },
                "gregorian": {"date": "19-10-2026"}
            }
        }"#;

        let hijri = parse_conversion(raw).unwrap();
        assert_eq!(hijri.month.ar, "رَبيع الثاني");
        assert_eq!(hijri.display(), "17 Rabīʿ al-thānī 1448 AH");
        assert_eq!(hijri.weekday.en, "Al Juma'a");
    }

    #[test]
    fn test_error_code() {
        assert!(parse_conversion(r#"{"code": 400, "data": null}"#).is_err());
    }
}

//! The Application Record: the full set of form answers in one submission.
//!
//! The form submits whatever the browser has in its inputs, which means
//! numbers arrive as raw strings ("24" from a number input, "5" from a
//! range slider) and the zodiac select sends an empty string until a sign
//! is picked. Deserialization accepts those shapes but rejects values
//! outside the enumerated sets instead of silently defaulting them.
//!
//! A record is never persisted: it is created on submit, validated,
//! rendered into the notification email, sent, and discarded.

use std::fmt::Write as _;

use serde::de::{self, Deserializer};
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRecord {
    #[serde(default)]
    pub name: String,

    #[serde(default, deserialize_with = "de_flexible_age")]
    pub age: Option<u32>,

    #[serde(default)]
    pub instagram: Option<String>,

    #[serde(default, deserialize_with = "de_zodiac")]
    pub zodiac: Option<Zodiac>,

    #[serde(default = "default_rating", deserialize_with = "de_flexible_rating")]
    pub cuddle_rating: u8,

    #[serde(default = "default_rating", deserialize_with = "de_flexible_rating")]
    pub pun_tolerance: u8,

    #[serde(default)]
    pub shares_food: bool,

    #[serde(default)]
    pub handles_weirdness: bool,

    #[serde(default)]
    pub shower_singing_reaction: ShowerSingingReaction,

    #[serde(default)]
    pub ideal_date: IdealDate,

    #[serde(default)]
    pub pet_approval: bool,

    #[serde(default)]
    pub terms: bool,
}

fn default_rating() -> u8 {
    3
}

impl ApplicationRecord {
    /// Names of the required fields this record is missing.
    ///
    /// A record may only reach the relay when this is empty: `name` must be
    /// non-blank, `age` present and non-zero, and `terms` accepted.
    pub fn missing_required_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.age.unwrap_or(0) == 0 {
            missing.push("age");
        }
        if !self.terms {
            missing.push("terms");
        }
        missing
    }

    /// Render the record into the notification email body.
    pub fn render(&self, submitted_at: OffsetDateTime) -> String {
        let mut out = String::new();

        out.push_str("🎉 NEW GIRLFRIEND APPLICATION RECEIVED! 🎉\n\n");

        out.push_str("📝 PERSONAL DETAILS:\n");
        let _ = writeln!(out, "• Name: {}", self.name);
        let _ = writeln!(out, "• Age: {}", self.age.unwrap_or(0));
        let _ = writeln!(
            out,
            "• Instagram: {}",
            self.instagram.as_deref().filter(|s| !s.is_empty()).unwrap_or("Not provided")
        );
        match self.zodiac {
            Some(sign) => {
                let _ = writeln!(out, "• Zodiac Sign: {} {}", sign.glyph(), sign.display_name());
            }
            None => out.push_str("• Zodiac Sign: Not selected\n"),
        }

        out.push_str("\n⭐ SKILLS & QUALIFICATIONS:\n");
        let _ = writeln!(out, "• Cuddling Strength: {}/5 ⭐", self.cuddle_rating);
        let _ = writeln!(out, "• Pun Tolerance: {}/5 😂", self.pun_tolerance);
        let _ = writeln!(
            out,
            "• Willing to Share Food: {}",
            if self.shares_food { "✅ Yes (keeper!)" } else { "❌ No (red flag?)" }
        );
        let _ = writeln!(
            out,
            "• Can Handle Weirdness: {}",
            if self.handles_weirdness { "✅ Yes (perfect!)" } else { "❌ No (might be a problem)" }
        );

        out.push_str("\n💑 SCENARIO RESPONSES:\n");
        let _ = writeln!(out, "• Shower Singing Reaction: {}", self.shower_singing_reaction.label());
        let _ = writeln!(out, "• Ideal Date: {}", self.ideal_date.label());

        out.push_str("\n🐾 REFERENCES:\n");
        let _ = writeln!(
            out,
            "• Pet Approval: {}",
            if self.pet_approval { "✅ Yes (dogs votes count double!)" } else { "❌ No pets approval" }
        );

        out.push_str("\n📜 TERMS & CONDITIONS:\n");
        let _ = writeln!(
            out,
            "• Agreed to Terms: {}",
            if self.terms { "✅ Accepted all conditions" } else { "❌ Not accepted" }
        );

        out.push_str("\n---\n\n");
        let _ = writeln!(
            out,
            "📧 Submitted on: {}",
            submitted_at.format(&Rfc3339).unwrap_or_default()
        );

        out
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zodiac {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl Zodiac {
    pub fn glyph(&self) -> &'static str {
        match self {
            Zodiac::Aries => "♈",
            Zodiac::Taurus => "♉",
            Zodiac::Gemini => "♊",
            Zodiac::Cancer => "♋",
            Zodiac::Leo => "♌",
            Zodiac::Virgo => "♍",
            Zodiac::Libra => "♎",
            Zodiac::Scorpio => "♏",
            Zodiac::Sagittarius => "♐",
            Zodiac::Capricorn => "♑",
            Zodiac::Aquarius => "♒",
            Zodiac::Pisces => "♓",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Zodiac::Aries => "Aries",
            Zodiac::Taurus => "Taurus",
            Zodiac::Gemini => "Gemini",
            Zodiac::Cancer => "Cancer",
            Zodiac::Leo => "Leo",
            Zodiac::Virgo => "Virgo",
            Zodiac::Libra => "Libra",
            Zodiac::Scorpio => "Scorpio",
            Zodiac::Sagittarius => "Sagittarius",
            Zodiac::Capricorn => "Capricorn",
            Zodiac::Aquarius => "Aquarius",
            Zodiac::Pisces => "Pisces",
        }
    }
}

/// Reaction to shower singing. Defaults to pretending to hear nothing when
/// the field is absent, matching what the formatter falls back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShowerSingingReaction {
    Join,
    Record,
    #[default]
    Ignore,
}

impl ShowerSingingReaction {
    pub fn label(&self) -> &'static str {
        match self {
            ShowerSingingReaction::Join => "🎵 Join in harmoniously",
            ShowerSingingReaction::Record => "📱 Record and blackmail later",
            ShowerSingingReaction::Ignore => "🤐 Pretend to hear nothing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdealDate {
    Netflix,
    Roadtrip,
    #[default]
    Fancy,
}

impl IdealDate {
    pub fn label(&self) -> &'static str {
        match self {
            IdealDate::Netflix => "🍕 Netflix + takeout",
            IdealDate::Roadtrip => "🚗 Spontaneous road trip",
            IdealDate::Fancy => "🍽️ Fancy dinner (with pajamas underneath)",
        }
    }
}

/// Accepts an age as a JSON number or a numeric string; an empty string
/// (untouched number input) counts as absent.
fn de_flexible_age<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u32),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid age: {s:?}"))),
    }
}

/// Accepts a 1–5 rating as a JSON number or a numeric string; an empty or
/// absent value falls back to the slider midpoint.
fn de_flexible_rating<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u8),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) if s.trim().is_empty() => Ok(default_rating()),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| de::Error::custom(format!("invalid rating: {s:?}"))),
    }
}

/// Accepts a zodiac sign, treating the select's empty string as "none".
/// Anything else outside the twelve signs is rejected.
fn de_zodiac<'de, D>(deserializer: D) -> Result<Option<Zodiac>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Sign(Zodiac),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Sign(sign)) => Ok(Some(sign)),
        Some(Raw::Text(s)) if s.is_empty() => Ok(None),
        Some(Raw::Text(s)) => Err(de::Error::custom(format!("unrecognized zodiac sign: {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: serde_json::Value) -> ApplicationRecord {
        serde_json::from_value(value).unwrap()
    }

    fn complete_record() -> ApplicationRecord {
        record(json!({
            "name": "Alex",
            "age": 24,
            "instagram": "@alex",
            "zodiac": "leo",
            "cuddleRating": 5,
            "punTolerance": 2,
            "sharesFood": true,
            "handlesWeirdness": false,
            "showerSingingReaction": "join",
            "idealDate": "netflix",
            "petApproval": true,
            "terms": true,
        }))
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let r = complete_record();
        assert_eq!(r.name, "Alex");
        assert_eq!(r.age, Some(24));
        assert_eq!(r.zodiac, Some(Zodiac::Leo));
        assert_eq!(r.cuddle_rating, 5);
        assert_eq!(r.shower_singing_reaction, ShowerSingingReaction::Join);
        assert_eq!(r.ideal_date, IdealDate::Netflix);
    }

    #[test]
    fn accepts_numbers_submitted_as_strings() {
        // Number and range inputs hand the client raw strings.
        let r = record(json!({ "name": "Sam", "age": "24", "cuddleRating": "5", "terms": true }));
        assert_eq!(r.age, Some(24));
        assert_eq!(r.cuddle_rating, 5);
    }

    #[test]
    fn empty_age_counts_as_absent() {
        let r = record(json!({ "name": "Sam", "age": "" }));
        assert_eq!(r.age, None);
        assert!(r.missing_required_fields().contains(&"age"));
    }

    #[test]
    fn rejects_non_numeric_age() {
        let result =
            serde_json::from_value::<ApplicationRecord>(json!({ "name": "Sam", "age": "old" }));
        assert!(result.is_err());
    }

    #[test]
    fn empty_zodiac_select_counts_as_none() {
        let r = record(json!({ "name": "Sam", "zodiac": "" }));
        assert_eq!(r.zodiac, None);
    }

    #[test]
    fn rejects_unknown_zodiac() {
        let result =
            serde_json::from_value::<ApplicationRecord>(json!({ "name": "Sam", "zodiac": "ophiuchus" }));
        assert!(result.is_err());
    }

    #[test]
    fn rejects_unknown_scenario_choice() {
        let result = serde_json::from_value::<ApplicationRecord>(
            json!({ "name": "Sam", "showerSingingReaction": "applaud" }),
        );
        assert!(result.is_err());
    }

    #[test]
    fn absent_fields_take_defaults() {
        let r = record(json!({ "name": "Sam", "age": 30, "terms": true }));
        assert_eq!(r.cuddle_rating, 3);
        assert_eq!(r.pun_tolerance, 3);
        assert!(!r.shares_food);
        assert!(!r.pet_approval);
        assert_eq!(r.shower_singing_reaction, ShowerSingingReaction::Ignore);
        assert_eq!(r.ideal_date, IdealDate::Fancy);
    }

    #[test]
    fn complete_record_passes_validation() {
        assert!(complete_record().missing_required_fields().is_empty());
    }

    #[test]
    fn blank_name_fails_validation() {
        let r = record(json!({ "name": "   ", "age": 24, "terms": true }));
        assert_eq!(r.missing_required_fields(), vec!["name"]);
    }

    #[test]
    fn zero_age_fails_validation() {
        let r = record(json!({ "name": "Sam", "age": 0, "terms": true }));
        assert_eq!(r.missing_required_fields(), vec!["age"]);
    }

    #[test]
    fn unaccepted_terms_fail_validation() {
        let r = record(json!({ "name": "Sam", "age": 24, "terms": false }));
        assert_eq!(r.missing_required_fields(), vec!["terms"]);
    }

    #[test]
    fn renders_every_submitted_field() {
        let text = complete_record().render(OffsetDateTime::UNIX_EPOCH);

        assert!(text.contains("• Name: Alex"));
        assert!(text.contains("• Age: 24"));
        assert!(text.contains("• Instagram: @alex"));
        assert!(text.contains("• Zodiac Sign: ♌ Leo"));
        assert!(text.contains("• Cuddling Strength: 5/5"));
        assert!(text.contains("• Pun Tolerance: 2/5"));
        assert!(text.contains("• Willing to Share Food: ✅ Yes (keeper!)"));
        assert!(text.contains("• Can Handle Weirdness: ❌ No (might be a problem)"));
        assert!(text.contains("• Shower Singing Reaction: 🎵 Join in harmoniously"));
        assert!(text.contains("• Ideal Date: 🍕 Netflix + takeout"));
        assert!(text.contains("• Pet Approval: ✅ Yes (dogs votes count double!)"));
        assert!(text.contains("• Agreed to Terms: ✅ Accepted all conditions"));
        assert!(text.contains("📧 Submitted on: 1970-01-01T00:00:00Z"));
    }

    #[test]
    fn renders_placeholders_for_absent_optionals() {
        let r = record(json!({ "name": "Sam", "age": 30, "terms": true }));
        let text = r.render(OffsetDateTime::UNIX_EPOCH);

        assert!(text.contains("• Instagram: Not provided"));
        assert!(text.contains("• Zodiac Sign: Not selected"));
        assert!(text.contains("• Shower Singing Reaction: 🤐 Pretend to hear nothing"));
        assert!(text.contains("• Ideal Date: 🍽️ Fancy dinner (with pajamas underneath)"));
    }
}

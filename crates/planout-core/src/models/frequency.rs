//! Recurrence cadence of a chunk's work sessions.

use serde::{Deserialize, Serialize};

/// How often a chunk's work sessions recur.
///
/// Only the four canonical spellings are recognized. Any other text,
/// including a differently cased name, is kept verbatim in
/// [`Frequency::Unknown`] and counts as a one-day cadence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Once,
    #[default]
    Daily,
    Weekly,
    Monthly,
    /// Unrecognized cadence, carrying the original text.
    Unknown(String),
}

impl Frequency {
    /// Parses a cadence name, falling back to [`Frequency::Unknown`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "Once" => Frequency::Once,
            "Daily" => Frequency::Daily,
            "Weekly" => Frequency::Weekly,
            "Monthly" => Frequency::Monthly,
            _ => Frequency::Unknown(raw.to_string()),
        }
    }

    /// Canonical name, or the raw text for unknown cadences.
    pub fn as_str(&self) -> &str {
        match self {
            Frequency::Once => "Once",
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
            Frequency::Unknown(raw) => raw,
        }
    }

    /// Calendar days covered by one session at this cadence.
    ///
    /// Unknown cadences count as one day.
    pub fn day_multiplier(&self) -> u32 {
        match self {
            Frequency::Weekly => 7,
            Frequency::Monthly => 30,
            Frequency::Once | Frequency::Daily | Frequency::Unknown(_) => 1,
        }
    }

    /// Whether this is one of the four canonical cadences.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Frequency::Unknown(_))
    }
}

impl From<&str> for Frequency {
    fn from(raw: &str) -> Self {
        Frequency::parse(raw)
    }
}

impl From<String> for Frequency {
    fn from(raw: String) -> Self {
        Frequency::parse(&raw)
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        match frequency {
            Frequency::Unknown(raw) => raw,
            other => other.as_str().to_string(),
        }
    }
}

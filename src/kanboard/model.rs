use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub type CardId = u64;
pub type ListId = u64;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
        }
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" | "l" => Ok(Priority::Low),
            "medium" | "med" | "m" => Ok(Priority::Medium),
            "high" | "h" => Ok(Priority::High),
            other => Err(format!("Invalid priority: {} (expected low, medium or high)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: CardId,
    pub title: String,
    pub description: String,
    /// Due date. Stored as `YYYY-MM-DD`.
    #[serde(rename = "date", with = "due_date")]
    pub due: NaiveDate,
    pub tag: String,
    pub tag_color: String,
    pub priority: Priority,
}

impl Card {
    /// A card draft for the card editor. The id is assigned on save.
    pub fn draft(title: impl Into<String>, description: impl Into<String>, due: NaiveDate) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            due,
            tag: String::new(),
            tag_color: String::new(),
            priority: Priority::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct List {
    pub id: ListId,
    pub title: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub cards: Vec<Card>,
}

impl List {
    /// A list draft for the list editor. The id is assigned on save.
    pub fn draft(title: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: 0,
            title: title.into(),
            color: color.into(),
            cards: Vec::new(),
        }
    }

    pub fn card(&self, card_id: CardId) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }
}

/// Serde adapter for card due dates.
///
/// Writes plain calendar dates. Reads either a calendar date or a full
/// RFC 3339 timestamp (boards exported from the browser version carry
/// `2024-05-03T10:00:00.000Z`), which is reduced to its UTC date.
pub mod due_date {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Deserializer, Serializer, de};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveDate, String> {
        if let Ok(date) = NaiveDate::parse_from_str(raw, FORMAT) {
            return Ok(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| ts.with_timezone(&Utc).date_naive())
            .map_err(|_| format!("invalid due date: {:?}", raw))
    }
}

use std::fmt::Display;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::time::{date_to_record_name, parse_record_date};

/// Where the minutes of a day came from. Anything other than `manual` is kept verbatim.
#[derive(PartialEq, Eq, Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Source {
    #[default]
    Manual,
    Other(String),
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        match value.as_str() {
            "manual" => Source::Manual,
            _ => Source::Other(value),
        }
    }
}

impl From<&str> for Source {
    fn from(value: &str) -> Self {
        value.to_string().into()
    }
}

impl From<Source> for String {
    fn from(value: Source) -> Self {
        value.to_string()
    }
}

impl Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Source::Manual => write!(f, "manual"),
            Source::Other(v) => write!(f, "{v}"),
        }
    }
}

/// One stored day. The date is the unique key of the table.
#[derive(PartialEq, Eq, Debug, Clone, Serialize)]
pub struct DailyRecord {
    #[serde(serialize_with = "serialize_date")]
    pub date: NaiveDate,
    pub minutes: u32,
    pub source: Source,
    pub updated_at: String,
}

fn serialize_date<S: serde::Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&date_to_record_name(*date))
}

impl DailyRecord {
    pub fn new(date: NaiveDate, minutes: u32) -> Self {
        Self {
            date,
            minutes,
            source: Source::Manual,
            updated_at: String::new(),
        }
    }
}

/// Result of [RecordStore::upsert](super::RecordStore::upsert).
#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

impl Display for UpsertOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpsertOutcome::Inserted => write!(f, "inserted"),
            UpsertOutcome::Updated => write!(f, "updated"),
        }
    }
}

/// A row exactly as it sits in the table. Nothing is trusted here: the table can be edited by
/// hand, so every column is loosely typed and coerced in [RawRecord::into_record].
#[derive(Debug, Deserialize, Default)]
pub struct RawRecord {
    #[serde(default)]
    pub date: Value,
    #[serde(default)]
    pub minutes: Value,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl RawRecord {
    /// Returns [None] only when the date can't be understood, a row without a day is not a
    /// record. Bad minutes become 0.
    pub fn into_record(self) -> Option<DailyRecord> {
        let date = match &self.date {
            Value::String(v) => parse_record_date(v)?,
            _ => return None,
        };
        Some(DailyRecord {
            date,
            minutes: coerce_minutes(&self.minutes),
            source: self.source.map(Source::from).unwrap_or_default(),
            updated_at: self.updated_at.unwrap_or_default(),
        })
    }
}

fn coerce_minutes(value: &Value) -> u32 {
    let as_float = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match as_float {
        Some(v) if v.is_finite() && v > 0. => v.min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

//! Provider temporal values
//!
//! ChartMogul is not consistent about how it writes timestamps: RFC 3339
//! with `Z`, space-separated date-times without an offset, and plain
//! calendar dates all appear. `Moment` accepts each of them without adding
//! an offset the provider did not send, and keeps the original text when
//! nothing matches, so decoding a record never fails on an unexpected date
//! format.

use super::Normalize;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// A date or date-time as sent by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Moment {
    /// Instant with an offset
    DateTime(DateTime<FixedOffset>),
    /// Date-time sent without an offset
    Naive(NaiveDateTime),
    /// Calendar date
    Date(NaiveDate),
    /// Text that is not a recognised date format
    Raw(String),
}

impl Moment {
    /// Parse provider text; never fails
    pub fn parse(original: &str) -> Self {
        let text = original.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Self::DateTime(dt);
        }

        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Self::Naive(naive);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Self::Date(date);
        }

        Self::Raw(original.to_string())
    }

    /// The calendar date, if one is known
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            Self::DateTime(dt) => Some(dt.date_naive()),
            Self::Naive(naive) => Some(naive.date()),
            Self::Date(date) => Some(*date),
            Self::Raw(_) => None,
        }
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateTime(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::AutoSi, false)),
            Self::Naive(naive) => write!(f, "{}", naive.format("%Y-%m-%dT%H:%M:%S%.f")),
            Self::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            Self::Raw(text) => f.write_str(text),
        }
    }
}

impl From<DateTime<FixedOffset>> for Moment {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        Self::DateTime(dt)
    }
}

impl From<NaiveDateTime> for Moment {
    fn from(naive: NaiveDateTime) -> Self {
        Self::Naive(naive)
    }
}

impl From<NaiveDate> for Moment {
    fn from(date: NaiveDate) -> Self {
        Self::Date(date)
    }
}

impl Normalize for Moment {
    fn normalize(&self) -> Value {
        match self {
            Self::DateTime(dt) => dt.normalize(),
            Self::Naive(naive) => naive.normalize(),
            Self::Date(date) => date.normalize(),
            Self::Raw(text) => Value::String(text.clone()),
        }
    }
}

impl<'de> Deserialize<'de> for Moment {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Self::parse(&text))
    }
}

impl Serialize for Moment {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

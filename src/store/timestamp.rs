// src/store/timestamp.rs

//! Calendar-date decoding for document fields.
//!
//! Date fields may have been written as plain `YYYY-MM-DD` strings, as RFC 3339
//! timestamps, or as the database's native `{seconds, nanoseconds}` timestamp
//! object. All three read back as a [`NaiveDate`]. Writes always use the plain
//! date form.

use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Native {
        seconds: i64,
        #[serde(default, alias = "nanos")]
        nanoseconds: u32,
    },
}

impl RawDate {
    fn into_date(self) -> Result<NaiveDate, String> {
        match self {
            RawDate::Text(raw) => parse_date(&raw),
            RawDate::Native {
                seconds,
                nanoseconds,
            } => DateTime::from_timestamp(seconds, nanoseconds)
                .map(|ts| ts.date_naive())
                .ok_or_else(|| format!("timestamp {seconds}s is out of range")),
        }
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.date_naive())
        .map_err(|err| format!("failed to parse '{raw}' as a date ({err})"))
}

pub fn calendar_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    RawDate::deserialize(deserializer)?
        .into_date()
        .map_err(serde::de::Error::custom)
}

pub fn optional_calendar_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawDate>::deserialize(deserializer)?
        .map(|raw| raw.into_date().map_err(serde::de::Error::custom))
        .transpose()
}

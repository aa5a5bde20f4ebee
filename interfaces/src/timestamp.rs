//! Fixed-width UTC timestamps, e.g. `2024-03-01T09:00:00Z`.
//!
//! Every timestamp in the output goes through [`format`], so comparing the
//! serialized strings orders items the same way as comparing the instants.

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::SecondsFormat;
use chrono::Utc;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serializer;

/// Time of day used when an upstream only knows the date.
pub const DEFAULT_TIME_OF_DAY: (u32, u32, u32) = (9, 0, 0);

pub fn format(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Anchors a date-only value at 09:00 UTC.
pub fn at_default_time(date: NaiveDate) -> DateTime<Utc> {
    let (h, m, s) = DEFAULT_TIME_OF_DAY;
    let time = NaiveTime::from_hms_opt(h, m, s).unwrap_or(NaiveTime::MIN);
    date.and_time(time).and_utc()
}

pub fn serialize<S>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format(at))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Unit of the integer epoch values in the `timestamp` column.
///
/// Logs exist in both units, so the unit is always supplied explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimestampUnit {
    #[serde(rename = "s", alias = "seconds")]
    Seconds,
    #[default]
    #[serde(rename = "ms", alias = "milliseconds")]
    Milliseconds,
}

impl TimestampUnit {
    /// Convert a raw epoch value; `None` when it is out of chrono's range.
    pub fn to_datetime(self, value: i64) -> Option<DateTime<Utc>> {
        match self {
            TimestampUnit::Seconds => Utc.timestamp_opt(value, 0).single(),
            TimestampUnit::Milliseconds => Utc.timestamp_millis_opt(value).single(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimestampUnit::Seconds => "s",
            TimestampUnit::Milliseconds => "ms",
        }
    }
}

impl fmt::Display for TimestampUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimestampUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "sec" | "seconds" => Ok(TimestampUnit::Seconds),
            "ms" | "millis" | "milliseconds" => Ok(TimestampUnit::Milliseconds),
            other => Err(Error::InvalidUnit(other.to_string())),
        }
    }
}

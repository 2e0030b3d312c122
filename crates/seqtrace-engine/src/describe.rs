//! Hover text for sequence records, NACK spans and frames.
//!
//! Which fields appear is controlled by an explicit `DisplayOptions` value;
//! nothing here reads global state.

use chrono::{DateTime, Local, Utc};
use seqtrace_types::FinalState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::classifier::SequenceRecord;
use crate::frames::FrameBlock;
use crate::lanes::PlacedSpan;

/// Field toggles for hover text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub seq: bool,
    pub timestamp: bool,
    pub events: bool,
    pub count: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            seq: true,
            timestamp: true,
            events: true,
            count: true,
        }
    }
}

/// Time zone used when rendering timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZoneMode {
    #[default]
    Utc,
    Local,
}

impl fmt::Display for TimeZoneMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeZoneMode::Utc => write!(f, "utc"),
            TimeZoneMode::Local => write!(f, "local"),
        }
    }
}

impl FromStr for TimeZoneMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "utc" => Ok(TimeZoneMode::Utc),
            "local" => Ok(TimeZoneMode::Local),
            other => Err(format!("unknown time zone mode '{}'", other)),
        }
    }
}

/// `2024-01-02 03:04:05:678` (milliseconds after a colon).
pub fn format_timestamp(ts: &DateTime<Utc>, tz: TimeZoneMode) -> String {
    let base = match tz {
        TimeZoneMode::Utc => ts.format("%Y-%m-%d %H:%M:%S").to_string(),
        TimeZoneMode::Local => ts
            .with_timezone(&Local)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    };
    format!("{}:{:03}", base, ts.timestamp_subsec_millis())
}

/// Hover text for one sequence number; `None` when every field is hidden.
pub fn describe_record(
    record: &SequenceRecord,
    options: &DisplayOptions,
    tz: TimeZoneMode,
) -> Option<String> {
    if record.final_state == FinalState::Resend {
        return describe_resend(record, options, tz);
    }

    let mut parts = Vec::new();
    if options.seq {
        parts.push(format!("Seq: {}", record.seq));
    }

    if !record.events.is_empty() {
        if options.timestamp {
            for event in &record.events {
                parts.push(format!(
                    "Timestamp: {}",
                    format_timestamp(&event.timestamp, tz)
                ));
            }
        }
        if options.events {
            let labels: Vec<&str> = record.events.iter().map(|e| e.kind.label()).collect();
            parts.push(format!("Events: {}", labels.join(", ")));
        }
        if options.count {
            let counts: Vec<String> = record.events.iter().map(|e| e.count.to_string()).collect();
            parts.push(format!("Count: {}", counts.join(", ")));
        }
    }

    join_lines(parts)
}

/// Resent packets answer "when was it lost, when did it come back".
fn describe_resend(
    record: &SequenceRecord,
    options: &DisplayOptions,
    tz: TimeZoneMode,
) -> Option<String> {
    let mut parts = Vec::new();
    if options.seq {
        parts.push(format!("Seq: {}", record.seq));
    }

    let history = record.resend_history();
    match (history.lost_at, history.recovered_at) {
        (Some(lost), Some(recovered)) => {
            parts.push(format!("Lost: {}", format_timestamp(&lost, tz)));
            parts.push(format!("Recovered: {}", format_timestamp(&recovered, tz)));
        }
        (None, Some(recovered)) => {
            parts.push(format!("Resend at: {}", format_timestamp(&recovered, tz)));
        }
        _ => {}
    }

    join_lines(parts)
}

pub fn describe_nack(
    span: &PlacedSpan,
    options: &DisplayOptions,
    tz: TimeZoneMode,
) -> Option<String> {
    let mut parts = vec![format!("NACK: {:?}", span.sequence_numbers)];
    if options.timestamp {
        parts.push(format!(
            " Timestamp: {}",
            format_timestamp(&span.timestamp, tz)
        ));
    }
    join_lines(parts)
}

pub fn describe_frame(block: &FrameBlock) -> String {
    match (block.first(), block.last()) {
        (Some(first), Some(last)) => format!("Frame: {} ({} - {})", block.state, first, last),
        _ => format!("Frame: {}", block.state),
    }
}

fn join_lines(parts: Vec<String>) -> Option<String> {
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("\n"))
    }
}

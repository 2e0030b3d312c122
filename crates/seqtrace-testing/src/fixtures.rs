//! Event log fixtures.
//!
//! Logs are written as CSV with a `timestamp,seq,type,count` header, the
//! same shape the loader accepts from real captures.

use anyhow::Result;
use seqtrace_types::{EventKind, SeqNo};
use std::path::Path;

/// Millisecond timestamp every sample log starts from (2023-11-14 22:13:20 UTC).
pub const SAMPLE_BASE_MS: i64 = 1_700_000_000_000;

/// Fluent builder for CSV event logs.
#[derive(Debug, Clone, Default)]
pub struct EventLogBuilder {
    rows: Vec<String>,
}

impl EventLogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lost(self, ts: i64, seq: SeqNo) -> Self {
        self.event(ts, EventKind::Lost, seq, 1)
    }

    pub fn received(self, ts: i64, seq: SeqNo) -> Self {
        self.event(ts, EventKind::Received, seq, 1)
    }

    pub fn resend(self, ts: i64, seq: SeqNo) -> Self {
        self.event(ts, EventKind::Resend, seq, 1)
    }

    pub fn event(mut self, ts: i64, kind: EventKind, seq: SeqNo, count: u32) -> Self {
        self.rows
            .push(format!("{},{},{},{}", ts, seq, kind.code(), count));
        self
    }

    /// NACK rows carry a bracketed list, quoted so the commas survive.
    pub fn nack(mut self, ts: i64, seqs: &[SeqNo]) -> Self {
        let list: Vec<String> = seqs.iter().map(|s| s.to_string()).collect();
        self.rows.push(format!(
            "{},\"[{}]\",{},1",
            ts,
            list.join(", "),
            EventKind::Nack.code()
        ));
        self
    }

    /// Append a row verbatim, e.g. a malformed one.
    pub fn raw(mut self, row: &str) -> Self {
        self.rows.push(row.to_string());
        self
    }

    pub fn build(&self) -> String {
        let mut out = String::from("timestamp,seq,type,count\n");
        for row in &self.rows {
            out.push_str(row);
            out.push('\n');
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.build())?;
        Ok(())
    }
}

/// Canonical 20-sequence capture.
///
/// - 3 is lost for good, 5 is lost then resent, 12 is received then reported lost
/// - 7 arrives as a batch of two
/// - NACKs `[3, 5]`, `[4, 5, 6]` and `[15, 16]` pack into two lanes
/// - frame 0-9 is UnGenerated, frame 10-19 is Generated
pub fn sample_log() -> EventLogBuilder {
    let base = SAMPLE_BASE_MS;
    let mut log = EventLogBuilder::new();
    for seq in 0..20 {
        match seq {
            3 | 5 => log = log.lost(base + seq * 10, seq),
            7 => log = log.event(base + seq * 10, EventKind::Received, seq, 2),
            _ => log = log.received(base + seq * 10, seq),
        }
    }
    log.nack(base + 200, &[3, 5])
        .nack(base + 210, &[4, 5, 6])
        .nack(base + 220, &[15, 16])
        .resend(base + 250, 5)
        .lost(base + 300, 12)
}

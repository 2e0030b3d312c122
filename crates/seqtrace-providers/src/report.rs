use serde::{Deserialize, Serialize};

/// One row that was quarantined during a load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRow {
    /// 1-based line number in the source file (header is line 1)
    pub line: u64,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub skipped: Vec<SkippedRow>,
}

impl LoadReport {
    pub fn rows_skipped(&self) -> usize {
        self.skipped.len()
    }

    pub(crate) fn record_skip(&mut self, line: u64, reason: impl Into<String>) {
        self.skipped.push(SkippedRow {
            line,
            reason: reason.into(),
        });
    }
}

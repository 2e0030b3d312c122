use seqtrace_providers::{LoadReport, parser_for};
use seqtrace_types::{EventTable, TimestampUnit};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::Result;

static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

fn next_version() -> u64 {
    NEXT_VERSION.fetch_add(1, Ordering::Relaxed)
}

/// One loaded event log.
///
/// Every successful (re)load gets a fresh process-wide version number so
/// derived data can be keyed on it.
#[derive(Debug, Clone)]
pub struct Dataset {
    path: PathBuf,
    unit: TimestampUnit,
    version: u64,
    table: Arc<EventTable>,
    report: LoadReport,
}

impl Dataset {
    pub fn load(path: impl Into<PathBuf>, unit: TimestampUnit) -> Result<Self> {
        let path = path.into();
        let outcome = parser_for(&path, unit).parse_file(&path)?;
        let version = next_version();

        tracing::info!(
            path = %path.display(),
            version,
            events = outcome.table.len(),
            "dataset loaded"
        );

        Ok(Self {
            path,
            unit,
            version,
            table: Arc::new(outcome.table),
            report: outcome.report,
        })
    }

    /// Re-read the file. On failure the previous contents stay in place.
    pub fn reload(&mut self) -> Result<()> {
        let fresh = Self::load(self.path.clone(), self.unit)?;
        *self = fresh;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn table(&self) -> &EventTable {
        &self.table
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }
}

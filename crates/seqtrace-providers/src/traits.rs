use seqtrace_types::EventTable;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::report::LoadReport;
use crate::Result;

/// Parsed dataset together with the account of rows that were dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub table: EventTable,
    pub report: LoadReport,
}

/// Event log parsing
///
/// Responsibilities:
/// - Decide whether a file looks like this format
/// - Turn the raw byte stream into an `EventTable`
/// - Skip malformed rows without aborting (recorded in the report)
pub trait EventLogParser: Send + Sync {
    /// Unique parser ID (e.g., "csv")
    fn id(&self) -> &'static str;

    /// Check if a file can be handled by this parser (extension based)
    fn probe(&self, path: &Path) -> bool;

    /// Parse a whole stream; fatal only for structural problems
    fn parse_reader(&self, reader: &mut dyn Read) -> Result<LoadOutcome>;

    /// Parse entire file
    fn parse_file(&self, path: &Path) -> Result<LoadOutcome> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        self.parse_reader(&mut reader)
    }
}

// Error types
pub mod error;

// Trait-based architecture (public API)
pub mod traits;

// Load accounting
pub mod report;

// Format implementations
pub mod csv_log;

pub use csv_log::CsvLogParser;
pub use error::{Error, Result};
pub use report::{LoadReport, SkippedRow};
pub use traits::{EventLogParser, LoadOutcome};

use std::path::Path;

/// Parsers known to this build, in probe order
pub fn registry(unit: seqtrace_types::TimestampUnit) -> Vec<Box<dyn EventLogParser>> {
    vec![Box::new(CsvLogParser::new(unit))]
}

/// Pick the parser for a path, falling back to CSV for unknown extensions
pub fn parser_for(
    path: &Path,
    unit: seqtrace_types::TimestampUnit,
) -> Box<dyn EventLogParser> {
    registry(unit)
        .into_iter()
        .find(|p| p.probe(path))
        .unwrap_or_else(|| Box::new(CsvLogParser::new(unit)))
}

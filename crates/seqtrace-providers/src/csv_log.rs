use csv::{ReaderBuilder, StringRecord, Trim};
use seqtrace_types::{Event, EventKind, EventTable, SeqValue, TimestampUnit};
use std::fmt;
use std::io::Read;
use std::path::Path;

use crate::report::LoadReport;
use crate::traits::{EventLogParser, LoadOutcome};
use crate::{Error, Result};

const COL_TIMESTAMP: &str = "timestamp";
const COL_SEQ: &str = "seq";
const COL_TYPE: &str = "type";
const COL_COUNT: &str = "count";

/// Reader for the packet event CSV log.
///
/// Required columns: `timestamp`, `seq`, `type`; optional `count`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvLogParser {
    timestamp_unit: TimestampUnit,
}

impl CsvLogParser {
    pub fn new(timestamp_unit: TimestampUnit) -> Self {
        Self { timestamp_unit }
    }

    pub fn parse_str(&self, content: &str) -> Result<LoadOutcome> {
        let mut bytes = content.as_bytes();
        self.parse_reader(&mut bytes)
    }
}

impl EventLogParser for CsvLogParser {
    fn id(&self) -> &'static str {
        "csv"
    }

    fn probe(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("csv"))
    }

    fn parse_reader(&self, reader: &mut dyn Read) -> Result<LoadOutcome> {
        let mut rdr = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(reader);

        let columns = Columns::locate(rdr.headers()?)?;

        let mut table = EventTable::default();
        let mut report = LoadReport::default();

        for (index, record) in rdr.records().enumerate() {
            report.rows_read += 1;
            // Header occupies line 1
            let fallback_line = index as u64 + 2;

            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    let line = e
                        .position()
                        .map(|p| p.line())
                        .unwrap_or(fallback_line);
                    tracing::debug!(line, error = %e, "skipping unreadable row");
                    report.record_skip(line, e.to_string());
                    continue;
                }
            };
            let line = record
                .position()
                .map(|p| p.line())
                .unwrap_or(fallback_line);

            match parse_row(&record, &columns, self.timestamp_unit) {
                Ok(event) => {
                    table.push(event);
                    report.rows_loaded += 1;
                }
                Err(reason) => {
                    tracing::debug!(line, %reason, "skipping row");
                    report.record_skip(line, reason.to_string());
                }
            }
        }

        tracing::info!(
            rows_read = report.rows_read,
            rows_loaded = report.rows_loaded,
            rows_skipped = report.rows_skipped(),
            unit = %self.timestamp_unit,
            "loaded event log"
        );

        Ok(LoadOutcome { table, report })
    }
}

/// Column positions resolved from the header row.
#[derive(Debug, Clone, Copy)]
struct Columns {
    timestamp: usize,
    seq: usize,
    kind: usize,
    count: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);

        let timestamp = find(COL_TIMESTAMP);
        let seq = find(COL_SEQ);
        let kind = find(COL_TYPE);

        match (timestamp, seq, kind) {
            (Some(timestamp), Some(seq), Some(kind)) => Ok(Self {
                timestamp,
                seq,
                kind,
                count: find(COL_COUNT),
            }),
            _ => {
                let missing = [
                    (COL_TIMESTAMP, timestamp),
                    (COL_SEQ, seq),
                    (COL_TYPE, kind),
                ]
                .into_iter()
                .filter(|(_, pos)| pos.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
                Err(Error::MissingColumns(missing))
            }
        }
    }
}

/// Why a single row was dropped.
#[derive(Debug, Clone, PartialEq)]
enum RowError {
    MissingValue(&'static str),
    InvalidTimestamp(String),
    TimestampOutOfRange(i64),
    InvalidType(String),
    InvalidCount(String),
    InvalidSeq(seqtrace_types::Error),
    NoSequenceNumbers,
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowError::MissingValue(column) => write!(f, "missing value for '{}'", column),
            RowError::InvalidTimestamp(raw) => write!(f, "unparseable timestamp '{}'", raw),
            RowError::TimestampOutOfRange(value) => {
                write!(f, "timestamp {} is out of range", value)
            }
            RowError::InvalidType(raw) => write!(f, "unknown event type '{}'", raw),
            RowError::InvalidCount(raw) => write!(f, "invalid count '{}'", raw),
            RowError::InvalidSeq(err) => write!(f, "{}", err),
            RowError::NoSequenceNumbers => write!(f, "row references no sequence number"),
        }
    }
}

fn parse_row(
    record: &StringRecord,
    columns: &Columns,
    unit: TimestampUnit,
) -> std::result::Result<Event, RowError> {
    let raw_ts = required(record, columns.timestamp, COL_TIMESTAMP)?;
    let ts_value =
        parse_integral(raw_ts).ok_or_else(|| RowError::InvalidTimestamp(raw_ts.to_string()))?;
    let timestamp = unit
        .to_datetime(ts_value)
        .ok_or(RowError::TimestampOutOfRange(ts_value))?;

    let raw_type = required(record, columns.kind, COL_TYPE)?;
    let kind = parse_integral(raw_type)
        .and_then(|code| EventKind::from_code(code).ok())
        .ok_or_else(|| RowError::InvalidType(raw_type.to_string()))?;

    let raw_seq = required(record, columns.seq, COL_SEQ)?;
    let sequence_numbers = SeqValue::parse(raw_seq)
        .map_err(RowError::InvalidSeq)?
        .resolve(kind);
    if sequence_numbers.is_empty() {
        return Err(RowError::NoSequenceNumbers);
    }

    let count = match columns.count.and_then(|i| record.get(i)) {
        None | Some("") => 1,
        Some(raw) => parse_integral(raw)
            .and_then(|v| u32::try_from(v).ok())
            .filter(|v| *v >= 1)
            .ok_or_else(|| RowError::InvalidCount(raw.to_string()))?,
    };

    Ok(Event {
        timestamp,
        kind,
        sequence_numbers,
        count,
    })
}

fn required<'r>(
    record: &'r StringRecord,
    index: usize,
    column: &'static str,
) -> std::result::Result<&'r str, RowError> {
    match record.get(index) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RowError::MissingValue(column)),
    }
}

/// Integer cell value; integral float spellings such as `3.0` are accepted.
fn parse_integral(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(value) = raw.parse::<i64>() {
        return Some(value);
    }
    let value = raw.parse::<f64>().ok()?;
    if value.is_finite() && value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{Error, EventKind, SeqNo};

/// Parsed content of a `seq` cell.
///
/// Accepted shapes:
/// - bare integer: `2912`
/// - bracketed list: `[9, 19, 29]` (may be empty, one trailing comma allowed)
/// - comma separated: `24691, 24692`
///
/// The two list forms treat empty elements differently: `1,,2` drops the
/// empty part and yields `[1, 2]`, while `[1,,2]` is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeqValue {
    Scalar(SeqNo),
    List(Vec<SeqNo>),
}

impl SeqValue {
    pub fn parse(raw: &str) -> Result<Self, Error> {
        let value = raw.trim();
        if value.is_empty() {
            return Err(Error::InvalidSeq("empty value".to_string()));
        }

        if let Some(inner) = value.strip_prefix('[').and_then(|v| v.strip_suffix(']')) {
            let inner = inner.trim();
            let inner = inner.strip_suffix(',').unwrap_or(inner);
            if inner.trim().is_empty() {
                return Ok(SeqValue::List(Vec::new()));
            }
            return inner
                .split(',')
                .map(|part| parse_number(part, value))
                .collect::<Result<Vec<_>, _>>()
                .map(SeqValue::List);
        }

        if value.contains(',') {
            return value
                .split(',')
                .map(str::trim)
                .filter(|part| !part.is_empty())
                .map(|part| parse_number(part, value))
                .collect::<Result<Vec<_>, _>>()
                .map(SeqValue::List);
        }

        parse_number(value, value).map(SeqValue::Scalar)
    }

    /// Sequence numbers an event of `kind` actually references.
    ///
    /// NACKs keep every element; other kinds keep the first one only.
    pub fn resolve(self, kind: EventKind) -> Vec<SeqNo> {
        match (self, kind) {
            (SeqValue::Scalar(seq), _) => vec![seq],
            (SeqValue::List(list), EventKind::Nack) => list,
            (SeqValue::List(list), _) => list.into_iter().take(1).collect(),
        }
    }
}

impl FromStr for SeqValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SeqValue::parse(s)
    }
}

fn parse_number(part: &str, whole: &str) -> Result<SeqNo, Error> {
    part.trim()
        .parse::<SeqNo>()
        .map_err(|e| Error::InvalidSeq(format!("'{}': {}", whole, e)))
}

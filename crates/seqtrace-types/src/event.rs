use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Error, Result};

/// Sequence number of one tracked packet/unit.
pub type SeqNo = i64;

/// Outcome code carried by a single log row.
///
/// The numeric codes are the ones used in the `type` column of the CSV log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Lost,
    Received,
    Resend,
    Nack,
}

impl EventKind {
    pub fn code(self) -> i8 {
        match self {
            EventKind::Lost => -1,
            EventKind::Received => 1,
            EventKind::Resend => 2,
            EventKind::Nack => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            -1 => Ok(EventKind::Lost),
            1 => Ok(EventKind::Received),
            2 => Ok(EventKind::Resend),
            3 => Ok(EventKind::Nack),
            other => Err(Error::InvalidKind(other.to_string())),
        }
    }

    /// Human readable label used in hover text.
    pub fn label(self) -> &'static str {
        match self {
            EventKind::Lost => "Lost",
            EventKind::Received => "Received",
            EventKind::Resend => "Resend",
            EventKind::Nack => "NACK",
        }
    }

    pub fn is_nack(self) -> bool {
        matches!(self, EventKind::Nack)
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One parsed log row.
///
/// Non-NACK events reference exactly one sequence number; a NACK references
/// every sequence number it asks to be retransmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub kind: EventKind,
    pub sequence_numbers: Vec<SeqNo>,
    pub count: u32,
}

impl Event {
    pub fn new(timestamp: DateTime<Utc>, kind: EventKind, sequence_numbers: Vec<SeqNo>) -> Self {
        Self {
            timestamp,
            kind,
            sequence_numbers,
            count: 1,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// First referenced sequence number (the only one for non-NACK events)
    pub fn primary_seq(&self) -> Option<SeqNo> {
        self.sequence_numbers.first().copied()
    }

    pub fn covers(&self, seq: SeqNo) -> bool {
        self.sequence_numbers.contains(&seq)
    }
}

/// Ordered collection of events for one loaded dataset.
///
/// Row order is preserved exactly as read from the source file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTable {
    events: Vec<Event>,
}

impl EventTable {
    pub fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Events that carry an outcome for a single sequence number.
    pub fn direct_events(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| !e.kind.is_nack())
    }

    pub fn nacks(&self) -> impl Iterator<Item = &Event> {
        self.events.iter().filter(|e| e.kind.is_nack())
    }

    /// Sorted, deduplicated union of every referenced sequence number,
    /// NACK members included.
    pub fn sequence_domain(&self) -> Vec<SeqNo> {
        let mut domain: Vec<SeqNo> = self
            .events
            .iter()
            .flat_map(|e| e.sequence_numbers.iter().copied())
            .collect();
        domain.sort_unstable();
        domain.dedup();
        domain
    }
}

impl FromIterator<Event> for EventTable {
    fn from_iter<I: IntoIterator<Item = Event>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

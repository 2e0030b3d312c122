use chrono::{DateTime, Utc};
use seqtrace_types::{Event, EventTable, SeqNo};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Closed range of positions in the visible domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: usize,
    pub end: usize,
}

impl Interval {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Closed intervals that share at least one position overlap.
    pub fn overlaps(&self, other: &Interval) -> bool {
        !(self.end < other.start || self.start > other.end)
    }
}

/// Greedy first-fit lane assignment.
///
/// Each interval goes to the lowest-numbered lane where it overlaps nothing;
/// a new lane is opened only when every existing lane collides.
#[derive(Debug, Clone, Default)]
pub struct LanePacker {
    lanes: Vec<Vec<Interval>>,
}

impl LanePacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place `interval` and return its lane index.
    pub fn place(&mut self, interval: Interval) -> usize {
        for (index, lane) in self.lanes.iter_mut().enumerate() {
            if lane.iter().all(|placed| !placed.overlaps(&interval)) {
                lane.push(interval);
                return index;
            }
        }
        self.lanes.push(vec![interval]);
        self.lanes.len() - 1
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }
}

/// Lane index for every interval, in input order.
pub fn assign_lanes(intervals: &[Interval]) -> Vec<usize> {
    let mut packer = LanePacker::new();
    intervals.iter().map(|iv| packer.place(*iv)).collect()
}

/// A NACK clipped to the visible domain and assigned to a lane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedSpan {
    /// Members of the NACK that fall inside the visible domain
    pub sequence_numbers: Vec<SeqNo>,
    pub timestamp: DateTime<Utc>,
    pub interval: Interval,
    pub lane: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaneLayout {
    pub spans: Vec<PlacedSpan>,
    pub lane_count: usize,
}

impl LaneLayout {
    pub fn lane(&self, lane: usize) -> impl Iterator<Item = &PlacedSpan> {
        self.spans.iter().filter(move |s| s.lane == lane)
    }
}

/// Pack every NACK of the table that touches `visible`.
///
/// `visible` must be sorted; intervals are expressed as positions within it.
/// NACKs are placed in timestamp order, ties keep file order.
pub fn pack_nacks(table: &EventTable, visible: &[SeqNo]) -> LaneLayout {
    let index: HashMap<SeqNo, usize> = visible.iter().enumerate().map(|(i, s)| (*s, i)).collect();

    let mut nacks: Vec<&Event> = table.nacks().collect();
    nacks.sort_by_key(|e| e.timestamp);

    let mut packer = LanePacker::new();
    let mut spans = Vec::new();

    for nack in nacks {
        let Some((members, interval)) = clip(nack, &index) else {
            continue;
        };
        let lane = packer.place(interval);
        spans.push(PlacedSpan {
            sequence_numbers: members,
            timestamp: nack.timestamp,
            interval,
            lane,
        });
    }

    LaneLayout {
        spans,
        lane_count: packer.lane_count(),
    }
}

fn clip(nack: &Event, index: &HashMap<SeqNo, usize>) -> Option<(Vec<SeqNo>, Interval)> {
    let mut members = Vec::new();
    let mut bounds: Option<(usize, usize)> = None;

    for seq in &nack.sequence_numbers {
        if let Some(&pos) = index.get(seq) {
            members.push(*seq);
            bounds = Some(match bounds {
                Some((lo, hi)) => (lo.min(pos), hi.max(pos)),
                None => (pos, pos),
            });
        }
    }

    bounds.map(|(lo, hi)| (members, Interval::new(lo, hi)))
}

use seqtrace_types::{EventTable, SeqNo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Range;

use crate::classifier::{ClassifierOptions, SequenceRecord, classify_all};
use crate::describe::{self, DisplayOptions, TimeZoneMode};
use crate::frames::{FrameBlock, aggregate_frames};
use crate::lanes::{LaneLayout, pack_nacks};
use crate::summary::{SummaryCounts, summarize_records};
use crate::window::Window;

/// Everything derived for one visible window of a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timeline {
    /// Index range of the window within the full sorted domain
    pub range: Range<usize>,
    /// Size of the full sorted domain
    pub domain_len: usize,
    pub visible: Vec<SeqNo>,
    pub records: BTreeMap<SeqNo, SequenceRecord>,
    pub lanes: LaneLayout,
    pub frames: Vec<FrameBlock>,
    /// Counts over the visible records
    pub summary: SummaryCounts,
}

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverTarget {
    Sequence(SeqNo),
    /// Index into `Timeline::lanes.spans`
    Nack(usize),
    /// Index into `Timeline::frames`
    Frame(usize),
}

impl Timeline {
    pub fn record(&self, seq: SeqNo) -> Option<&SequenceRecord> {
        self.records.get(&seq)
    }

    /// Hover text for a target, `None` for unknown targets or fully hidden text.
    pub fn hover_text(
        &self,
        target: HoverTarget,
        options: &DisplayOptions,
        tz: TimeZoneMode,
    ) -> Option<String> {
        match target {
            HoverTarget::Sequence(seq) => self
                .records
                .get(&seq)
                .and_then(|r| describe::describe_record(r, options, tz)),
            HoverTarget::Nack(index) => self
                .lanes
                .spans
                .get(index)
                .and_then(|s| describe::describe_nack(s, options, tz)),
            HoverTarget::Frame(index) => self.frames.get(index).map(describe::describe_frame),
        }
    }
}

/// Derive records, lanes, frames and summary for `window`.
pub fn build_timeline(table: &EventTable, window: Window, options: &ClassifierOptions) -> Timeline {
    let domain = table.sequence_domain();
    let range = window.range(domain.len());
    let visible = domain[range.clone()].to_vec();

    let records = classify_all(table, &visible, options);
    let lanes = pack_nacks(table, &visible);
    let frames = aggregate_frames(&visible, &records);
    let summary = summarize_records(records.values());

    Timeline {
        range,
        domain_len: domain.len(),
        visible,
        records,
        lanes,
        frames,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use seqtrace_types::{Event, EventKind, FinalState, FrameState};

    fn ev(ms: i64, kind: EventKind, seqs: &[SeqNo]) -> Event {
        Event::new(Utc.timestamp_millis_opt(ms).unwrap(), kind, seqs.to_vec())
    }

    fn sample() -> EventTable {
        let mut events = Vec::new();
        for seq in 0..25 {
            events.push(ev(seq * 10, EventKind::Received, &[seq]));
        }
        events.push(ev(300, EventKind::Lost, &[30]));
        events.push(ev(310, EventKind::Nack, &[28, 29, 30]));
        events.push(ev(320, EventKind::Resend, &[30]));
        events.push(ev(330, EventKind::Lost, &[27]));
        EventTable::new(events)
    }

    #[test]
    fn test_full_timeline() {
        let timeline = build_timeline(&sample(), Window::full(), &ClassifierOptions::default());

        // 0..25, then 27..=30
        assert_eq!(timeline.domain_len, 29);
        assert_eq!(timeline.visible.len(), 29);
        assert_eq!(timeline.records[&30].final_state, FinalState::Resend);
        assert_eq!(timeline.records[&28].final_state, FinalState::Received);
        assert_eq!(timeline.records[&27].final_state, FinalState::Lost);
        assert_eq!(timeline.lanes.spans.len(), 1);
        assert_eq!(timeline.frames.len(), 3);
        assert_eq!(timeline.frames[2].state, FrameState::UnGenerated);
        assert_eq!(timeline.summary.total, 29);
        assert_eq!(timeline.summary.lost, 1);
        assert_eq!(timeline.summary.resend_count, 1);
    }

    #[test]
    fn test_windowed_timeline() {
        let timeline = build_timeline(&sample(), Window::new(20, 5), &ClassifierOptions::default());

        assert_eq!(timeline.range, 20..25);
        assert_eq!(timeline.visible, vec![20, 21, 22, 23, 24]);
        assert!(timeline.lanes.spans.is_empty());
        assert_eq!(timeline.summary.total, 5);
        assert_eq!(timeline.frames.len(), 1);
    }

    #[test]
    fn test_hover_targets() {
        let timeline = build_timeline(&sample(), Window::full(), &ClassifierOptions::default());
        let options = DisplayOptions::default();

        let text = timeline
            .hover_text(HoverTarget::Sequence(30), &options, TimeZoneMode::Utc)
            .unwrap();
        assert!(text.starts_with("Seq: 30\nLost: "));

        let text = timeline
            .hover_text(HoverTarget::Nack(0), &options, TimeZoneMode::Utc)
            .unwrap();
        assert!(text.starts_with("NACK: [28, 29, 30]"));

        assert_eq!(
            timeline.hover_text(HoverTarget::Frame(0), &options, TimeZoneMode::Utc),
            Some("Frame: Generated (0 - 9)".to_string())
        );
        assert_eq!(
            timeline.hover_text(HoverTarget::Frame(99), &options, TimeZoneMode::Utc),
            None
        );
        assert_eq!(
            timeline.hover_text(HoverTarget::Sequence(26), &options, TimeZoneMode::Utc),
            None
        );
    }

    #[test]
    fn test_empty_table() {
        let timeline = build_timeline(
            &EventTable::default(),
            Window::default(),
            &ClassifierOptions::default(),
        );
        assert!(timeline.visible.is_empty());
        assert!(timeline.frames.is_empty());
        assert_eq!(timeline.summary.total, 0);
    }
}

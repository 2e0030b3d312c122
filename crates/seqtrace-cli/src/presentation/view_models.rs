use seqtrace_engine::{
    DisplayOptions, FrameBlock, ResendHistory, SequenceRecord, SummaryCounts, Timeline,
    TimeZoneMode, describe_frame, describe_nack, describe_record,
};
use seqtrace_providers::{LoadReport, SkippedRow};
use seqtrace_runtime::{Config, Dataset};
use seqtrace_types::{Event, FinalState, FrameState, SeqNo};
use serde::Serialize;
use std::ops::Range;

#[derive(Debug, Clone, Serialize)]
pub struct SummaryReport {
    pub file: String,
    pub rows_read: usize,
    pub rows_loaded: usize,
    pub skipped: Vec<SkippedRow>,
    pub summary: SummaryCounts,
}

impl SummaryReport {
    pub fn new(dataset: &Dataset, summary: SummaryCounts) -> Self {
        let LoadReport {
            rows_read,
            rows_loaded,
            skipped,
        } = dataset.report().clone();
        Self {
            file: dataset.path().display().to_string(),
            rows_read,
            rows_loaded,
            skipped,
            summary,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    pub seq: SeqNo,
    pub final_state: FinalState,
    pub events: Vec<Event>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resend: Option<ResendHistory>,
    /// Hover text, absent when every field is hidden
    pub text: Option<String>,
}

impl RecordReport {
    pub fn new(record: &SequenceRecord, options: &DisplayOptions, tz: TimeZoneMode) -> Self {
        let resend =
            (record.final_state == FinalState::Resend).then(|| record.resend_history());
        Self {
            seq: record.seq,
            final_state: record.final_state,
            events: record.events.clone(),
            resend,
            text: describe_record(record, options, tz),
        }
    }
}

/// Where a window sits within the full domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WindowInfo {
    pub start: usize,
    pub end: usize,
    pub domain_len: usize,
}

impl WindowInfo {
    fn of(range: &Range<usize>, domain_len: usize) -> Self {
        Self {
            start: range.start,
            end: range.end,
            domain_len,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameRow {
    pub first: Option<SeqNo>,
    pub last: Option<SeqNo>,
    pub size: usize,
    pub state: FrameState,
    pub text: String,
}

impl From<&FrameBlock> for FrameRow {
    fn from(block: &FrameBlock) -> Self {
        Self {
            first: block.first(),
            last: block.last(),
            size: block.sequence_numbers.len(),
            state: block.state,
            text: describe_frame(block),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FramesReport {
    pub file: String,
    pub window: WindowInfo,
    pub frames: Vec<FrameRow>,
}

impl FramesReport {
    pub fn new(file: String, timeline: &Timeline) -> Self {
        Self {
            file,
            window: WindowInfo::of(&timeline.range, timeline.domain_len),
            frames: timeline.frames.iter().map(FrameRow::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NackRow {
    pub lane: usize,
    /// Positions within the visible window
    pub start: usize,
    pub end: usize,
    pub sequence_numbers: Vec<SeqNo>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NacksReport {
    pub file: String,
    pub window: WindowInfo,
    pub lane_count: usize,
    pub spans: Vec<NackRow>,
}

impl NacksReport {
    pub fn new(
        file: String,
        timeline: &Timeline,
        options: &DisplayOptions,
        tz: TimeZoneMode,
    ) -> Self {
        let spans = timeline
            .lanes
            .spans
            .iter()
            .map(|span| NackRow {
                lane: span.lane,
                start: span.interval.start,
                end: span.interval.end,
                sequence_numbers: span.sequence_numbers.clone(),
                text: describe_nack(span, options, tz),
            })
            .collect();

        Self {
            file,
            window: WindowInfo::of(&timeline.range, timeline.domain_len),
            lane_count: timeline.lanes.lane_count,
            spans,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TimelineReport {
    pub file: String,
    pub window: WindowInfo,
    /// Counts over the visible window only
    pub summary: SummaryCounts,
    pub states: Vec<(SeqNo, FinalState)>,
    pub lane_count: usize,
    pub frames: Vec<FrameRow>,
}

impl TimelineReport {
    pub fn new(file: String, timeline: &Timeline) -> Self {
        let states = timeline
            .visible
            .iter()
            .filter_map(|seq| timeline.record(*seq).map(|r| (*seq, r.final_state)))
            .collect();

        Self {
            file,
            window: WindowInfo::of(&timeline.range, timeline.domain_len),
            summary: timeline.summary,
            states,
            lane_count: timeline.lanes.lane_count,
            frames: timeline.frames.iter().map(FrameRow::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigReport {
    pub path: String,
    pub exists: bool,
    pub config: Config,
}

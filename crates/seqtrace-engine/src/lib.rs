// Engine module - derivation logic over a loaded event table
// This layer sits between parsed events (types) and CLI presentation

pub mod classifier;
pub mod describe;
pub mod frames;
pub mod lanes;
pub mod summary;
pub mod timeline;
pub mod window;

pub use classifier::{
    ClassifierOptions, DEFAULT_UNSEEN_STATE, ResendHistory, SequenceRecord, classify,
    classify_all, decide_final_state,
};
pub use describe::{
    DisplayOptions, TimeZoneMode, describe_frame, describe_nack, describe_record,
    format_timestamp,
};
pub use frames::{FRAME_BLOCK_SIZE, FrameBlock, aggregate_frames};
pub use lanes::{Interval, LaneLayout, LanePacker, PlacedSpan, assign_lanes, pack_nacks};
pub use summary::{SummaryCounts, summarize, summarize_records};
pub use timeline::{HoverTarget, Timeline, build_timeline};
pub use window::{DEFAULT_VISIBLE_COUNT, Window};

use seqtrace_types::EventTable;

// Façade API - Stable public interface for CLI layer

/// Records for the whole sequence domain of a table
pub fn classify_table(
    table: &EventTable,
    options: &ClassifierOptions,
) -> std::collections::BTreeMap<seqtrace_types::SeqNo, SequenceRecord> {
    classify_all(table, &table.sequence_domain(), options)
}

/// Summary over the whole sequence domain of a table
pub fn summarize_table(table: &EventTable, options: &ClassifierOptions) -> SummaryCounts {
    summarize_records(classify_table(table, options).values())
}

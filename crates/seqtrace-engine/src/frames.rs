use seqtrace_types::{FinalState, FrameState, SeqNo};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classifier::SequenceRecord;

/// Number of consecutive sequence numbers that make up one frame.
pub const FRAME_BLOCK_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameBlock {
    pub sequence_numbers: Vec<SeqNo>,
    pub state: FrameState,
}

impl FrameBlock {
    pub fn first(&self) -> Option<SeqNo> {
        self.sequence_numbers.first().copied()
    }

    pub fn last(&self) -> Option<SeqNo> {
        self.sequence_numbers.last().copied()
    }
}

/// Split the sorted `domain` into frames of `FRAME_BLOCK_SIZE`.
///
/// A frame is `UnGenerated` as soon as one member was finally lost.
/// Members without a record are not counted as lost.
pub fn aggregate_frames(
    domain: &[SeqNo],
    records: &BTreeMap<SeqNo, SequenceRecord>,
) -> Vec<FrameBlock> {
    domain
        .chunks(FRAME_BLOCK_SIZE)
        .map(|block| {
            let lost = block.iter().any(|seq| {
                records
                    .get(seq)
                    .is_some_and(|r| r.final_state == FinalState::Lost)
            });
            FrameBlock {
                sequence_numbers: block.to_vec(),
                state: if lost {
                    FrameState::UnGenerated
                } else {
                    FrameState::Generated
                },
            }
        })
        .collect()
}

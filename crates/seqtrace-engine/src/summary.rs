use seqtrace_types::FinalState;
use serde::{Deserialize, Serialize};

use crate::classifier::SequenceRecord;

/// Aggregate delivery counts over a set of sequence records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryCounts {
    pub total: usize,
    /// Received or resent
    pub received: usize,
    pub lost: usize,
    pub resend_count: usize,
    /// `lost / total`, 0 when there are no records
    pub loss_ratio: f64,
    /// `resend / (lost + resend)`, 0 when nothing was lost or resent
    pub recovery_ratio: f64,
}

pub fn summarize<I>(states: I) -> SummaryCounts
where
    I: IntoIterator<Item = FinalState>,
{
    let mut counts = SummaryCounts::default();
    for state in states {
        counts.total += 1;
        if state.is_delivered() {
            counts.received += 1;
        } else {
            counts.lost += 1;
        }
        if state == FinalState::Resend {
            counts.resend_count += 1;
        }
    }

    counts.loss_ratio = ratio(counts.lost, counts.total);
    counts.recovery_ratio = ratio(counts.resend_count, counts.lost + counts.resend_count);
    counts
}

pub fn summarize_records<'a, I>(records: I) -> SummaryCounts
where
    I: IntoIterator<Item = &'a SequenceRecord>,
{
    summarize(records.into_iter().map(|r| r.final_state))
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

use chrono::{DateTime, Utc};
use seqtrace_types::{Event, EventKind, EventTable, FinalState, SeqNo};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// State given to a sequence number that only appears inside NACKs.
pub const DEFAULT_UNSEEN_STATE: FinalState = FinalState::Received;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierOptions {
    pub unseen_state: FinalState,
}

impl Default for ClassifierOptions {
    fn default() -> Self {
        Self {
            unseen_state: DEFAULT_UNSEEN_STATE,
        }
    }
}

/// Delivery history of one sequence number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceRecord {
    pub seq: SeqNo,
    pub final_state: FinalState,
    /// Non-NACK events for this sequence number, ordered by timestamp
    pub events: Vec<Event>,
}

/// When a resent packet was last lost and when it came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResendHistory {
    pub lost_at: Option<DateTime<Utc>>,
    pub recovered_at: Option<DateTime<Utc>>,
}

impl SequenceRecord {
    /// First resend and the latest loss that precedes it.
    pub fn resend_history(&self) -> ResendHistory {
        let mut lost_at = None;
        for event in &self.events {
            match event.kind {
                EventKind::Resend => {
                    return ResendHistory {
                        lost_at,
                        recovered_at: Some(event.timestamp),
                    };
                }
                EventKind::Lost => lost_at = Some(event.timestamp),
                _ => {}
            }
        }
        ResendHistory {
            lost_at,
            recovered_at: None,
        }
    }
}

/// Priority rule: any resend wins, then any receipt, then any loss.
/// The most recent event does not decide the state.
pub fn decide_final_state<I>(kinds: I, unseen_state: FinalState) -> FinalState
where
    I: IntoIterator<Item = EventKind>,
{
    let mut received = false;
    let mut lost = false;
    for kind in kinds {
        match kind {
            EventKind::Resend => return FinalState::Resend,
            EventKind::Received => received = true,
            EventKind::Lost => lost = true,
            EventKind::Nack => {}
        }
    }

    if received {
        FinalState::Received
    } else if lost {
        FinalState::Lost
    } else {
        unseen_state
    }
}

/// Build the record of a single sequence number.
pub fn classify(table: &EventTable, seq: SeqNo, options: &ClassifierOptions) -> SequenceRecord {
    let events: Vec<&Event> = table.direct_events().filter(|e| e.covers(seq)).collect();
    build_record(seq, events, options)
}

/// Build the records of every sequence number in `domain` with one pass over the table.
pub fn classify_all(
    table: &EventTable,
    domain: &[SeqNo],
    options: &ClassifierOptions,
) -> BTreeMap<SeqNo, SequenceRecord> {
    let mut by_seq: HashMap<SeqNo, Vec<&Event>> =
        domain.iter().map(|seq| (*seq, Vec::new())).collect();

    for event in table.direct_events() {
        for seq in &event.sequence_numbers {
            if let Some(bucket) = by_seq.get_mut(seq) {
                // Guard against a seq listed twice in one event
                if !bucket.last().is_some_and(|last| std::ptr::eq(*last, event)) {
                    bucket.push(event);
                }
            }
        }
    }

    by_seq
        .into_iter()
        .map(|(seq, events)| (seq, build_record(seq, events, options)))
        .collect()
}

fn build_record(
    seq: SeqNo,
    mut events: Vec<&Event>,
    options: &ClassifierOptions,
) -> SequenceRecord {
    // Stable: rows sharing a timestamp keep file order
    events.sort_by_key(|e| e.timestamp);
    let final_state = decide_final_state(events.iter().map(|e| e.kind), options.unseen_state);
    SequenceRecord {
        seq,
        final_state,
        events: events.into_iter().cloned().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ev(ms: i64, kind: EventKind, seqs: &[SeqNo]) -> Event {
        Event::new(Utc.timestamp_millis_opt(ms).unwrap(), kind, seqs.to_vec())
    }

    fn table(events: Vec<Event>) -> EventTable {
        EventTable::new(events)
    }

    #[test]
    fn test_resend_wins_over_everything() {
        let t = table(vec![
            ev(1, EventKind::Lost, &[5]),
            ev(2, EventKind::Resend, &[5]),
            ev(3, EventKind::Lost, &[5]),
            ev(4, EventKind::Received, &[5]),
        ]);
        let record = classify(&t, 5, &ClassifierOptions::default());
        assert_eq!(record.final_state, FinalState::Resend);
        assert_eq!(record.events.len(), 4);
    }

    #[test]
    fn test_received_beats_later_loss() {
        let t = table(vec![
            ev(1, EventKind::Received, &[8]),
            ev(2, EventKind::Lost, &[8]),
        ]);
        let record = classify(&t, 8, &ClassifierOptions::default());
        assert_eq!(record.final_state, FinalState::Received);
    }

    #[test]
    fn test_only_losses() {
        let t = table(vec![ev(1, EventKind::Lost, &[2]), ev(5, EventKind::Lost, &[2])]);
        assert_eq!(
            classify(&t, 2, &ClassifierOptions::default()).final_state,
            FinalState::Lost
        );
    }

    #[test]
    fn test_unseen_defaults_to_received() {
        let t = table(vec![ev(1, EventKind::Nack, &[1, 2, 3])]);
        let record = classify(&t, 2, &ClassifierOptions::default());
        assert_eq!(DEFAULT_UNSEEN_STATE, FinalState::Received);
        assert_eq!(record.final_state, FinalState::Received);
        assert!(record.events.is_empty());
    }

    #[test]
    fn test_unseen_state_is_configurable() {
        let t = table(vec![ev(1, EventKind::Nack, &[1, 2, 3])]);
        let options = ClassifierOptions {
            unseen_state: FinalState::Lost,
        };
        assert_eq!(classify(&t, 2, &options).final_state, FinalState::Lost);
    }

    #[test]
    fn test_nack_events_are_not_collected() {
        let t = table(vec![
            ev(1, EventKind::Lost, &[4]),
            ev(2, EventKind::Nack, &[4, 5]),
        ]);
        let record = classify(&t, 4, &ClassifierOptions::default());
        assert_eq!(record.events.len(), 1);
        assert_eq!(record.final_state, FinalState::Lost);
    }

    #[test]
    fn test_events_sorted_by_timestamp() {
        let t = table(vec![
            ev(30, EventKind::Resend, &[1]),
            ev(10, EventKind::Lost, &[1]),
            ev(20, EventKind::Lost, &[1]),
        ]);
        let record = classify(&t, 1, &ClassifierOptions::default());
        let stamps: Vec<i64> = record
            .events
            .iter()
            .map(|e| e.timestamp.timestamp_millis())
            .collect();
        assert_eq!(stamps, vec![10, 20, 30]);
    }

    #[test]
    fn test_resend_history_picks_latest_prior_loss() {
        let t = table(vec![
            ev(1, EventKind::Lost, &[5]),
            ev(2, EventKind::Lost, &[5]),
            ev(3, EventKind::Resend, &[5]),
            ev(4, EventKind::Lost, &[5]),
            ev(5, EventKind::Resend, &[5]),
        ]);
        let history = classify(&t, 5, &ClassifierOptions::default()).resend_history();
        assert_eq!(history.lost_at.map(|t| t.timestamp_millis()), Some(2));
        assert_eq!(history.recovered_at.map(|t| t.timestamp_millis()), Some(3));
    }

    #[test]
    fn test_resend_history_without_loss() {
        let t = table(vec![ev(7, EventKind::Resend, &[5])]);
        let history = classify(&t, 5, &ClassifierOptions::default()).resend_history();
        assert_eq!(history.lost_at, None);
        assert_eq!(history.recovered_at.map(|t| t.timestamp_millis()), Some(7));
    }

    #[test]
    fn test_classify_all_matches_classify() {
        let t = table(vec![
            ev(1, EventKind::Lost, &[1]),
            ev(2, EventKind::Received, &[2]),
            ev(3, EventKind::Nack, &[1, 3]),
            ev(4, EventKind::Resend, &[1]),
            ev(5, EventKind::Lost, &[3]),
        ]);
        let options = ClassifierOptions::default();
        let domain = t.sequence_domain();
        let all = classify_all(&t, &domain, &options);

        assert_eq!(all.len(), domain.len());
        for seq in domain {
            assert_eq!(all[&seq], classify(&t, seq, &options));
        }
    }

    #[test]
    fn test_decide_final_state_ignores_nack() {
        assert_eq!(
            decide_final_state([EventKind::Nack, EventKind::Lost], FinalState::Received),
            FinalState::Lost
        );
        assert_eq!(
            decide_final_state([EventKind::Nack], FinalState::Lost),
            FinalState::Lost
        );
    }
}

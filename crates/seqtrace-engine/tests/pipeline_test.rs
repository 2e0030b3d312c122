//! End-to-end derivation from CSV text through the engine façade.

use seqtrace_engine::{
    ClassifierOptions, DisplayOptions, HoverTarget, Interval, TimeZoneMode, Window,
    assign_lanes, build_timeline, classify, summarize_table,
};
use seqtrace_providers::CsvLogParser;
use seqtrace_types::{EventTable, FinalState, FrameState, TimestampUnit};

fn load(csv: &str, unit: TimestampUnit) -> EventTable {
    CsvLogParser::new(unit)
        .parse_str(csv)
        .expect("valid csv")
        .table
}

#[test]
fn test_lost_lost_resend_example() {
    let table = load(
        "timestamp,seq,type\n1,5,-1\n2,5,-1\n3,5,2\n",
        TimestampUnit::Seconds,
    );
    let record = classify(&table, 5, &ClassifierOptions::default());
    assert_eq!(record.final_state, FinalState::Resend);

    let timeline = build_timeline(&table, Window::full(), &ClassifierOptions::default());
    let text = timeline
        .hover_text(
            HoverTarget::Sequence(5),
            &DisplayOptions::default(),
            TimeZoneMode::Utc,
        )
        .unwrap();
    insta::assert_snapshot!(text, @r"
    Seq: 5
    Lost: 1970-01-01 00:00:02:000
    Recovered: 1970-01-01 00:00:03:000
    ");
}

#[test]
fn test_lane_example_from_index_ranges() {
    let lanes = assign_lanes(&[Interval::new(0, 3), Interval::new(2, 5), Interval::new(6, 8)]);
    assert_ne!(lanes[0], lanes[1]);
    assert_eq!(lanes[2], 0);
}

#[test]
fn test_nack_rows_drive_lanes() {
    let table = load(
        "timestamp,seq,type\n\
         100,1,1\n100,2,1\n100,3,1\n100,4,1\n100,5,1\n\
         100,6,1\n100,7,1\n100,8,1\n100,9,1\n\
         200,\"[1, 2, 3, 4]\",3\n\
         300,\"3, 4, 5, 6\",3\n\
         400,\"[7, 8, 9]\",3\n",
        TimestampUnit::Milliseconds,
    );
    let timeline = build_timeline(&table, Window::full(), &ClassifierOptions::default());
    let lanes: Vec<usize> = timeline.lanes.spans.iter().map(|s| s.lane).collect();
    assert_eq!(lanes, vec![0, 1, 0]);
    assert_eq!(timeline.lanes.lane_count, 2);
}

#[test]
fn test_nack_only_sequence_uses_configured_default() {
    let csv = "timestamp,seq,type\n1000,1,1\n2000,\"[1, 2]\",3\n";
    let table = load(csv, TimestampUnit::Milliseconds);

    let optimistic = summarize_table(&table, &ClassifierOptions::default());
    assert_eq!(optimistic.lost, 0);

    let pessimistic = summarize_table(
        &table,
        &ClassifierOptions {
            unseen_state: FinalState::Lost,
        },
    );
    assert_eq!(pessimistic.lost, 1);
    assert_eq!(pessimistic.loss_ratio, 0.5);
}

#[test]
fn test_frame_flips_on_single_loss() {
    let mut csv = String::from("timestamp,seq,type\n");
    for seq in 0..10 {
        csv.push_str(&format!("{},{},1\n", 1000 + seq, seq));
    }
    let table = load(&csv, TimestampUnit::Milliseconds);
    let timeline = build_timeline(&table, Window::full(), &ClassifierOptions::default());
    assert_eq!(timeline.frames[0].state, FrameState::Generated);

    csv.push_str("5000,10,-1\n");
    let table = load(&csv, TimestampUnit::Milliseconds);
    let timeline = build_timeline(&table, Window::full(), &ClassifierOptions::default());
    assert_eq!(timeline.frames[0].state, FrameState::Generated);
    assert_eq!(timeline.frames[1].state, FrameState::UnGenerated);

    csv.push_str("6000,3,-1\n");
    let table = load(&csv, TimestampUnit::Milliseconds);
    let timeline = build_timeline(&table, Window::full(), &ClassifierOptions::default());
    // Received at 1003 still wins over the later loss
    assert_eq!(timeline.frames[0].state, FrameState::Generated);
}

#[test]
fn test_timeline_serializes() {
    let table = load(
        "timestamp,seq,type\n1000,1,-1\n2000,\"[1]\",3\n3000,1,2\n",
        TimestampUnit::Milliseconds,
    );
    let timeline = build_timeline(&table, Window::full(), &ClassifierOptions::default());
    let json = serde_json::to_value(&timeline).unwrap();
    assert_eq!(json["summary"]["resend_count"], 1);
    assert_eq!(json["records"]["1"]["final_state"], "resend");
    assert_eq!(json["lanes"]["spans"][0]["lane"], 0);
}

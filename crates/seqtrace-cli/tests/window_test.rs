use anyhow::Result;
use seqtrace_testing::assertions::{assert_frame_states, assert_summary_counts, nack_lanes};
use seqtrace_testing::{TestWorld, sample_log};

#[test]
fn test_frames_json() -> Result<()> {
    let world = TestWorld::new();
    let log = world.write_log("events.csv", &sample_log())?;

    let json = world
        .run(&["frames", log.to_str().unwrap(), "--format", "json"])?
        .json()?;
    assert_frame_states(&json, &["un_generated", "generated"])?;
    assert_eq!(json["frames"][0]["text"], "Frame: UnGenerated (0 - 9)");
    assert_eq!(json["window"]["domain_len"], 20);
    Ok(())
}

#[test]
fn test_frames_plain_window() -> Result<()> {
    let world = TestWorld::new();
    let log = world.write_log("events.csv", &sample_log())?;

    let result = world.run(&[
        "frames",
        log.to_str().unwrap(),
        "--start",
        "10",
        "--count",
        "10",
    ])?;
    assert!(result.success(), "stderr: {}", result.stderr());
    insta::assert_snapshot!(result.stdout().trim_end(), @r"
    Window: 10..20 of 20
    Frame: Generated (10 - 19)
    ");
    Ok(())
}

#[test]
fn test_nack_lanes() -> Result<()> {
    let world = TestWorld::new();
    let log = world.write_log("events.csv", &sample_log())?;

    let json = world
        .run(&["nacks", log.to_str().unwrap(), "--format", "json"])?
        .json()?;
    assert_eq!(nack_lanes(&json)?, vec![0, 1, 0]);
    assert_eq!(json["lane_count"], 2);
    assert_eq!(
        json["spans"][0]["text"],
        "NACK: [3, 5]\n Timestamp: 2023-11-14 22:13:20:200"
    );
    Ok(())
}

#[test]
fn test_nacks_are_clipped_to_window() -> Result<()> {
    let world = TestWorld::new();
    let log = world.write_log("events.csv", &sample_log())?;

    let result = world.run(&[
        "nacks",
        log.to_str().unwrap(),
        "--start",
        "10",
        "--count",
        "10",
        "--hide-timestamp",
    ])?;
    assert!(result.success(), "stderr: {}", result.stderr());
    insta::assert_snapshot!(result.stdout().trim_end(), @r"
    Window: 10..20 of 20
    Lanes: 1
    lane 0 [5..=6]
      NACK: [15, 16]
    ");
    Ok(())
}

#[test]
fn test_timeline_plain() -> Result<()> {
    let world = TestWorld::new();
    let log = world.write_log("events.csv", &sample_log())?;

    let result = world.run(&["timeline", log.to_str().unwrap()])?;
    assert!(result.success(), "stderr: {}", result.stderr());
    insta::assert_snapshot!(result.stdout().trim_end(), @r"
    Window: 0..20 of 20
    Received: 19  Lost: 1  Resend: 1  Loss Ratio: 5.0%
    NACK lanes: 2
                0-9  UnGenerated  ...x.r....
              10-19  Generated    ..........
    ");
    Ok(())
}

#[test]
fn test_timeline_summary_covers_visible_window_only() -> Result<()> {
    let world = TestWorld::new();
    let log = world.write_log("events.csv", &sample_log())?;

    let json = world
        .run(&[
            "timeline",
            log.to_str().unwrap(),
            "--count",
            "5",
            "--format",
            "json",
        ])?
        .json()?;
    assert_summary_counts(&json, 5, 4, 1)?;
    assert_eq!(json["states"].as_array().unwrap().len(), 5);
    Ok(())
}

#[test]
fn test_window_past_end_is_pulled_back() -> Result<()> {
    let world = TestWorld::new();
    let log = world.write_log("events.csv", &sample_log())?;

    let json = world
        .run(&[
            "frames",
            log.to_str().unwrap(),
            "--start",
            "500",
            "--count",
            "10",
            "--format",
            "json",
        ])?
        .json()?;
    assert_eq!(json["window"]["start"], 10);
    assert_eq!(json["window"]["end"], 20);
    Ok(())
}

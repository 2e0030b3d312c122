//! The watch command re-summarizes the log after each settled change.

use anyhow::Result;
use seqtrace_testing::TestWorld;
use seqtrace_testing::fixtures::EventLogBuilder;
use seqtrace_testing::process::BackgroundProcess;
use std::time::Duration;

const STEP_TIMEOUT: Duration = Duration::from_secs(15);

#[test]
fn test_watch_reloads_on_change() -> Result<()> {
    let world = TestWorld::new().with_config("watch_debounce_ms = 50\n");
    let log = world.write_log(
        "events.csv",
        &EventLogBuilder::new().received(1_000, 1).received(2_000, 2),
    )?;

    let mut cmd = std::process::Command::new(env!("CARGO_BIN_EXE_seqtrace"));
    cmd.env("SEQTRACE_CONFIG", world.config_path())
        .env_remove("RUST_LOG")
        .args(["watch", log.to_str().unwrap()]);
    let mut proc = BackgroundProcess::spawn_piped(cmd)?;

    let initial = proc.wait_for_line(STEP_TIMEOUT, |l| l.starts_with("Total Lost:"));
    assert_eq!(initial.as_deref(), Some("Total Lost: 0"));
    assert!(
        proc.wait_for_line(STEP_TIMEOUT, |l| l.starts_with("Watching "))
            .is_some()
    );

    // Poll watchers compare mtimes, give the clock a tick before rewriting
    std::thread::sleep(Duration::from_millis(1100));
    world.write_log(
        "events.csv",
        &EventLogBuilder::new()
            .received(1_000, 1)
            .received(2_000, 2)
            .lost(3_000, 3),
    )?;

    let reloaded = proc.wait_for_line(STEP_TIMEOUT, |l| l.starts_with("Total Lost:"));
    assert_eq!(reloaded.as_deref(), Some("Total Lost: 1"));

    proc.kill()?;
    Ok(())
}

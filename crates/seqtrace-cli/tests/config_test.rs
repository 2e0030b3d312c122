use anyhow::Result;
use seqtrace_testing::TestWorld;

#[test]
fn test_config_show_defaults_when_missing() -> Result<()> {
    let world = TestWorld::new();

    let result = world.run(&["config", "show"])?;
    assert!(result.success(), "stderr: {}", result.stderr());
    assert!(result.stdout().contains("(not found, using defaults)"));
    assert!(result.stdout().contains("timestamp_unit = \"ms\""));
    assert!(result.stdout().contains("visible_count = 200"));
    Ok(())
}

#[test]
fn test_config_init_then_refuses_overwrite() -> Result<()> {
    let world = TestWorld::new();

    let first = world.run(&["config", "init"])?;
    assert!(first.success(), "stderr: {}", first.stderr());
    assert!(world.config_path().exists());

    let second = world.run(&["config", "init"])?;
    assert!(!second.success());
    assert!(second.stderr().contains("already exists"));

    let forced = world.run(&["config", "init", "--force"])?;
    assert!(forced.success(), "stderr: {}", forced.stderr());
    Ok(())
}

#[test]
fn test_flags_override_config_file() -> Result<()> {
    let world = TestWorld::new().with_config("timestamp_unit = \"s\"\nunseen_state = \"lost\"\n");

    let json = world
        .run(&[
            "config",
            "show",
            "--format",
            "json",
            "--timestamp-unit",
            "ms",
            "--timezone",
            "local",
        ])?
        .json()?;
    assert_eq!(json["exists"], true);
    assert_eq!(json["config"]["timestamp_unit"], "ms");
    assert_eq!(json["config"]["unseen_state"], "lost");
    assert_eq!(json["config"]["timezone"], "local");
    Ok(())
}

#[test]
fn test_invalid_config_is_fatal() -> Result<()> {
    let world = TestWorld::new().with_config("visible_count = 0\n");

    let result = world.run(&["config", "show"])?;
    assert!(!result.success());
    assert!(result.stderr().contains("failed to load config"));
    Ok(())
}

#[test]
fn test_explicit_config_flag_wins_over_env() -> Result<()> {
    let world = TestWorld::new();
    let explicit = world.temp_dir().join("explicit.toml");
    std::fs::write(&explicit, "visible_count = 42\n")?;

    let json = world
        .run(&[
            "config",
            "show",
            "--format",
            "json",
            "--config",
            explicit.to_str().unwrap(),
        ])?
        .json()?;
    assert_eq!(json["config"]["visible_count"], 42);
    Ok(())
}

#[test]
fn test_resend_unseen_state_in_config_is_fatal() -> Result<()> {
    let world = TestWorld::new().with_config("unseen_state = \"resend\"\n");

    let result = world.run(&["config", "show"])?;
    assert!(!result.success());
    assert!(result.stderr().contains("unseen_state must be"));
    Ok(())
}

//! TestWorld pattern for declarative integration test setup.

use anyhow::Result;
use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::EventLogBuilder;

/// Isolated environment: a temp dir holding event logs and the config file.
///
/// Every command runs with `SEQTRACE_CONFIG` pointing inside the temp dir,
/// so the user's real config is never read.
///
/// # Example
/// ```no_run
/// use seqtrace_testing::{TestWorld, sample_log};
///
/// let world = TestWorld::new();
/// let log = world.write_log("events.csv", &sample_log()).unwrap();
/// let result = world.run(&["summary", log.to_str().unwrap()]).unwrap();
/// assert!(result.success());
/// ```
pub struct TestWorld {
    temp_dir: TempDir,
    config_path: PathBuf,
}

impl Default for TestWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorld {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let config_path = temp_dir.path().join("config").join("config.toml");

        Self {
            temp_dir,
            config_path,
        }
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// Write a config file with the given TOML body.
    pub fn with_config(self, body: &str) -> Self {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create config dir");
        }
        std::fs::write(&self.config_path, body).expect("Failed to write config");
        self
    }

    pub fn write_log(&self, name: &str, log: &EventLogBuilder) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        log.write_to(&path)?;
        Ok(path)
    }

    pub fn write_raw(&self, name: &str, content: &str) -> Result<PathBuf> {
        let path = self.temp_dir.path().join(name);
        std::fs::write(&path, content)?;
        Ok(path)
    }

    /// Point a command at this world's config and temp dir.
    pub fn configure_command<'a>(&self, cmd: &'a mut Command) -> &'a mut Command {
        cmd.env("SEQTRACE_CONFIG", &self.config_path)
            .env_remove("RUST_LOG")
            .current_dir(self.temp_dir.path())
    }

    /// Run the `seqtrace` binary with `args`.
    #[allow(deprecated)]
    pub fn run(&self, args: &[&str]) -> Result<CliResult> {
        let mut cmd = Command::cargo_bin("seqtrace")
            .map_err(|e| anyhow::anyhow!("Failed to find seqtrace binary: {}", e))?;

        self.configure_command(&mut cmd);
        cmd.args(args);

        let output = cmd.output()?;

        Ok(CliResult {
            status: output.status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

/// Result of a CLI command execution.
#[derive(Debug)]
pub struct CliResult {
    pub status: std::process::ExitStatus,
    pub stdout: String,
    pub stderr: String,
}

impl CliResult {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Parse stdout as JSON.
    pub fn json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(&self.stdout)?)
    }

    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    pub fn stderr(&self) -> &str {
        &self.stderr
    }
}

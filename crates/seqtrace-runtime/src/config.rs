use crate::{Error, Result};
use seqtrace_engine::{
    ClassifierOptions, DEFAULT_UNSEEN_STATE, DEFAULT_VISIBLE_COUNT, DisplayOptions, TimeZoneMode,
};
use seqtrace_types::{FinalState, TimestampUnit};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_WATCH_DEBOUNCE_MS: u64 = 300;

/// Resolve the config file path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. SEQTRACE_CONFIG environment variable (with tilde expansion)
/// 3. XDG config directory (recommended default)
/// 4. ~/.seqtrace/config.toml (fallback for systems without XDG)
pub fn resolve_config_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("SEQTRACE_CONFIG") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(config_dir) = dirs::config_dir() {
        return Ok(config_dir.join("seqtrace").join("config.toml"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".seqtrace").join("config.toml"));
    }

    Err(Error::Config(
        "Could not determine config path: no HOME directory or XDG config directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Unit of the `timestamp` column
    pub timestamp_unit: TimestampUnit,
    /// State of sequence numbers that only appear inside NACKs
    pub unseen_state: FinalState,
    pub timezone: TimeZoneMode,
    pub visible_count: usize,
    pub watch_debounce_ms: u64,
    pub display: DisplayOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            timestamp_unit: TimestampUnit::default(),
            unseen_state: DEFAULT_UNSEEN_STATE,
            timezone: TimeZoneMode::default(),
            visible_count: DEFAULT_VISIBLE_COUNT,
            watch_debounce_ms: DEFAULT_WATCH_DEBOUNCE_MS,
            display: DisplayOptions::default(),
        }
    }
}

impl Config {
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.visible_count == 0 {
            return Err(Error::Config("visible_count must be at least 1".to_string()));
        }
        // Resend needs a resend event behind it
        if self.unseen_state == FinalState::Resend {
            return Err(Error::Config(
                "unseen_state must be \"received\" or \"lost\"".to_string(),
            ));
        }
        Ok(())
    }

    pub fn classifier_options(&self) -> ClassifierOptions {
        ClassifierOptions {
            unseen_state: self.unseen_state,
        }
    }

    pub fn watch_debounce(&self) -> Duration {
        Duration::from_millis(self.watch_debounce_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.timestamp_unit, TimestampUnit::Milliseconds);
        assert_eq!(config.unseen_state, FinalState::Received);
        assert_eq!(config.visible_count, 200);
        assert!(config.display.count);
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nested").join("config.toml");

        let config = Config {
            timestamp_unit: TimestampUnit::Seconds,
            unseen_state: FinalState::Lost,
            display: DisplayOptions {
                count: false,
                ..DisplayOptions::default()
            },
            ..Config::default()
        };
        config.save_to(&config_path)?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_missing_file_yields_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let loaded = Config::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(loaded, Config::default());
        Ok(())
    }

    #[test]
    fn test_partial_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "timestamp_unit = \"s\"\n\n[display]\nseq = false\n")?;

        let loaded = Config::load_from(&path)?;
        assert_eq!(loaded.timestamp_unit, TimestampUnit::Seconds);
        assert!(!loaded.display.seq);
        assert!(loaded.display.timestamp);
        assert_eq!(loaded.visible_count, DEFAULT_VISIBLE_COUNT);
        Ok(())
    }

    #[test]
    fn test_invalid_unit_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "timestamp_unit = \"us\"\n")?;
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
        Ok(())
    }

    #[test]
    fn test_resend_unseen_state_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "unseen_state = \"resend\"\n")?;
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));

        std::fs::write(&path, "unseen_state = \"lost\"\n")?;
        assert_eq!(Config::load_from(&path)?.unseen_state, FinalState::Lost);
        Ok(())
    }

    #[test]
    fn test_zero_visible_count_is_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "visible_count = 0\n")?;
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
        Ok(())
    }

    #[test]
    fn test_explicit_path_wins() -> Result<()> {
        let path = resolve_config_path(Some("/tmp/seqtrace-explicit.toml"))?;
        assert_eq!(path, PathBuf::from("/tmp/seqtrace-explicit.toml"));
        Ok(())
    }
}

use crate::args::{Cli, DisplayArgs};
use crate::presentation::{ReportView, create_view};
use crate::types::OutputFormat;
use anyhow::{Result, anyhow};
use is_terminal::IsTerminal;
use seqtrace_engine::DisplayOptions;
use seqtrace_runtime::{Config, Dataset, resolve_config_path};
use std::path::{Path, PathBuf};

/// Effective settings for one invocation: config file plus flag overrides.
pub struct HandlerContext {
    pub config: Config,
    pub config_path: PathBuf,
    pub format: OutputFormat,
    color: bool,
}

impl HandlerContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config_path = resolve_config_path(cli.config.as_deref())?;
        let mut config = Config::load_from(&config_path)
            .map_err(|e| anyhow!("failed to load config {}: {}", config_path.display(), e))?;

        if let Some(unit) = cli.timestamp_unit {
            config.timestamp_unit = unit.into();
        }
        if let Some(state) = cli.unseen_state {
            config.unseen_state = state.into();
        }
        if let Some(tz) = cli.timezone {
            config.timezone = tz.into();
        }

        tracing::debug!(path = %config_path.display(), ?config, "effective config");

        Ok(Self {
            config,
            config_path,
            format: cli.format,
            color: cli.format == OutputFormat::Plain && std::io::stdout().is_terminal(),
        })
    }

    pub fn view(&self) -> Box<dyn ReportView> {
        create_view(self.format, self.color)
    }

    pub fn load_dataset(&self, file: &Path) -> Result<Dataset> {
        Dataset::load(file, self.config.timestamp_unit)
            .map_err(|e| anyhow!("failed to load {}: {}", file.display(), e))
    }

    pub fn display_options(&self, args: &DisplayArgs) -> DisplayOptions {
        args.apply(self.config.display)
    }
}

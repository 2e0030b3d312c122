use crate::types::{LogLevel, OutputFormat, TimezoneArg, UnitArg, UnseenArg};
use clap::{Args, Parser, Subcommand};
use seqtrace_engine::{DisplayOptions, Window};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seqtrace")]
#[command(
    about = "Inspect packet loss, resend and NACK activity in sequence event logs",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to $SEQTRACE_CONFIG, then the user config dir)
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    /// Unit of the timestamp column
    #[arg(long, global = true)]
    pub timestamp_unit: Option<UnitArg>,

    /// State of sequence numbers that only appear inside NACKs
    #[arg(long, global = true)]
    pub unseen_state: Option<UnseenArg>,

    #[arg(long, global = true)]
    pub timezone: Option<TimezoneArg>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Totals and loss/recovery ratios over the whole log
    Summary { file: PathBuf },

    /// Delivery history of one sequence number
    Inspect {
        file: PathBuf,

        #[arg(allow_hyphen_values = true)]
        seq: i64,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Frame blocks of the visible window
    Frames {
        file: PathBuf,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// NACK spans of the visible window, packed into lanes
    Nacks {
        file: PathBuf,

        #[command(flatten)]
        window: WindowArgs,

        #[command(flatten)]
        display: DisplayArgs,
    },

    /// Per-sequence states of the visible window
    Timeline {
        file: PathBuf,

        #[command(flatten)]
        window: WindowArgs,
    },

    /// Re-summarize the log whenever it changes
    Watch {
        file: PathBuf,

        #[command(flatten)]
        window: WindowArgs,
    },

    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,

    /// Write a default config file
    Init {
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct WindowArgs {
    /// Index of the first visible sequence number
    #[arg(long, default_value = "0")]
    pub start: usize,

    /// Number of visible sequence numbers (defaults to visible_count)
    #[arg(long)]
    pub count: Option<usize>,
}

impl WindowArgs {
    pub fn resolve(&self, default_count: usize) -> Window {
        Window::new(self.start, self.count.unwrap_or(default_count).max(1))
    }
}

#[derive(Args, Debug, Clone, Copy, Default)]
pub struct DisplayArgs {
    #[arg(long)]
    pub hide_seq: bool,

    #[arg(long)]
    pub hide_timestamp: bool,

    #[arg(long)]
    pub hide_events: bool,

    #[arg(long)]
    pub hide_count: bool,
}

impl DisplayArgs {
    /// Flags can only hide fields the config shows.
    pub fn apply(&self, base: DisplayOptions) -> DisplayOptions {
        DisplayOptions {
            seq: base.seq && !self.hide_seq,
            timestamp: base.timestamp && !self.hide_timestamp,
            events: base.events && !self.hide_events,
            count: base.count && !self.hide_count,
        }
    }
}

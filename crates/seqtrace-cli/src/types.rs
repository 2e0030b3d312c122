use clap::ValueEnum;
use seqtrace_engine::TimeZoneMode;
use seqtrace_types::{FinalState, TimestampUnit};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    Plain,
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Plain => write!(f, "plain"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum UnitArg {
    S,
    Ms,
}

impl From<UnitArg> for TimestampUnit {
    fn from(arg: UnitArg) -> Self {
        match arg {
            UnitArg::S => TimestampUnit::Seconds,
            UnitArg::Ms => TimestampUnit::Milliseconds,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum UnseenArg {
    Received,
    Lost,
}

impl From<UnseenArg> for FinalState {
    fn from(arg: UnseenArg) -> Self {
        match arg {
            UnseenArg::Received => FinalState::Received,
            UnseenArg::Lost => FinalState::Lost,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum TimezoneArg {
    Utc,
    Local,
}

impl From<TimezoneArg> for TimeZoneMode {
    fn from(arg: TimezoneArg) -> Self {
        match arg {
            TimezoneArg::Utc => TimeZoneMode::Utc,
            TimezoneArg::Local => TimeZoneMode::Local,
        }
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Final outcome of one sequence number after all of its events are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinalState {
    Lost,
    Received,
    Resend,
}

impl FinalState {
    pub fn label(self) -> &'static str {
        match self {
            FinalState::Lost => "Lost",
            FinalState::Received => "Received",
            FinalState::Resend => "Resend",
        }
    }

    /// Received and resent packets both count as delivered.
    pub fn is_delivered(self) -> bool {
        matches!(self, FinalState::Received | FinalState::Resend)
    }
}

impl fmt::Display for FinalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FinalState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lost" => Ok(FinalState::Lost),
            "received" => Ok(FinalState::Received),
            "resend" => Ok(FinalState::Resend),
            other => Err(Error::InvalidState(other.to_string())),
        }
    }
}

/// Block-level status of a frame of consecutive sequence numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameState {
    Generated,
    UnGenerated,
}

impl FrameState {
    pub fn label(self) -> &'static str {
        match self {
            FrameState::Generated => "Generated",
            FrameState::UnGenerated => "UnGenerated",
        }
    }
}

impl fmt::Display for FrameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

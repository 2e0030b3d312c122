use std::fmt;

/// Result type for seqtrace-types operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while interpreting raw values
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// `seq` cell matches none of the accepted shapes
    InvalidSeq(String),

    /// `type` code outside of the known set
    InvalidKind(String),

    /// Unknown timestamp unit name
    InvalidUnit(String),

    /// Unknown final state name
    InvalidState(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSeq(msg) => write!(f, "Invalid seq value: {}", msg),
            Error::InvalidKind(code) => write!(f, "Unknown event type: {}", code),
            Error::InvalidUnit(unit) => {
                write!(f, "Unknown timestamp unit '{}' (expected 's' or 'ms')", unit)
            }
            Error::InvalidState(state) => write!(f, "Unknown final state: {}", state),
        }
    }
}

impl std::error::Error for Error {}

//! Testing infrastructure for seqtrace integration tests.
//!
//! - `TestWorld`: isolated temp directory, config location and CLI runner
//! - `fixtures`: CSV event log builder and a canonical sample log
//! - `assertions`: checks over the CLI's JSON output
//! - `process`: background `watch` processes

pub mod assertions;
pub mod fixtures;
pub mod process;
pub mod world;

pub use fixtures::{EventLogBuilder, sample_log};
pub use world::{CliResult, TestWorld};

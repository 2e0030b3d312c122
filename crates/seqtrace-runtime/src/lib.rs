pub mod cache;
pub mod config;
pub mod dataset;
pub mod error;
pub mod watcher;

pub use cache::TimelineCache;
pub use config::{Config, DEFAULT_WATCH_DEBOUNCE_MS, resolve_config_path};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use watcher::{DatasetWatcher, Debouncer, WatchEvent};

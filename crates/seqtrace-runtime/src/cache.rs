use seqtrace_engine::{ClassifierOptions, Timeline, Window, build_timeline};
use std::collections::HashMap;
use std::sync::Arc;

use crate::dataset::Dataset;

/// Bound on cached windows for one dataset version.
const MAX_ENTRIES: usize = 32;

/// Derived timelines keyed by dataset version and window.
///
/// A dataset with a different version (any reload) drops every entry.
#[derive(Debug)]
pub struct TimelineCache {
    options: ClassifierOptions,
    version: Option<u64>,
    entries: HashMap<Window, Arc<Timeline>>,
    hits: u64,
    misses: u64,
}

impl TimelineCache {
    pub fn new(options: ClassifierOptions) -> Self {
        Self {
            options,
            version: None,
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn get_or_build(&mut self, dataset: &Dataset, window: Window) -> Arc<Timeline> {
        if self.version != Some(dataset.version()) {
            if self.version.is_some() {
                tracing::debug!(
                    old = ?self.version,
                    new = dataset.version(),
                    "dataset version changed, invalidating timeline cache"
                );
            }
            self.entries.clear();
            self.version = Some(dataset.version());
        }

        if let Some(timeline) = self.entries.get(&window) {
            self.hits += 1;
            return Arc::clone(timeline);
        }

        self.misses += 1;
        if self.entries.len() >= MAX_ENTRIES {
            self.entries.clear();
        }
        let timeline = Arc::new(build_timeline(dataset.table(), window, &self.options));
        self.entries.insert(window, Arc::clone(&timeline));
        timeline
    }

    pub fn invalidate(&mut self) {
        self.entries.clear();
        self.version = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

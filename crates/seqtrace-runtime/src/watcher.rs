use notify::{Event, EventKind, PollWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, channel};
use std::time::{Duration, Instant};

use crate::Result;

const POLL_INTERVAL: Duration = Duration::from_millis(500);
const IDLE_WAIT: Duration = Duration::from_secs(3600);

/// Trailing-edge debounce.
///
/// Each `schedule` replaces the pending deadline, so a burst of triggers
/// fires once, `delay` after the last one.
#[derive(Debug, Clone)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the deadline, cancelling the previous one.
    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per armed deadline, when it has passed.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WatchEvent {
    /// The file settled after one or more modifications
    Changed { path: PathBuf },
    Error(String),
}

/// Polls one event log and reports debounced changes.
pub struct DatasetWatcher {
    _watcher: PollWatcher,
    rx: Receiver<WatchEvent>,
}

impl DatasetWatcher {
    pub fn new(path: PathBuf, debounce: Duration) -> Result<Self> {
        let (tx_out, rx_out) = channel();
        let (tx_fs, rx_fs) = channel();

        let config = notify::Config::default().with_poll_interval(POLL_INTERVAL);
        let mut watcher = PollWatcher::new(
            move |res: notify::Result<Event>| {
                let _ = tx_fs.send(res);
            },
            config,
        )?;
        watcher.watch(&path, RecursiveMode::NonRecursive)?;

        let target = path.clone();
        std::thread::Builder::new()
            .name("dataset-watcher-worker".to_string())
            .spawn(move || run_worker(&target, rx_fs, &tx_out, Debouncer::new(debounce)))?;

        tracing::info!(path = %path.display(), ?debounce, "watching event log");

        Ok(Self {
            _watcher: watcher,
            rx: rx_out,
        })
    }

    pub fn receiver(&self) -> &Receiver<WatchEvent> {
        &self.rx
    }
}

fn run_worker(
    target: &Path,
    rx_fs: Receiver<notify::Result<Event>>,
    tx: &Sender<WatchEvent>,
    mut debouncer: Debouncer,
) {
    loop {
        let wait = debouncer
            .time_until_due(Instant::now())
            .unwrap_or(IDLE_WAIT);

        match rx_fs.recv_timeout(wait) {
            Ok(Ok(event)) => {
                if is_relevant(&event, target) {
                    tracing::debug!(kind = ?event.kind, "event log touched");
                    debouncer.schedule(Instant::now());
                }
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "watcher error");
                if tx.send(WatchEvent::Error(e.to_string())).is_err() {
                    break;
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if debouncer.fire_if_due(Instant::now()) {
            let changed = WatchEvent::Changed {
                path: target.to_path_buf(),
            };
            if tx.send(changed).is_err() {
                break;
            }
        }
    }
}

fn is_relevant(event: &Event, target: &Path) -> bool {
    let kind_matches = matches!(
        event.kind,
        EventKind::Any | EventKind::Create(_) | EventKind::Modify(_)
    );
    let name = target.file_name();
    kind_matches
        && (event.paths.is_empty() || event.paths.iter().any(|p| p.file_name() == name))
}

use crate::args::WindowArgs;
use crate::context::HandlerContext;
use crate::presentation::{ReportView, SummaryReport, TimelineReport};
use anyhow::{Context, Result};
use seqtrace_engine::Window;
use seqtrace_runtime::{Dataset, DatasetWatcher, TimelineCache, WatchEvent};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

const TICK: Duration = Duration::from_millis(200);

pub fn handle(ctx: &HandlerContext, file: &Path, window: &WindowArgs) -> Result<()> {
    let view = ctx.view();
    let window = window.resolve(ctx.config.visible_count);
    let mut dataset = ctx.load_dataset(file)?;
    let mut cache = TimelineCache::new(ctx.config.classifier_options());

    render(view.as_ref(), &dataset, &mut cache, window)?;

    let watcher = DatasetWatcher::new(file.to_path_buf(), ctx.config.watch_debounce())?;

    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst))
        .context("failed to install Ctrl-C handler")?;

    view.render_notice(&format!("Watching {} (Ctrl-C to stop)", file.display()))?;

    while running.load(Ordering::SeqCst) {
        match watcher.receiver().recv_timeout(TICK) {
            Ok(WatchEvent::Changed { path }) => match dataset.reload() {
                Ok(()) => {
                    tracing::debug!(
                        path = %path.display(),
                        version = dataset.version(),
                        "reloaded"
                    );
                    render(view.as_ref(), &dataset, &mut cache, window)?;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "reload failed, keeping previous data");
                    view.render_notice(&format!("Reload failed: {}", e))?;
                }
            },
            Ok(WatchEvent::Error(message)) => {
                tracing::warn!(%message, "watcher reported an error");
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    tracing::info!(hits = cache.hits(), misses = cache.misses(), "watch stopped");
    Ok(())
}

fn render(
    view: &dyn ReportView,
    dataset: &Dataset,
    cache: &mut TimelineCache,
    window: Window,
) -> Result<()> {
    let whole = cache.get_or_build(dataset, Window::full());
    view.render_summary(&SummaryReport::new(dataset, whole.summary))?;

    let visible = cache.get_or_build(dataset, window);
    let file = dataset.path().display().to_string();
    view.render_timeline(&TimelineReport::new(file, &visible))
}

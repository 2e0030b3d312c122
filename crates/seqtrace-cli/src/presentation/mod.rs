pub mod console;
pub mod json;
pub mod view_models;

pub use console::ConsoleView;
pub use json::JsonView;
pub use view_models::{
    ConfigReport, FrameRow, FramesReport, NackRow, NacksReport, RecordReport, SummaryReport,
    TimelineReport, WindowInfo,
};

use crate::types::OutputFormat;
use anyhow::Result;

/// Output surface shared by every command.
pub trait ReportView {
    fn render_summary(&self, report: &SummaryReport) -> Result<()>;
    fn render_record(&self, report: &RecordReport) -> Result<()>;
    fn render_frames(&self, report: &FramesReport) -> Result<()>;
    fn render_nacks(&self, report: &NacksReport) -> Result<()>;
    fn render_timeline(&self, report: &TimelineReport) -> Result<()>;
    fn render_config(&self, report: &ConfigReport) -> Result<()>;
    /// Status line for long-running commands
    fn render_notice(&self, message: &str) -> Result<()>;
}

pub fn create_view(format: OutputFormat, color: bool) -> Box<dyn ReportView> {
    match format {
        OutputFormat::Plain => Box::new(ConsoleView::new(color)),
        OutputFormat::Json => Box::new(JsonView),
    }
}

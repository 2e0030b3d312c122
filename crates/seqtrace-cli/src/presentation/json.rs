use super::ReportView;
use super::view_models::{
    ConfigReport, FramesReport, NacksReport, RecordReport, SummaryReport, TimelineReport,
};
use anyhow::Result;
use serde::Serialize;

/// One pretty-printed JSON document per render call.
pub struct JsonView;

fn emit<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

impl ReportView for JsonView {
    fn render_summary(&self, report: &SummaryReport) -> Result<()> {
        emit(report)
    }

    fn render_record(&self, report: &RecordReport) -> Result<()> {
        emit(report)
    }

    fn render_frames(&self, report: &FramesReport) -> Result<()> {
        emit(report)
    }

    fn render_nacks(&self, report: &NacksReport) -> Result<()> {
        emit(report)
    }

    fn render_timeline(&self, report: &TimelineReport) -> Result<()> {
        emit(report)
    }

    fn render_config(&self, report: &ConfigReport) -> Result<()> {
        emit(report)
    }

    fn render_notice(&self, message: &str) -> Result<()> {
        // Notices go to the log so stdout only carries JSON documents
        tracing::info!("{}", message);
        Ok(())
    }
}

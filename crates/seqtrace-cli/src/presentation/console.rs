use super::ReportView;
use super::view_models::{
    ConfigReport, FrameRow, FramesReport, NacksReport, RecordReport, SummaryReport,
    TimelineReport, WindowInfo,
};
use anyhow::Result;
use owo_colors::OwoColorize;
use seqtrace_types::{FinalState, FrameState};

const MAX_SKIPPED_SHOWN: usize = 10;

/// Human-readable output on stdout.
pub struct ConsoleView {
    color: bool,
}

impl ConsoleView {
    pub fn new(color: bool) -> Self {
        Self { color }
    }
}

impl ReportView for ConsoleView {
    fn render_summary(&self, report: &SummaryReport) -> Result<()> {
        println!("{}", format_summary(report, self.color));
        Ok(())
    }

    fn render_record(&self, report: &RecordReport) -> Result<()> {
        println!("{}", format_record(report, self.color));
        Ok(())
    }

    fn render_frames(&self, report: &FramesReport) -> Result<()> {
        println!("{}", format_frames(report, self.color));
        Ok(())
    }

    fn render_nacks(&self, report: &NacksReport) -> Result<()> {
        println!("{}", format_nacks(report));
        Ok(())
    }

    fn render_timeline(&self, report: &TimelineReport) -> Result<()> {
        println!("{}", format_timeline(report, self.color));
        Ok(())
    }

    fn render_config(&self, report: &ConfigReport) -> Result<()> {
        println!("{}", format_config(report)?);
        Ok(())
    }

    fn render_notice(&self, message: &str) -> Result<()> {
        if self.color {
            println!("{}", message.dimmed());
        } else {
            println!("{}", message);
        }
        Ok(())
    }
}

pub fn format_summary(report: &SummaryReport, color: bool) -> String {
    let s = &report.summary;
    let mut lines = vec![
        format!("File: {}", report.file),
        format!(
            "Rows: {} read, {} loaded, {} skipped",
            report.rows_read,
            report.rows_loaded,
            report.skipped.len()
        ),
    ];

    for row in report.skipped.iter().take(MAX_SKIPPED_SHOWN) {
        lines.push(format!("  line {}: {}", row.line, row.reason));
    }
    if report.skipped.len() > MAX_SKIPPED_SHOWN {
        lines.push(format!(
            "  ... and {} more",
            report.skipped.len() - MAX_SKIPPED_SHOWN
        ));
    }

    lines.push(format!("Total Sequences: {}", s.total));
    lines.push(format!(
        "Total Received: {}",
        paint_state(&s.received.to_string(), FinalState::Received, color)
    ));
    lines.push(format!(
        "Total Lost: {}",
        paint_state(&s.lost.to_string(), FinalState::Lost, color)
    ));
    lines.push(format!(
        "Total Resend: {}",
        paint_state(&s.resend_count.to_string(), FinalState::Resend, color)
    ));
    lines.push(format!("Loss Ratio: {}", percent(s.loss_ratio)));
    lines.push(format!("Recovery Ratio: {}", percent(s.recovery_ratio)));
    lines.join("\n")
}

pub fn format_record(report: &RecordReport, color: bool) -> String {
    let state = report.final_state.label();
    let mut out = format!("State: {}", paint_state(state, report.final_state, color));
    if let Some(text) = &report.text {
        out.push('\n');
        out.push_str(text);
    }
    out
}

pub fn format_frames(report: &FramesReport, color: bool) -> String {
    let mut lines = vec![window_line(&report.window)];
    for row in &report.frames {
        lines.push(paint_frame_text(row, color));
    }
    lines.join("\n")
}

pub fn format_nacks(report: &NacksReport) -> String {
    let mut lines = vec![
        window_line(&report.window),
        format!("Lanes: {}", report.lane_count),
    ];
    for span in &report.spans {
        lines.push(format!("lane {} [{}..={}]", span.lane, span.start, span.end));
        if let Some(text) = &span.text {
            for line in text.lines() {
                lines.push(format!("  {}", line));
            }
        }
    }
    lines.join("\n")
}

pub fn format_timeline(report: &TimelineReport, color: bool) -> String {
    let s = &report.summary;
    let mut lines = vec![
        window_line(&report.window),
        format!(
            "Received: {}  Lost: {}  Resend: {}  Loss Ratio: {}",
            s.received,
            s.lost,
            s.resend_count,
            percent(s.loss_ratio)
        ),
        format!("NACK lanes: {}", report.lane_count),
    ];

    let mut states = report.states.iter();
    for frame in &report.frames {
        let strip: String = states
            .by_ref()
            .take(frame.size)
            .map(|(_, state)| paint_state(glyph(*state), *state, color))
            .collect();
        let range = match (frame.first, frame.last) {
            (Some(first), Some(last)) => format!("{}-{}", first, last),
            _ => String::new(),
        };
        lines.push(format!(
            "{:>15}  {}  {}",
            range,
            paint_frame(frame.state, color, 11),
            strip
        ));
    }
    lines.join("\n")
}

pub fn format_config(report: &ConfigReport) -> Result<String> {
    let origin = if report.exists {
        "loaded"
    } else {
        "not found, using defaults"
    };
    let body = toml::to_string_pretty(&report.config)?;
    Ok(format!("# {} ({})\n{}", report.path, origin, body.trim_end()))
}

fn window_line(window: &WindowInfo) -> String {
    format!(
        "Window: {}..{} of {}",
        window.start, window.end, window.domain_len
    )
}

fn percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

fn glyph(state: FinalState) -> &'static str {
    match state {
        FinalState::Received => ".",
        FinalState::Lost => "x",
        FinalState::Resend => "r",
    }
}

fn paint_state(text: &str, state: FinalState, color: bool) -> String {
    if !color {
        return text.to_string();
    }
    match state {
        FinalState::Received => text.green().to_string(),
        FinalState::Lost => text.red().to_string(),
        FinalState::Resend => text.yellow().to_string(),
    }
}

fn paint_frame(state: FrameState, color: bool, width: usize) -> String {
    let label = format!("{:<width$}", state.label(), width = width);
    if !color {
        return label;
    }
    match state {
        FrameState::Generated => label.green().to_string(),
        FrameState::UnGenerated => label.red().bold().to_string(),
    }
}

fn paint_frame_text(row: &FrameRow, color: bool) -> String {
    if !color {
        return row.text.clone();
    }
    row.text
        .replacen(row.state.label(), &paint_frame(row.state, true, 0), 1)
}

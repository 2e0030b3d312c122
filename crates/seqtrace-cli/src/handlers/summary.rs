use crate::context::HandlerContext;
use crate::presentation::SummaryReport;
use anyhow::Result;
use seqtrace_engine::summarize_table;
use std::path::Path;

pub fn handle(ctx: &HandlerContext, file: &Path) -> Result<()> {
    let dataset = ctx.load_dataset(file)?;
    let summary = summarize_table(dataset.table(), &ctx.config.classifier_options());
    ctx.view().render_summary(&SummaryReport::new(&dataset, summary))
}

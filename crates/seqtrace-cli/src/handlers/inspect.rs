use crate::args::DisplayArgs;
use crate::context::HandlerContext;
use crate::presentation::RecordReport;
use anyhow::{Result, bail};
use seqtrace_engine::classify;
use seqtrace_types::SeqNo;
use std::path::Path;

pub fn handle(ctx: &HandlerContext, file: &Path, seq: SeqNo, display: &DisplayArgs) -> Result<()> {
    let dataset = ctx.load_dataset(file)?;
    let table = dataset.table();

    if table.sequence_domain().binary_search(&seq).is_err() {
        bail!(
            "sequence number {} does not appear in {}",
            seq,
            file.display()
        );
    }

    let record = classify(table, seq, &ctx.config.classifier_options());
    let options = ctx.display_options(display);
    ctx.view()
        .render_record(&RecordReport::new(&record, &options, ctx.config.timezone))
}

use crate::args::{DisplayArgs, WindowArgs};
use crate::context::HandlerContext;
use crate::presentation::NacksReport;
use anyhow::Result;
use seqtrace_engine::build_timeline;
use std::path::Path;

pub fn handle(
    ctx: &HandlerContext,
    file: &Path,
    window: &WindowArgs,
    display: &DisplayArgs,
) -> Result<()> {
    let dataset = ctx.load_dataset(file)?;
    let timeline = build_timeline(
        dataset.table(),
        window.resolve(ctx.config.visible_count),
        &ctx.config.classifier_options(),
    );
    let report = NacksReport::new(
        file.display().to_string(),
        &timeline,
        &ctx.display_options(display),
        ctx.config.timezone,
    );
    ctx.view().render_nacks(&report)
}

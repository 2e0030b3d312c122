use crate::args::WindowArgs;
use crate::context::HandlerContext;
use crate::presentation::FramesReport;
use anyhow::Result;
use seqtrace_engine::build_timeline;
use std::path::Path;

pub fn handle(ctx: &HandlerContext, file: &Path, window: &WindowArgs) -> Result<()> {
    let dataset = ctx.load_dataset(file)?;
    let timeline = build_timeline(
        dataset.table(),
        window.resolve(ctx.config.visible_count),
        &ctx.config.classifier_options(),
    );
    ctx.view()
        .render_frames(&FramesReport::new(file.display().to_string(), &timeline))
}

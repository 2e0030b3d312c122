use crate::context::HandlerContext;
use crate::presentation::ConfigReport;
use anyhow::{Result, anyhow, bail};
use seqtrace_runtime::Config;

pub fn show(ctx: &HandlerContext) -> Result<()> {
    let report = ConfigReport {
        path: ctx.config_path.display().to_string(),
        exists: ctx.config_path.exists(),
        config: ctx.config.clone(),
    };
    ctx.view().render_config(&report)
}

pub fn init(ctx: &HandlerContext, force: bool) -> Result<()> {
    let path = &ctx.config_path;
    if path.exists() && !force {
        bail!(
            "config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    Config::default()
        .save_to(path)
        .map_err(|e| anyhow!("failed to write {}: {}", path.display(), e))?;
    tracing::info!(path = %path.display(), "config written");

    ctx.view()
        .render_notice(&format!("Wrote default config to {}", path.display()))
}

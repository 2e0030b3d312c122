use crate::args::{Cli, Commands, ConfigCommand};
use crate::context::HandlerContext;
use crate::handlers;
use crate::logging::init_logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.log_level)?;
    let ctx = HandlerContext::from_cli(&cli)?;

    match cli.command {
        Commands::Summary { file } => handlers::summary::handle(&ctx, &file),

        Commands::Inspect { file, seq, display } => {
            handlers::inspect::handle(&ctx, &file, seq, &display)
        }

        Commands::Frames { file, window } => handlers::frames::handle(&ctx, &file, &window),

        Commands::Nacks {
            file,
            window,
            display,
        } => handlers::nacks::handle(&ctx, &file, &window, &display),

        Commands::Timeline { file, window } => handlers::timeline::handle(&ctx, &file, &window),

        Commands::Watch { file, window } => handlers::watch::handle(&ctx, &file, &window),

        Commands::Config { command } => match command {
            ConfigCommand::Show => handlers::config::show(&ctx),
            ConfigCommand::Init { force } => handlers::config::init(&ctx, force),
        },
    }
}

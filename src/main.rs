use clap::Parser;
use relmap::cli::{Cli, Command};
use relmap::{CommandContext, cmd_init, cmd_layout, cmd_render};
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let config = cli.config.as_deref();
    let exit_code = match cli.command {
        Command::Layout(args) => with_context(config, |ctx| cmd_layout(args, ctx)),
        Command::Render(args) => with_context(config, |ctx| cmd_render(args, ctx)),
        Command::Init(args) => cmd_init(args),
    };

    std::process::exit(exit_code);
}

fn with_context(config: Option<&Path>, run: impl FnOnce(&CommandContext) -> i32) -> i32 {
    match CommandContext::new(config) {
        Ok(ctx) => run(&ctx),
        Err(code) => code,
    }
}

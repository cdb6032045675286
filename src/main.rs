use anyhow::Result;
use clap::Parser;
use pagewright::cli::{AppContext, Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // PAGEWRIGHT_LOG=debug pgw ... for engine traces
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env("PAGEWRIGHT_LOG"))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Build a context once, pass everywhere
    let ctx = AppContext {
        quiet: cli.quiet,
        no_color: cli.no_color,
        dry_run: cli.dry_run,
    };

    match cli.command {
        Commands::Page(args) => pagewright::core::page_run(args, &ctx),
        Commands::Init(args) => pagewright::infra::config::init(args, &ctx),
        Commands::Completions(args) => pagewright::completion::run(args),
    }
}

//! Genesis - Intelligent Project Scaffolding
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use genesis::cli::{commands, Cli, Commands};
use genesis::config::Workspace;
use genesis::error::GenesisResult;
use genesis::ui;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

async fn run() -> GenesisResult<()> {
    let cli = Cli::parse();

    // Initialize logging: 0 = warn (spinners only), 1 = info, 2+ = debug
    let filter = match cli.verbose {
        0 => EnvFilter::new("genesis=warn"),
        1 => EnvFilter::new("genesis=info"),
        _ => EnvFilter::new("genesis=debug"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    ui::init_theme();

    let mut workspace = Workspace::discover()?;
    if let Some(dir) = cli.projects_dir {
        workspace = workspace.with_projects_root(dir);
    }
    workspace.ensure_dirs().await?;

    match cli.command {
        Commands::Sync => commands::sync(&workspace).await,
        Commands::Clone(args) => commands::clone(args, &workspace).await,
        Commands::Build(args) => commands::build(args, &workspace).await,
        Commands::Wizard => commands::wizard(&workspace).await,
        Commands::Ask(args) => commands::ask(args, &workspace).await,
        Commands::List(args) => commands::list(args, &workspace).await,
        Commands::Nuke(args) => commands::nuke(args, &workspace).await,
        Commands::Publish(args) => commands::publish(args, &workspace).await,
        Commands::Config(args) => commands::config(args, &workspace).await,
    }
}

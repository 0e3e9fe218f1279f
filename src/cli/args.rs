//! CLI argument definitions using clap derive

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Genesis - Intelligent Project Scaffolding
///
/// Scaffolds new projects from a curated catalog of remote blueprints or
/// by delegating file generation to an AI service.
#[derive(Parser, Debug)]
#[command(name = "genesis")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Projects root directory (defaults to current directory)
    #[arg(long, global = true, env = "GENESIS_PROJECTS_DIR")]
    pub projects_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Refresh the blueprint catalog
    Sync,

    /// Create a project from a cataloged blueprint
    Clone(CloneArgs),

    /// Generate a project from a natural-language request
    Build(BuildArgs),

    /// Guided project generation
    Wizard,

    /// Ask the generation service a one-off question
    Ask(AskArgs),

    /// List projects under the projects root
    List(ListArgs),

    /// Delete a project
    Nuke(NukeArgs),

    /// Publish an existing project to a remote repository
    Publish(PublishArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the clone command
#[derive(Parser, Debug)]
pub struct CloneArgs {
    /// Template ID from the catalog (prompted if omitted)
    pub template: Option<String>,

    /// Project name (prompted if omitted)
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Arguments for the build command
#[derive(Parser, Debug)]
pub struct BuildArgs {
    /// What to build, in plain language
    pub request: String,

    /// Project name (prompted if omitted)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Run the fixed role-based plan concurrently
    #[arg(long)]
    pub swarm: bool,

    /// Publish to a remote repository after generation
    #[arg(long)]
    pub publish: bool,
}

/// Arguments for the ask command
#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question
    pub question: String,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "table")]
    pub format: OutputFormat,
}

/// Arguments for the nuke command
#[derive(Parser, Debug)]
pub struct NukeArgs {
    /// Project name
    pub name: String,

    /// Skip confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the publish command
#[derive(Parser, Debug)]
pub struct PublishArgs {
    /// Project name
    pub name: String,

    /// Remote repository name (defaults to the project name)
    #[arg(long)]
    pub repo: Option<String>,
}

/// Arguments for the config command
#[derive(Parser, Debug)]
pub struct ConfigArgs {
    /// Subcommand for config
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show all configuration values
    Show,

    /// Show the config document path
    Path,

    /// Get a configuration value
    Get {
        /// Configuration key (e.g. api_key)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. api_key)
        key: String,
        /// Value to set
        value: String,
    },

    /// Remove a configuration value
    Unset {
        /// Configuration key
        key: String,
    },
}

/// Output format for list command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    Table,
    /// JSON output
    Json,
    /// Simple text (one per line)
    Plain,
}

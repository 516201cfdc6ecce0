//! Command-line argument parsing with clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Skyforge CLI - lab topology tooling.
#[derive(Parser, Debug, Clone)]
#[command(name = "skyforge")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum Format {
    /// Human-readable table format.
    #[default]
    Table,
    /// JSON output for scripting.
    Json,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Render a design document to topology YAML.
    Render(RenderArgs),

    /// Parse a topology document and print its reduced graph.
    Graph(GraphArgs),

    /// Report serialization warnings for a design document.
    Check(CheckArgs),
}

/// Arguments for the render command.
#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    /// Path to the design document (JSON working copy).
    pub design: PathBuf,

    /// Write the topology YAML here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the graph command.
#[derive(clap::Args, Debug, Clone)]
pub struct GraphArgs {
    /// Path to the topology document (YAML).
    pub topology: PathBuf,
}

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the design document (JSON working copy).
    pub design: PathBuf,
}

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "relmap")]
#[command(about = "Lay out entity–attribute relation graphs from review mentions")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./.relmap.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Compute a layout and print it as JSON or a Markdown summary
    Layout(LayoutArgs),

    /// Draw a layout as a standalone SVG file
    Render(RenderArgs),

    /// Generate a starter .relmap.toml configuration file
    Init(InitArgs),
}

/// Options shared by every command that computes a layout.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Association CSV with ENTITY, ATTRIBUTE and COUNT columns
    pub input: PathBuf,

    /// Number of entities to show (clamped to the entities available)
    #[arg(short = 'k', long)]
    pub entities: Option<usize>,

    /// Seed for the placement RNG; omit for a fresh layout every run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Use the table as-is, skipping stop-list, threshold and capping
    #[arg(long)]
    pub raw: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct LayoutArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(short, long, default_value = "json")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Single-line JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// SVG file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Canvas size in pixels (overrides the config)
    #[arg(long)]
    pub size: Option<u32>,

    /// Open the drawing in the default viewer
    #[arg(long)]
    pub open: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct InitArgs {
    /// Directory to create .relmap.toml in (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Markdown,
}

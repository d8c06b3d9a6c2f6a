//! Abalone CLI - Command-line interface
//!
//! Commands:
//! - play: Two players at one terminal
//! - check: Evaluate a single move against a layout
//! - layouts: List, show and export starting layouts

mod check_cmd;
mod layouts_cmd;
mod play_cmd;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "abalone")]
#[command(about = "Abalone rules engine")]
struct Cli {
    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal
    Play(play_cmd::PlayArgs),
    /// Check whether a move is legal and show its effect
    Check(check_cmd::CheckArgs),
    /// List, show or export starting layouts
    Layouts(layouts_cmd::LayoutsArgs),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Check(args) => check_cmd::run(args),
        Commands::Layouts(args) => layouts_cmd::run(args),
    }
}

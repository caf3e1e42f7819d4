//! HEXSEARCH CLI - Command-line interface
//!
//! Commands:
//! - best-move: Analyze a position file
//! - play: Engine self-play, or a human against the engine

mod best_move_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use best_move_cmd::BestMoveArgs;
use play_cmd::PlayArgs;

#[derive(Parser)]
#[command(name = "hexsearch")]
#[command(about = "Hex alpha-beta search engine")]
struct Cli {
    /// Seed for the engine's random fallback
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find the best move in a position
    BestMove(BestMoveArgs),
    /// Play a game, engine against engine or against you
    Play(PlayArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::BestMove(args) => best_move_cmd::run(args, cli.seed),
        Commands::Play(args) => play_cmd::run(args, cli.seed),
    }
}

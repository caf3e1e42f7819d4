//! Best-move command - analyze one position from a JSON file
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: load_position(), search(), report()
//! - Level 3: output formatting
//! - Level 4: configuration

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use hexsearch_cli::{build_config, render_board, resolve_depth, Level, Position, Side};
use hexsearch_core::{Board, Game, HexAI, Player, SearchReport};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct BestMoveArgs {
    /// Position JSON file
    #[arg(long, value_name = "FILE")]
    pub position: PathBuf,

    /// Side to move (overrides the file's to_move)
    #[arg(long, value_enum)]
    pub player: Option<Side>,

    /// Maximum search depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Difficulty preset (easy=1, medium=2, difficult=3); --depth overrides
    #[arg(long, value_enum)]
    pub level: Option<Level>,

    /// Search config JSON file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Cap depth by board size
    #[arg(long)]
    pub size_cap: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

/// Run best-move command
///
/// 1. Load the position
/// 2. Search it
/// 3. Report the move
pub fn run(args: BestMoveArgs, seed: Option<u64>) -> Result<()> {
    let (mut board, player) = load_position(&args)?;

    tracing::info!(
        "Searching {}x{} position for {:?} ({} stones)",
        board.size(),
        board.size(),
        player,
        board.stone_count()
    );

    let report = search(&mut board, player, &args, seed)?;

    report_move(&board, player, &report, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn load_position(args: &BestMoveArgs) -> Result<(Board, Player)> {
    let position = Position::load(&args.position)?;
    let board = position
        .to_board()
        .with_context(|| format!("Invalid board in {}", args.position.display()))?;
    let player = args.player.map(Player::from).unwrap_or(position.to_move);
    Ok((board, player))
}

fn search(board: &mut Board, player: Player, args: &BestMoveArgs, seed: Option<u64>) -> Result<SearchReport> {
    let config = build_config(
        args.config.as_deref(),
        resolve_depth(args.depth, args.level),
        args.size_cap,
        seed,
    )?;
    let mut ai = HexAI::new(config);
    Ok(ai.analyze(board, player))
}

fn report_move(board: &Board, player: Player, report: &SearchReport, json: bool) -> Result<()> {
    if json {
        print_json(player, report)
    } else {
        print_text(board, player, report);
        Ok(())
    }
}

// ============================================================================
// LEVEL 3 - OUTPUT
// ============================================================================

fn print_json(player: Player, report: &SearchReport) -> Result<()> {
    #[derive(Serialize)]
    struct JsonOutput<'a> {
        player: Player,
        notation: Option<String>,
        #[serde(flatten)]
        report: &'a SearchReport,
    }

    let output = JsonOutput {
        player,
        notation: report.best_move.map(Game::notation),
        report,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_text(board: &Board, player: Player, report: &SearchReport) {
    print!("{}", render_board(board, true));
    println!();

    match report.best_move {
        Some(pos) => println!(
            "Best move for {:?}: {} ({}, {})",
            player,
            Game::notation(pos),
            pos.row,
            pos.col
        ),
        None => println!("No legal move for {:?}", player),
    }

    println!("Source:      {:?}", report.source);
    println!("Value:       {}", report.value);
    if report.depth > 0 {
        println!("Depth:       {}", report.depth);
        println!(
            "Nodes:       {} (TT hits {:.1}%, cutoffs {})",
            report.stats.nodes,
            report.stats.tt_hit_rate(),
            report.stats.cutoffs
        );
    }
    if report.forced_win {
        println!("Forced win found");
    }
}

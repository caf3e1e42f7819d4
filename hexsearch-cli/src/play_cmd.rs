//! Play command - engine self-play, or a human against the engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: play_game(), report_results()
//! - Level 3: play_turn(), human_turn()
//! - Level 4: formatting utilities

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Args;
use serde::Serialize;

use hexsearch_cli::{build_config, render_board, resolve_depth, Level, Side};
use hexsearch_core::{Action, Game, HexAI, MoveRecord, Player};

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Board size
    #[arg(long, default_value = "7")]
    pub size: usize,

    /// Maximum search depth
    #[arg(long)]
    pub depth: Option<u32>,

    /// Difficulty preset (easy=1, medium=2, difficult=3); --depth overrides
    #[arg(long, value_enum)]
    pub level: Option<Level>,

    /// Play this side yourself, entering moves like c3 on stdin
    #[arg(long, value_enum)]
    pub human: Option<Side>,

    /// Let Red take the opening stone (pie rule)
    #[arg(long)]
    pub swap: bool,

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

/// Run play command
///
/// 1. Play one game, engine against itself or against stdin
/// 2. Report the result
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let config = build_config(
        args.config.as_deref(),
        resolve_depth(args.depth, args.level),
        args.size_cap,
        seed,
    )?;

    tracing::info!(
        "Playing {}x{} (depth={}, swap={}, human={:?})",
        args.size,
        args.size,
        config.effective_depth(args.size),
        args.swap,
        args.human
    );

    let mut ai = HexAI::new(config);
    let stdin = std::io::stdin();
    let game = play_game(&mut ai, &args, &mut stdin.lock())?;

    report_results(&game, args.json)
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

fn play_game(ai: &mut HexAI, args: &PlayArgs, input: &mut impl BufRead) -> Result<Game> {
    let mut game = Game::new(args.size)?;
    let human = args.human.map(Player::from);

    if human.is_some() && !args.json {
        print!("{}", render_board(game.board(), true));
        println!();
    }

    while !game.is_over() {
        let record = if human == Some(game.to_move()) {
            human_turn(&mut game, input, args.swap, args.json)?
        } else {
            play_turn(&mut game, ai, args.swap)?
        };
        if !args.json {
            println!("{}", describe(&record));
            print!("{}", render_board(game.board(), true));
            println!();
        }
    }

    Ok(game)
}

fn report_results(game: &Game, json: bool) -> Result<()> {
    let winner = game.winner().ok_or_else(|| anyhow!("game ended without a winner"))?;

    if json {
        #[derive(Serialize)]
        struct JsonOutput<'a> {
            size: usize,
            winner: Player,
            moves: usize,
            history: &'a [MoveRecord],
            notation: Vec<String>,
        }

        let output = JsonOutput {
            size: game.board().size(),
            winner,
            moves: game.history().len(),
            history: game.history(),
            notation: game.history().iter().map(describe).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("=== {:?} wins after {} moves ===", winner, game.history().len());
    }

    tracing::info!("Game over: {:?} wins", winner);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

/// One engine move (or pie-rule swap) for the side to move
fn play_turn(game: &mut Game, ai: &mut HexAI, allow_swap: bool) -> Result<MoveRecord> {
    let size = game.board().size();

    if allow_swap {
        if let [MoveRecord {
            action: Action::Place(opening),
            ..
        }] = game.history()
        {
            if HexAI::should_swap(*opening, size) {
                game.swap()?;
                return last_record(game);
            }
        }
    }

    let player = game.to_move();
    let mut board = game.board().clone();
    let pos = ai
        .best_move(&mut board, player)
        .ok_or_else(|| anyhow!("no legal move for {:?}", player))?;
    game.play(pos)?;
    last_record(game)
}

/// Read lines until one is a legal move (or `swap`) for the side to move
fn human_turn(game: &mut Game, input: &mut impl BufRead, allow_swap: bool, quiet: bool) -> Result<MoveRecord> {
    let size = game.board().size();
    let mut line = String::new();

    loop {
        if !quiet {
            print!("{:?}> ", game.to_move());
            std::io::stdout().flush()?;
        }

        line.clear();
        if input.read_line(&mut line).context("Failed to read move")? == 0 {
            bail!("input ended before the game finished");
        }
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let result = if text.eq_ignore_ascii_case("swap") {
            if !allow_swap {
                eprintln!("Invalid move: swap is disabled (pass --swap)");
                continue;
            }
            game.swap()
        } else {
            Game::parse_notation(text, size).and_then(|pos| game.play(pos).map(|_| ()))
        };

        match result {
            Ok(()) => return last_record(game),
            Err(e) => eprintln!("Invalid move: {}", e),
        }
    }
}

// ============================================================================
// LEVEL 4 - UTILITIES
// ============================================================================

fn last_record(game: &Game) -> Result<MoveRecord> {
    game.history()
        .last()
        .copied()
        .ok_or_else(|| anyhow!("move was not recorded"))
}

fn describe(record: &MoveRecord) -> String {
    match record.action {
        Action::Place(pos) => format!("{:?} {}", record.player, Game::notation(pos)),
        Action::Swap(pos) => format!("{:?} swap {}", record.player, Game::notation(pos)),
    }
}

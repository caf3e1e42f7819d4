//! Alpha-Beta Search Timing Benchmark
//!
//! Compares:
//! 1. Time to find a move at increasing depths
//! 2. Effect of the transposition table on node counts

use std::time::Instant;
use hexsearch_core::{Board, HexAI, Player, Pos, SearchConfig};

// ============================================================================
// TEST POSITIONS
// ============================================================================

/// Opening: one stone each near the center
fn test_position_opening(size: usize) -> Board {
    let mut board = Board::new(size).unwrap();
    let c = size / 2;
    board.make_move(Pos::new(c, c), Player::Blue);
    board.make_move(Pos::new(c - 1, c + 1), Player::Red);
    board
}

/// Middle game with crossing chains
fn test_position_midgame() -> Board {
    let grid = vec![
        vec![0, 0, 0, 0, 0, 0, 0],
        vec![0, 0, 1, 0, 0, 0, 0],
        vec![0, 2, 1, 2, 0, 0, 0],
        vec![0, 0, 1, 2, 2, 0, 0],
        vec![0, 0, 0, 1, 0, 0, 0],
        vec![0, 0, 0, 0, 0, 0, 0],
        vec![0, 0, 0, 0, 0, 0, 0],
    ];
    Board::from_grid(&grid).unwrap()
}

// ============================================================================
// BENCHMARK STRUCTURES
// ============================================================================

#[derive(Clone, Debug)]
struct BenchmarkResult {
    position: String,
    config: String,
    avg_move_time_ms: f64,
    nodes: u64,
    tt_hit_rate: f64,
}

impl BenchmarkResult {
    fn to_table_row(&self) -> String {
        format!(
            "| {:<14} | {:<13} | {:>10.2}ms | {:>9} | {:>6.1}% |",
            self.position, self.config, self.avg_move_time_ms, self.nodes, self.tt_hit_rate
        )
    }
}

// ============================================================================
// BENCHMARK: Time to Find Move
// ============================================================================

fn benchmark_move_time(board: &Board, position_name: &str, to_move: Player) -> Vec<BenchmarkResult> {
    println!("\n=== MOVE TIME BENCHMARK: {} ===", position_name);
    let mut results = Vec::new();

    for depth in 1..=3 {
        for use_tt in [true, false] {
            let label = format!("Depth {}{}", depth, if use_tt { "" } else { " no-TT" });
            print!("  {} ... ", label);

            let config = SearchConfig::with_depth(depth).with_transposition(use_tt);
            let mut ai = HexAI::new(config);
            let mut board = board.clone();
            let mut total_time = 0.0;
            let iterations = 3;
            let mut last = None;

            for _ in 0..iterations {
                let start = Instant::now();
                last = Some(ai.analyze(&mut board, to_move));
                total_time += start.elapsed().as_secs_f64() * 1000.0;
            }

            let report = last.unwrap();
            let avg_time = total_time / iterations as f64;
            results.push(BenchmarkResult {
                position: position_name.to_string(),
                config: label,
                avg_move_time_ms: avg_time,
                nodes: report.stats.nodes,
                tt_hit_rate: report.stats.tt_hit_rate(),
            });

            println!("{:.2}ms ({} nodes)", avg_time, report.stats.nodes);
        }
    }

    results
}

fn main() {
    println!("\n╔════════════════════════════════════════════════════════════╗");
    println!("║  HEXSEARCH: Alpha-Beta Depth Benchmark                     ║");
    println!("╚════════════════════════════════════════════════════════════╝");

    let mut all_results = Vec::new();
    all_results.extend(benchmark_move_time(&test_position_opening(5), "Opening 5x5", Player::Blue));
    all_results.extend(benchmark_move_time(&test_position_opening(7), "Opening 7x7", Player::Blue));
    all_results.extend(benchmark_move_time(&test_position_midgame(), "Midgame 7x7", Player::Red));

    println!("\n| Position       | Config        | Avg Move Time | Nodes     | TT hits |");
    println!("├────────────────┼───────────────┼───────────────┼───────────┼─────────┤");
    for result in &all_results {
        println!("{}", result.to_table_row());
    }
}

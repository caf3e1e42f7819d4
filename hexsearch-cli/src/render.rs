//! Text board printer
//!
//! Each row is shifted one space right of the previous one so the rhombus
//! reads as a hex grid. Blue stones are `X`, Red stones `O`.

use hexsearch_core::{Board, Cell, Pos};

fn symbol(cell: Cell) -> char {
    match cell {
        Cell::Empty => '.',
        Cell::Blue => 'X',
        Cell::Red => 'O',
    }
}

/// Render `board`; with `labeled`, add column letters and 1-based row numbers
pub fn render_board(board: &Board, labeled: bool) -> String {
    let size = board.size();
    let gutter = if labeled { 3 } else { 0 };
    let mut out = String::new();

    if labeled {
        out.push_str(&" ".repeat(gutter));
        let letters: Vec<String> = (0..size).map(|c| ((b'a' + c as u8) as char).to_string()).collect();
        out.push_str(&letters.join(" "));
        out.push('\n');
    }

    for row in 0..size {
        if labeled {
            out.push_str(&format!("{:>2} ", row + 1));
        }
        out.push_str(&" ".repeat(row));
        let cells: Vec<String> = (0..size)
            .map(|col| symbol(board.get(Pos::new(row, col)).unwrap_or(Cell::Empty)).to_string())
            .collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }

    out
}

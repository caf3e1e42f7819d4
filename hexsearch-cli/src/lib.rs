//! HEXSEARCH CLI support: position files, board rendering and engine options

pub mod options;
pub mod position;
pub mod render;

pub use options::{build_config, resolve_depth, Level, Side};
pub use position::Position;
pub use render::render_board;

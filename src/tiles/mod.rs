//! Tile-merge (2048) engine
//!
//! An N×N grid of powers of two. Each move slides every row or column toward
//! one edge, merging equal neighbours once, then spawns a new tile.

pub mod grid;
pub mod state;
pub mod tick;

pub use grid::{
    Grid, TileColor, WIN_TILE, add_random_tile, can_move, empty_cells, empty_grid, grids_equal,
    has_winning_tile, slide_grid, slide_row, tile_color,
};
pub use state::{TilesPhase, TilesState};
pub use tick::{TileMoveResult, continue_after_win, move_tiles, reset, toggle_pause};

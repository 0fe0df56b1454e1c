//! Tile grid helpers
//!
//! All functions here are pure apart from `add_random_tile`, which writes one
//! cell using the supplied generator.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::Serialize;

use crate::geom::Direction;

/// `grid[row][col]`; 0 is empty, anything else a power of two
pub type Grid = Vec<Vec<u32>>;

/// Reaching this tile wins the game
pub const WIN_TILE: u32 = 2048;
/// Chance a spawned tile is a 2 rather than a 4
pub const SPAWN_TWO_PROBABILITY: f64 = 0.9;

pub fn empty_grid(size: usize) -> Grid {
    vec![vec![0; size]; size]
}

/// `(row, col)` of every empty cell, row-major
pub fn empty_cells(grid: &Grid) -> Vec<(usize, usize)> {
    grid.iter()
        .enumerate()
        .flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v == 0)
                .map(move |(c, _)| (r, c))
        })
        .collect()
}

/// Put a 2 (90%) or 4 (10%) in a uniformly chosen empty cell.
/// Returns false when the grid is full.
pub fn add_random_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> bool {
    let cells = empty_cells(grid);
    let Some(&(r, c)) = cells.choose(rng) else {
        return false;
    };
    grid[r][c] = if rng.random::<f64>() < SPAWN_TWO_PROBABILITY {
        2
    } else {
        4
    };
    true
}

/// Any empty cell, or any equal non-zero orthogonal neighbours?
pub fn can_move(grid: &Grid) -> bool {
    for (r, row) in grid.iter().enumerate() {
        for (c, &value) in row.iter().enumerate() {
            if value == 0 {
                return true;
            }
            if row.get(c + 1) == Some(&value) {
                return true;
            }
            if grid.get(r + 1).and_then(|below| below.get(c)) == Some(&value) {
                return true;
            }
        }
    }
    false
}

pub fn has_winning_tile(grid: &Grid) -> bool {
    grid.iter().flatten().any(|&v| v >= WIN_TILE)
}

/// Slide a line toward index 0 and merge equal neighbours.
///
/// A tile produced by a merge never merges again in the same pass, so
/// `[2, 2, 2, 2]` becomes `[4, 4, 0, 0]`. Returns the new line (same length)
/// and the sum of merged values.
pub fn slide_row(row: &[u32]) -> (Vec<u32>, u64) {
    let tiles: Vec<u32> = row.iter().copied().filter(|&v| v != 0).collect();
    let mut out = Vec::with_capacity(row.len());
    let mut score = 0u64;

    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            let merged = tiles[i] * 2;
            out.push(merged);
            score += u64::from(merged);
            i += 2;
        } else {
            out.push(tiles[i]);
            i += 1;
        }
    }

    out.resize(row.len(), 0);
    (out, score)
}

pub fn grids_equal(a: &Grid, b: &Grid) -> bool {
    a == b
}

/// Apply `slide_row` to every row or column toward `direction`.
///
/// Right and down read lines back to front; up and down read columns.
pub fn slide_grid(grid: &Grid, direction: Direction) -> (Grid, u64) {
    let n = grid.len();
    let mut out = grid.clone();
    let mut total = 0;

    for i in 0..n {
        let coords: Vec<(usize, usize)> = (0..n)
            .map(|j| match direction {
                Direction::Left => (i, j),
                Direction::Right => (i, n - 1 - j),
                Direction::Up => (j, i),
                Direction::Down => (n - 1 - j, i),
            })
            .collect();
        let line: Vec<u32> = coords.iter().map(|&(r, c)| grid[r][c]).collect();
        let (slid, score) = slide_row(&line);
        for (&(r, c), value) in coords.iter().zip(slid) {
            out[r][c] = value;
        }
        total += score;
    }

    (out, total)
}

/// Colors the renderer uses for one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TileColor {
    pub background: &'static str,
    pub text: &'static str,
}

impl TileColor {
    const fn new(background: &'static str, text: &'static str) -> Self {
        Self { background, text }
    }
}

const EMPTY_TILE: TileColor = TileColor::new("#0a140a", "#0a140a");

const TILE_COLORS: [(u32, TileColor); 11] = [
    (2, TileColor::new("#0f2a12", "#7dff8a")),
    (4, TileColor::new("#12361a", "#8cff99")),
    (8, TileColor::new("#144a20", "#a6ffb0")),
    (16, TileColor::new("#175f27", "#c2ffc9")),
    (32, TileColor::new("#1b752f", "#e0ffe4")),
    (64, TileColor::new("#1f8c37", "#ffffff")),
    (128, TileColor::new("#2a9d8f", "#ffffff")),
    (256, TileColor::new("#2680c2", "#ffffff")),
    (512, TileColor::new("#6a4cc2", "#ffffff")),
    (1024, TileColor::new("#b83dba", "#ffffff")),
    (2048, TileColor::new("#f0c419", "#0a140a")),
];

/// Color for a tile value. Values past the table use its top entry.
pub fn tile_color(value: u32) -> TileColor {
    if value == 0 {
        return EMPTY_TILE;
    }
    TILE_COLORS
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, color)| *color)
        .unwrap_or(TILE_COLORS[TILE_COLORS.len() - 1].1)
}

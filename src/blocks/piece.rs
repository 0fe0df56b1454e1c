//! Tetrominoes, rotation and wall kicks

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::board::{Board, is_valid_move};
use crate::geom::Point;

/// Square bitmap, `shape[row][col]`
pub type Shape = Vec<Vec<bool>>;

/// Horizontal offsets tried after a blocked in-place rotation
pub const WALL_KICKS: [i32; 4] = [-1, 1, -2, 2];

/// The seven tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Spawn orientation
    fn template(self) -> &'static [&'static [u8]] {
        match self {
            PieceKind::I => &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
            PieceKind::O => &[&[1, 1], &[1, 1]],
            PieceKind::T => &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
            PieceKind::S => &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
            PieceKind::Z => &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
            PieceKind::J => &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
            PieceKind::L => &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
        }
    }

    /// Fresh copy of the spawn shape
    pub fn shape(self) -> Shape {
        self.template()
            .iter()
            .map(|row| row.iter().map(|&c| c != 0).collect())
            .collect()
    }

    /// Neon palette tag for the terminal renderer
    pub fn color(self) -> &'static str {
        match self {
            PieceKind::I => "#00f0f0",
            PieceKind::O => "#f0f000",
            PieceKind::T => "#a000f0",
            PieceKind::S => "#00f000",
            PieceKind::Z => "#f00000",
            PieceKind::J => "#0000f0",
            PieceKind::L => "#f0a000",
        }
    }

    /// Parse the single-letter tag used in snapshots
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| s.eq_ignore_ascii_case(kind.as_str()))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL.choose(rng).copied().unwrap_or(PieceKind::T)
    }
}

/// A tetromino: shape plus the board position of its top-left corner
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Spawn `kind` horizontally centered on the top row
    pub fn new(kind: PieceKind, board_width: i32) -> Self {
        let shape = kind.shape();
        let shape_width = shape.first().map_or(0, |r| r.len()) as i32;
        Self {
            kind,
            shape,
            x: board_width / 2 - shape_width / 2,
            y: 0,
        }
    }

    pub fn random<R: Rng + ?Sized>(board_width: i32, rng: &mut R) -> Self {
        Self::new(PieceKind::random(rng), board_width)
    }

    /// Board coordinates of every filled cell
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.shape.iter().enumerate().flat_map(move |(row, line)| {
            line.iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(col, _)| Point::new(self.x + col as i32, self.y + row as i32))
        })
    }
}

/// Rotate a shape 90° clockwise.
///
/// An `R × C` input becomes `C × R` with `out[x][y] = in[R - 1 - y][x]`.
pub fn rotate_shape(shape: &Shape) -> Shape {
    let rows = shape.len();
    let cols = shape.first().map_or(0, |r| r.len());
    (0..cols)
        .map(|x| (0..rows).map(|y| shape[rows - 1 - y][x]).collect())
        .collect()
}

/// Outcome of a rotation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotateResult {
    pub success: bool,
    /// The rotated shape (returned even on failure)
    pub shape: Shape,
    /// Horizontal kick applied; 0 when rotating in place or failing
    pub offset: i32,
}

/// Try the clockwise rotation in place, then at each wall-kick offset.
/// Neither argument is modified.
pub fn try_rotate(board: &Board, piece: &Piece) -> RotateResult {
    let shape = rotate_shape(&piece.shape);
    for offset in std::iter::once(0).chain(WALL_KICKS) {
        if is_valid_move(board, piece, offset, 0, Some(&shape)) {
            return RotateResult {
                success: true,
                shape,
                offset,
            };
        }
    }
    RotateResult {
        success: false,
        shape,
        offset: 0,
    }
}

//! Falling-block playfield

use serde::Serialize;

use super::piece::{Piece, PieceKind, Shape};

/// A board cell: empty, or the kind of piece that was locked there
pub type Cell = Option<PieceKind>;

/// Fixed-size grid of cells, indexed `rows[y][x]` with row 0 at the top.
///
/// The row and column counts never change. Clearing a line removes that row
/// and inserts an empty one at index 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    width: i32,
    height: i32,
    rows: Vec<Vec<Cell>>,
}

impl Board {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            rows: vec![Self::empty_row(width); height.max(0) as usize],
        }
    }

    fn empty_row(width: i32) -> Vec<Cell> {
        vec![None; width.max(0) as usize]
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    /// Cell at `(x, y)`, or `None` when off the board
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(self.rows[y as usize][x as usize])
    }

    /// True if an on-board cell holds a block. Off-board cells are never occupied.
    #[inline]
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Write a cell; writes outside the board are dropped
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        self.rows[y as usize][x as usize] = cell;
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|c| c.is_some()))
    }

    /// Remove every full row, scanning bottom to top.
    ///
    /// Each removal shifts the rows above down by one and inserts an empty row
    /// at the top, so the same index is checked again afterwards.
    pub fn clear_full_rows(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.rows.len();
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.rows.remove(y - 1);
                self.rows.insert(0, Self::empty_row(self.width));
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Stamp a piece's filled cells into the board. Cells above row 0 are skipped.
    pub fn place(&mut self, piece: &Piece) {
        for p in piece.cells() {
            if p.y >= 0 {
                self.set(p.x, p.y, Some(piece.kind));
            }
        }
    }
}

/// Would `piece`, shifted by `(dx, dy)` and optionally reshaped, fit on the board?
///
/// Every filled cell must stay within the side walls and above the floor.
/// Cells still above the top edge are always clear; cells on the board must
/// land on empty cells.
pub fn is_valid_move(
    board: &Board,
    piece: &Piece,
    dx: i32,
    dy: i32,
    shape_override: Option<&Shape>,
) -> bool {
    let shape = shape_override.unwrap_or(&piece.shape);
    for (row, line) in shape.iter().enumerate() {
        for (col, &filled) in line.iter().enumerate() {
            if !filled {
                continue;
            }
            let x = piece.x + col as i32 + dx;
            let y = piece.y + row as i32 + dy;
            if x < 0 || x >= board.width() || y >= board.height() {
                return false;
            }
            if y >= 0 && board.is_occupied(x, y) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(10, 20);
        assert_eq!(board.rows().len(), 20);
        assert!(board.rows().iter().all(|r| r.len() == 10));
        assert!(board.rows().iter().flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_clear_adjacent_full_rows() {
        let mut board = Board::new(4, 5);
        for x in 0..4 {
            board.set(x, 3, Some(PieceKind::I));
            board.set(x, 4, Some(PieceKind::J));
        }
        board.set(1, 2, Some(PieceKind::T));

        assert_eq!(board.clear_full_rows(), 2);
        assert_eq!(board.rows().len(), 5);
        assert_eq!(board.get(1, 4), Some(Some(PieceKind::T)));
        assert!(board.rows()[..4].iter().flatten().all(|c| c.is_none()));
    }

    #[test]
    fn test_valid_move_bounds() {
        let board = Board::new(10, 20);
        let piece = Piece::new(PieceKind::O, 10);
        assert!(is_valid_move(&board, &piece, 0, 0, None));
        assert!(!is_valid_move(&board, &piece, -5, 0, None));
        assert!(!is_valid_move(&board, &piece, 5, 0, None));
        assert!(is_valid_move(&board, &piece, 0, 18, None));
        assert!(!is_valid_move(&board, &piece, 0, 19, None));
    }

    #[test]
    fn test_rows_above_board_are_clear() {
        let mut board = Board::new(10, 20);
        for x in 0..10 {
            board.set(x, 0, Some(PieceKind::L));
        }
        let piece = Piece::new(PieceKind::O, 10);
        // Entirely above the top edge
        assert!(is_valid_move(&board, &piece, 0, -2, None));
        // Bottom half lands on row 0
        assert!(!is_valid_move(&board, &piece, 0, -1, None));
    }
}

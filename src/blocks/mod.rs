//! Falling-block engine
//!
//! A tetromino game on a fixed board: seven piece templates, clockwise
//! rotation with simple wall kicks, line clears, and level-based gravity.

pub mod board;
pub mod piece;
pub mod state;
pub mod tick;

pub use board::{Board, Cell, is_valid_move};
pub use piece::{Piece, PieceKind, RotateResult, Shape, rotate_shape, try_rotate};
pub use state::{BlocksPhase, BlocksState, LINE_SCORES};
pub use tick::{
    HardDropResult, LockResult, MoveResult, ghost_y, hard_drop, lock_piece, move_piece, reset,
    rotate_piece, soft_drop, tick, toggle_pause,
};

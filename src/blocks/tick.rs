//! Falling-block transitions
//!
//! Every function here runs synchronously to completion. The caller decides
//! when gravity fires (`tick` every `drop_interval_ms`) and routes player
//! input to the move/rotate/drop functions.

use super::board::is_valid_move;
use super::piece::{Piece, try_rotate};
use super::state::{
    BlocksState, HARD_DROP_POINTS, LINE_SCORES, SOFT_DROP_POINTS, drop_interval_for_level,
    level_for_lines,
};
use crate::config::BlocksConfig;

/// What happened when a piece was locked into the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LockResult {
    pub lines_cleared: u32,
    /// Line-clear points awarded by this lock
    pub points: u64,
    pub level_up: bool,
    /// The next piece could not spawn
    pub game_over: bool,
    pub new_high_score: bool,
}

/// Result of a translation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveResult {
    Moved,
    /// Sideways move into a wall or the stack, or the game is not active
    Blocked,
    /// A downward move was blocked so the piece locked in place
    Locked(LockResult),
}

impl MoveResult {
    pub fn moved(&self) -> bool {
        matches!(self, MoveResult::Moved)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HardDropResult {
    /// Rows fallen before locking
    pub drop_distance: u32,
    pub lock: LockResult,
}

/// Shift the current piece by `(dx, dy)`.
///
/// A blocked downward move locks the piece; a blocked sideways move does
/// nothing.
pub fn move_piece(state: &mut BlocksState, dx: i32, dy: i32, config: &BlocksConfig) -> MoveResult {
    if !state.is_active() {
        return MoveResult::Blocked;
    }
    if is_valid_move(&state.board, &state.current, dx, dy, None) {
        state.current.x += dx;
        state.current.y += dy;
        return MoveResult::Moved;
    }
    if dy > 0 {
        return MoveResult::Locked(lock_piece(state, config));
    }
    MoveResult::Blocked
}

/// Gravity step
pub fn tick(state: &mut BlocksState, config: &BlocksConfig) -> MoveResult {
    move_piece(state, 0, 1, config)
}

/// Player-initiated one-row drop, worth a point when it moves
pub fn soft_drop(state: &mut BlocksState, config: &BlocksConfig) -> MoveResult {
    let result = move_piece(state, 0, 1, config);
    if result.moved() {
        state.score += SOFT_DROP_POINTS;
    }
    result
}

/// Rotate clockwise with wall kicks. Returns false if every kick was blocked.
pub fn rotate_piece(state: &mut BlocksState) -> bool {
    if !state.is_active() {
        return false;
    }
    let result = try_rotate(&state.board, &state.current);
    if result.success {
        state.current.shape = result.shape;
        state.current.x += result.offset;
    }
    result.success
}

/// Lock the current piece, clear lines, score, and spawn the next piece.
pub fn lock_piece(state: &mut BlocksState, config: &BlocksConfig) -> LockResult {
    state.board.place(&state.current);

    let lines_cleared = state.board.clear_full_rows();
    let line_points = LINE_SCORES
        .get(lines_cleared as usize)
        .copied()
        .unwrap_or(LINE_SCORES[LINE_SCORES.len() - 1]);
    let points = line_points * u64::from(state.level);
    state.score += points;
    state.lines += lines_cleared;
    if lines_cleared > 0 {
        log::debug!("Cleared {} line(s) for {} points", lines_cleared, points);
    }

    let new_level = level_for_lines(state.lines);
    let level_up = new_level > state.level;
    if level_up {
        state.level = new_level;
        state.drop_interval_ms = drop_interval_for_level(config, new_level);
        log::info!(
            "Level {} reached, drop interval {}ms",
            new_level,
            state.drop_interval_ms
        );
    }

    let upcoming = Piece::random(state.board.width(), &mut state.rng);
    state.current = std::mem::replace(&mut state.next, upcoming);

    let mut result = LockResult {
        lines_cleared,
        points,
        level_up,
        ..Default::default()
    };

    if !is_valid_move(&state.board, &state.current, 0, 0, None) {
        state.game_over = true;
        result.game_over = true;
        if state.score > state.high_score {
            state.high_score = state.score;
            result.new_high_score = true;
        }
        log::info!(
            "Blocks game over: score {}, level {}, lines {}",
            state.score,
            state.level,
            state.lines
        );
    }

    result
}

/// Drop straight down and lock. `None` while paused or after game over.
pub fn hard_drop(state: &mut BlocksState, config: &BlocksConfig) -> Option<HardDropResult> {
    if !state.is_active() {
        return None;
    }
    let mut distance = 0;
    while is_valid_move(&state.board, &state.current, 0, distance + 1, None) {
        distance += 1;
    }
    state.current.y += distance;
    state.score += HARD_DROP_POINTS * distance as u64;
    let lock = lock_piece(state, config);
    Some(HardDropResult {
        drop_distance: distance as u32,
        lock,
    })
}

/// Row the current piece would land on after a hard drop (ghost preview)
pub fn ghost_y(state: &BlocksState) -> i32 {
    let mut dy = 0;
    while is_valid_move(&state.board, &state.current, 0, dy + 1, None) {
        dy += 1;
    }
    state.current.y + dy
}

/// Start a new run, keeping the best score
pub fn reset(state: &mut BlocksState, config: &BlocksConfig) {
    let high_score = state.high_score;
    let rng = state.rng.clone();
    *state = BlocksState::with_rng(config, rng).with_high_score(high_score);
}

/// Flip the paused flag. Ignored after game over. Returns the paused flag.
pub fn toggle_pause(state: &mut BlocksState) -> bool {
    if !state.game_over {
        state.paused = !state.paused;
    }
    state.paused
}

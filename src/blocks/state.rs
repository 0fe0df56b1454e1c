//! Falling-block game state

use serde::Serialize;

use super::board::Board;
use super::piece::Piece;
use crate::config::BlocksConfig;
use crate::rng::{self, GameRng};

/// Points for clearing 0..=4 lines at once, multiplied by the level
pub const LINE_SCORES: [u64; 5] = [0, 100, 300, 500, 800];
/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;
/// Drop interval reduction per level
pub const DROP_SPEED_STEP_MS: u32 = 100;
/// Fastest gravity
pub const MIN_DROP_SPEED_MS: u32 = 100;
/// Points per row for a hard drop
pub const HARD_DROP_POINTS: u64 = 2;
/// Points per row for a player soft drop
pub const SOFT_DROP_POINTS: u64 = 1;

/// Where the game is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BlocksPhase {
    Falling,
    Paused,
    GameOver,
}

/// Complete falling-block state, read by the renderer every frame
#[derive(Debug, Clone, Serialize)]
pub struct BlocksState {
    pub board: Board,
    /// Piece under player control
    pub current: Piece,
    /// Preview piece, promoted on lock
    pub next: Piece,
    pub score: u64,
    pub high_score: u64,
    pub level: u32,
    /// Total lines cleared this run
    pub lines: u32,
    pub game_over: bool,
    pub paused: bool,
    pub drop_interval_ms: u32,
    #[serde(skip)]
    pub(crate) rng: GameRng,
}

impl BlocksState {
    pub fn new(config: &BlocksConfig, seed: u64) -> Self {
        Self::with_rng(config, rng::seeded(seed))
    }

    pub fn with_rng(config: &BlocksConfig, mut rng: GameRng) -> Self {
        let current = Piece::random(config.board_width, &mut rng);
        let next = Piece::random(config.board_width, &mut rng);
        Self {
            board: Board::new(config.board_width, config.board_height),
            current,
            next,
            score: 0,
            high_score: 0,
            level: 1,
            lines: 0,
            game_over: false,
            paused: false,
            drop_interval_ms: config.initial_drop_speed_ms,
            rng,
        }
    }

    /// Carry in a previously stored best score
    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = high_score;
        self
    }

    pub fn phase(&self) -> BlocksPhase {
        if self.game_over {
            BlocksPhase::GameOver
        } else if self.paused {
            BlocksPhase::Paused
        } else {
            BlocksPhase::Falling
        }
    }

    /// Accepting moves?
    #[inline]
    pub fn is_active(&self) -> bool {
        !self.game_over && !self.paused
    }
}

/// Level reached after `lines` total cleared lines
pub fn level_for_lines(lines: u32) -> u32 {
    lines / LINES_PER_LEVEL + 1
}

/// Gravity interval at `level`
pub fn drop_interval_for_level(config: &BlocksConfig, level: u32) -> u32 {
    config
        .initial_drop_speed_ms
        .saturating_sub(level.saturating_sub(1).saturating_mul(DROP_SPEED_STEP_MS))
        .max(MIN_DROP_SPEED_MS)
}

//! Snake game state

use std::collections::VecDeque;

use serde::Serialize;

use super::tick::spawn_food;
use crate::config::SnakeConfig;
use crate::geom::{Direction, Point};
use crate::rng::{self, GameRng};

/// Starting body length
pub const INITIAL_LENGTH: i32 = 3;
/// Points per food
pub const FOOD_POINTS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SnakePhase {
    Running,
    Paused,
    GameOver,
}

/// Complete snake state, read by the renderer every frame
#[derive(Debug, Clone, Serialize)]
pub struct SnakeState {
    /// Head first, each segment orthogonally adjacent to the previous
    pub body: VecDeque<Point>,
    pub direction: Direction,
    /// Applied at the start of the next update
    pub next_direction: Direction,
    /// `None` only once the body covers every cell
    pub food: Option<Point>,
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
    pub paused: bool,
    /// Current tick interval
    pub speed_ms: u32,
    #[serde(skip)]
    pub(crate) rng: GameRng,
}

/// Three horizontal segments centered on the grid, head on the right
pub fn initial_body(width: i32, height: i32) -> VecDeque<Point> {
    let cx = width / 2;
    let cy = height / 2;
    (0..INITIAL_LENGTH).map(|i| Point::new(cx - i, cy)).collect()
}

/// Brightness for body segment `index` (head = 1.0), fading toward the tail
pub fn segment_brightness(index: usize) -> f32 {
    (1.0 - index as f32 * 0.04).max(0.35)
}

impl SnakeState {
    pub fn new(config: &SnakeConfig, seed: u64) -> Self {
        Self::with_rng(config, rng::seeded(seed))
    }

    pub fn with_rng(config: &SnakeConfig, mut rng: GameRng) -> Self {
        let body = initial_body(config.grid_width, config.grid_height);
        let food = spawn_food(&body, config.grid_width, config.grid_height, &mut rng);
        Self {
            body,
            direction: Direction::Right,
            next_direction: Direction::Right,
            food,
            score: 0,
            high_score: 0,
            game_over: false,
            paused: false,
            speed_ms: config.initial_speed_ms,
            rng,
        }
    }

    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = high_score;
        self
    }

    pub fn head(&self) -> Option<Point> {
        self.body.front().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn phase(&self) -> SnakePhase {
        if self.game_over {
            SnakePhase::GameOver
        } else if self.paused {
            SnakePhase::Paused
        } else {
            SnakePhase::Running
        }
    }
}

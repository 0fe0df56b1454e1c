//! Tile-merge game state

use serde::Serialize;

use super::grid::{Grid, add_random_tile, empty_grid};
use crate::config::TilesConfig;
use crate::rng::{self, GameRng};

/// Tiles placed at the start of a run
pub const STARTING_TILES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TilesPhase {
    Playing,
    /// The winning tile appeared and the player has not chosen to continue
    Won,
    Paused,
    GameOver,
}

/// Complete tile-merge state, read by the renderer every frame
#[derive(Debug, Clone, Serialize)]
pub struct TilesState {
    pub grid: Grid,
    pub score: u64,
    pub high_score: u64,
    pub game_over: bool,
    pub paused: bool,
    /// Set once the winning tile first appears; never cleared by moves
    pub won: bool,
    /// Player chose to keep going after winning
    pub keep_playing: bool,
    #[serde(skip)]
    pub(crate) rng: GameRng,
}

impl TilesState {
    pub fn new(config: &TilesConfig, seed: u64) -> Self {
        Self::with_rng(config, rng::seeded(seed))
    }

    pub fn with_rng(config: &TilesConfig, mut rng: GameRng) -> Self {
        let mut grid = empty_grid(config.grid_size);
        for _ in 0..STARTING_TILES {
            add_random_tile(&mut grid, &mut rng);
        }
        Self {
            grid,
            score: 0,
            high_score: 0,
            game_over: false,
            paused: false,
            won: false,
            keep_playing: false,
            rng,
        }
    }

    pub fn with_high_score(mut self, high_score: u64) -> Self {
        self.high_score = high_score;
        self
    }

    pub fn phase(&self) -> TilesPhase {
        if self.game_over {
            TilesPhase::GameOver
        } else if self.won && !self.keep_playing {
            TilesPhase::Won
        } else if self.paused {
            TilesPhase::Paused
        } else {
            TilesPhase::Playing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_game_has_two_tiles() {
        let state = TilesState::new(&TilesConfig::default(), 8);
        let tiles: Vec<u32> = state.grid.iter().flatten().copied().filter(|&v| v != 0).collect();
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|&v| v == 2 || v == 4));
        assert_eq!(state.grid.len(), 4);
        assert_eq!(state.phase(), TilesPhase::Playing);
    }

    #[test]
    fn test_phase_order() {
        let mut state = TilesState::new(&TilesConfig::default(), 8);
        state.won = true;
        assert_eq!(state.phase(), TilesPhase::Won);
        state.keep_playing = true;
        assert_eq!(state.phase(), TilesPhase::Playing);
        state.game_over = true;
        assert_eq!(state.phase(), TilesPhase::GameOver);
    }
}

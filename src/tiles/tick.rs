//! Tile-merge transitions

use super::grid::{add_random_tile, can_move, grids_equal, has_winning_tile, slide_grid};
use super::state::TilesState;
use crate::config::TilesConfig;
use crate::geom::Direction;

/// Outcome of one move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TileMoveResult {
    /// The grid changed (and a tile was spawned)
    pub changed: bool,
    pub score_gained: u64,
    /// The winning tile appeared on this move
    pub won: bool,
    pub game_over: bool,
    pub new_high_score: bool,
}

/// Slide every tile toward `direction`.
///
/// Rejected while game over, paused, or won without continuing. A move that
/// leaves the grid unchanged spawns nothing and scores nothing.
pub fn move_tiles(state: &mut TilesState, direction: Direction) -> TileMoveResult {
    let mut result = TileMoveResult::default();
    if state.game_over || state.paused || (state.won && !state.keep_playing) {
        return result;
    }

    let (grid, gained) = slide_grid(&state.grid, direction);
    if grids_equal(&grid, &state.grid) {
        return result;
    }

    state.grid = grid;
    state.score += gained;
    result.changed = true;
    result.score_gained = gained;

    add_random_tile(&mut state.grid, &mut state.rng);

    if !state.won && has_winning_tile(&state.grid) {
        state.won = true;
        result.won = true;
        log::info!("Winning tile reached with score {}", state.score);
    }

    if !can_move(&state.grid) {
        state.game_over = true;
        result.game_over = true;
        if state.score > state.high_score {
            state.high_score = state.score;
            result.new_high_score = true;
        }
        log::info!("Tiles game over: score {}", state.score);
    }

    result
}

/// Keep playing after winning. Returns false unless the game is won.
pub fn continue_after_win(state: &mut TilesState) -> bool {
    if !state.won {
        return false;
    }
    state.keep_playing = true;
    true
}

/// Start a new run, keeping the best score
pub fn reset(state: &mut TilesState, config: &TilesConfig) {
    let high_score = state.high_score;
    let rng = state.rng.clone();
    *state = TilesState::with_rng(config, rng).with_high_score(high_score);
}

/// Flip the paused flag. Ignored after game over. Returns the paused flag.
pub fn toggle_pause(state: &mut TilesState) -> bool {
    if !state.game_over {
        state.paused = !state.paused;
    }
    state.paused
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::grid::empty_grid;
    use crate::tiles::state::TilesPhase;

    fn setup(grid: Vec<Vec<u32>>) -> TilesState {
        let config = TilesConfig {
            grid_size: grid.len(),
        };
        let mut state = TilesState::new(&config, 31337);
        state.grid = grid;
        state
    }

    fn tile_count(state: &TilesState) -> usize {
        state.grid.iter().flatten().filter(|&&v| v != 0).count()
    }

    #[test]
    fn test_lone_tile_moves_right() {
        let mut grid = empty_grid(4);
        grid[0][0] = 2;
        let mut state = setup(grid);

        let result = move_tiles(&mut state, Direction::Right);
        assert!(result.changed);
        assert_eq!(state.grid[0][3], 2);
        assert_eq!(state.score, 0);
        assert_eq!(tile_count(&state), 2);
    }

    #[test]
    fn test_inert_move() {
        let mut grid = empty_grid(4);
        grid[0][0] = 2;
        grid[1][0] = 4;
        let mut state = setup(grid.clone());

        let result = move_tiles(&mut state, Direction::Left);
        assert_eq!(result, TileMoveResult::default());
        assert_eq!(state.grid, grid);
        assert_eq!(state.score, 0);
        assert_eq!(tile_count(&state), 2);
    }

    #[test]
    fn test_merge_scores() {
        let mut grid = empty_grid(4);
        grid[2] = vec![2, 2, 4, 4];
        let mut state = setup(grid);

        let result = move_tiles(&mut state, Direction::Left);
        assert_eq!(result.score_gained, 12);
        assert_eq!(state.score, 12);
        assert_eq!(&state.grid[2][..2], &[4, 8]);
    }

    #[test]
    fn test_win_blocks_until_continue() {
        let mut grid = empty_grid(4);
        grid[0] = vec![1024, 1024, 0, 0];
        let mut state = setup(grid);

        let result = move_tiles(&mut state, Direction::Left);
        assert!(result.won);
        assert!(state.won);
        assert_eq!(state.phase(), TilesPhase::Won);

        let snapshot = state.grid.clone();
        for dir in Direction::ALL {
            assert!(!move_tiles(&mut state, dir).changed);
        }
        assert_eq!(state.grid, snapshot);

        assert!(continue_after_win(&mut state));
        let result = move_tiles(&mut state, Direction::Right);
        assert!(result.changed);
        // Sticky: not reported again
        assert!(!result.won);
        assert!(state.won);
    }

    #[test]
    fn test_continue_requires_win() {
        let mut state = setup(empty_grid(4));
        assert!(!continue_after_win(&mut state));
        assert!(!state.keep_playing);
    }

    #[test]
    fn test_last_move_ends_game() {
        // Whatever spawns at (1, 0) has no equal neighbour
        let mut state = setup(vec![vec![8, 16], vec![32, 0]]);
        state.score = 100;
        state.high_score = 50;

        let result = move_tiles(&mut state, Direction::Right);
        assert!(result.changed);
        assert!(result.game_over);
        assert!(result.new_high_score);
        assert_eq!(state.high_score, 100);
        assert!(!move_tiles(&mut state, Direction::Left).changed);
    }

    #[test]
    fn test_paused_rejects_moves() {
        let mut grid = empty_grid(4);
        grid[0][0] = 2;
        let mut state = setup(grid);
        assert!(toggle_pause(&mut state));
        assert!(!move_tiles(&mut state, Direction::Right).changed);
        assert!(!toggle_pause(&mut state));
        assert!(move_tiles(&mut state, Direction::Right).changed);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let mut state = setup(vec![vec![8, 16], vec![32, 64]]);
        state.high_score = 900;
        state.won = true;
        state.game_over = true;
        reset(&mut state, &TilesConfig::default());
        assert_eq!(state.high_score, 900);
        assert!(!state.won && !state.game_over);
        assert_eq!(state.grid.len(), 4);
        assert_eq!(tile_count(&state), 2);
    }
}

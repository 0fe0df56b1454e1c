//! Snake transitions

use std::collections::VecDeque;

use rand::Rng;
use rand::seq::IndexedRandom;

use super::state::{FOOD_POINTS, SnakeState};
use crate::config::SnakeConfig;
use crate::geom::{Direction, Point, in_bounds};

/// Random draws tried before falling back to enumerating free cells
pub const FOOD_SAMPLE_ATTEMPTS: usize = 64;

/// Outcome of one snake tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct UpdateResult {
    pub moved: bool,
    pub ate: bool,
    pub game_over: bool,
    pub new_high_score: bool,
}

/// Pick a food cell not covered by `body`.
///
/// Draws uniform random cells for a bounded number of attempts, then picks
/// uniformly among the remaining free cells. Returns `None` when the body
/// covers the whole grid.
pub fn spawn_food<R: Rng + ?Sized>(
    body: &VecDeque<Point>,
    width: i32,
    height: i32,
    rng: &mut R,
) -> Option<Point> {
    if width <= 0 || height <= 0 {
        return None;
    }
    for _ in 0..FOOD_SAMPLE_ATTEMPTS {
        let candidate = Point::new(rng.random_range(0..width), rng.random_range(0..height));
        if !body.contains(&candidate) {
            return Some(candidate);
        }
    }
    let free: Vec<Point> = (0..height)
        .flat_map(|y| (0..width).map(move |x| Point::new(x, y)))
        .filter(|p| !body.contains(p))
        .collect();
    free.choose(rng).copied()
}

/// Place new food using the state's own generator
pub fn respawn_food(state: &mut SnakeState, config: &SnakeConfig) {
    state.food = spawn_food(
        &state.body,
        config.grid_width,
        config.grid_height,
        &mut state.rng,
    );
}

/// Does moving the head to `head` end the game?
///
/// Out-of-bounds cells always collide, as does any body segment after the
/// head. The current head itself (index 0) is not checked.
pub fn check_collision(head: Point, body: &VecDeque<Point>, width: i32, height: i32) -> bool {
    !in_bounds(head, width, height) || body.iter().skip(1).any(|&segment| segment == head)
}

/// Queue a turn for the next update.
///
/// Only perpendicular turns are accepted; reversing or repeating the current
/// axis returns false and leaves the queue untouched.
pub fn set_direction(state: &mut SnakeState, direction: Direction) -> bool {
    if direction.shares_axis(state.direction) {
        return false;
    }
    state.next_direction = direction;
    true
}

fn finish(state: &mut SnakeState, result: &mut UpdateResult) {
    state.game_over = true;
    result.game_over = true;
    if state.score > state.high_score {
        state.high_score = state.score;
        result.new_high_score = true;
    }
    log::info!(
        "Snake game over: score {}, length {}",
        state.score,
        state.body.len()
    );
}

/// Advance the snake one cell
pub fn update(state: &mut SnakeState, config: &SnakeConfig) -> UpdateResult {
    let mut result = UpdateResult::default();
    if state.paused || state.game_over {
        return result;
    }

    state.direction = state.next_direction;
    let Some(head) = state.head() else {
        return result;
    };
    let new_head = head + state.direction.vector();

    if check_collision(new_head, &state.body, config.grid_width, config.grid_height) {
        finish(state, &mut result);
        return result;
    }

    state.body.push_front(new_head);
    result.moved = true;

    if state.food == Some(new_head) {
        result.ate = true;
        state.score += FOOD_POINTS;
        state.speed_ms = state
            .speed_ms
            .saturating_sub(config.speed_increment_ms)
            .max(config.min_speed_ms);
        respawn_food(state, config);
        log::debug!(
            "Food eaten: score {}, speed {}ms",
            state.score,
            state.speed_ms
        );
        if state.food.is_none() {
            log::info!("Snake fills the grid");
            finish(state, &mut result);
        }
    } else {
        state.body.pop_back();
    }

    result
}

/// Start a new run, keeping the best score
pub fn reset(state: &mut SnakeState, config: &SnakeConfig) {
    let high_score = state.high_score;
    let rng = state.rng.clone();
    *state = SnakeState::with_rng(config, rng).with_high_score(high_score);
}

/// Flip the paused flag. Ignored after game over. Returns the paused flag.
pub fn toggle_pause(state: &mut SnakeState) -> bool {
    if !state.game_over {
        state.paused = !state.paused;
    }
    state.paused
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;
    use crate::snake::state::SnakePhase;

    fn setup() -> (SnakeState, SnakeConfig) {
        let config = SnakeConfig::default();
        (SnakeState::new(&config, 2024), config)
    }

    fn body(points: &[(i32, i32)]) -> VecDeque<Point> {
        points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn test_move_keeps_length() {
        let (mut state, config) = setup();
        state.food = Some(Point::new(0, 0));
        let result = update(&mut state, &config);
        assert!(result.moved);
        assert!(!result.ate);
        assert_eq!(state.len(), 3);
        assert_eq!(state.head(), Some(Point::new(11, 10)));
        assert_eq!(state.body.back().copied(), Some(Point::new(9, 10)));
    }

    #[test]
    fn test_eating_grows_and_speeds_up() {
        let (mut state, config) = setup();
        state.food = Some(Point::new(11, 10));
        let speed = state.speed_ms;

        let result = update(&mut state, &config);
        assert!(result.ate);
        assert_eq!(state.len(), 4);
        assert_eq!(state.score, 10);
        assert!(state.speed_ms < speed);
        let food = state.food.unwrap();
        assert!(!state.body.contains(&food));
    }

    #[test]
    fn test_speed_floor() {
        let (mut state, config) = setup();
        state.speed_ms = config.min_speed_ms + 2;
        state.food = Some(Point::new(11, 10));
        update(&mut state, &config);
        assert_eq!(state.speed_ms, config.min_speed_ms);
    }

    #[test]
    fn test_wall_collision_ends_game() {
        let (mut state, config) = setup();
        state.body = body(&[(19, 5), (18, 5), (17, 5)]);
        state.score = 40;
        state.high_score = 30;

        let result = update(&mut state, &config);
        assert!(result.game_over);
        assert!(result.new_high_score);
        assert_eq!(state.high_score, 40);
        assert_eq!(state.phase(), SnakePhase::GameOver);
        // Body is left as it was
        assert_eq!(state.head(), Some(Point::new(19, 5)));
        assert_eq!(update(&mut state, &config), UpdateResult::default());
    }

    #[test]
    fn test_self_collision() {
        let (mut state, config) = setup();
        // Head at (5,5) moving up into its own segment at (5,4)
        state.body = body(&[(5, 5), (6, 5), (6, 4), (5, 4), (4, 4)]);
        state.direction = Direction::Right;
        assert!(set_direction(&mut state, Direction::Up));
        let result = update(&mut state, &config);
        assert!(result.game_over);
        assert!(!result.new_high_score);
    }

    #[test]
    fn test_check_collision_rules() {
        let b = body(&[(2, 2), (1, 2), (0, 2)]);
        assert!(check_collision(Point::new(-1, 0), &b, 5, 5));
        assert!(check_collision(Point::new(5, 0), &b, 5, 5));
        assert!(check_collision(Point::new(0, 5), &b, 5, 5));
        assert!(check_collision(Point::new(1, 2), &b, 5, 5));
        assert!(!check_collision(Point::new(2, 2), &b, 5, 5));
        assert!(!check_collision(Point::new(3, 2), &b, 5, 5));
    }

    #[test]
    fn test_set_direction_rules() {
        let (mut state, _) = setup();
        assert!(!set_direction(&mut state, Direction::Left));
        assert!(!set_direction(&mut state, Direction::Right));
        assert_eq!(state.next_direction, Direction::Right);

        assert!(set_direction(&mut state, Direction::Up));
        assert_eq!(state.next_direction, Direction::Up);
        // Still checked against the current direction, not the queued one
        assert!(set_direction(&mut state, Direction::Down));
        assert_eq!(state.next_direction, Direction::Down);
    }

    #[test]
    fn test_paused_update_is_noop() {
        let (mut state, config) = setup();
        assert!(toggle_pause(&mut state));
        let before = state.body.clone();
        assert!(!update(&mut state, &config).moved);
        assert_eq!(state.body, before);
        assert!(!toggle_pause(&mut state));
    }

    #[test]
    fn test_spawn_food_avoids_body() {
        let mut rng = seeded(9);
        let b = body(&[(0, 0), (1, 0), (2, 0)]);
        for _ in 0..200 {
            let food = spawn_food(&b, 4, 1, &mut rng);
            assert_eq!(food, Some(Point::new(3, 0)));
        }
    }

    #[test]
    fn test_spawn_food_full_grid() {
        let mut rng = seeded(9);
        let b = body(&[(0, 0), (1, 0), (1, 1), (0, 1)]);
        assert_eq!(spawn_food(&b, 2, 2, &mut rng), None);
    }

    #[test]
    fn test_filling_the_grid_ends_game() {
        let config = SnakeConfig {
            grid_width: 4,
            grid_height: 1,
            ..Default::default()
        };
        let mut state = SnakeState::new(&config, 1);
        assert_eq!(state.food, Some(Point::new(3, 0)));
        let result = update(&mut state, &config);
        assert!(result.ate);
        assert!(result.game_over);
        assert_eq!(state.food, None);
        assert_eq!(state.len(), 4);
    }

    #[test]
    fn test_reset_keeps_high_score() {
        let (mut state, config) = setup();
        state.high_score = 70;
        state.score = 20;
        state.game_over = true;
        reset(&mut state, &config);
        assert_eq!(state.high_score, 70);
        assert_eq!(state.score, 0);
        assert!(!state.game_over);
        assert_eq!(state.len(), 3);
        assert_eq!(state.speed_ms, config.initial_speed_ms);
    }
}

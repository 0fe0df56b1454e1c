//! Property tests for the engine rules.
//!
//! Covered:
//! - `slide_row` conserves tile mass, packs toward index 0, and never merges
//!   a tile that was itself produced by a merge in the same pass.
//! - A tile move that leaves the grid unchanged is fully inert.
//! - Snake collision: out-of-bounds and body segments after the head collide.
//! - Snake turns: same-axis requests are refused and leave the queue alone.
//! - Falling blocks: any input sequence keeps the board shape fixed and the
//!   current piece in a valid position while the game runs.

use std::collections::VecDeque;

use proptest::prelude::*;

use hackterm_arcade::blocks::{self, BlocksState, is_valid_move};
use hackterm_arcade::config::{BlocksConfig, SnakeConfig, TilesConfig};
use hackterm_arcade::geom::{Direction, Point};
use hackterm_arcade::snake::{self, SnakeState, check_collision};
use hackterm_arcade::tiles::{self, TilesState, slide_grid, slide_row};

fn tile_value() -> impl Strategy<Value = u32> {
    prop::sample::select(vec![0u32, 0, 2, 4, 8, 16, 32])
}

fn direction() -> impl Strategy<Value = Direction> {
    prop::sample::select(Direction::ALL.to_vec())
}

proptest! {
    #[test]
    fn slide_row_conserves_and_packs(row in prop::collection::vec(tile_value(), 1..8)) {
        let (out, score) = slide_row(&row);
        prop_assert_eq!(out.len(), row.len());

        let before: u64 = row.iter().map(|&v| u64::from(v)).sum();
        let after: u64 = out.iter().map(|&v| u64::from(v)).sum();
        prop_assert_eq!(before, after);

        // Zeros only at the end
        let first_zero = out.iter().position(|&v| v == 0).unwrap_or(out.len());
        prop_assert!(out[first_zero..].iter().all(|&v| v == 0));

        // Each merge removes exactly one tile
        let tiles_in = row.iter().filter(|&&v| v != 0).count();
        let tiles_out = out.iter().filter(|&&v| v != 0).count();
        prop_assert!(tiles_out * 2 >= tiles_in);
        prop_assert_eq!(tiles_in - tiles_out == 0, score == 0);
    }

    #[test]
    fn slide_row_never_chains_merges(value in prop::sample::select(vec![2u32, 4, 8, 16]), n in 2usize..9) {
        let row = vec![value; n];
        let (out, score) = slide_row(&row);
        let pairs = n / 2;
        prop_assert!(out[..pairs].iter().all(|&v| v == value * 2));
        if n % 2 == 1 {
            prop_assert_eq!(out[pairs], value);
        }
        prop_assert_eq!(score, u64::from(value * 2) * pairs as u64);
    }

    #[test]
    fn unchanged_tile_move_is_inert(
        cells in prop::collection::vec(tile_value(), 16),
        dir in direction(),
        seed in any::<u64>(),
    ) {
        // Slide until nothing changes, so the next move in `dir` is a no-op
        let mut grid: Vec<Vec<u32>> = cells.chunks(4).map(|c| c.to_vec()).collect();
        loop {
            let (slid, _) = slide_grid(&grid, dir);
            if slid == grid {
                break;
            }
            grid = slid;
        }

        let mut state = TilesState::new(&TilesConfig::default(), seed);
        state.grid = grid.clone();
        let result = tiles::move_tiles(&mut state, dir);
        prop_assert!(!result.changed);
        prop_assert_eq!(&state.grid, &grid);
        prop_assert_eq!(state.score, 0);
    }

    #[test]
    fn out_of_bounds_head_always_collides(
        w in 4i32..30,
        h in 4i32..30,
        offset in 0i32..5,
        side in 0u8..4,
    ) {
        let body: VecDeque<Point> = snake::initial_body(w, h);
        let head = match side {
            0 => Point::new(-1 - offset, 0),
            1 => Point::new(w + offset, 0),
            2 => Point::new(0, -1 - offset),
            _ => Point::new(0, h + offset),
        };
        prop_assert!(check_collision(head, &body, w, h));
    }

    #[test]
    fn body_segments_collide_but_head_does_not(w in 4i32..30, h in 4i32..30) {
        let body: VecDeque<Point> = snake::initial_body(w, h);
        for (i, &segment) in body.iter().enumerate() {
            prop_assert_eq!(check_collision(segment, &body, w, h), i >= 1);
        }
    }

    #[test]
    fn same_axis_turns_are_refused(current in direction(), requested in direction(), seed in any::<u64>()) {
        let mut state = SnakeState::new(&SnakeConfig::default(), seed);
        state.direction = current;
        state.next_direction = current;

        let accepted = snake::set_direction(&mut state, requested);
        if requested == current || requested == current.opposite() {
            prop_assert!(!accepted);
            prop_assert_eq!(state.next_direction, current);
        } else {
            prop_assert!(accepted);
            prop_assert_eq!(state.next_direction, requested);
        }
    }

    #[test]
    fn blocks_board_shape_and_piece_stay_valid(
        seed in any::<u64>(),
        inputs in prop::collection::vec(0u8..6, 0..300),
    ) {
        let config = BlocksConfig::default();
        let mut state = BlocksState::new(&config, seed);
        for input in inputs {
            match input {
                0 => { blocks::move_piece(&mut state, -1, 0, &config); }
                1 => { blocks::move_piece(&mut state, 1, 0, &config); }
                2 => { blocks::rotate_piece(&mut state); }
                3 => { blocks::hard_drop(&mut state, &config); }
                _ => { blocks::tick(&mut state, &config); }
            }
            prop_assert_eq!(state.board.rows().len(), config.board_height as usize);
            prop_assert!(state.board.rows().iter().all(|r| r.len() == config.board_width as usize));
            prop_assert_eq!(state.level, state.lines / 10 + 1);
            if !state.game_over {
                prop_assert!(is_valid_move(&state.board, &state.current, 0, 0, None));
            }
        }
    }
}

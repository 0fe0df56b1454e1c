//! Grid-snake engine
//!
//! The body is a head-first list of cells. Each tick moves the head one cell
//! in the current direction and either drops the tail or, on food, keeps it.

pub mod state;
pub mod tick;

pub use state::{SnakePhase, SnakeState, initial_body, segment_brightness};
pub use tick::{
    UpdateResult, check_collision, reset, respawn_food, set_direction, spawn_food, toggle_pause,
    update,
};

//! hackterm-arcade - game cores for the hacker-terminal portfolio
//!
//! Core modules:
//! - `blocks`: Falling-block (tetromino) engine
//! - `snake`: Grid-snake engine
//! - `tiles`: Tile-merge (2048) engine
//! - `session`: One running game of any kind, plus key translation
//! - `config`: Engine settings and presets
//! - `highscores`: Best score per game
//! - `platform`: Logger and storage differences between browser and native
//!
//! Engines are synchronous and hold no timers. The caller owns each state,
//! drives ticks at the interval the state reports, and renders from it.

pub mod blocks;
pub mod config;
pub mod geom;
pub mod highscores;
pub mod platform;
pub mod rng;
pub mod session;
pub mod snake;
pub mod tiles;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{
    ArcadeConfig, BlocksConfig, ConfigError, GameConfig, SnakeConfig, SpeedPreset, TilesConfig,
};
pub use geom::{Direction, Point};
pub use highscores::HighScores;
pub use session::{Command, GameKind, Outcome, Session, SessionPhase};

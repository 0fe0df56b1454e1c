//! One running game, whichever engine it uses
//!
//! The host page picks a game by effect name when a session starts. From then
//! on every key press and timer tick goes through [`Session`], which forwards
//! to the matching engine without any further lookup.

use serde::{Deserialize, Serialize};

use crate::blocks::{self, BlocksPhase, BlocksState, MoveResult};
use crate::config::{BlocksConfig, GameConfig, SnakeConfig, TilesConfig};
use crate::geom::Direction;
use crate::snake::{self, SnakePhase, SnakeState};
use crate::tiles::{self, TilesPhase, TilesState};

/// Which engine a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameKind {
    Blocks,
    Snake,
    Tiles,
}

impl GameKind {
    pub const ALL: [GameKind; 3] = [GameKind::Blocks, GameKind::Snake, GameKind::Tiles];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKind::Blocks => "blocks",
            GameKind::Snake => "snake",
            GameKind::Tiles => "tiles",
        }
    }

    /// Resolve a terminal effect name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "blocks" | "tetris" => Some(GameKind::Blocks),
            "snake" => Some(GameKind::Snake),
            "tiles" | "2048" => Some(GameKind::Tiles),
            _ => None,
        }
    }
}

/// A player action, already translated from a raw key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Snake turn, tile slide, or sideways/soft-drop/rotate for blocks
    Move(Direction),
    Rotate,
    SoftDrop,
    HardDrop,
    Pause,
    Reset,
    /// Keep playing after reaching the winning tile
    Continue,
}

impl Command {
    /// Translate a DOM `KeyboardEvent.key` for the given game
    pub fn from_key(kind: GameKind, key: &str) -> Option<Self> {
        match key {
            "p" | "P" | "Escape" => return Some(Command::Pause),
            "r" | "R" => return Some(Command::Reset),
            _ => {}
        }
        match kind {
            GameKind::Blocks => match key {
                " " => Some(Command::HardDrop),
                "x" | "X" => Some(Command::Rotate),
                _ => Direction::from_key(key).map(Command::Move),
            },
            GameKind::Snake => Direction::from_key(key).map(Command::Move),
            GameKind::Tiles => match key {
                "c" | "C" => Some(Command::Continue),
                _ => Direction::from_key(key).map(Command::Move),
            },
        }
    }
}

/// What a command or tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// Something visible changed; the renderer should redraw
    pub changed: bool,
    /// Set to the final score when the engine reports a new best
    pub new_high_score: Option<u64>,
    /// A snake turn was accepted for the next tick
    pub queued: bool,
}

impl Outcome {
    fn redraw(changed: bool) -> Self {
        Self {
            changed,
            ..Self::default()
        }
    }
}

/// Lifecycle phase of whichever engine a session runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SessionPhase {
    Blocks(BlocksPhase),
    Snake(SnakePhase),
    Tiles(TilesPhase),
}

/// Renderer view: the session plus values derived from it
#[derive(Serialize)]
struct Snapshot<'a> {
    #[serde(flatten)]
    session: &'a Session,
    phase: SessionPhase,
    ghost_y: Option<i32>,
}

/// A running game and the config it was started with
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum Session {
    Blocks {
        state: BlocksState,
        config: BlocksConfig,
    },
    Snake {
        state: SnakeState,
        config: SnakeConfig,
    },
    Tiles {
        state: TilesState,
        config: TilesConfig,
    },
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        log::info!("Starting session with seed {}", seed);
        match config {
            GameConfig::Blocks(config) => Session::Blocks {
                state: BlocksState::new(&config, seed),
                config,
            },
            GameConfig::Snake(config) => Session::Snake {
                state: SnakeState::new(&config, seed),
                config,
            },
            GameConfig::Tiles(config) => Session::Tiles {
                state: TilesState::new(&config, seed),
                config,
            },
        }
    }

    pub fn kind(&self) -> GameKind {
        match self {
            Session::Blocks { .. } => GameKind::Blocks,
            Session::Snake { .. } => GameKind::Snake,
            Session::Tiles { .. } => GameKind::Tiles,
        }
    }

    /// Handle one player command
    pub fn apply(&mut self, command: Command) -> Outcome {
        match self {
            Session::Blocks { state, config } => apply_blocks(state, config, command),
            Session::Snake { state, config } => apply_snake(state, config, command),
            Session::Tiles { state, config } => apply_tiles(state, config, command),
        }
    }

    /// Advance one timer step. The tile game has no timer and never changes here.
    pub fn tick(&mut self) -> Outcome {
        match self {
            Session::Blocks { state, config } => {
                let result = blocks::tick(state, config);
                blocks_outcome(result, state.high_score)
            }
            Session::Snake { state, config } => {
                let result = snake::update(state, config);
                Outcome {
                    changed: result.moved || result.game_over,
                    new_high_score: result.new_high_score.then_some(state.high_score),
                    ..Outcome::default()
                }
            }
            Session::Tiles { .. } => Outcome::default(),
        }
    }

    /// How long the caller should wait before the next `tick`
    pub fn tick_interval_ms(&self) -> Option<u32> {
        match self {
            Session::Blocks { state, .. } => Some(state.drop_interval_ms),
            Session::Snake { state, .. } => Some(state.speed_ms),
            Session::Tiles { .. } => None,
        }
    }

    pub fn score(&self) -> u64 {
        match self {
            Session::Blocks { state, .. } => state.score,
            Session::Snake { state, .. } => state.score,
            Session::Tiles { state, .. } => state.score,
        }
    }

    pub fn high_score(&self) -> u64 {
        match self {
            Session::Blocks { state, .. } => state.high_score,
            Session::Snake { state, .. } => state.high_score,
            Session::Tiles { state, .. } => state.high_score,
        }
    }

    /// Seed the best score read from storage
    pub fn set_high_score(&mut self, high_score: u64) {
        match self {
            Session::Blocks { state, .. } => state.high_score = high_score,
            Session::Snake { state, .. } => state.high_score = high_score,
            Session::Tiles { state, .. } => state.high_score = high_score,
        }
    }

    pub fn is_game_over(&self) -> bool {
        match self {
            Session::Blocks { state, .. } => state.game_over,
            Session::Snake { state, .. } => state.game_over,
            Session::Tiles { state, .. } => state.game_over,
        }
    }

    pub fn is_paused(&self) -> bool {
        match self {
            Session::Blocks { state, .. } => state.paused,
            Session::Snake { state, .. } => state.paused,
            Session::Tiles { state, .. } => state.paused,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match self {
            Session::Blocks { state, .. } => SessionPhase::Blocks(state.phase()),
            Session::Snake { state, .. } => SessionPhase::Snake(state.phase()),
            Session::Tiles { state, .. } => SessionPhase::Tiles(state.phase()),
        }
    }

    /// Landing row of the falling piece, for the ghost outline
    pub fn ghost_y(&self) -> Option<i32> {
        match self {
            Session::Blocks { state, .. } => Some(blocks::ghost_y(state)),
            _ => None,
        }
    }

    /// Full state as JSON for the renderer, with `phase` and `ghost_y` added
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&Snapshot {
            session: self,
            phase: self.phase(),
            ghost_y: self.ghost_y(),
        })
    }
}

fn blocks_outcome(result: MoveResult, high_score: u64) -> Outcome {
    match result {
        MoveResult::Moved => Outcome::redraw(true),
        MoveResult::Blocked => Outcome::default(),
        MoveResult::Locked(lock) => Outcome {
            changed: true,
            new_high_score: lock.new_high_score.then_some(high_score),
            ..Outcome::default()
        },
    }
}

fn apply_blocks(state: &mut BlocksState, config: &BlocksConfig, command: Command) -> Outcome {
    let result = match command {
        Command::Move(Direction::Left) => blocks::move_piece(state, -1, 0, config),
        Command::Move(Direction::Right) => blocks::move_piece(state, 1, 0, config),
        Command::Move(Direction::Down) | Command::SoftDrop => blocks::soft_drop(state, config),
        Command::Move(Direction::Up) | Command::Rotate => {
            return Outcome::redraw(blocks::rotate_piece(state));
        }
        Command::HardDrop => match blocks::hard_drop(state, config) {
            Some(result) => MoveResult::Locked(result.lock),
            None => MoveResult::Blocked,
        },
        Command::Pause => {
            let was = state.paused;
            return Outcome::redraw(blocks::toggle_pause(state) != was);
        }
        Command::Reset => {
            blocks::reset(state, config);
            return Outcome::redraw(true);
        }
        Command::Continue => return Outcome::default(),
    };
    blocks_outcome(result, state.high_score)
}

fn apply_snake(state: &mut SnakeState, config: &SnakeConfig, command: Command) -> Outcome {
    match command {
        // Turns only queue; nothing visible until the next tick
        Command::Move(direction) => Outcome {
            queued: snake::set_direction(state, direction),
            ..Outcome::default()
        },
        Command::Pause => {
            let was = state.paused;
            Outcome::redraw(snake::toggle_pause(state) != was)
        }
        Command::Reset => {
            snake::reset(state, config);
            Outcome::redraw(true)
        }
        Command::Rotate | Command::SoftDrop | Command::HardDrop | Command::Continue => {
            Outcome::default()
        }
    }
}

fn apply_tiles(state: &mut TilesState, config: &TilesConfig, command: Command) -> Outcome {
    match command {
        Command::Move(direction) => {
            let result = tiles::move_tiles(state, direction);
            Outcome {
                changed: result.changed,
                new_high_score: result.new_high_score.then_some(state.high_score),
                ..Outcome::default()
            }
        }
        Command::Continue => Outcome::redraw(tiles::continue_after_win(state)),
        Command::Pause => {
            let was = state.paused;
            Outcome::redraw(tiles::toggle_pause(state) != was)
        }
        Command::Reset => {
            tiles::reset(state, config);
            Outcome::redraw(true)
        }
        Command::Rotate | Command::SoftDrop | Command::HardDrop => Outcome::default(),
    }
}

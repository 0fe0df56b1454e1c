//! Engine configuration
//!
//! Each engine consumes its own config value. `ArcadeConfig` bundles the
//! three so the host page can store one JSON blob of preferences.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::platform::KeyValueStore;

/// Falling-block engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlocksConfig {
    pub board_width: i32,
    pub board_height: i32,
    /// Gravity interval at level 1
    pub initial_drop_speed_ms: u32,
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            board_width: 10,
            board_height: 20,
            initial_drop_speed_ms: 1000,
        }
    }
}

/// Grid-snake engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnakeConfig {
    pub grid_width: i32,
    pub grid_height: i32,
    pub initial_speed_ms: u32,
    /// Interval reduction per food eaten
    pub speed_increment_ms: u32,
    /// The interval never drops below this
    pub min_speed_ms: u32,
}

impl Default for SnakeConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_speed_ms: 150,
            speed_increment_ms: 5,
            min_speed_ms: 50,
        }
    }
}

/// Tile-merge engine settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TilesConfig {
    pub grid_size: usize,
}

impl Default for TilesConfig {
    fn default() -> Self {
        Self { grid_size: 4 }
    }
}

/// Config for exactly one engine, chosen when a session starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "game", rename_all = "lowercase")]
pub enum GameConfig {
    Blocks(BlocksConfig),
    Snake(SnakeConfig),
    Tiles(TilesConfig),
}

/// Speed presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SpeedPreset {
    Casual,
    #[default]
    Normal,
    Hard,
}

impl SpeedPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeedPreset::Casual => "Casual",
            SpeedPreset::Normal => "Normal",
            SpeedPreset::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "casual" | "easy" => Some(SpeedPreset::Casual),
            "normal" | "default" => Some(SpeedPreset::Normal),
            "hard" => Some(SpeedPreset::Hard),
            _ => None,
        }
    }

    /// Level-1 gravity interval for the falling-block game
    pub fn drop_speed_ms(&self) -> u32 {
        match self {
            SpeedPreset::Casual => 1200,
            SpeedPreset::Normal => 1000,
            SpeedPreset::Hard => 600,
        }
    }

    /// Starting snake tick interval
    pub fn snake_speed_ms(&self) -> u32 {
        match self {
            SpeedPreset::Casual => 200,
            SpeedPreset::Normal => 150,
            SpeedPreset::Hard => 100,
        }
    }
}

/// All arcade preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcadeConfig {
    pub preset: SpeedPreset,
    pub blocks: BlocksConfig,
    pub snake: SnakeConfig,
    pub tiles: TilesConfig,
}

/// Failure to load an [`ArcadeConfig`]
#[derive(Debug)]
pub enum ConfigError {
    /// The stored text is not valid config JSON
    Parse(serde_json::Error),
    /// A field holds a value the engines cannot run with
    Invalid { field: &'static str, reason: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "config is not valid JSON: {err}"),
            ConfigError::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid { .. } => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

impl ArcadeConfig {
    /// Storage key
    const STORAGE_KEY: &'static str = "hackterm_arcade_config";

    /// Build the defaults for a preset
    pub fn from_preset(preset: SpeedPreset) -> Self {
        let mut config = Self::default();
        config.apply_preset(preset);
        config
    }

    /// Apply a speed preset (overwrites the starting speeds)
    pub fn apply_preset(&mut self, preset: SpeedPreset) {
        self.preset = preset;
        self.blocks.initial_drop_speed_ms = preset.drop_speed_ms();
        self.snake.initial_speed_ms = preset.snake_speed_ms();
        self.snake.min_speed_ms = self.snake.min_speed_ms.min(self.snake.initial_speed_ms);
    }

    /// Switch to the named preset and persist it. Unknown names change nothing.
    pub fn set_preset(
        &mut self,
        name: &str,
        store: &mut impl KeyValueStore,
    ) -> Option<SpeedPreset> {
        let Some(preset) = SpeedPreset::from_str(name) else {
            log::warn!("Unknown speed preset: {name}");
            return None;
        };
        self.apply_preset(preset);
        self.save(store);
        Some(preset)
    }

    /// Parse and validate a JSON config.
    ///
    /// Starting speeds left out of the JSON come from its `preset`, so
    /// `{"preset":"Hard"}` alone is a complete Hard config. Other missing
    /// fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let mut config = ArcadeConfig::deserialize(&value)?;

        if value.pointer("/blocks/initial_drop_speed_ms").is_none() {
            config.blocks.initial_drop_speed_ms = config.preset.drop_speed_ms();
        }
        if value.pointer("/snake/initial_speed_ms").is_none() {
            config.snake.initial_speed_ms = config.preset.snake_speed_ms();
            if value.pointer("/snake/min_speed_ms").is_none() {
                config.snake.min_speed_ms =
                    config.snake.min_speed_ms.min(config.snake.initial_speed_ms);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject dimensions and speeds the engines assume never happen
    pub fn validate(&self) -> Result<(), ConfigError> {
        // The widest piece template is four cells.
        if self.blocks.board_width < 4 {
            return Err(invalid("blocks.board_width", "must be at least 4"));
        }
        if self.blocks.board_height < 4 {
            return Err(invalid("blocks.board_height", "must be at least 4"));
        }
        if self.blocks.initial_drop_speed_ms == 0 {
            return Err(invalid("blocks.initial_drop_speed_ms", "must be positive"));
        }
        // The starting snake is three cells left of center.
        if self.snake.grid_width < 4 || self.snake.grid_height < 1 {
            return Err(invalid("snake grid", "must be at least 4 wide and 1 high"));
        }
        if self.snake.min_speed_ms == 0 {
            return Err(invalid("snake.min_speed_ms", "must be positive"));
        }
        if self.snake.min_speed_ms > self.snake.initial_speed_ms {
            return Err(invalid(
                "snake.min_speed_ms",
                format!(
                    "{} exceeds initial speed {}",
                    self.snake.min_speed_ms, self.snake.initial_speed_ms
                ),
            ));
        }
        if self.tiles.grid_size < 2 {
            return Err(invalid("tiles.grid_size", "must be at least 2"));
        }
        Ok(())
    }

    /// Config for one game
    pub fn game(&self, kind: crate::session::GameKind) -> GameConfig {
        use crate::session::GameKind;
        match kind {
            GameKind::Blocks => GameConfig::Blocks(self.blocks),
            GameKind::Snake => GameConfig::Snake(self.snake),
            GameKind::Tiles => GameConfig::Tiles(self.tiles),
        }
    }

    /// Load from a store, falling back to defaults on missing or bad data
    pub fn load(store: &impl KeyValueStore) -> Self {
        let Some(json) = store.get(Self::STORAGE_KEY) else {
            log::info!("Using default arcade config");
            return Self::default();
        };
        match Self::from_json(&json) {
            Ok(config) => {
                log::info!("Loaded arcade config ({})", config.preset.as_str());
                config
            }
            Err(err) => {
                log::warn!("Ignoring stored arcade config: {err}");
                Self::default()
            }
        }
    }

    pub fn save(&self, store: &mut impl KeyValueStore) {
        match self.to_json() {
            Ok(json) => {
                if store.set(Self::STORAGE_KEY, &json) {
                    log::info!("Arcade config saved");
                } else {
                    log::warn!("Arcade config could not be written");
                }
            }
            Err(err) => log::warn!("Arcade config not serializable: {err}"),
        }
    }
}

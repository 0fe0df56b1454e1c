//! Browser binding
//!
//! The terminal page creates one `WebArcade` per game effect, forwards key
//! events to it, calls `tick` on its own timer using `intervalMs`, and draws
//! from the JSON `snapshot`. Colors and fades come from the static helpers so
//! the page keeps no palette of its own.

use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

use crate::config::ArcadeConfig;
use crate::highscores::HighScores;
use crate::platform::{self, LocalStorage};
use crate::blocks::PieceKind;
use crate::session::{Command, GameKind, Outcome, Session};
use crate::snake;
use crate::tiles;

#[wasm_bindgen]
pub struct WebArcade {
    session: Session,
    config: ArcadeConfig,
    scores: HighScores,
    store: LocalStorage,
}

#[wasm_bindgen]
impl WebArcade {
    /// Start the game named by a terminal effect ("tetris", "snake", "2048")
    #[wasm_bindgen(constructor)]
    pub fn new(effect: &str) -> Result<WebArcade, JsValue> {
        platform::init_logging();
        let kind = GameKind::from_str(effect)
            .ok_or_else(|| JsValue::from_str(&format!("unknown game: {effect}")))?;

        let store = LocalStorage::new();
        let config = ArcadeConfig::load(&store);
        let scores = HighScores::load(&store);

        let seed = js_sys::Date::now() as u64;
        let mut session = Session::new(config.game(kind), seed);
        session.set_high_score(scores.best(kind));
        log::info!("{} started", kind.as_str());

        Ok(Self {
            session,
            config,
            scores,
            store,
        })
    }

    /// Route a key press. Returns true if the game consumed the key.
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        let Some(command) = Command::from_key(self.session.kind(), &event.key()) else {
            return false;
        };
        event.prevent_default();
        let outcome = self.session.apply(command);
        self.record(outcome);
        true
    }

    /// Timer step. Returns true if the frame needs redrawing.
    pub fn tick(&mut self) -> bool {
        let outcome = self.session.tick();
        self.record(outcome);
        outcome.changed
    }

    #[wasm_bindgen(js_name = intervalMs)]
    pub fn interval_ms(&self) -> Option<u32> {
        self.session.tick_interval_ms()
    }

    #[wasm_bindgen(js_name = ghostY)]
    pub fn ghost_y(&self) -> Option<i32> {
        self.session.ghost_y()
    }

    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        self.session.is_game_over()
    }

    /// Switch speed preset, save it, and restart the current game with it
    #[wasm_bindgen(js_name = setPreset)]
    pub fn set_preset(&mut self, name: &str) -> bool {
        if self.config.set_preset(name, &mut self.store).is_none() {
            return false;
        }
        let kind = self.session.kind();
        let high_score = self.session.high_score();
        self.session = Session::new(self.config.game(kind), js_sys::Date::now() as u64);
        self.session.set_high_score(high_score);
        true
    }

    #[wasm_bindgen(getter)]
    pub fn preset(&self) -> String {
        self.config.preset.as_str().to_string()
    }

    #[wasm_bindgen(js_name = tileColor)]
    pub fn tile_color(value: u32) -> String {
        tiles::tile_color(value).background.to_string()
    }

    #[wasm_bindgen(js_name = tileTextColor)]
    pub fn tile_text_color(value: u32) -> String {
        tiles::tile_color(value).text.to_string()
    }

    #[wasm_bindgen(js_name = segmentBrightness)]
    pub fn segment_brightness(index: usize) -> f32 {
        snake::segment_brightness(index)
    }

    /// Color for a snapshot piece tag such as "T"
    #[wasm_bindgen(js_name = pieceColor)]
    pub fn piece_color(tag: &str) -> Option<String> {
        PieceKind::from_str(tag).map(|kind| kind.color().to_string())
    }

    /// Current state as JSON
    pub fn snapshot(&self) -> String {
        match self.session.snapshot_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("Snapshot failed: {err}");
                String::from("{}")
            }
        }
    }
}

impl WebArcade {
    fn record(&mut self, outcome: Outcome) {
        if let Some(score) = outcome.new_high_score {
            if self.scores.submit(self.session.kind(), score) {
                self.scores.save(&mut self.store);
            }
        }
    }
}

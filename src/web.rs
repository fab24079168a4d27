//! Browser boundary
//!
//! The page owns the DOM, the interval timer and the key/pointer listeners.
//! It translates those into calls on [`WebGame`] and redraws from the JSON
//! snapshot each call returns.

use wasm_bindgen::prelude::*;

use crate::session::Session;
use crate::settings::{GameConfig, GameMode};
use crate::sim::{Direction, Message, Movement};

/// One running game, driven from JavaScript
#[wasm_bindgen]
pub struct WebGame {
    session: Session,
}

#[wasm_bindgen]
impl WebGame {
    /// `mode` is "pong" or "breakout"; a seed of `None` draws one at random
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str, seed: Option<u32>) -> Result<WebGame, JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        let mode = GameMode::from_str(mode)
            .ok_or_else(|| JsValue::from_str(&format!("unknown game mode: {mode}")))?;
        let seed = seed.unwrap_or_else(crate::random_seed);
        let session = Session::new(GameConfig::preset(mode), seed)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { session })
    }

    /// Period the page should tick at
    #[wasm_bindgen(getter)]
    pub fn tick_interval_ms(&self) -> u32 {
        self.session.reducer().config().tick_interval_ms
    }

    /// Seed in use, so the page can record it
    #[wasm_bindgen(getter)]
    pub fn seed(&self) -> u32 {
        self.session.reducer().seed()
    }

    pub fn tick(&mut self, elapsed: f64) -> String {
        self.send(Message::Tick {
            elapsed: elapsed as u64,
        })
    }

    /// Direction key went down ("up", "down", "left", "right")
    pub fn move_start(&mut self, direction: &str) -> String {
        match Direction::from_str(direction) {
            Some(direction) => self.send(Message::Move(Movement::Start(direction))),
            None => self.snapshot(),
        }
    }

    /// Direction key came up
    pub fn move_stop(&mut self, direction: &str) -> String {
        match Direction::from_str(direction) {
            Some(direction) => self.send(Message::Move(Movement::Stop(direction))),
            None => self.snapshot(),
        }
    }

    /// Pointer moved to `coordinate` along the paddle's axis
    pub fn move_to(&mut self, coordinate: f64) -> String {
        self.send(Message::Move(Movement::Position(coordinate)))
    }

    pub fn pause(&mut self) -> String {
        self.send(Message::Pause)
    }

    pub fn restart(&mut self) -> String {
        self.send(Message::Restart)
    }

    /// Current snapshot as JSON
    pub fn snapshot(&self) -> String {
        serde_json::to_string(&self.session.snapshot()).unwrap_or_default()
    }
}

impl WebGame {
    fn send(&mut self, message: Message) -> String {
        self.session.push(message);
        self.session.drain();
        self.snapshot()
    }
}

//! Arcade Core - deterministic simulation for browser Pong and Breakout
//!
//! Core modules:
//! - `sim`: Deterministic simulation (vectors, seeded sequence, entities, collisions, reducer)
//! - `settings`: Immutable per-game configuration
//! - `session`: Message queue folding input and ticks through the reducer
//! - `snapshot`: Integer-rounded state view for renderers
//! - `web`: wasm-bindgen handle for the browser collaborator (wasm32 only)

pub mod error;
pub mod session;
pub mod settings;
pub mod sim;
pub mod snapshot;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use error::ConfigError;
pub use session::{Session, replay};
pub use settings::{BrickLayout, GameConfig, GameMode};
pub use snapshot::{EntityView, Snapshot};

/// Default tuning shared by the presets
pub mod consts {
    /// Logical tick period (ms of wall time per tick)
    pub const TICK_INTERVAL_MS: u32 = 10;

    /// Court dimensions
    pub const PONG_CANVAS_SIZE: f64 = 600.0;
    pub const BREAKOUT_CANVAS_WIDTH: f64 = 600.0;
    pub const BREAKOUT_CANVAS_HEIGHT: f64 = 800.0;

    /// Paddle defaults
    pub const PADDLE_LENGTH: f64 = 100.0;
    pub const PADDLE_THICKNESS: f64 = 10.0;
    pub const PADDLE_OFFSET: f64 = 15.0;
    pub const PADDLE_SPEED: f64 = 5.0;
    /// AI paddle is a little slower than the player so it can be beaten
    pub const AI_PADDLE_SPEED: f64 = 4.0;

    /// Ball defaults
    pub const BALL_SIZE: f64 = 10.0;
    /// Deflection at the edge of a paddle (degrees)
    pub const MAX_BOUNCE_ANGLE: f64 = 75.0;

    /// Rules
    pub const WINNING_SCORE: u32 = 7;
    pub const STARTING_LIVES: u32 = 3;
}

/// Draw a fresh seed from the platform's entropy source
pub fn random_seed() -> u32 {
    rand::random::<u32>()
}

//! Per-game configuration
//!
//! A `GameConfig` is built once (from a preset or JSON), validated, and then
//! handed by value to the reducer. Nothing in the simulation reads ambient
//! constants directly.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::entity::{SERVE_MAX_SPEED, Size};

/// Which game the rules describe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Player paddle on the left, AI paddle on the right
    #[default]
    Pong,
    /// One paddle along the bottom, bricks above, limited lives
    Breakout,
}

impl GameMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Pong => "pong",
            GameMode::Breakout => "breakout",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pong" => Some(GameMode::Pong),
            "breakout" | "brick" | "bricks" => Some(GameMode::Breakout),
            _ => None,
        }
    }
}

/// Brick grid for Breakout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrickLayout {
    pub rows: u32,
    pub columns: u32,
    pub width: f64,
    pub height: f64,
    /// Space between neighbouring bricks
    pub gap: f64,
    /// Distance from the top of the canvas to the first row
    pub top_offset: f64,
    /// Points per row, top row first; the last entry repeats
    pub row_points: Vec<u32>,
}

impl Default for BrickLayout {
    fn default() -> Self {
        Self {
            rows: 5,
            columns: 8,
            width: 60.0,
            height: 20.0,
            gap: 10.0,
            top_offset: 60.0,
            row_points: vec![5, 4, 3, 2, 1],
        }
    }
}

impl BrickLayout {
    /// Horizontal extent of one row
    pub fn grid_width(&self) -> f64 {
        let columns = f64::from(self.columns);
        columns * self.width + (columns - 1.0).max(0.0) * self.gap
    }

    /// Bottom edge of the last row
    pub fn grid_bottom(&self) -> f64 {
        let rows = f64::from(self.rows);
        self.top_offset + rows * self.height + (rows - 1.0).max(0.0) * self.gap
    }

    /// Points for a brick in `row`
    pub fn points_for_row(&self, row: u32) -> u32 {
        let index = (row as usize).min(self.row_points.len().saturating_sub(1));
        self.row_points.get(index).copied().unwrap_or(1)
    }
}

/// Immutable rules and dimensions for one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub mode: GameMode,

    // === Court ===
    pub canvas_width: f64,
    pub canvas_height: f64,

    // === Paddles ===
    /// Extent along the axis the paddle moves on
    pub paddle_length: f64,
    /// Extent across that axis
    pub paddle_thickness: f64,
    /// Gap between the paddle and its court edge
    pub paddle_offset: f64,
    /// Player paddle speed (units per tick)
    pub paddle_speed: f64,
    /// AI paddle speed (units per tick, Pong only)
    pub ai_paddle_speed: f64,

    // === Ball ===
    pub ball_size: f64,
    /// Deflection at the very edge of a paddle, degrees
    pub max_bounce_angle: f64,
    /// Optional speed cap applied after paddle boosts; uncapped when `None`
    #[serde(default)]
    pub max_ball_speed: Option<f64>,

    // === Rules ===
    /// Points needed to win (Pong)
    pub winning_score: u32,
    /// Lives at the start of a game (Breakout)
    pub starting_lives: u32,
    pub bricks: BrickLayout,

    /// Period of the collaborator's tick source
    pub tick_interval_ms: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::pong()
    }
}

impl GameConfig {
    /// Two-paddle preset
    pub fn pong() -> Self {
        Self {
            mode: GameMode::Pong,
            canvas_width: PONG_CANVAS_SIZE,
            canvas_height: PONG_CANVAS_SIZE,
            paddle_length: PADDLE_LENGTH,
            paddle_thickness: PADDLE_THICKNESS,
            paddle_offset: PADDLE_OFFSET,
            paddle_speed: PADDLE_SPEED,
            ai_paddle_speed: AI_PADDLE_SPEED,
            ball_size: BALL_SIZE,
            max_bounce_angle: MAX_BOUNCE_ANGLE,
            max_ball_speed: None,
            winning_score: WINNING_SCORE,
            starting_lives: STARTING_LIVES,
            bricks: BrickLayout::default(),
            tick_interval_ms: TICK_INTERVAL_MS,
        }
    }

    /// Brick-breaker preset
    pub fn breakout() -> Self {
        Self {
            mode: GameMode::Breakout,
            canvas_width: BREAKOUT_CANVAS_WIDTH,
            canvas_height: BREAKOUT_CANVAS_HEIGHT,
            ..Self::pong()
        }
    }

    /// Preset for `mode`
    pub fn preset(mode: GameMode) -> Self {
        match mode {
            GameMode::Pong => Self::pong(),
            GameMode::Breakout => Self::breakout(),
        }
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Paddle rectangle for this mode
    ///
    /// Pong paddles stand upright; the Breakout paddle lies flat.
    pub fn paddle_size(&self) -> Size {
        match self.mode {
            GameMode::Pong => Size::new(self.paddle_thickness, self.paddle_length),
            GameMode::Breakout => Size::new(self.paddle_length, self.paddle_thickness),
        }
    }

    /// Reject configurations the simulation cannot run
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("paddle_length", self.paddle_length)?;
        positive("paddle_thickness", self.paddle_thickness)?;
        positive("paddle_speed", self.paddle_speed)?;
        positive("ball_size", self.ball_size)?;
        if !self.paddle_offset.is_finite() || self.paddle_offset < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "paddle_offset",
                value: self.paddle_offset,
            });
        }

        if !(self.max_bounce_angle > 0.0 && self.max_bounce_angle < 90.0) {
            return Err(ConfigError::BounceAngleOutOfRange(self.max_bounce_angle));
        }
        if let Some(cap) = self.max_ball_speed {
            positive("max_ball_speed", cap)?;
            let serve = f64::from(SERVE_MAX_SPEED);
            if cap < serve {
                return Err(ConfigError::SpeedCapBelowServe { cap, serve });
            }
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        // The ball is served with its corner at the canvas centre
        fits("ball", self.ball_size, self.canvas_width / 2.0)?;
        fits("ball", self.ball_size, self.canvas_height / 2.0)?;

        match self.mode {
            GameMode::Pong => {
                positive("ai_paddle_speed", self.ai_paddle_speed)?;
                fits("paddle", self.paddle_length, self.canvas_height)?;
                fits(
                    "paddle",
                    self.paddle_offset + self.paddle_thickness,
                    self.canvas_width / 2.0,
                )?;
                if self.winning_score == 0 {
                    return Err(ConfigError::ZeroWinningScore);
                }
            }
            GameMode::Breakout => {
                fits("paddle", self.paddle_length, self.canvas_width)?;
                fits(
                    "paddle",
                    self.paddle_offset + self.paddle_thickness,
                    self.canvas_height / 2.0,
                )?;
                if self.starting_lives == 0 {
                    return Err(ConfigError::ZeroLives);
                }
                self.validate_bricks()?;
            }
        }
        Ok(())
    }

    fn validate_bricks(&self) -> Result<(), ConfigError> {
        let bricks = &self.bricks;
        if bricks.rows == 0 || bricks.columns == 0 {
            return Err(ConfigError::EmptyBrickGrid);
        }
        if bricks.row_points.is_empty() {
            return Err(ConfigError::MissingRowPoints);
        }
        positive("bricks.width", bricks.width)?;
        positive("bricks.height", bricks.height)?;
        if !bricks.gap.is_finite() || bricks.gap < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "bricks.gap",
                value: bricks.gap,
            });
        }
        if !bricks.top_offset.is_finite() || bricks.top_offset < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "bricks.top_offset",
                value: bricks.top_offset,
            });
        }
        fits("brick row", bricks.grid_width(), self.canvas_width)?;
        // Keep the grid clear of the serve point
        fits("brick grid", bricks.grid_bottom(), self.canvas_height / 2.0)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { field, value })
    }
}

fn fits(what: &'static str, extent: f64, available: f64) -> Result<(), ConfigError> {
    if extent <= available {
        Ok(())
    } else {
        Err(ConfigError::DoesNotFit {
            what,
            extent,
            available,
        })
    }
}

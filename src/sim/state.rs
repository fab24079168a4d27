//! Game state and core simulation types
//!
//! A `GameState` is an immutable snapshot. The reducer never edits one in
//! place; it derives the next snapshot and the caller swaps it in.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::entity::{Brick, Entity, EntityKind};
use super::sequence::SequenceCursor;
use crate::settings::{GameConfig, GameMode};

/// Sequence steps consumed by one serve (two draws plus one spacer)
pub const SERVE_SEQUENCE_STEPS: usize = 3;

pub const BALL_ID: &str = "ball";
pub const PLAYER_PADDLE_ID: &str = "player-paddle";
pub const OPPONENT_PADDLE_ID: &str = "opponent-paddle";

/// Whether ticks advance the world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayState {
    #[default]
    Play,
    Pause,
    GameOver,
}

/// Who owns a paddle or a goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    /// The human player
    Player,
    /// The AI paddle (Pong only)
    Opponent,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Player => Side::Opponent,
            Side::Opponent => Side::Player,
        }
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// First to the winning score (Pong)
    Winner(Side),
    /// Last life lost (Breakout)
    OutOfLives,
    /// Every brick destroyed (Breakout)
    Cleared,
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Tick count reported by the last accepted tick
    pub time: u64,
    /// Human-controlled paddle
    pub player: Entity,
    /// AI paddle, present in Pong only
    pub opponent: Option<Entity>,
    pub ball: Entity,
    /// Remaining bricks in layout order (Breakout only)
    pub bricks: Vec<Brick>,
    pub play_state: PlayState,
    /// Player points
    pub score: u32,
    /// AI points (Pong)
    pub opponent_score: u32,
    /// Remaining lives (Breakout)
    pub lives: u32,
    /// Set when `play_state` becomes `GameOver`
    pub outcome: Option<Outcome>,
    /// Cursor for the next serve
    pub rng: SequenceCursor,
}

impl GameState {
    /// Fresh game for `config`, with the first serve drawn from `seed`
    ///
    /// `config` is expected to have passed [`GameConfig::validate`].
    pub fn new(config: &GameConfig, seed: u32) -> Self {
        let paddle = config.paddle_size();
        let (w, h) = (config.canvas_width, config.canvas_height);

        let (player_pos, opponent, bricks) = match config.mode {
            GameMode::Pong => {
                let y = h / 2.0 - paddle.height / 2.0;
                let opponent = Entity::new(
                    OPPONENT_PADDLE_ID,
                    EntityKind::Paddle,
                    DVec2::new(w - config.paddle_offset - paddle.width, y),
                    paddle.width,
                    paddle.height,
                );
                (DVec2::new(config.paddle_offset, y), Some(opponent), Vec::new())
            }
            GameMode::Breakout => {
                let pos = DVec2::new(
                    w / 2.0 - paddle.width / 2.0,
                    h - config.paddle_offset - paddle.height,
                );
                (pos, None, layout_bricks(config))
            }
        };

        let state = Self {
            time: 0,
            player: Entity::new(
                PLAYER_PADDLE_ID,
                EntityKind::Paddle,
                player_pos,
                paddle.width,
                paddle.height,
            ),
            opponent,
            ball: Entity::new(
                BALL_ID,
                EntityKind::Ball,
                DVec2::new(w / 2.0, h / 2.0),
                config.ball_size,
                config.ball_size,
            ),
            bricks,
            play_state: PlayState::Play,
            score: 0,
            opponent_score: 0,
            lives: config.starting_lives,
            outcome: None,
            rng: SequenceCursor::seed(seed),
        };

        // The opening serve goes to the player
        state.serve_toward(Side::Player, config)
    }

    /// Re-serve the ball from centre court toward `side`
    ///
    /// Draws two sequence values and advances the cursor three steps.
    #[must_use]
    pub fn serve_toward(self, side: Side, config: &GameConfig) -> Self {
        let r1 = self.rng.value();
        let r2 = self.rng.next().value();
        Self {
            ball: self.ball.served(
                serve_bearing(config.mode, side),
                r1,
                r2,
                config.canvas_width,
                config.canvas_height,
            ),
            rng: self.rng.advance(SERVE_SEQUENCE_STEPS),
            ..self
        }
    }

    /// The paddles in play, player first
    pub fn paddles(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.player).chain(self.opponent.iter())
    }

    /// Every entity in the world
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.paddles()
            .chain(std::iter::once(&self.ball))
            .chain(self.bricks.iter().map(|b| &b.entity))
    }

    pub fn is_over(&self) -> bool {
        self.play_state == PlayState::GameOver
    }
}

/// Base serve bearing toward `side` in `mode`
///
/// Pong's player defends the left edge and the AI the right; Breakout's
/// paddle sits along the bottom.
pub fn serve_bearing(mode: GameMode, side: Side) -> i32 {
    match (mode, side) {
        (GameMode::Pong, Side::Player) => 270,
        (GameMode::Pong, Side::Opponent) => 90,
        (GameMode::Breakout, _) => 180,
    }
}

/// Brick grid centred horizontally below `top_offset`
pub fn layout_bricks(config: &GameConfig) -> Vec<Brick> {
    let layout = &config.bricks;
    let left = (config.canvas_width - layout.grid_width()) / 2.0;
    (0..layout.rows)
        .flat_map(|row| (0..layout.columns).map(move |column| (row, column)))
        .map(|(row, column)| {
            let x = left + f64::from(column) * (layout.width + layout.gap);
            let y = layout.top_offset + f64::from(row) * (layout.height + layout.gap);
            Brick::new(
                format!("brick-{row}-{column}"),
                DVec2::new(x, y),
                layout.width,
                layout.height,
                layout.points_for_row(row),
            )
        })
        .collect()
}

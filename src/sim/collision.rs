//! Collision detection and response for the rectangular court
//!
//! Each resolver takes a state by value and hands back the next one. They run
//! in a fixed order every tick: court edges, then paddles, then bricks.

use glam::DVec2;

use super::entity::Entity;
use super::state::{GameState, Outcome, PlayState, Side};
use super::vector::unit_vector_in_direction;
use crate::settings::{GameConfig, GameMode};

/// `|a - b| <= tolerance`
#[inline]
pub fn near(a: f64, tolerance: f64, b: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// A side of the court, in the order contacts are checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// Vertical edges first, then left, then right
    pub const PRECEDENCE: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

/// What touching an edge does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeRole {
    /// Reflect the velocity component across the edge
    Bounce,
    /// `conceded` loses the rally
    Goal { conceded: Side },
}

/// Role of `edge` in `mode`
pub fn edge_role(mode: GameMode, edge: Edge) -> EdgeRole {
    match (mode, edge) {
        (_, Edge::Top) => EdgeRole::Bounce,
        (GameMode::Pong, Edge::Bottom) => EdgeRole::Bounce,
        (GameMode::Pong, Edge::Left) => EdgeRole::Goal {
            conceded: Side::Player,
        },
        (GameMode::Pong, Edge::Right) => EdgeRole::Goal {
            conceded: Side::Opponent,
        },
        (GameMode::Breakout, Edge::Bottom) => EdgeRole::Goal {
            conceded: Side::Player,
        },
        (GameMode::Breakout, Edge::Left | Edge::Right) => EdgeRole::Bounce,
    }
}

/// Whether `ball` is within its own size of `edge`
pub fn touches_edge(ball: &Entity, edge: Edge, canvas_width: f64, canvas_height: f64) -> bool {
    let pos = ball.position;
    let size = ball.size;
    match edge {
        Edge::Top => near(pos.y, size.height, 0.0),
        Edge::Bottom => near(pos.y + size.height, size.height, canvas_height),
        Edge::Left => near(pos.x, size.width, 0.0),
        Edge::Right => near(pos.x + size.width, size.width, canvas_width),
    }
}

/// Whether `velocity` carries the ball toward `edge`
fn approaching(velocity: DVec2, edge: Edge) -> bool {
    match edge {
        Edge::Top => velocity.y < 0.0,
        Edge::Bottom => velocity.y > 0.0,
        Edge::Left => velocity.x < 0.0,
        Edge::Right => velocity.x > 0.0,
    }
}

/// Wall bounces and goals
///
/// Only the first edge in [`Edge::PRECEDENCE`] that applies is resolved. A
/// bounce edge applies while the ball is in contact and still heading into
/// it; a goal edge applies on contact.
pub fn resolve_court_collisions(state: GameState, config: &GameConfig) -> GameState {
    let hit = Edge::PRECEDENCE.into_iter().find_map(|edge| {
        if !touches_edge(&state.ball, edge, config.canvas_width, config.canvas_height) {
            return None;
        }
        match edge_role(config.mode, edge) {
            EdgeRole::Bounce if !approaching(state.ball.velocity, edge) => None,
            role => Some((edge, role)),
        }
    });

    match hit {
        None => state,
        Some((edge, EdgeRole::Bounce)) => {
            let v = state.ball.velocity;
            let reflected = match edge {
                Edge::Top | Edge::Bottom => DVec2::new(v.x, -v.y),
                Edge::Left | Edge::Right => DVec2::new(-v.x, v.y),
            };
            GameState {
                ball: state.ball.with_velocity(reflected),
                ..state
            }
        }
        Some((_, EdgeRole::Goal { conceded })) => concede(state, conceded, config),
    }
}

/// Award the rally, re-serve toward the side that lost it and check for game over
fn concede(state: GameState, conceded: Side, config: &GameConfig) -> GameState {
    let tallied = match config.mode {
        GameMode::Pong => {
            let mut tallied = state;
            match conceded {
                Side::Player => tallied.opponent_score += 1,
                Side::Opponent => tallied.score += 1,
            }
            log::debug!(
                "{:?} scored at tick {}: {} - {}",
                conceded.opposite(),
                tallied.time,
                tallied.score,
                tallied.opponent_score
            );
            tallied
        }
        GameMode::Breakout => {
            let lives = state.lives.saturating_sub(1);
            log::debug!("Life lost at tick {}: {} remaining", state.time, lives);
            GameState { lives, ..state }
        }
    };
    let mut next = tallied.serve_toward(conceded, config);

    let outcome = match config.mode {
        GameMode::Pong => {
            let scorer = conceded.opposite();
            let points = match scorer {
                Side::Player => next.score,
                Side::Opponent => next.opponent_score,
            };
            (points >= config.winning_score).then_some(Outcome::Winner(scorer))
        }
        GameMode::Breakout => (next.lives == 0).then_some(Outcome::OutOfLives),
    };
    if let Some(outcome) = outcome {
        log::info!("Game over at tick {}: {:?}", next.time, outcome);
        next.play_state = PlayState::GameOver;
        next.outcome = Some(outcome);
    }
    next
}

/// How a paddle sends the ball back
#[derive(Debug, Clone, Copy)]
struct PaddleFace {
    /// Paddle moves along y (Pong) rather than x (Breakout)
    upright: bool,
    /// Bearing straight back across the court
    away_bearing: f64,
    /// +1 when a positive offset turns the bearing clockwise
    turn: f64,
}

impl PaddleFace {
    fn for_side(mode: GameMode, side: Side) -> Self {
        match (mode, side) {
            // Left paddle: hits above centre go up-right
            (GameMode::Pong, Side::Player) => Self {
                upright: true,
                away_bearing: 90.0,
                turn: -1.0,
            },
            // Right paddle: hits above centre go up-left
            (GameMode::Pong, Side::Opponent) => Self {
                upright: true,
                away_bearing: 270.0,
                turn: 1.0,
            },
            // Bottom paddle: hits left of centre go up-left
            (GameMode::Breakout, _) => Self {
                upright: false,
                away_bearing: 0.0,
                turn: -1.0,
            },
        }
    }

    /// Ball heading into this paddle's side of the court
    fn incoming(&self, velocity: DVec2) -> bool {
        if !self.upright {
            velocity.y > 0.0
        } else if self.away_bearing < 180.0 {
            velocity.x < 0.0
        } else {
            velocity.x > 0.0
        }
    }
}

/// Where along the paddle the ball struck, roughly `[-1, 1]`
///
/// Measured from the paddle centre to the ball's far edge along the paddle's
/// axis; positive when the ball is above (or left of) centre.
pub fn hit_proportion(ball: &Entity, paddle: &Entity, upright: bool) -> f64 {
    if upright {
        let half = paddle.size.height / 2.0;
        (paddle.position.y + half - (ball.position.y + ball.size.height)) / half
    } else {
        let half = paddle.size.width / 2.0;
        (paddle.position.x + half - (ball.position.x + ball.size.width)) / half
    }
}

/// Ball velocity after striking `paddle`
///
/// The direction swings up to `max_bounce_angle` off the straight return in
/// proportion to the hit offset, and the speed is multiplied by
/// `1 + |proportion| / 2`, then held under `max_ball_speed` when one is set.
pub fn paddle_bounce_velocity(
    ball: &Entity,
    paddle: &Entity,
    side: Side,
    config: &GameConfig,
) -> DVec2 {
    let face = PaddleFace::for_side(config.mode, side);
    let proportion = hit_proportion(ball, paddle, face.upright);
    let bounce_angle = proportion * config.max_bounce_angle;
    let bearing = face.away_bearing + face.turn * bounce_angle;
    let boost = 1.0 + proportion.abs() / 2.0;
    let speed = ball.velocity.length() * boost;
    let speed = config.max_ball_speed.map_or(speed, |cap| speed.min(cap));
    unit_vector_in_direction(bearing) * speed
}

/// Bounce the ball off whichever paddle it is driving into
///
/// Only velocity changes; a ball already heading away is left alone so one
/// hit cannot trigger twice.
pub fn resolve_paddle_collisions(state: GameState, config: &GameConfig) -> GameState {
    let paddles = [
        Some((Side::Player, &state.player)),
        state.opponent.as_ref().map(|p| (Side::Opponent, p)),
    ];
    let velocity = paddles.into_iter().flatten().find_map(|(side, paddle)| {
        let face = PaddleFace::for_side(config.mode, side);
        (face.incoming(state.ball.velocity) && state.ball.overlaps(paddle))
            .then(|| paddle_bounce_velocity(&state.ball, paddle, side, config))
    });

    match velocity {
        Some(velocity) => GameState {
            ball: state.ball.with_velocity(velocity),
            ..state
        },
        None => state,
    }
}

/// Penetration depth of `a` into `b` on each axis
fn penetration(a: &Entity, b: &Entity) -> DVec2 {
    let x = (a.position.x + a.size.width).min(b.position.x + b.size.width)
        - a.position.x.max(b.position.x);
    let y = (a.position.y + a.size.height).min(b.position.y + b.size.height)
        - a.position.y.max(b.position.y);
    DVec2::new(x, y)
}

/// Destroy every brick the ball overlaps and bounce it once
///
/// The bounce flips the axis with the shallower penetration into the first
/// brick hit (vertical on a tie). Clearing the last brick ends the game.
pub fn resolve_brick_collisions(state: GameState) -> GameState {
    let (hit, remaining): (Vec<_>, Vec<_>) = state
        .bricks
        .iter()
        .cloned()
        .partition(|brick| state.ball.overlaps(&brick.entity));
    let Some(first) = hit.first() else {
        return state;
    };

    let depth = penetration(&state.ball, &first.entity);
    let v = state.ball.velocity;
    let reflected = if depth.x < depth.y {
        DVec2::new(-v.x, v.y)
    } else {
        DVec2::new(v.x, -v.y)
    };
    let points: u32 = hit.iter().map(|b| b.point_value).sum();
    log::debug!(
        "Ball broke {} brick(s) for {} points at tick {}",
        hit.len(),
        points,
        state.time
    );

    let mut next = GameState {
        ball: state.ball.with_velocity(reflected),
        bricks: remaining,
        score: state.score + points,
        ..state
    };
    if next.bricks.is_empty() && next.outcome.is_none() {
        log::info!("Game over at tick {}: every brick cleared", next.time);
        next.play_state = PlayState::GameOver;
        next.outcome = Some(Outcome::Cleared);
    }
    next
}

/// AI paddle velocity for this tick
///
/// Chases the ball vertically at a fixed speed while the ball is on the AI's
/// half and moving toward it; otherwise stands still.
pub fn track_ball(paddle: &Entity, ball: &Entity, config: &GameConfig) -> Entity {
    let ball_center = ball.center();
    let on_ai_half = ball_center.x > config.canvas_width / 2.0;
    let incoming = ball.velocity.x > 0.0;
    let dy = ball_center.y - paddle.center().y;

    let velocity = if on_ai_half && incoming && dy != 0.0 {
        DVec2::new(0.0, config.ai_paddle_speed * dy.signum())
    } else {
        DVec2::ZERO
    };
    paddle.with_velocity(velocity)
}

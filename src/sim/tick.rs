//! Message reducer
//!
//! Folds one input or tick message over a state to produce the next state.
//! Messages are applied strictly one at a time; each call returns a complete
//! snapshot and leaves its input untouched.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::collision::{
    resolve_brick_collisions, resolve_court_collisions, resolve_paddle_collisions, track_ball,
};
use super::state::{GameState, PlayState};
use crate::error::ConfigError;
use crate::settings::{GameConfig, GameMode};

/// Screen direction of a movement key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Exact unit vector for this direction (+y is down)
    pub fn unit(self) -> DVec2 {
        match self {
            Direction::Up => DVec2::new(0.0, -1.0),
            Direction::Down => DVec2::new(0.0, 1.0),
            Direction::Left => DVec2::new(-1.0, 0.0),
            Direction::Right => DVec2::new(1.0, 0.0),
        }
    }

    /// Whether this direction runs along y
    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" => Some(Direction::Up),
            "down" => Some(Direction::Down),
            "left" => Some(Direction::Left),
            "right" => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Player paddle input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Movement {
    /// Key pressed: paddle velocity becomes full speed in this direction
    Start(Direction),
    /// Key released: the matching full-speed velocity is subtracted
    Stop(Direction),
    /// Pointer: paddle moved straight to this coordinate along its axis
    Position(f64),
}

/// Everything the reducer accepts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Message {
    /// One simulation step; `elapsed` is the tick source's count
    Tick { elapsed: u64 },
    Move(Movement),
    /// Toggle between play and pause
    Pause,
    /// Start over after a game has ended
    Restart,
}

/// Pure state transition function bound to one configuration and seed
#[derive(Debug, Clone)]
pub struct Reducer {
    config: GameConfig,
    seed: u32,
    initial: GameState,
}

impl Reducer {
    /// Validate `config` and prepare the initial state for `seed`
    pub fn new(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let initial = GameState::new(&config, seed);
        log::info!(
            "New {} game with seed {} ({}x{} canvas)",
            config.mode.as_str(),
            seed,
            config.canvas_width,
            config.canvas_height
        );
        Ok(Self {
            config,
            seed,
            initial,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Seed the sequence restarts from
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// The documented starting state; `Restart` returns exactly this
    pub fn initial_state(&self) -> GameState {
        self.initial.clone()
    }

    /// Apply one message
    pub fn reduce(&self, state: &GameState, message: &Message) -> GameState {
        match *message {
            Message::Tick { elapsed } => match state.play_state {
                PlayState::Play => self.step(state.clone(), elapsed),
                PlayState::Pause | PlayState::GameOver => state.clone(),
            },
            Message::Move(movement) => self.apply_movement(state, movement),
            Message::Pause => {
                let play_state = match state.play_state {
                    PlayState::Play => PlayState::Pause,
                    PlayState::Pause => PlayState::Play,
                    PlayState::GameOver => PlayState::GameOver,
                };
                log::trace!("Pause toggled: {:?} -> {:?}", state.play_state, play_state);
                GameState {
                    play_state,
                    ..state.clone()
                }
            }
            Message::Restart => {
                if state.is_over() {
                    log::info!(
                        "Restarting {} game with seed {}",
                        self.config.mode.as_str(),
                        self.seed
                    );
                    self.initial_state()
                } else {
                    log::trace!("Restart ignored while {:?}", state.play_state);
                    state.clone()
                }
            }
        }
    }

    /// Advance the world one tick
    fn step(&self, state: GameState, elapsed: u64) -> GameState {
        let config = &self.config;
        let (w, h) = (config.canvas_width, config.canvas_height);

        // AI picks its velocity before anything moves so it applies this tick
        let opponent = state
            .opponent
            .as_ref()
            .map(|ai| track_ball(ai, &state.ball, config).moved(w, h));
        let moved = GameState {
            time: elapsed,
            player: state.player.moved(w, h),
            opponent,
            ball: state.ball.moved(w, h),
            ..state
        };

        let resolved = resolve_paddle_collisions(resolve_court_collisions(moved, config), config);
        match config.mode {
            GameMode::Pong => resolved,
            GameMode::Breakout => resolve_brick_collisions(resolved),
        }
    }

    fn apply_movement(&self, state: &GameState, movement: Movement) -> GameState {
        let config = &self.config;
        // Pong paddles slide along y, the Breakout paddle along x
        let vertical = config.mode == GameMode::Pong;
        let player = &state.player;

        let player = match movement {
            Movement::Start(direction) | Movement::Stop(direction)
                if direction.is_vertical() != vertical =>
            {
                log::trace!("Ignoring {direction:?} for {} paddle", config.mode.as_str());
                return state.clone();
            }
            Movement::Start(direction) => {
                player.with_velocity(direction.unit() * config.paddle_speed)
            }
            Movement::Stop(direction) => {
                player.with_velocity(player.velocity - direction.unit() * config.paddle_speed)
            }
            Movement::Position(coordinate) => {
                let target = if vertical {
                    DVec2::new(player.position.x, coordinate)
                } else {
                    DVec2::new(coordinate, player.position.y)
                };
                player.placed_at(target, config.canvas_width, config.canvas_height)
            }
        };

        GameState {
            player,
            ..state.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Outcome;

    fn pong() -> Reducer {
        Reducer::new(GameConfig::pong(), 12345).unwrap()
    }

    fn fold(reducer: &Reducer, state: GameState, messages: &[Message]) -> GameState {
        messages
            .iter()
            .fold(state, |state, message| reducer.reduce(&state, message))
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GameConfig {
            canvas_height: 0.0,
            ..GameConfig::pong()
        };
        assert!(Reducer::new(config, 1).is_err());
    }

    #[test]
    fn test_tick_moves_ball_and_sets_time() {
        let reducer = pong();
        let state = reducer.initial_state();
        let next = reducer.reduce(&state, &Message::Tick { elapsed: 1 });
        assert_eq!(next.time, 1);
        assert_eq!(next.ball.position, state.ball.position + state.ball.velocity);
        // Input snapshot untouched
        assert_eq!(state, reducer.initial_state());
    }

    #[test]
    fn test_tick_pause() {
        let reducer = pong();
        let state = reducer.reduce(&reducer.initial_state(), &Message::Pause);
        assert_eq!(state.play_state, PlayState::Pause);

        let ticks = [Message::Tick { elapsed: 1 }, Message::Tick { elapsed: 2 }];
        let ticked = fold(&reducer, state.clone(), &ticks);
        assert_eq!(ticked, state);

        let resumed = reducer.reduce(&ticked, &Message::Pause);
        assert_eq!(resumed.play_state, PlayState::Play);
    }

    #[test]
    fn test_pause_and_ticks_ignored_after_game_over() {
        let reducer = pong();
        let over = GameState {
            play_state: PlayState::GameOver,
            outcome: Some(Outcome::Winner(crate::sim::Side::Player)),
            ..reducer.initial_state()
        };
        assert_eq!(reducer.reduce(&over, &Message::Pause), over);
        assert_eq!(reducer.reduce(&over, &Message::Tick { elapsed: 9 }), over);
    }

    #[test]
    fn test_restart_only_from_game_over() {
        let reducer = pong();
        let played = fold(
            &reducer,
            reducer.initial_state(),
            &[Message::Tick { elapsed: 1 }, Message::Tick { elapsed: 2 }],
        );
        assert_eq!(reducer.reduce(&played, &Message::Restart), played);

        let over = GameState {
            play_state: PlayState::GameOver,
            score: 7,
            ..played
        };
        assert_eq!(reducer.reduce(&over, &Message::Restart), reducer.initial_state());
    }

    #[test]
    fn test_key_press_and_release_cancel() {
        let reducer = pong();
        let state = reducer.initial_state();
        let pressed = reducer.reduce(&state, &Message::Move(Movement::Start(Direction::Up)));
        assert_eq!(pressed.player.velocity, DVec2::new(0.0, -5.0));

        let moved = reducer.reduce(&pressed, &Message::Tick { elapsed: 1 });
        assert_eq!(moved.player.position.y, state.player.position.y - 5.0);

        let released = reducer.reduce(&moved, &Message::Move(Movement::Stop(Direction::Up)));
        assert_eq!(released.player.velocity, DVec2::ZERO);
    }

    #[test]
    fn test_release_subtracts_even_when_unpaired() {
        let reducer = pong();
        let state = fold(
            &reducer,
            reducer.initial_state(),
            &[
                Message::Move(Movement::Start(Direction::Up)),
                Message::Move(Movement::Start(Direction::Down)),
                Message::Move(Movement::Stop(Direction::Up)),
            ],
        );
        // Down replaced Up, then Up's vector was subtracted
        assert_eq!(state.player.velocity, DVec2::new(0.0, 10.0));
    }

    #[test]
    fn test_off_axis_keys_ignored() {
        let reducer = pong();
        let state = reducer.initial_state();
        let next = reducer.reduce(&state, &Message::Move(Movement::Start(Direction::Left)));
        assert_eq!(next, state);

        let breakout = Reducer::new(GameConfig::breakout(), 1).unwrap();
        let state = breakout.initial_state();
        let next = breakout.reduce(&state, &Message::Move(Movement::Start(Direction::Up)));
        assert_eq!(next, state);
        let next = breakout.reduce(&state, &Message::Move(Movement::Start(Direction::Left)));
        assert_eq!(next.player.velocity, DVec2::new(-5.0, 0.0));
    }

    #[test]
    fn test_pointer_position_is_clamped() {
        let reducer = pong();
        let state = reducer.initial_state();
        let next = reducer.reduce(&state, &Message::Move(Movement::Position(1000.0)));
        assert_eq!(next.player.position, DVec2::new(15.0, 500.0));
        let next = reducer.reduce(&state, &Message::Move(Movement::Position(-20.0)));
        assert_eq!(next.player.position.y, 0.0);

        let breakout = Reducer::new(GameConfig::breakout(), 1).unwrap();
        let state = breakout.initial_state();
        let next = breakout.reduce(&state, &Message::Move(Movement::Position(120.0)));
        assert_eq!(next.player.position, DVec2::new(120.0, 775.0));
    }

    #[test]
    fn test_movement_accepted_while_paused() {
        let reducer = pong();
        let paused = reducer.reduce(&reducer.initial_state(), &Message::Pause);
        let next = reducer.reduce(&paused, &Message::Move(Movement::Position(10.0)));
        assert_eq!(next.player.position.y, 10.0);
        assert_eq!(next.play_state, PlayState::Pause);
    }

    #[test]
    fn test_ai_moves_same_tick_it_decides() {
        let reducer = pong();
        let mut state = reducer.initial_state();
        state.ball.position = DVec2::new(400.0, 100.0);
        state.ball.velocity = DVec2::new(3.0, 0.0);
        let before = state.opponent.as_ref().unwrap().position.y;
        let next = reducer.reduce(&state, &Message::Tick { elapsed: 1 });
        let ai = next.opponent.as_ref().unwrap();
        assert_eq!(ai.velocity, DVec2::new(0.0, -4.0));
        assert_eq!(ai.position.y, before - 4.0);
    }

    #[test]
    fn test_determinism() {
        let a = pong();
        let b = pong();
        let messages: Vec<Message> = (1..=500)
            .map(|t| match t % 50 {
                10 => Message::Move(Movement::Start(Direction::Down)),
                30 => Message::Move(Movement::Stop(Direction::Down)),
                _ => Message::Tick { elapsed: t },
            })
            .collect();
        let end_a = fold(&a, a.initial_state(), &messages);
        let end_b = fold(&b, b.initial_state(), &messages);
        assert_eq!(end_a, end_b);
        assert_eq!(end_a.ball.position.x.to_bits(), end_b.ball.position.x.to_bits());
    }

    #[test]
    fn test_direction_from_str() {
        assert_eq!(Direction::from_str("Up"), Some(Direction::Up));
        assert_eq!(Direction::from_str("sideways"), None);
    }
}

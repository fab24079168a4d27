//! Renderer-facing view of a game state
//!
//! Positions are rounded to whole canvas units so a display layer can place
//! elements without further arithmetic.

use serde::{Deserialize, Serialize};

use crate::sim::{Entity, EntityKind, GameState, Outcome, PlayState, Side};

/// One drawable rectangle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: String,
    pub kind: EntityKind,
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            id: entity.id.clone(),
            kind: entity.kind,
            x: entity.position.x.round() as i64,
            y: entity.position.y.round() as i64,
            width: entity.size.width.round() as i64,
            height: entity.size.height.round() as i64,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: u64,
    pub play_state: PlayState,
    pub score: u32,
    pub opponent_score: u32,
    pub lives: u32,
    pub outcome: Option<Outcome>,
    /// Player paddle first
    pub paddles: Vec<EntityView>,
    pub ball: EntityView,
    pub bricks: Vec<EntityView>,
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self {
            time: state.time,
            play_state: state.play_state,
            score: state.score,
            opponent_score: state.opponent_score,
            lives: state.lives,
            outcome: state.outcome,
            paddles: state.paddles().map(EntityView::from).collect(),
            ball: EntityView::from(&state.ball),
            bricks: state.bricks.iter().map(|b| EntityView::from(&b.entity)).collect(),
        }
    }
}

impl Snapshot {
    /// Whether the pause indicator should be visible
    pub fn show_pause(&self) -> bool {
        self.play_state == PlayState::Pause
    }

    /// Game-over banner text, if the game has ended
    pub fn game_over_text(&self) -> Option<String> {
        self.outcome.map(|outcome| match outcome {
            Outcome::Winner(Side::Player) => "Game Over! Player Wins!".to_string(),
            Outcome::Winner(Side::Opponent) => "Game Over! Computer Wins!".to_string(),
            Outcome::OutOfLives => format!("Game Over! Final Score: {}", self.score),
            Outcome::Cleared => format!("You Win! Final Score: {}", self.score),
        })
    }
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed logical tick only
//! - Seeded sequence only
//! - Stable iteration order (bricks keep layout order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod sequence;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{
    near, resolve_brick_collisions, resolve_court_collisions, resolve_paddle_collisions,
    track_ball,
};
pub use entity::{Brick, Entity, EntityKind, Size, clamp_to_bounds};
pub use sequence::{SequenceCursor, int_between, normalized_float};
pub use state::{GameState, Outcome, PlayState, Side};
pub use tick::{Direction, Message, Movement, Reducer};
pub use vector::{Vector, VectorExt, unit_vector_in_direction};

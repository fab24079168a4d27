//! Movable rectangles: balls, paddles and bricks
//!
//! Every transition here is pure. An entity is never updated in place by the
//! simulation; each step derives a fresh value that replaces the old one in
//! the owning [`GameState`](super::GameState).

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::sequence::int_between;
use super::vector::{Vector, unit_vector_in_direction};

/// Half-width of the serve cone, degrees either side of the base bearing
pub const SERVE_SPREAD_DEGREES: i32 = 60;
/// Slowest serve speed (canvas units per tick)
pub const SERVE_MIN_SPEED: i32 = 3;
/// Fastest serve speed (canvas units per tick)
pub const SERVE_MAX_SPEED: i32 = 8;

/// What an entity is drawn as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Ball,
    Paddle,
    Brick,
}

/// Width and height of an entity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned moving rectangle
///
/// `position` is the top-left corner and always lies in
/// `[0, canvas - size]` on both axes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub kind: EntityKind,
    pub size: Size,
    pub position: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
}

impl Entity {
    /// Create an entity at rest
    pub fn new(
        id: impl Into<String>,
        kind: EntityKind,
        position: Vector,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            size: Size::new(width, height),
            position,
            velocity: DVec2::ZERO,
            acceleration: DVec2::ZERO,
        }
    }

    /// Centre of the rectangle
    #[inline]
    pub fn center(&self) -> Vector {
        self.position + DVec2::new(self.size.width, self.size.height) * 0.5
    }

    /// Apply velocity to position (clamped to the canvas) and acceleration to velocity
    #[must_use]
    pub fn moved(&self, canvas_width: f64, canvas_height: f64) -> Self {
        let next = self.position + self.velocity;
        Self {
            position: DVec2::new(
                clamp_to_bounds(next.x, self.size.width, canvas_width),
                clamp_to_bounds(next.y, self.size.height, canvas_height),
            ),
            velocity: self.velocity + self.acceleration,
            ..self.clone()
        }
    }

    /// Copy of this entity with a new velocity
    #[must_use]
    pub fn with_velocity(&self, velocity: Vector) -> Self {
        Self {
            velocity,
            ..self.clone()
        }
    }

    /// Copy of this entity moved to `position`, clamped to the canvas
    #[must_use]
    pub fn placed_at(&self, position: Vector, canvas_width: f64, canvas_height: f64) -> Self {
        Self {
            position: DVec2::new(
                clamp_to_bounds(position.x, self.size.width, canvas_width),
                clamp_to_bounds(position.y, self.size.height, canvas_height),
            ),
            ..self.clone()
        }
    }

    /// Strict axis-aligned overlap; shared edges do not count
    pub fn overlaps(&self, other: &Entity) -> bool {
        self.position.x < other.position.x + other.size.width
            && self.position.y < other.position.y + other.size.height
            && other.position.x < self.position.x + self.size.width
            && other.position.y < self.position.y + self.size.height
    }

    /// Put the entity back at the canvas centre with a randomized launch
    ///
    /// The bearing is drawn from `base_bearing ± 60°` using `random1` and the
    /// speed from `[3, 8]` using `random2`. Acceleration is cleared.
    #[must_use]
    pub fn served(
        &self,
        base_bearing: i32,
        random1: u32,
        random2: u32,
        canvas_width: f64,
        canvas_height: f64,
    ) -> Self {
        let bearing = int_between(
            base_bearing - SERVE_SPREAD_DEGREES,
            base_bearing + SERVE_SPREAD_DEGREES,
            random1,
        );
        let speed = int_between(SERVE_MIN_SPEED, SERVE_MAX_SPEED, random2);
        Self {
            position: DVec2::new(canvas_width / 2.0, canvas_height / 2.0),
            velocity: unit_vector_in_direction(f64::from(bearing)) * f64::from(speed),
            acceleration: DVec2::ZERO,
            ..self.clone()
        }
    }

    /// Whether the whole rectangle lies on the canvas
    pub fn within_bounds(&self, canvas_width: f64, canvas_height: f64) -> bool {
        self.position.x >= 0.0
            && self.position.y >= 0.0
            && self.position.x + self.size.width <= canvas_width
            && self.position.y + self.size.height <= canvas_height
    }
}

/// Clamp a single-axis position so `[pos, pos + entity_size]` stays on the canvas
#[inline]
pub fn clamp_to_bounds(pos: f64, entity_size: f64, canvas_size: f64) -> f64 {
    if pos < 0.0 {
        0.0
    } else if pos + entity_size > canvas_size {
        canvas_size - entity_size
    } else {
        pos
    }
}

/// A destructible brick worth `point_value` when hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub entity: Entity,
    pub point_value: u32,
}

impl Brick {
    pub fn new(
        id: impl Into<String>,
        position: Vector,
        width: f64,
        height: f64,
        point_value: u32,
    ) -> Self {
        Self {
            entity: Entity::new(id, EntityKind::Brick, position, width, height),
            point_value,
        }
    }
}

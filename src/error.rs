//! Configuration errors
//!
//! The simulation itself cannot fail once constructed. Everything that could
//! make a step ill-defined (zero-sized canvas, a paddle that does not fit) is
//! rejected here, before the first state exists.

use thiserror::Error;

/// A game configuration that cannot be simulated
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive finite number, got {value}")]
    NonPositive { field: &'static str, value: f64 },

    #[error("{what} needs {extent} units but only {available} are available")]
    DoesNotFit {
        what: &'static str,
        extent: f64,
        available: f64,
    },

    #[error("max bounce angle must lie in (0, 90) degrees, got {0}")]
    BounceAngleOutOfRange(f64),

    #[error("max ball speed {cap} is below the fastest serve speed {serve}")]
    SpeedCapBelowServe { cap: f64, serve: f64 },

    #[error("winning score must be at least 1")]
    ZeroWinningScore,

    #[error("starting lives must be at least 1")]
    ZeroLives,

    #[error("brick layout has no bricks")]
    EmptyBrickGrid,

    #[error("brick layout needs at least one row point value")]
    MissingRowPoints,

    #[error("tick interval must be at least 1 ms")]
    ZeroTickInterval,

    #[error("invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

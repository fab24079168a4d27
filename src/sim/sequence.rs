//! Deterministic pseudo-random sequence
//!
//! A restartable linear congruential stream. The cursor is a plain `Copy`
//! value: advancing returns a new cursor and never touches the old one, so
//! any saved cursor replays the same values forever.

use serde::{Deserialize, Serialize};

/// Modulus, 2^31
pub const MODULUS: u64 = 1 << 31;
/// Multiplier
pub const MULTIPLIER: u64 = 1_103_515_245;
/// Increment
pub const INCREMENT: u64 = 12_345;

/// Immutable position in the pseudo-random stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SequenceCursor {
    value: u32,
}

impl SequenceCursor {
    /// Start a stream at `seed` (reduced into `[0, 2^31)`)
    pub fn seed(seed: u32) -> Self {
        Self {
            value: (u64::from(seed) % MODULUS) as u32,
        }
    }

    /// Current value in `[0, 2^31 - 1]`
    #[inline]
    pub fn value(self) -> u32 {
        self.value
    }

    /// The following cursor
    #[must_use]
    pub fn next(self) -> Self {
        let x = (MULTIPLIER * u64::from(self.value) + INCREMENT) % MODULUS;
        Self { value: x as u32 }
    }

    /// Advance `steps` times
    #[must_use]
    pub fn advance(self, steps: usize) -> Self {
        (0..steps).fold(self, |cursor, _| cursor.next())
    }
}

/// Map a sequence value onto `[0, 1]`
#[inline]
pub fn normalized_float(x: u32) -> f64 {
    f64::from(x) / (MODULUS - 1) as f64
}

/// Map a sequence value onto the inclusive integer range `[min, max]`
///
/// The top sequence value (`2^31 - 1`) normalizes to exactly 1.0, which the
/// raw formula would turn into `max + 1`; it is folded back onto `max`.
pub fn int_between(min: i32, max: i32, x: u32) -> i32 {
    let span = f64::from(max) - f64::from(min) + 1.0;
    let raw = (normalized_float(x) * span + f64::from(min)).floor() as i32;
    raw.min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_recurrence_matches_formula() {
        let c = SequenceCursor::seed(42);
        assert_eq!(c.value(), 42);
        let expected1 = (1_103_515_245u64 * 42 + 12_345) % (1u64 << 31);
        assert_eq!(u64::from(c.next().value()), expected1);
        let expected2 = (1_103_515_245u64 * expected1 + 12_345) % (1u64 << 31);
        assert_eq!(u64::from(c.next().next().value()), expected2);
    }

    #[test]
    fn test_known_values_for_seed_42() {
        // Exact integer arithmetic, independent of platform
        let c = SequenceCursor::seed(42);
        assert_eq!(c.next().value(), 1_250_496_027);
        assert_eq!(c.next().next().value(), 1_116_302_264);
    }

    #[test]
    fn test_next_has_no_hidden_state() {
        let c = SequenceCursor::seed(7);
        assert_eq!(c.next(), c.next());
        assert_eq!(c.advance(3), c.next().next().next());
        assert_eq!(c.advance(0), c);
    }

    #[test]
    fn test_seed_reduced_into_range() {
        assert_eq!(SequenceCursor::seed(u32::MAX).value(), u32::MAX >> 1);
    }

    #[test]
    fn test_int_between_edges() {
        assert_eq!(int_between(3, 8, 0), 3);
        assert_eq!(int_between(3, 8, (MODULUS - 1) as u32), 8);
        assert_eq!(int_between(210, 330, 0), 210);
        assert_eq!(int_between(-5, 5, (MODULUS / 2) as u32), 0);
    }

    proptest! {
        #[test]
        fn prop_values_stay_below_modulus(seed in any::<u32>(), steps in 0usize..64) {
            let c = SequenceCursor::seed(seed).advance(steps);
            prop_assert!(u64::from(c.value()) < MODULUS);
        }

        #[test]
        fn prop_int_between_is_inclusive(
            x in 0u32..(1u32 << 31),
            min in -400i32..400,
            width in 0i32..200,
        ) {
            let max = min + width;
            let v = int_between(min, max, x);
            prop_assert!(v >= min && v <= max);
        }
    }
}

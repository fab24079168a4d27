//! Screen-space vector helpers
//!
//! Vectors are plain `glam::DVec2` values, so `+`, `-`, `* scalar` and
//! `length()` come from glam and always return new values. This module adds
//! the bearing-based operations the games need. Bearings are degrees measured
//! clockwise from "up" in screen coordinates, where +y points down: 0 is up,
//! 90 is right, 180 is down, 270 is left.

use glam::DVec2;

/// 2D vector in canvas units
pub type Vector = DVec2;

/// The "up" unit vector that bearings rotate from
pub const UP: Vector = DVec2::new(0.0, -1.0);

/// Bearing-aware operations on [`Vector`]
pub trait VectorExt: Sized {
    /// Scale each axis independently
    fn scale_axes(self, sx: f64, sy: f64) -> Self;

    /// Vector orthogonal to this one, `(y, -x)`
    fn orthogonal(self) -> Self;

    /// Rotate clockwise (on screen) by `degrees`
    fn rotate_degrees(self, degrees: f64) -> Self;

    /// Bearing of this vector in `[0, 360)`
    fn bearing_degrees(self) -> f64;
}

impl VectorExt for Vector {
    #[inline]
    fn scale_axes(self, sx: f64, sy: f64) -> Self {
        DVec2::new(self.x * sx, self.y * sy)
    }

    #[inline]
    fn orthogonal(self) -> Self {
        DVec2::new(self.y, -self.x)
    }

    fn rotate_degrees(self, degrees: f64) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        DVec2::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    fn bearing_degrees(self) -> f64 {
        // atan2 of (x, -y) measures clockwise from up
        self.x.atan2(-self.y).to_degrees().rem_euclid(360.0)
    }
}

/// Unit vector pointing along `bearing` degrees
#[inline]
pub fn unit_vector_in_direction(bearing: f64) -> Vector {
    UP.rotate_degrees(bearing)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vector, b: Vector) -> bool {
        (a - b).length() < 1e-9
    }

    #[test]
    fn test_cardinal_bearings() {
        assert!(approx(unit_vector_in_direction(0.0), DVec2::new(0.0, -1.0)));
        assert!(approx(unit_vector_in_direction(90.0), DVec2::new(1.0, 0.0)));
        assert!(approx(unit_vector_in_direction(180.0), DVec2::new(0.0, 1.0)));
        assert!(approx(unit_vector_in_direction(270.0), DVec2::new(-1.0, 0.0)));
    }

    #[test]
    fn test_rotate_is_clockwise_on_screen() {
        // Right rotated a quarter turn clockwise points down (+y)
        let v = DVec2::new(1.0, 0.0).rotate_degrees(90.0);
        assert!(approx(v, DVec2::new(0.0, 1.0)));
    }

    #[test]
    fn test_bearing_round_trips_through_unit_vector() {
        for bearing in [0.0, 30.0, 135.0, 210.0, 330.0, 359.0] {
            let measured = unit_vector_in_direction(bearing).bearing_degrees();
            assert!((measured - bearing).abs() < 1e-9, "{bearing} -> {measured}");
        }
    }

    #[test]
    fn test_scale_axes_and_orthogonal() {
        let v = DVec2::new(2.0, -3.0);
        assert_eq!(v.scale_axes(2.0, 0.5), DVec2::new(4.0, -1.5));
        assert_eq!(v.orthogonal(), DVec2::new(-3.0, -2.0));
        assert_eq!(v.orthogonal().dot(v), 0.0);
    }

    #[test]
    fn test_glam_arithmetic_is_value_based() {
        let a = DVec2::new(3.0, 4.0);
        let b = DVec2::new(1.0, 1.0);
        assert_eq!(a + b, DVec2::new(4.0, 5.0));
        assert_eq!(a - b, DVec2::new(2.0, 3.0));
        assert_eq!(a * 2.0, DVec2::new(6.0, 8.0));
        assert_eq!(a.length(), 5.0);
        // Operands are untouched
        assert_eq!(a, DVec2::new(3.0, 4.0));
    }
}

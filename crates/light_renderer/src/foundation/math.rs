//! Math utilities and types
//!
//! Provides the small set of 2D math used by light geometry. Angles are in
//! degrees to match how gameplay code specifies rotations.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Angle of the vector `(dx, dy)` in degrees, normalized to `[0, 360)`.
///
/// Uses an exact `atan2` rather than a lookup-table approximation; seams
/// between capsule quads are visible at low precision. The zero vector has
/// no direction and yields `0.0`.
pub fn angle_exact(dx: f32, dy: f32) -> f32 {
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }

    let angle = dy.atan2(dx).to_degrees();
    if angle < 0.0 {
        angle + 360.0
    } else {
        angle
    }
}

/// Vector of the given length pointing along `degrees`, computed exactly
pub fn trns_exact(degrees: f32, length: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    Vec2::new(cos * length, sin * length)
}

/// Math constants
pub mod constants {
    /// Tolerance used when comparing light-space coordinates
    pub const EPSILON: f32 = 1e-5;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_angle_exact_axes() {
        assert_abs_diff_eq!(angle_exact(1.0, 0.0), 0.0);
        assert_abs_diff_eq!(angle_exact(0.0, 1.0), 90.0, epsilon = 1e-4);
        assert_abs_diff_eq!(angle_exact(-1.0, 0.0), 180.0, epsilon = 1e-4);
        assert_abs_diff_eq!(angle_exact(0.0, -1.0), 270.0, epsilon = 1e-4);
    }

    #[test]
    fn test_angle_exact_is_normalized() {
        let angle = angle_exact(1.0, -1.0);
        assert!((0.0..360.0).contains(&angle));
        assert_abs_diff_eq!(angle, 315.0, epsilon = 1e-4);
    }

    #[test]
    fn test_angle_exact_zero_vector() {
        assert_eq!(angle_exact(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_trns_exact() {
        let v = trns_exact(90.0, 2.0);
        assert_abs_diff_eq!(v.x, 0.0, epsilon = constants::EPSILON);
        assert_abs_diff_eq!(v.y, 2.0, epsilon = constants::EPSILON);

        let v = trns_exact(45.0, 2.0_f32.sqrt());
        assert_abs_diff_eq!(v.x, 1.0, epsilon = constants::EPSILON);
        assert_abs_diff_eq!(v.y, 1.0, epsilon = constants::EPSILON);
    }
}

//! Joint angle calculation using dot product
//!
//! Calculates the angle at a vertex joint (e.g. elbow, knee, hip) from
//! three tracked 2D positions in normalized image coordinates.

use nalgebra::Vector2;

/// Guard against division by zero when a joint pair collapses to a point
/// (occluded or mis-tracked landmarks).
const MAGNITUDE_EPSILON: f32 = 1e-7;

/// Calculate the angle at vertex `b` between rays b→a and b→c, in degrees
///
/// Uses the dot product formula: cos(θ) = (v1 · v2) / (|v1| × |v2|)
///
/// Returns a value in [0, 180]:
/// - 90° = joint bent at a right angle
/// - 180° = joint fully straight
///
/// Degenerate inputs (coincident joints) produce a large finite angle
/// instead of NaN, so a single bad detection never poisons the pipeline.
pub fn joint_angle(a: (f32, f32), b: (f32, f32), c: (f32, f32)) -> f32 {
    let v1 = Vector2::new(a.0 - b.0, a.1 - b.1);
    let v2 = Vector2::new(c.0 - b.0, c.1 - b.1);

    // Epsilon in the denominator keeps zero-length vectors finite.
    let cos_angle = v1.dot(&v2) / (v1.norm() * v2.norm() + MAGNITUDE_EPSILON);

    cos_angle.clamp(-1.0, 1.0).acos().to_degrees()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_limb() {
        // Joints in a straight line
        let angle = joint_angle((0.0, 0.0), (0.5, 0.0), (1.0, 0.0));
        assert!((angle - 180.0).abs() < 1.0);
    }

    #[test]
    fn test_right_angle() {
        let angle = joint_angle((0.0, 0.0), (0.5, 0.0), (0.5, 0.5));
        assert!((angle - 90.0).abs() < 1.0);
    }

    #[test]
    fn test_symmetric_in_outer_joints() {
        let a = (0.1, 0.8);
        let b = (0.4, 0.5);
        let c = (0.9, 0.7);
        assert!((joint_angle(a, b, c) - joint_angle(c, b, a)).abs() < 1e-4);
    }

    #[test]
    fn test_scale_and_translation_invariant() {
        let a = (0.1, 0.2);
        let b = (0.3, 0.3);
        let c = (0.6, 0.1);
        let base = joint_angle(a, b, c);

        let transform = |p: (f32, f32)| (p.0 * 3.0 + 0.25, p.1 * 3.0 - 0.5);
        let scaled = joint_angle(transform(a), transform(b), transform(c));
        assert!((base - scaled).abs() < 0.01);
    }

    #[test]
    fn test_degenerate_joints_stay_finite() {
        // All three joints coincide - must not produce NaN
        let angle = joint_angle((0.5, 0.5), (0.5, 0.5), (0.5, 0.5));
        assert!(angle.is_finite());
        assert!((0.0..=180.0).contains(&angle));
    }

    #[test]
    fn test_range_for_non_degenerate_inputs() {
        let angle = joint_angle((0.2, 0.9), (0.5, 0.4), (0.8, 0.85));
        assert!(angle > 0.0 && angle < 180.0);
    }
}

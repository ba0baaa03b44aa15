//! Local-space transform handed to the renderer once per body per frame.

use glam::{Mat4, Quat, Vec3};

/// Axis every body spins about.
pub const SPIN_AXIS: Vec3 = Vec3::Y;

/// Translation, uniform scale and spin of a body.
///
/// The renderer composes these as translate, then scale, then rotate about
/// [`SPIN_AXIS`]. Uniform scale commutes with the rotation, so the result is
/// a plain TRS matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Position relative to the world origin (the sun's centre).
    pub translation: Vec3,
    /// Uniform scale, equal to the body's physical radius.
    pub scale: f32,
    /// Rotation about [`SPIN_AXIS`] in radians.
    pub spin: f32,
}

impl Pose {
    pub fn new(translation: Vec3, scale: f32, spin: f32) -> Self {
        Self {
            translation,
            scale,
            spin,
        }
    }

    /// Spin rotation as a quaternion.
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(SPIN_AXIS, self.spin)
    }

    /// Model matrix for this pose.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            self.rotation(),
            self.translation,
        )
    }

    /// Same scale and spin, placed at `translation`.
    pub fn with_translation(self, translation: Vec3) -> Self {
        Self {
            translation,
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_identity_pose_is_identity_matrix() {
        let pose = Pose::new(Vec3::ZERO, 1.0, 0.0);
        assert!(pose.to_matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn test_matrix_applies_scale_then_spin_then_translation() {
        let pose = Pose::new(Vec3::new(10.0, 0.0, -3.0), 2.0, FRAC_PI_2);
        let m = pose.to_matrix();

        // +X scaled to 2, rotated a quarter turn about +Y lands on -Z.
        let p = m.transform_point3(Vec3::X);
        let expected = Vec3::new(10.0, 0.0, -5.0);
        assert!(p.abs_diff_eq(expected, 1e-5), "got {p}, expected {expected}");
    }

    #[test]
    fn test_spin_axis_is_fixed_point_of_rotation() {
        let pose = Pose::new(Vec3::ZERO, 1.0, 1.234);
        let up = pose.rotation() * SPIN_AXIS;
        assert!(up.abs_diff_eq(SPIN_AXIS, 1e-6));
    }

    #[test]
    fn test_with_translation_keeps_scale_and_spin() {
        let pose = Pose::new(Vec3::ONE, 0.27, 0.5).with_translation(Vec3::Z);
        assert_eq!(pose.translation, Vec3::Z);
        assert_eq!(pose.scale, 0.27);
        assert_eq!(pose.spin, 0.5);
    }
}

//! Rigid local poses produced by the animator.

use bevy::prelude::Transform;
use glam::{Quat, Vec3};
use serde::Serialize;

use crate::vector_math::euler_degrees;

/// Position and orientation of a node relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    /// Translation in parent space.
    pub position: Vec3,
    /// Orientation in parent space.
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Pose {
    /// The pose that leaves its child untouched.
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        rotation: Quat::IDENTITY,
    };

    /// Builds a pose from a position and Euler angles in degrees.
    #[must_use]
    pub fn from_euler_degrees(position: Vec3, angles: Vec3) -> Self {
        Self {
            position,
            rotation: euler_degrees(angles),
        }
    }

    /// Expresses `child`, given in this pose's local space, in this pose's
    /// parent space.
    ///
    /// # Examples
    /// ```
    /// use glam::{Quat, Vec3};
    /// use stride::Pose;
    /// let camera = Pose { position: Vec3::Y, rotation: Quat::from_rotation_y(std::f32::consts::PI) };
    /// let weapon = Pose { position: Vec3::NEG_Z, rotation: Quat::IDENTITY };
    /// let world = camera.compose(weapon);
    /// assert!(world.position.abs_diff_eq(Vec3::new(0.0, 1.0, 1.0), 1e-6));
    /// ```
    #[must_use]
    pub fn compose(self, child: Self) -> Self {
        Self {
            position: self.position + self.rotation * child.position,
            rotation: (self.rotation * child.rotation).normalize(),
        }
    }
}

impl From<Pose> for Transform {
    fn from(pose: Pose) -> Self {
        Self::from_translation(pose.position).with_rotation(pose.rotation)
    }
}

impl From<&Transform> for Pose {
    fn from(transform: &Transform) -> Self {
        Self {
            position: transform.translation,
            rotation: transform.rotation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_neutral_on_both_sides() {
        let pose = Pose::from_euler_degrees(Vec3::new(1.0, 2.0, 3.0), Vec3::new(10.0, 20.0, 30.0));
        let left = Pose::IDENTITY.compose(pose);
        let right = pose.compose(Pose::IDENTITY);
        assert!(left.position.abs_diff_eq(pose.position, 1e-6));
        assert!(right.rotation.abs_diff_eq(pose.rotation, 1e-6));
    }

    #[test]
    fn transform_conversion_keeps_unit_scale() {
        let pose = Pose::from_euler_degrees(Vec3::X, Vec3::new(0.0, 45.0, 0.0));
        let transform = Transform::from(pose);
        assert_eq!(transform.scale, Vec3::ONE);
        assert_eq!(Pose::from(&transform), pose);
    }
}

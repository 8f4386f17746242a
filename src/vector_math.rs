//! Basic vector math helper functions.
//! Euler conversions, symmetric clamps and the planar movement basis.
use glam::{EulerRot, Quat, Vec3};

/// Builds a rotation from Euler angles in degrees.
///
/// The angles are applied roll (Z) first, then pitch (X), then yaw (Y), so
/// `euler_degrees(Vec3::new(x, y, z))` equals `yaw * pitch * roll`.
///
/// # Examples
/// ```
/// use glam::{Quat, Vec3};
/// use stride::vector_math::euler_degrees;
/// let q = euler_degrees(Vec3::new(0.0, 90.0, 0.0));
/// assert!(q.abs_diff_eq(Quat::from_rotation_y(90_f32.to_radians()), 1e-6));
/// ```
#[must_use]
pub fn euler_degrees(angles: Vec3) -> Quat {
    Quat::from_euler(
        EulerRot::YXZ,
        angles.y.to_radians(),
        angles.x.to_radians(),
        angles.z.to_radians(),
    )
}

/// Clamps `value` into `[-limit, limit]`.
///
/// A negative or NaN `limit` collapses the range to zero.
///
/// # Examples
/// ```
/// use stride::vector_math::clamp_symmetric;
/// assert_eq!(clamp_symmetric(-0.2, 0.06), -0.06);
/// assert_eq!(clamp_symmetric(0.03, 0.06), 0.03);
/// ```
#[must_use]
pub fn clamp_symmetric(value: f32, limit: f32) -> f32 {
    let bound = if limit.is_nan() { 0.0 } else { limit.max(0.0) };
    value.clamp(-bound, bound)
}

/// Returns the unit `(right, forward)` pair of `rotation` projected onto the
/// horizontal plane.
///
/// Forward is the rotated `-Z` axis. Components that collapse when projected
/// (looking straight up or down) fall back to the unrotated axes.
///
/// # Examples
/// ```
/// use glam::{Quat, Vec3};
/// use stride::vector_math::planar_basis;
/// let (right, forward) = planar_basis(Quat::IDENTITY);
/// assert_eq!(right, Vec3::X);
/// assert_eq!(forward, Vec3::NEG_Z);
/// ```
#[must_use]
pub fn planar_basis(rotation: Quat) -> (Vec3, Vec3) {
    let flatten = |axis: Vec3, fallback: Vec3| {
        let projected = Vec3::new(axis.x, 0.0, axis.z);
        if projected.is_finite() {
            projected.try_normalize().unwrap_or(fallback)
        } else {
            fallback
        }
    };
    (
        flatten(rotation * Vec3::X, Vec3::X),
        flatten(rotation * Vec3::NEG_Z, Vec3::NEG_Z),
    )
}

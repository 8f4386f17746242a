//! Float and vector assertions with readable failure messages.

use glam::Vec3;

/// Assert that `actual` lies within `eps` of `expected` on every axis.
///
/// # Panics
/// Panics with both vectors when any component differs by more than `eps`.
///
/// # Examples
/// ```
/// use glam::Vec3;
/// use test_utils::assertions::assert_vec3_near;
/// assert_vec3_near(Vec3::new(1.0, 0.0, 0.0), Vec3::X, 1e-6);
/// ```
pub fn assert_vec3_near(actual: Vec3, expected: Vec3, eps: f32) {
    assert!(
        actual.abs_diff_eq(expected, eps),
        "expected {expected:?} ± {eps}, got {actual:?}"
    );
}

/// Assert that `values` strictly decrease.
///
/// # Panics
/// Panics naming the first index that fails to decrease.
pub fn assert_strictly_decreasing(values: &[f32]) {
    for (i, pair) in values.windows(2).enumerate() {
        assert!(
            pair[1] < pair[0],
            "value {} ({}) did not drop below {}",
            i + 1,
            pair[1],
            pair[0]
        );
    }
}

//! Exponential "approach a target" smoothing.
//!
//! Every smoothed quantity in the crate (capsule height, camera height, sway,
//! stance pose, jump/land rotation, node visibility) advances through
//! [`approach`] so the numeric behaviour is identical at every call site. The
//! blend factor is always kept inside `[0, 1]`, so a long frame can land
//! exactly on the target but never overshoot it.

use glam::Vec3;
use log::warn;
use serde::{Deserialize, Serialize};

/// Law used to turn `dt · rate` into a blend factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmoothingLaw {
    /// `1 - e^(-rate·dt)`: frame-rate independent, approaches the target
    /// asymptotically.
    #[default]
    Exponential,
    /// `min(1, rate·dt)`: the per-frame linear blend, saturated at the target
    /// for large steps.
    ClampedLinear,
}

impl SmoothingLaw {
    /// Returns the blend factor for a step of `dt` seconds at `rate`.
    ///
    /// Negative or NaN products yield `0.0`; an infinite product yields `1.0`.
    ///
    /// # Examples
    /// ```
    /// use stride::SmoothingLaw;
    /// assert_eq!(SmoothingLaw::ClampedLinear.factor(0.1, 20.0), 1.0);
    /// let f = SmoothingLaw::Exponential.factor(0.1, 10.0);
    /// assert!((f - (1.0 - (-1.0_f32).exp())).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn factor(self, dt: f32, rate: f32) -> f32 {
        let amount = dt * rate;
        if amount.is_nan() || amount <= 0.0 {
            return 0.0;
        }
        if amount.is_infinite() {
            return 1.0;
        }
        match self {
            Self::Exponential => 1.0 - (-amount).exp(),
            Self::ClampedLinear => amount.min(1.0),
        }
    }
}

/// Values that can be blended linearly toward a target.
pub trait Approach: Copy {
    /// Moves `self` toward `target` by the fraction `t`.
    #[must_use]
    fn blend_toward(self, target: Self, t: f32) -> Self;
}

impl Approach for f32 {
    fn blend_toward(self, target: Self, t: f32) -> Self {
        (target - self).mul_add(t, self)
    }
}

impl Approach for Vec3 {
    fn blend_toward(self, target: Self, t: f32) -> Self {
        self.lerp(target, t)
    }
}

/// Advances `current` toward `target` over `dt` seconds at `rate`.
///
/// # Examples
/// ```
/// use stride::{approach, SmoothingLaw};
/// let h = approach(2.0_f32, 1.0, 0.05, 10.0, SmoothingLaw::ClampedLinear);
/// assert!((h - 1.5).abs() < 1e-6);
/// ```
#[must_use]
pub fn approach<T: Approach>(current: T, target: T, dt: f32, rate: f32, law: SmoothingLaw) -> T {
    current.blend_toward(target, law.factor(dt, rate))
}

/// Returns `dt` when it is a usable frame delta, otherwise `0.0`.
///
/// Negative, NaN and infinite deltas freeze the step instead of corrupting
/// the smoothed state.
#[must_use]
pub fn sanitize_dt(dt: f32) -> f32 {
    if dt.is_finite() && dt >= 0.0 {
        dt
    } else {
        warn!("ignoring invalid frame delta {dt}");
        0.0
    }
}

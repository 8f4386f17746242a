//! Mouse-driven sway.

use glam::Vec3;

use crate::config::SwayConfig;
use crate::input::LookInput;
use crate::smoothing::{approach, SmoothingLaw};
use crate::vector_math::clamp_symmetric;
use crate::SWAY_ROTATION_MULTIPLIER;

/// Positional and rotational sway of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwayState {
    /// Translation added to the rest position.
    pub offset: Vec3,
    /// Euler angles in degrees, derived from the offset.
    pub rotation: Vec3,
}

/// Clamped instantaneous sway target for `look`.
///
/// # Examples
/// ```
/// use stride::input::LookInput;
/// use stride::view_model::sway_target;
/// use stride::config::SwayConfig;
/// let config = SwayConfig { amount: 0.02, max_amount: 0.06, ..SwayConfig::default() };
/// let target = sway_target(LookInput { mouse_x: 10.0, mouse_y: 0.0 }, &config);
/// assert!((target.x + 0.06).abs() < 1e-6);
/// ```
#[must_use]
pub fn sway_target(look: LookInput, config: &SwayConfig) -> Vec3 {
    let axis = |delta: f32| clamp_symmetric(-delta * config.amount, config.max_amount);
    Vec3::new(axis(look.mouse_x), axis(look.mouse_y), 0.0)
}

impl SwayState {
    pub(crate) fn step(
        &mut self,
        dt: f32,
        look: LookInput,
        sprinting: bool,
        config: &SwayConfig,
        law: SmoothingLaw,
    ) {
        let target = if sprinting {
            Vec3::ZERO
        } else {
            sway_target(look, config)
        };
        self.offset = approach(self.offset, target, dt, config.smooth, law);
        self.rotation = Vec3::new(
            -self.offset.y * SWAY_ROTATION_MULTIPLIER,
            self.offset.x * SWAY_ROTATION_MULTIPLIER,
            0.0,
        );
    }
}

//! Footstep bob.
//!
//! The phase only advances while the character is grounded and moving and
//! drops straight back to zero the first frame either stops, with no decay
//! tail.

use glam::Vec3;

use crate::config::BobConfig;
use crate::locomotion::LocomotionSnapshot;
use crate::{CROUCH_BOB_PHASE_MULTIPLIER, MOVE_DEADZONE};

/// Bob phase accumulator and the offset derived from it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BobState {
    /// Accumulated phase in radians.
    pub phase: f32,
    /// Translation added to the rest position.
    pub offset: Vec3,
}

/// Whether `snapshot` counts as walking for bob purposes: grounded, with
/// either the movement axes or the body speed outside the dead zone.
#[must_use]
pub fn is_bobbing(snapshot: &LocomotionSnapshot) -> bool {
    snapshot.is_grounded
        && (snapshot.move_input_magnitude > MOVE_DEADZONE
            || snapshot.current_speed > MOVE_DEADZONE)
}

impl BobState {
    pub(crate) fn step(
        &mut self,
        dt: f32,
        snapshot: &LocomotionSnapshot,
        config: &BobConfig,
    ) {
        if !is_bobbing(snapshot) {
            self.phase = 0.0;
            self.offset = Vec3::ZERO;
            return;
        }
        let (tier, scale) = if snapshot.is_crouching {
            (CROUCH_BOB_PHASE_MULTIPLIER, config.crouch_scale)
        } else if snapshot.is_sprinting {
            (config.sprint_multiplier, config.sprint_scale)
        } else {
            (1.0, 1.0)
        };
        self.phase += dt * config.speed * tier;
        self.offset = Vec3::new(
            self.phase.cos() * config.amount * scale,
            (2.0 * self.phase).sin() * config.amount_vertical * scale,
            0.0,
        );
    }
}

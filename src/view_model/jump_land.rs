//! Takeoff and landing kick.
//!
//! Takeoff adds the jump rotation in full on the frame contact is lost.
//! Landing starts a timer at one that decays linearly by `2·dt`; while it is
//! positive the rotation eases toward `land_rotation · timer`. Outside both
//! the rotation relaxes back to zero at the same rate.

use log::debug;

use crate::config::JumpLandConfig;
use crate::smoothing::{approach, SmoothingLaw};
use crate::{LANDING_DECAY_RATE, LANDING_TIMER_EPSILON};

/// Kick state of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpLandState {
    /// Rotation about the local X axis, in degrees.
    pub rotation_x: f32,
    /// Remaining landing ease in `[0, 1]`.
    pub landing_timer: f32,
    was_grounded: Option<bool>,
}

impl JumpLandState {
    pub(crate) fn step(
        &mut self,
        dt: f32,
        grounded: bool,
        config: &JumpLandConfig,
        law: SmoothingLaw,
    ) {
        let previous = self.was_grounded.replace(grounded);
        let took_off = previous == Some(true) && !grounded;
        let landed = previous == Some(false) && grounded;

        if landed {
            debug!("landing kick started");
            self.landing_timer = 1.0;
        }
        let target = if self.landing_timer > 0.0 {
            config.land_rotation * self.landing_timer
        } else {
            0.0
        };
        self.rotation_x = approach(self.rotation_x, target, dt, config.transition_speed, law);
        if self.landing_timer > 0.0 {
            self.landing_timer -= LANDING_DECAY_RATE * dt;
            if self.landing_timer <= LANDING_TIMER_EPSILON {
                self.landing_timer = 0.0;
            }
        }
        if took_off {
            debug!("takeoff kick {:.1}", config.jump_rotation);
            self.rotation_x += config.jump_rotation;
            self.landing_timer = 0.0;
        }
    }
}

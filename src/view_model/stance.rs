//! Crouch and sprint poses.

use glam::Vec3;

use crate::config::StanceConfig;
use crate::locomotion::LocomotionSnapshot;
use crate::smoothing::{approach, SmoothingLaw};

/// Which stance pose a node is heading for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Stance {
    /// No stance offset.
    #[default]
    Rest,
    /// Crouch pose.
    Crouch,
    /// Sprint pose.
    Sprint,
}

impl Stance {
    /// Crouching wins over sprinting.
    #[must_use]
    pub const fn of(snapshot: &LocomotionSnapshot) -> Self {
        if snapshot.is_crouching {
            Self::Crouch
        } else if snapshot.is_sprinting {
            Self::Sprint
        } else {
            Self::Rest
        }
    }
}

/// Smoothed stance offset of one node.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StanceState {
    /// Translation added to the rest position.
    pub offset: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    last: Stance,
}

impl StanceState {
    /// Stance targeted by the last step.
    #[must_use]
    pub const fn stance(&self) -> Stance {
        self.last
    }

    pub(crate) fn step(
        &mut self,
        dt: f32,
        snapshot: &LocomotionSnapshot,
        config: &StanceConfig,
        law: SmoothingLaw,
    ) {
        let stance = Stance::of(snapshot);
        // Relaxing to rest eases out at the rate of the pose being left.
        let rate_of = |s: Stance| match s {
            Stance::Sprint => config.sprint_transition_speed,
            Stance::Crouch | Stance::Rest => config.crouch_transition_speed,
        };
        let (offset, rotation, rate) = match stance {
            Stance::Crouch => (config.crouch_offset, config.crouch_rotation, rate_of(stance)),
            Stance::Sprint => (config.sprint_offset, config.sprint_rotation, rate_of(stance)),
            Stance::Rest => (Vec3::ZERO, Vec3::ZERO, rate_of(self.last)),
        };
        self.offset = approach(self.offset, offset, dt, rate, law);
        self.rotation = approach(self.rotation, rotation, dt, rate, law);
        if stance != Stance::Rest {
            self.last = stance;
        }
    }
}

//! Character locomotion: gravity, jumping, speed tiers and crouch resizing.
//!
//! [`LocomotionController::step`] advances the state by one frame in a fixed
//! order:
//!
//! 1. read the mover's grounded flag (before moving);
//! 2. stick to the ground while grounded and not rising;
//! 3. grant a jump when grounded and standing;
//! 4. integrate gravity;
//! 5. pick the speed tier and build the planar move;
//! 6. submit the move to the mover;
//! 7. resolve crouching and smooth the capsule and camera heights.
//!
//! Grounded is only re-read at the start of the next step, so the published
//! [`LocomotionSnapshot::is_grounded`] always lags the move it describes by
//! one frame. Downstream animation relies on this ordering.

use bevy::prelude::Component;
use glam::Vec3;
use log::{debug, trace};
use serde::Serialize;

use crate::config::LocomotionConfig;
use crate::error::ConfigError;
use crate::input::LocomotionInput;
use crate::mover::Mover;
use crate::smoothing::{approach, sanitize_dt};
use crate::vector_math::planar_basis;
use crate::{
    CAMERA_SETTLE_EPSILON, GROUND_STICK_VELOCITY, HEIGHT_SETTLE_EPSILON, SPRINT_FORWARD_DEADZONE,
};

/// Continuous locomotion state, mutated once per frame by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LocomotionState {
    /// Signed vertical speed integrated under gravity.
    pub vertical_velocity: f32,
    /// Crouch stance is active.
    pub is_crouching: bool,
    /// Sprint tier was selected this frame.
    pub is_sprinting: bool,
    /// Ground contact read at the start of the last step.
    pub is_grounded: bool,
    /// Capsule height this frame.
    pub current_capsule_height: f32,
    /// Height the capsule is moving toward.
    pub target_capsule_height: f32,
    /// Capsule centre above the body origin.
    pub capsule_center_y: f32,
    /// Camera mount height this frame.
    pub current_camera_height: f32,
    /// Height the camera mount is moving toward.
    pub target_camera_height: f32,
    /// Horizontal speed commanded by the last step.
    pub current_speed: f32,
    /// Magnitude of the last step's movement axes.
    pub move_input_magnitude: f32,
}

impl LocomotionState {
    /// Standing at rest, as a character is spawned.
    #[must_use]
    pub const fn standing(config: &LocomotionConfig) -> Self {
        Self {
            vertical_velocity: 0.0,
            is_crouching: false,
            is_sprinting: false,
            is_grounded: false,
            current_capsule_height: config.standing_height,
            target_capsule_height: config.standing_height,
            capsule_center_y: config.capsule_center_y,
            current_camera_height: config.standing_camera_height,
            target_camera_height: config.standing_camera_height,
            current_speed: 0.0,
            move_input_magnitude: 0.0,
        }
    }
}

/// Read-only view of a character's locomotion published once per frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct LocomotionSnapshot {
    /// Ground contact read before this frame's move.
    pub is_grounded: bool,
    /// Crouch stance is active.
    pub is_crouching: bool,
    /// Sprinting; never set together with `is_crouching`.
    pub is_sprinting: bool,
    /// Horizontal speed commanded this frame.
    pub current_speed: f32,
    /// Magnitude of this frame's movement axes.
    pub move_input_magnitude: f32,
    /// Vertical speed after gravity integration.
    pub vertical_velocity: f32,
    /// Capsule height after this frame's transition.
    pub capsule_height: f32,
    /// Capsule centre after this frame's transition.
    pub capsule_center_y: f32,
    /// Camera mount height after this frame's transition.
    pub camera_height: f32,
}

impl From<&LocomotionState> for LocomotionSnapshot {
    fn from(state: &LocomotionState) -> Self {
        Self {
            is_grounded: state.is_grounded,
            is_crouching: state.is_crouching,
            is_sprinting: state.is_sprinting,
            current_speed: state.current_speed,
            move_input_magnitude: state.move_input_magnitude,
            vertical_velocity: state.vertical_velocity,
            capsule_height: state.current_capsule_height,
            capsule_center_y: state.capsule_center_y,
            camera_height: state.current_camera_height,
        }
    }
}

/// Owns a character's [`LocomotionState`] and advances it each frame.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct LocomotionController {
    config: LocomotionConfig,
    state: LocomotionState,
}

impl LocomotionController {
    /// Validates `config` and creates a standing controller.
    ///
    /// # Errors
    /// Returns the validation error when `config` is unusable.
    pub fn new(config: LocomotionConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = LocomotionState::standing(&config);
        Ok(Self { config, state })
    }

    /// Pushes the spawn-time capsule shape to `mover`.
    pub fn attach<M: Mover + ?Sized>(&self, mover: &mut M) {
        mover.set_capsule(
            self.state.current_capsule_height,
            self.state.capsule_center_y,
        );
    }

    /// Tunables this controller was built with.
    #[must_use]
    pub const fn config(&self) -> &LocomotionConfig {
        &self.config
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &LocomotionState {
        &self.state
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn snapshot(&self) -> LocomotionSnapshot {
        LocomotionSnapshot::from(&self.state)
    }

    /// Advances the controller by `dt` seconds and moves `mover`.
    pub fn step<M: Mover + ?Sized>(
        &mut self,
        dt: f32,
        input: LocomotionInput,
        mover: &mut M,
    ) -> LocomotionSnapshot {
        let dt = sanitize_dt(dt);
        let input = input.sanitized();

        let grounded = mover.is_grounded();
        if grounded != self.state.is_grounded {
            debug!("ground contact changed: grounded={grounded}");
        }
        self.state.is_grounded = grounded;

        if grounded && self.state.vertical_velocity <= 0.0 {
            self.state.vertical_velocity = GROUND_STICK_VELOCITY;
        }

        if input.jump_pressed {
            if grounded && !self.state.is_crouching {
                self.state.vertical_velocity = self.config.jump_velocity();
                debug!("jump granted at {:.3}", self.state.vertical_velocity);
            } else {
                debug!(
                    "jump refused: grounded={grounded}, crouching={}",
                    self.state.is_crouching
                );
            }
        }

        self.state.vertical_velocity += self.config.gravity * dt;

        // A crouch pressed this frame already counts for the speed tier.
        let crouching = self.state.is_crouching || input.crouch_held;
        let sprint_requested =
            input.sprint_held && input.move_z > SPRINT_FORWARD_DEADZONE && !crouching && grounded;
        let speed = self.speed_tier(crouching, sprint_requested);
        let (right, forward) = planar_basis(mover.rotation());
        let horizontal = (right * input.move_x + forward * input.move_z) * speed;
        mover.move_by((horizontal + Vec3::Y * self.state.vertical_velocity) * dt);

        self.resolve_crouch(input.crouch_held, &*mover);
        self.update_capsule(dt, mover);
        self.update_camera(dt);

        self.state.is_sprinting = sprint_requested;
        self.state.current_speed = horizontal.length();
        self.state.move_input_magnitude = input.move_magnitude();

        trace!(
            "locomotion: vy={:.3} speed={:.3} height={:.3} camera={:.3}",
            self.state.vertical_velocity,
            self.state.current_speed,
            self.state.current_capsule_height,
            self.state.current_camera_height
        );
        self.snapshot()
    }

    /// Crouch dominates sprint; sprint dominates walk.
    const fn speed_tier(&self, crouching: bool, sprinting: bool) -> f32 {
        if crouching {
            self.config.crouch_speed
        } else if sprinting {
            self.config.sprint_speed
        } else {
            self.config.walk_speed
        }
    }

    fn resolve_crouch<M: Mover + ?Sized>(&mut self, crouch_held: bool, mover: &M) {
        if crouch_held {
            if !self.state.is_crouching {
                debug!("crouch engaged");
            }
            self.state.is_crouching = true;
            self.state.target_capsule_height = self.config.crouch_height;
            self.state.target_camera_height = self.config.crouch_camera_height;
            return;
        }
        if !self.state.is_crouching {
            return;
        }
        let origin = mover.position() + Vec3::Y * self.config.crouch_height;
        let clearance = self.config.standing_height - self.config.crouch_height;
        match mover.raycast_up(origin, clearance) {
            None => {
                debug!("standing up");
                self.state.is_crouching = false;
                self.state.target_capsule_height = self.config.standing_height;
                self.state.target_camera_height = self.config.standing_camera_height;
            }
            Some(hit) => trace!("stand blocked by obstruction {hit:.3} above"),
        }
    }

    fn update_capsule<M: Mover + ?Sized>(&mut self, dt: f32, mover: &mut M) {
        let previous = self.state.current_capsule_height;
        let target = self.state.target_capsule_height;
        if (target - previous).abs() <= HEIGHT_SETTLE_EPSILON {
            if previous == target {
                return;
            }
            self.state.current_capsule_height = target;
        } else {
            let next = approach(
                previous,
                target,
                dt,
                self.config.crouch_transition_speed,
                self.config.smoothing,
            );
            self.state.current_capsule_height =
                next.clamp(self.config.crouch_height, self.config.standing_height);
        }
        self.state.capsule_center_y += (self.state.current_capsule_height - previous) * 0.5;
        mover.set_capsule(
            self.state.current_capsule_height,
            self.state.capsule_center_y,
        );
    }

    fn update_camera(&mut self, dt: f32) {
        let current = self.state.current_camera_height;
        let target = self.state.target_camera_height;
        self.state.current_camera_height = if (target - current).abs() <= CAMERA_SETTLE_EPSILON {
            target
        } else {
            approach(
                current,
                target,
                dt,
                self.config.camera_transition_speed,
                self.config.smoothing,
            )
        };
    }
}

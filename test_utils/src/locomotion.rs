//! Controllers and movers in known states.

use glam::{Vec2, Vec3};
use stride::{Ceiling, LocomotionConfig, LocomotionController, LocomotionInput, LocomotionSnapshot, PlaneMover};

/// Controller built from the default tunables.
///
/// # Panics
/// Panics if the default configuration stops validating.
#[must_use]
pub fn default_controller() -> LocomotionController {
    controller_with(LocomotionConfig::default())
}

/// Controller built from `config`.
///
/// # Panics
/// Panics if `config` is invalid.
#[must_use]
pub fn controller_with(config: LocomotionConfig) -> LocomotionController {
    LocomotionController::new(config).unwrap_or_else(|e| panic!("invalid test config: {e}"))
}

/// Mover standing on a floor at the origin with the controller's capsule.
#[must_use]
pub fn flat_mover(controller: &LocomotionController) -> PlaneMover {
    let mut mover = PlaneMover::on_floor(Vec3::ZERO);
    controller.attach(&mut mover);
    mover
}

/// A slab `height` above the floor covering a 2×2 square around the origin.
#[must_use]
pub fn ceiling_over_origin(height: f32) -> Ceiling {
    Ceiling {
        min: Vec2::splat(-1.0),
        max: Vec2::splat(1.0),
        y: height,
    }
}

/// Input holding only the crouch key.
#[must_use]
pub fn crouch_input() -> LocomotionInput {
    LocomotionInput {
        crouch_held: true,
        ..LocomotionInput::default()
    }
}

/// Steps `controller` `frames` times with the same input and returns every
/// snapshot.
pub fn drive(
    controller: &mut LocomotionController,
    mover: &mut PlaneMover,
    dt: f32,
    input: LocomotionInput,
    frames: usize,
) -> Vec<LocomotionSnapshot> {
    (0..frames)
        .map(|_| controller.step(dt, input, mover))
        .collect()
}

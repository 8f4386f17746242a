//! Tuning constants shared by the locomotion and view-model systems.
//!
//! Values configurable per character live in [`crate::config`]; the
//! constants here are the fixed thresholds the controllers rely on.

/// Vertical velocity applied while grounded so the mover keeps reporting
/// ground contact at the start of the next frame.
pub const GROUND_STICK_VELOCITY: f32 = -2.0;
/// Forward-axis input required before sprinting is considered.
pub const SPRINT_FORWARD_DEADZONE: f32 = 0.1;
/// Input magnitude or speed below which the character counts as stationary
/// for head bob purposes.
pub const MOVE_DEADZONE: f32 = 0.1;
/// Remaining capsule height delta at which the transition snaps to target.
pub const HEIGHT_SETTLE_EPSILON: f32 = 0.01;
/// Remaining camera height delta at which the transition snaps to target.
pub const CAMERA_SETTLE_EPSILON: f32 = 0.001;
/// Scale applied to translational sway to obtain rotational sway in degrees.
pub const SWAY_ROTATION_MULTIPLIER: f32 = 100.0;
/// Phase multiplier for head bob while crouching.
pub const CROUCH_BOB_PHASE_MULTIPLIER: f32 = 0.5;
/// Rate at which the landing timer decays, in units per second.
pub const LANDING_DECAY_RATE: f32 = 2.0;
/// Landing timer values at or below this are treated as expired.
pub const LANDING_TIMER_EPSILON: f32 = 1e-5;
/// Visibility alpha below which a sprint-only node is deactivated.
pub const VISIBILITY_THRESHOLD: f32 = 0.01;

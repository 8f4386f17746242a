//! Configuration surface for locomotion and view-model animation.
//!
//! All tunables are supplied once when a controller or animator is built and
//! are immutable afterwards. Every struct deserialises with `#[serde(default)]`
//! so a JSON document only needs to name the values it overrides.

use glam::Vec3;
use log::error;
use serde::{Deserialize, Serialize};

use crate::error::{finite, non_negative, positive, ConfigError};
use crate::smoothing::SmoothingLaw;

/// Tunables for [`LocomotionController`](crate::LocomotionController).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocomotionConfig {
    /// Ground speed while walking, in units per second.
    pub walk_speed: f32,
    /// Ground speed while crouched.
    pub crouch_speed: f32,
    /// Ground speed while sprinting.
    pub sprint_speed: f32,
    /// Apex height of a jump.
    pub jump_height: f32,
    /// Vertical acceleration; must be negative.
    pub gravity: f32,
    /// Capsule height while standing.
    pub standing_height: f32,
    /// Capsule height while crouched.
    pub crouch_height: f32,
    /// Rate at which the capsule height approaches its target.
    pub crouch_transition_speed: f32,
    /// Vertical capsule centre while standing, relative to the body origin.
    pub capsule_center_y: f32,
    /// Camera mount height while standing.
    pub standing_camera_height: f32,
    /// Camera mount height while crouched.
    pub crouch_camera_height: f32,
    /// Rate at which the camera mount approaches its target.
    pub camera_transition_speed: f32,
    /// Smoothing law for the height transitions.
    pub smoothing: SmoothingLaw,
}

impl Default for LocomotionConfig {
    fn default() -> Self {
        Self {
            walk_speed: 6.0,
            crouch_speed: 3.0,
            sprint_speed: 9.0,
            jump_height: 1.5,
            gravity: -20.0,
            standing_height: 2.0,
            crouch_height: 1.0,
            crouch_transition_speed: 10.0,
            capsule_center_y: 1.0,
            standing_camera_height: 1.6,
            crouch_camera_height: 0.8,
            camera_transition_speed: 8.0,
            smoothing: SmoothingLaw::default(),
        }
    }
}

impl LocomotionConfig {
    /// Checks the configuration for values the controller cannot run with.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("walk_speed", self.walk_speed)?;
        non_negative("crouch_speed", self.crouch_speed)?;
        non_negative("sprint_speed", self.sprint_speed)?;
        non_negative("jump_height", self.jump_height)?;
        if finite("gravity", self.gravity)? >= 0.0 {
            return Err(ConfigError::GravityNotDownward(self.gravity));
        }
        let standing = positive("standing_height", self.standing_height)?;
        let crouch = positive("crouch_height", self.crouch_height)?;
        if crouch > standing {
            return Err(ConfigError::CrouchTallerThanStanding { crouch, standing });
        }
        non_negative("crouch_transition_speed", self.crouch_transition_speed)?;
        finite("capsule_center_y", self.capsule_center_y)?;
        finite("standing_camera_height", self.standing_camera_height)?;
        finite("crouch_camera_height", self.crouch_camera_height)?;
        non_negative("camera_transition_speed", self.camera_transition_speed)?;
        Ok(())
    }

    /// Initial vertical speed that reaches [`Self::jump_height`] under
    /// [`Self::gravity`].
    ///
    /// # Examples
    /// ```
    /// use stride::LocomotionConfig;
    /// let config = LocomotionConfig { jump_height: 1.25, gravity: -20.0, ..Default::default() };
    /// assert!((config.jump_velocity() - 50.0_f32.sqrt()).abs() < 1e-6);
    /// ```
    #[must_use]
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).sqrt()
    }
}

/// Mouse-driven sway tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SwayConfig {
    /// Offset per unit of mouse delta.
    pub amount: f32,
    /// Largest translational sway on either axis.
    pub max_amount: f32,
    /// Rate at which sway approaches its target.
    pub smooth: f32,
}

impl Default for SwayConfig {
    fn default() -> Self {
        Self {
            amount: 0.02,
            max_amount: 0.06,
            smooth: 6.0,
        }
    }
}

/// Footstep bob tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BobConfig {
    /// Phase advance per second while walking, in radians.
    pub speed: f32,
    /// Horizontal bob amplitude.
    pub amount: f32,
    /// Vertical bob amplitude.
    pub amount_vertical: f32,
    /// Phase multiplier while sprinting; expected to exceed one.
    pub sprint_multiplier: f32,
    /// Amplitude scale while crouched.
    pub crouch_scale: f32,
    /// Amplitude scale while sprinting.
    pub sprint_scale: f32,
}

impl Default for BobConfig {
    fn default() -> Self {
        Self {
            speed: 10.0,
            amount: 0.05,
            amount_vertical: 0.03,
            sprint_multiplier: 1.5,
            crouch_scale: 1.0,
            sprint_scale: 1.0,
        }
    }
}

/// Crouch and sprint pose tunables. Rotations are Euler angles in degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StanceConfig {
    /// Positional offset held while crouched.
    pub crouch_offset: Vec3,
    /// Rotation held while crouched.
    pub crouch_rotation: Vec3,
    /// Rate toward the crouch pose and back to rest.
    pub crouch_transition_speed: f32,
    /// Positional offset held while sprinting.
    pub sprint_offset: Vec3,
    /// Rotation held while sprinting.
    pub sprint_rotation: Vec3,
    /// Rate toward the sprint pose.
    pub sprint_transition_speed: f32,
}

impl Default for StanceConfig {
    fn default() -> Self {
        Self {
            crouch_offset: Vec3::new(0.1, -0.1, 0.05),
            crouch_rotation: Vec3::new(0.0, 0.0, 5.0),
            crouch_transition_speed: 8.0,
            sprint_offset: Vec3::new(0.0, -0.05, 0.05),
            sprint_rotation: Vec3::new(5.0, -15.0, 0.0),
            sprint_transition_speed: 10.0,
        }
    }
}

/// Jump and landing kick tunables, in degrees of pitch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct JumpLandConfig {
    /// Pitch added the moment the character leaves the ground.
    pub jump_rotation: f32,
    /// Pitch the landing dip eases toward at touchdown.
    pub land_rotation: f32,
    /// Rate at which the kick rotation follows its target.
    pub transition_speed: f32,
}

impl Default for JumpLandConfig {
    fn default() -> Self {
        Self {
            jump_rotation: -10.0,
            land_rotation: 15.0,
            transition_speed: 10.0,
        }
    }
}

/// Show/hide blending for sprint-only nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VisibilityConfig {
    /// Rate at which the visibility alpha follows the sprint state.
    pub transition_speed: f32,
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            transition_speed: 10.0,
        }
    }
}

/// Which additive behaviours drive a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "Each flag toggles an independent behaviour."
)]
pub struct NodeFeatures {
    /// Mouse sway.
    pub sway: bool,
    /// Footstep bob.
    pub bob: bool,
    /// Crouch/sprint pose.
    pub stance: bool,
    /// Jump/land kick.
    pub jump_land: bool,
    /// Shown only while sprinting (off-hand swap).
    pub sprint_visibility: bool,
}

impl Default for NodeFeatures {
    fn default() -> Self {
        Self {
            sway: true,
            bob: true,
            stance: true,
            jump_land: true,
            sprint_visibility: false,
        }
    }
}

/// Per-node behaviour tunables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewModelTuning {
    /// Mouse sway.
    pub sway: SwayConfig,
    /// Footstep bob.
    pub bob: BobConfig,
    /// Crouch and sprint poses.
    pub stance: StanceConfig,
    /// Jump and landing kick.
    pub jump_land: JumpLandConfig,
    /// Sprint-only visibility blending.
    pub visibility: VisibilityConfig,
    /// Smoothing law for every smoothed value of the node.
    pub smoothing: SmoothingLaw,
}

impl ViewModelTuning {
    /// Checks the tuning for values the animator cannot run with.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("sway.amount", self.sway.amount)?;
        non_negative("sway.max_amount", self.sway.max_amount)?;
        non_negative("sway.smooth", self.sway.smooth)?;
        non_negative("bob.speed", self.bob.speed)?;
        non_negative("bob.amount", self.bob.amount)?;
        non_negative("bob.amount_vertical", self.bob.amount_vertical)?;
        non_negative("bob.sprint_multiplier", self.bob.sprint_multiplier)?;
        non_negative("bob.crouch_scale", self.bob.crouch_scale)?;
        non_negative("bob.sprint_scale", self.bob.sprint_scale)?;
        finite_vec("stance.crouch_offset", self.stance.crouch_offset)?;
        finite_vec("stance.crouch_rotation", self.stance.crouch_rotation)?;
        non_negative(
            "stance.crouch_transition_speed",
            self.stance.crouch_transition_speed,
        )?;
        finite_vec("stance.sprint_offset", self.stance.sprint_offset)?;
        finite_vec("stance.sprint_rotation", self.stance.sprint_rotation)?;
        non_negative(
            "stance.sprint_transition_speed",
            self.stance.sprint_transition_speed,
        )?;
        finite("jump_land.jump_rotation", self.jump_land.jump_rotation)?;
        finite("jump_land.land_rotation", self.jump_land.land_rotation)?;
        non_negative("jump_land.transition_speed", self.jump_land.transition_speed)?;
        non_negative("visibility.transition_speed", self.visibility.transition_speed)?;
        Ok(())
    }
}

/// A single view-model node: its rest pose, enabled behaviours and tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeConfig {
    /// Unique name used to look the node up.
    pub name: String,
    /// Local rest position relative to the camera.
    pub rest_position: Vec3,
    /// Local rest rotation as Euler angles in degrees.
    pub rest_rotation: Vec3,
    /// Enabled behaviours.
    pub features: NodeFeatures,
    /// Behaviour tunables.
    pub tuning: ViewModelTuning,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::weapon()
    }
}

impl NodeConfig {
    /// Hand-held weapon in front of the right shoulder.
    #[must_use]
    pub fn weapon() -> Self {
        Self {
            name: "weapon".to_owned(),
            rest_position: Vec3::new(0.5, -0.3, -0.5),
            rest_rotation: Vec3::new(0.0, -90.0, 0.0),
            features: NodeFeatures::default(),
            tuning: ViewModelTuning::default(),
        }
    }

    /// Right arm holding the weapon; bobs harder while sprinting.
    #[must_use]
    pub fn right_arm() -> Self {
        Self {
            name: "right_arm".to_owned(),
            rest_position: Vec3::new(0.5, -0.3, -0.5),
            rest_rotation: Vec3::ZERO,
            features: NodeFeatures::default(),
            tuning: ViewModelTuning {
                bob: arm_bob(),
                ..ViewModelTuning::default()
            },
        }
    }

    /// Off-hand arm that swings in only while sprinting.
    #[must_use]
    pub fn left_arm() -> Self {
        Self {
            name: "left_arm".to_owned(),
            rest_position: Vec3::new(-0.5, -0.3, -0.5),
            rest_rotation: Vec3::ZERO,
            features: NodeFeatures {
                sway: false,
                sprint_visibility: true,
                ..NodeFeatures::default()
            },
            tuning: ViewModelTuning {
                bob: arm_bob(),
                ..ViewModelTuning::default()
            },
        }
    }

    /// Checks the node for values the animator cannot run with.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite_vec("rest_position", self.rest_position)?;
        finite_vec("rest_rotation", self.rest_rotation)?;
        self.tuning.validate()
    }
}

fn arm_bob() -> BobConfig {
    BobConfig {
        speed: 8.0,
        amount: 0.015,
        amount_vertical: 0.03,
        sprint_multiplier: 1.5,
        crouch_scale: 1.0 / 3.0,
        sprint_scale: 2.0,
    }
}

fn finite_vec(field: &'static str, value: Vec3) -> Result<Vec3, ConfigError> {
    finite(field, value.x)?;
    finite(field, value.y)?;
    finite(field, value.z)?;
    Ok(value)
}

/// A complete character rig: locomotion plus the view-model nodes it drives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RigConfig {
    /// Locomotion tunables.
    pub locomotion: LocomotionConfig,
    /// View-model nodes, animated in order.
    pub nodes: Vec<NodeConfig>,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            locomotion: LocomotionConfig::default(),
            nodes: vec![NodeConfig::weapon()],
        }
    }
}

impl RigConfig {
    /// Parses and validates a JSON rig description.
    ///
    /// # Examples
    /// ```
    /// use stride::RigConfig;
    /// let rig = RigConfig::from_json_str(r#"{ "locomotion": { "walk_speed": 4.0 } }"#).unwrap();
    /// assert_eq!(rig.locomotion.walk_speed, 4.0);
    /// assert_eq!(rig.locomotion.crouch_speed, 3.0);
    /// ```
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed documents and any
    /// validation error otherwise.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let rig: Self = serde_json::from_str(json)?;
        rig.validate()?;
        Ok(rig)
    }

    /// Parses and validates a JSON rig description from a reader.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed documents and any
    /// validation error otherwise.
    pub fn from_json_reader(reader: impl std::io::Read) -> Result<Self, ConfigError> {
        let rig: Self = serde_json::from_reader(reader)?;
        rig.validate()?;
        Ok(rig)
    }

    /// Validates the locomotion tunables and every node.
    ///
    /// # Errors
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let result = self
            .locomotion
            .validate()
            .and_then(|()| validate_nodes(&self.nodes));
        if let Err(err) = &result {
            error!("rejected rig configuration: {err}");
        }
        result
    }
}

/// Validates a node list: non-empty, unique names, valid tuning.
pub(crate) fn validate_nodes(nodes: &[NodeConfig]) -> Result<(), ConfigError> {
    if nodes.is_empty() {
        return Err(ConfigError::NoTrackedNodes);
    }
    for (index, node) in nodes.iter().enumerate() {
        node.validate()?;
        if nodes.iter().skip(index + 1).any(|other| other.name == node.name) {
            return Err(ConfigError::DuplicateNode(node.name.clone()));
        }
    }
    Ok(())
}

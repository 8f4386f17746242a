//! Procedural view-model animation.
//!
//! A [`ViewModelAnimator`] drives any number of tracked nodes (weapon, arms)
//! from the same [`LocomotionSnapshot`]. Each node keeps its own smoothing
//! state and feature flags, and every frame yields a local [`Pose`] built as
//!
//! * position = `rest + sway + bob + stance`
//! * rotation = `rest ∘ stance ∘ jump_land ∘ sway`
//!
//! The rotation order is fixed; swapping factors changes the result.

mod bob;
mod jump_land;
mod pose;
mod stance;
mod sway;
mod visibility;

pub use bob::{is_bobbing, BobState};
pub use jump_land::JumpLandState;
pub use pose::Pose;
pub use stance::{Stance, StanceState};
pub use sway::{sway_target, SwayState};
pub use visibility::VisibilityState;

use glam::Vec3;
use log::trace;

use crate::config::{validate_nodes, NodeConfig};
use crate::error::ConfigError;
use crate::input::LookInput;
use crate::locomotion::LocomotionSnapshot;
use crate::smoothing::sanitize_dt;
use crate::vector_math::euler_degrees;

/// A node's pose and visibility for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodePose {
    /// Local pose relative to the camera.
    pub pose: Pose,
    /// Fade alpha and activation.
    pub visibility: VisibilityState,
}

/// Animation state of one tracked node.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedNode {
    config: NodeConfig,
    rest: Pose,
    sway: SwayState,
    bob: BobState,
    stance: StanceState,
    jump_land: JumpLandState,
    visibility: VisibilityState,
}

impl TrackedNode {
    fn new(config: NodeConfig) -> Self {
        let rest = Pose::from_euler_degrees(config.rest_position, config.rest_rotation);
        let visibility = if config.features.sprint_visibility {
            VisibilityState::default()
        } else {
            VisibilityState::SHOWN
        };
        Self {
            config,
            rest,
            sway: SwayState::default(),
            bob: BobState::default(),
            stance: StanceState::default(),
            jump_land: JumpLandState::default(),
            visibility,
        }
    }

    /// Node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Node configuration.
    #[must_use]
    pub const fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Fixed rest pose.
    #[must_use]
    pub const fn rest(&self) -> Pose {
        self.rest
    }

    /// Sway state.
    #[must_use]
    pub const fn sway(&self) -> &SwayState {
        &self.sway
    }

    /// Bob state.
    #[must_use]
    pub const fn bob(&self) -> &BobState {
        &self.bob
    }

    /// Stance state.
    #[must_use]
    pub const fn stance(&self) -> &StanceState {
        &self.stance
    }

    /// Jump/land state.
    #[must_use]
    pub const fn jump_land(&self) -> &JumpLandState {
        &self.jump_land
    }

    /// Visibility state.
    #[must_use]
    pub const fn visibility(&self) -> VisibilityState {
        self.visibility
    }

    fn step(
        &mut self,
        dt: f32,
        look: LookInput,
        snapshot: &LocomotionSnapshot,
    ) -> NodePose {
        let features = self.config.features;
        let tuning = &self.config.tuning;
        let law = tuning.smoothing;
        if features.sway {
            self.sway
                .step(dt, look, snapshot.is_sprinting, &tuning.sway, law);
        }
        if features.bob {
            self.bob.step(dt, snapshot, &tuning.bob);
        }
        if features.stance {
            self.stance.step(dt, snapshot, &tuning.stance, law);
        }
        if features.jump_land {
            self.jump_land
                .step(dt, snapshot.is_grounded, &tuning.jump_land, law);
        }
        if features.sprint_visibility {
            self.visibility
                .step(dt, snapshot.is_sprinting, &tuning.visibility, law);
        }
        NodePose {
            pose: self.compose(),
            visibility: self.visibility,
        }
    }

    fn compose(&self) -> Pose {
        let position = self.rest.position + self.sway.offset + self.bob.offset + self.stance.offset;
        let rotation = self.rest.rotation
            * euler_degrees(self.stance.rotation)
            * euler_degrees(Vec3::new(self.jump_land.rotation_x, 0.0, 0.0))
            * euler_degrees(self.sway.rotation);
        Pose {
            position,
            rotation: rotation.normalize(),
        }
    }
}

/// Animates a list of view-model nodes from locomotion and look input.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModelAnimator {
    nodes: Vec<TrackedNode>,
}

impl ViewModelAnimator {
    /// Validates `nodes` and creates an animator with every node at rest.
    ///
    /// # Errors
    /// Returns [`ConfigError::NoTrackedNodes`] for an empty list,
    /// [`ConfigError::DuplicateNode`] when names collide and any tuning
    /// validation error.
    pub fn new(nodes: Vec<NodeConfig>) -> Result<Self, ConfigError> {
        validate_nodes(&nodes)?;
        Ok(Self {
            nodes: nodes.into_iter().map(TrackedNode::new).collect(),
        })
    }

    /// Tracked nodes in configuration order.
    #[must_use]
    pub fn nodes(&self) -> &[TrackedNode] {
        &self.nodes
    }

    /// Looks a node up by name.
    #[must_use]
    pub fn node(&self, name: &str) -> Option<&TrackedNode> {
        self.nodes.iter().find(|n| n.name() == name)
    }

    /// Advances every node by `dt` seconds and returns their poses in
    /// configuration order.
    pub fn step(
        &mut self,
        dt: f32,
        look: LookInput,
        snapshot: &LocomotionSnapshot,
    ) -> Vec<NodePose> {
        let dt = sanitize_dt(dt);
        let poses: Vec<NodePose> = self
            .nodes
            .iter_mut()
            .map(|node| node.step(dt, look, snapshot))
            .collect();
        trace!("view model stepped {} nodes", poses.len());
        poses
    }
}

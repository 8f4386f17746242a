//! ECS components attaching the controllers to Bevy entities.
//!
//! A character entity carries [`Character`], a mover component, a
//! [`FrameInput`](crate::input::FrameInput), a
//! [`LocomotionController`](crate::locomotion::LocomotionController) and its
//! published [`LocomotionSnapshot`](crate::locomotion::LocomotionSnapshot).
//! Optional [`CharacterCamera`] and [`ViewModelRig`] components link it to the
//! camera mount and the animated node entities.
use bevy::prelude::*;

use crate::config::RigConfig;
use crate::error::ConfigError;
use crate::input::FrameInput;
use crate::locomotion::{LocomotionController, LocomotionSnapshot};
use crate::view_model::ViewModelAnimator;

/// Marker for entities driven by the first-person controllers.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
#[require(FrameInput, LocomotionSnapshot)]
pub struct Character;

/// Marker for the entity whose local height follows the camera height.
#[derive(Component, Reflect, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[reflect(Component, Default)]
pub struct CameraMount;

/// Links a character to its [`CameraMount`] entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCamera(pub Entity);

/// Fade state mirrored onto a sprint-only node entity.
///
/// Rendering is left to the host; it reads `alpha` and `active` to decide
/// how, or whether, to draw the node.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct NodeVisibility {
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Whether the node should be drawn.
    pub active: bool,
}

impl Default for NodeVisibility {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            active: true,
        }
    }
}

/// View-model animator plus the entities its nodes drive.
#[derive(Component, Debug, Clone)]
pub struct ViewModelRig {
    animator: ViewModelAnimator,
    targets: Vec<Entity>,
    anchor: Option<Entity>,
}

impl ViewModelRig {
    /// Pairs `animator`'s nodes, in order, with `targets`.
    ///
    /// # Errors
    /// Returns [`ConfigError::TargetCount`] when the lists differ in length.
    pub fn new(animator: ViewModelAnimator, targets: Vec<Entity>) -> Result<Self, ConfigError> {
        let nodes = animator.nodes().len();
        if nodes != targets.len() {
            return Err(ConfigError::TargetCount {
                nodes,
                targets: targets.len(),
            });
        }
        Ok(Self {
            animator,
            targets,
            anchor: None,
        })
    }

    /// Expresses every node pose in `anchor`'s local space.
    #[must_use]
    pub fn with_anchor(mut self, anchor: Entity) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// The animator.
    #[must_use]
    pub const fn animator(&self) -> &ViewModelAnimator {
        &self.animator
    }

    /// Mutable access for the animation system.
    pub const fn animator_mut(&mut self) -> &mut ViewModelAnimator {
        &mut self.animator
    }

    /// Node entities in animator order.
    #[must_use]
    pub fn targets(&self) -> &[Entity] {
        &self.targets
    }

    /// Parent-space anchor, if any.
    #[must_use]
    pub const fn anchor(&self) -> Option<Entity> {
        self.anchor
    }
}

/// Builds the controller and animator described by `rig`.
///
/// # Errors
/// Returns the first validation error in `rig`.
pub fn build_rig(rig: &RigConfig) -> Result<(LocomotionController, ViewModelAnimator), ConfigError> {
    let controller = LocomotionController::new(rig.locomotion.clone())?;
    let animator = ViewModelAnimator::new(rig.nodes.clone())?;
    Ok((controller, animator))
}

//! First-person locomotion and view-model animation core.
//!
//! [`LocomotionController`] turns per-frame movement input into a kinematic
//! move, crouch resizing and a published [`LocomotionSnapshot`].
//! [`ViewModelAnimator`] reads that snapshot together with mouse input and
//! produces additive sway, bob, stance, jump/land and visibility for any
//! number of view-model nodes. Both are plain structs advanced by an explicit
//! `dt`; [`FirstPersonPlugin`] schedules them inside a Bevy app.
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod locomotion;
pub mod logging;
pub mod mover;
pub mod plugin;
pub mod replay;
pub mod smoothing;
pub mod vector_math;
pub mod view_model;
pub use constants::*;

pub use components::{
    build_rig, CameraMount, Character, CharacterCamera, NodeVisibility, ViewModelRig,
};
pub use config::{LocomotionConfig, NodeConfig, NodeFeatures, RigConfig, ViewModelTuning};
pub use error::ConfigError;
pub use input::{FrameInput, KeyBindings, LocomotionInput, LookInput};
pub use locomotion::{LocomotionController, LocomotionSnapshot, LocomotionState};
pub use logging::init as init_logging;
pub use mover::{Ceiling, Mover, PlaneMover};
pub use plugin::{ConfigurationError, FirstPersonPlugin, FirstPersonSet};
pub use smoothing::{approach, SmoothingLaw};
pub use view_model::{NodePose, Pose, ViewModelAnimator};

pub mod prelude {
    //! Prelude exports for hosts embedding the controllers.
    //!
    //! ```rust,no_run
    //! use stride::prelude::*;
    //! ```

    pub use crate::{
        Character, FirstPersonPlugin, FirstPersonSet, FrameInput, LocomotionConfig,
        LocomotionController, LocomotionInput, LocomotionSnapshot, LookInput, Mover, NodeConfig,
        PlaneMover, Pose, RigConfig, ViewModelAnimator, ViewModelRig,
    };
}

//! Deterministic replay of scripted input against a [`PlaneMover`].
//!
//! A [`Script`] is a list of input steps, each held for a number of frames,
//! plus the ceiling slabs of the test level. [`Replay`] runs the pure
//! controllers over it at a fixed `dt` and yields one [`FrameRecord`] per
//! frame. Nothing reads the wall clock, so identical inputs always produce
//! identical records.

use glam::{Quat, Vec2, Vec3};
use log::info;
use serde::{Deserialize, Serialize};

use crate::config::RigConfig;
use crate::error::ConfigError;
use crate::input::{LocomotionInput, LookInput};
use crate::locomotion::{LocomotionController, LocomotionSnapshot};
use crate::mover::{Ceiling, Mover, PlaneMover};
use crate::view_model::ViewModelAnimator;

/// One scripted input held for `frames` frames.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptStep {
    /// Movement axes and buttons.
    pub locomotion: LocomotionInput,
    /// Mouse delta.
    pub look: LookInput,
    /// Number of frames the input is held.
    pub frames: u32,
}

impl Default for ScriptStep {
    fn default() -> Self {
        Self {
            locomotion: LocomotionInput::default(),
            look: LookInput::default(),
            frames: 1,
        }
    }
}

impl ScriptStep {
    fn held(locomotion: LocomotionInput, frames: u32) -> Self {
        Self {
            locomotion,
            frames,
            ..Self::default()
        }
    }
}

/// Scripted session: inputs and level geometry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Script {
    /// Input steps, played in order.
    pub steps: Vec<ScriptStep>,
    /// Ceiling slabs above the floor at `y = 0`.
    pub ceilings: Vec<Ceiling>,
}

impl Script {
    /// Parses a JSON script.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed documents.
    pub fn from_json_reader(reader: impl std::io::Read) -> Result<Self, ConfigError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Walk, sprint, jump, then crouch under a low ceiling and stand clear of
    /// it, at one second per phase for `fps` frames per second.
    #[must_use]
    pub fn demo(fps: u32) -> Self {
        let forward = LocomotionInput {
            move_z: 1.0,
            ..LocomotionInput::default()
        };
        Self {
            steps: vec![
                ScriptStep::held(forward, fps),
                ScriptStep::held(
                    LocomotionInput {
                        sprint_held: true,
                        ..forward
                    },
                    fps,
                ),
                ScriptStep::held(
                    LocomotionInput {
                        jump_pressed: true,
                        ..forward
                    },
                    1,
                ),
                ScriptStep::held(forward, fps),
                ScriptStep::held(
                    LocomotionInput {
                        crouch_held: true,
                        ..forward
                    },
                    fps,
                ),
                ScriptStep::held(forward, fps),
            ],
            ceilings: vec![Ceiling {
                min: Vec2::new(-2.0, -30.0),
                max: Vec2::new(2.0, -22.0),
                y: 1.5,
            }],
        }
    }

    /// Total frame count.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.steps.iter().map(|s| u64::from(s.frames)).sum()
    }

    /// Whether the script has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn inputs(&self) -> impl Iterator<Item = ScriptStep> + '_ {
        self.steps
            .iter()
            .flat_map(|step| (0..step.frames).map(move |_| *step))
    }
}

/// Pose of one node in a [`FrameRecord`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    /// Node name.
    pub name: String,
    /// Local position.
    pub position: Vec3,
    /// Local rotation.
    pub rotation: Quat,
    /// Fade alpha.
    pub alpha: f32,
    /// Whether the node is drawn.
    pub active: bool,
}

/// Everything observable after one replayed frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameRecord {
    /// Zero-based frame index.
    pub frame: u64,
    /// Body position after the move.
    pub position: Vec3,
    /// Published locomotion snapshot.
    pub snapshot: LocomotionSnapshot,
    /// Node poses in configuration order.
    pub nodes: Vec<NodeRecord>,
}

/// Runs a rig against a script.
#[derive(Debug)]
pub struct Replay {
    controller: LocomotionController,
    animator: ViewModelAnimator,
    mover: PlaneMover,
    dt: f32,
}

impl Replay {
    /// Builds the controllers for `rig` over a flat floor with `script`'s
    /// ceilings.
    ///
    /// # Errors
    /// Returns the first validation error in `rig`.
    pub fn new(rig: &RigConfig, script: &Script, dt: f32) -> Result<Self, ConfigError> {
        let controller = LocomotionController::new(rig.locomotion.clone())?;
        let animator = ViewModelAnimator::new(rig.nodes.clone())?;
        let mut mover = script
            .ceilings
            .iter()
            .fold(PlaneMover::on_floor(Vec3::ZERO), |m, c| m.with_ceiling(*c));
        controller.attach(&mut mover);
        info!(
            "replaying {} frames at dt={dt} with {} nodes",
            script.len(),
            animator.nodes().len()
        );
        Ok(Self {
            controller,
            animator,
            mover,
            dt,
        })
    }

    /// Replays `script`, stopping after `limit` frames when given.
    pub fn run<'a>(
        &'a mut self,
        script: &'a Script,
        limit: Option<u64>,
    ) -> impl Iterator<Item = FrameRecord> + 'a {
        let limit = limit.unwrap_or(u64::MAX);
        script
            .inputs()
            .zip(0..limit)
            .map(move |(step, frame)| self.advance(frame, step))
    }

    fn advance(&mut self, frame: u64, step: ScriptStep) -> FrameRecord {
        let snapshot = self
            .controller
            .step(self.dt, step.locomotion, &mut self.mover);
        let poses = self.animator.step(self.dt, step.look, &snapshot);
        let nodes = self
            .animator
            .nodes()
            .iter()
            .zip(poses)
            .map(|(node, pose)| NodeRecord {
                name: node.name().to_owned(),
                position: pose.pose.position,
                rotation: pose.pose.rotation,
                alpha: pose.visibility.alpha,
                active: pose.visibility.active,
            })
            .collect();
        FrameRecord {
            frame,
            position: self.mover.position(),
            snapshot,
            nodes,
        }
    }
}

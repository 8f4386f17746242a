//! Bevy plugin wiring the controllers into the schedule.
//!
//! Systems run in `Update` inside three chained [`FirstPersonSet`]s so input
//! capture always precedes locomotion, and locomotion always precedes the
//! view model, within a single frame.

use std::marker::PhantomData;

use bevy::ecs::component::Mutable;
use bevy::ecs::prelude::On;
use bevy::prelude::*;
use log::{error, trace};
use thiserror::Error;

use crate::components::{CameraMount, Character, CharacterCamera, NodeVisibility, ViewModelRig};
use crate::error::ConfigError;
use crate::input::{capture_input_system, FrameInput, KeyBindings};
use crate::locomotion::{LocomotionController, LocomotionSnapshot};
use crate::mover::Mover;
use crate::view_model::Pose;

/// Ordered phases of a first-person frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirstPersonSet {
    /// Device polling into [`FrameInput`].
    Input,
    /// Locomotion step and mover update.
    Locomotion,
    /// View-model animation and node transforms.
    ViewModel,
}

/// Event raised when an entity is set up in a way the controllers cannot run
/// with.
#[derive(Event, Debug, Clone, Error)]
#[error("{entity}: {error}")]
pub struct ConfigurationError {
    /// Offending entity.
    pub entity: Entity,
    /// What is wrong with it.
    #[source]
    pub error: ConfigError,
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn log_configuration_error(event: On<ConfigurationError>) {
    let ConfigurationError { entity, error } = event.event();
    error!("first-person configuration error on {entity}: {error}");
}

/// Bevy plugin driving characters whose body is the mover component `M`.
pub struct FirstPersonPlugin<M> {
    marker: PhantomData<fn() -> M>,
}

impl<M> Default for FirstPersonPlugin<M> {
    fn default() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<M: Mover + Component<Mutability = Mutable>> Plugin for FirstPersonPlugin<M> {
    fn build(&self, app: &mut App) {
        app.register_type::<Character>();
        app.register_type::<CameraMount>();
        app.register_type::<NodeVisibility>();
        app.add_observer(log_configuration_error);
        app.init_resource::<KeyBindings>();
        app.configure_sets(
            Update,
            (
                FirstPersonSet::Input,
                FirstPersonSet::Locomotion,
                FirstPersonSet::ViewModel,
            )
                .chain(),
        );
        app.add_systems(
            Update,
            (
                capture_input_system.in_set(FirstPersonSet::Input),
                (
                    validate_rigs_system::<M>,
                    attach_movers_system::<M>,
                    locomotion_system::<M>,
                )
                    .chain()
                    .in_set(FirstPersonSet::Locomotion),
                view_model_system.in_set(FirstPersonSet::ViewModel),
            ),
        );
    }
}

/// Reports newly spawned characters without a mover and rigs whose target
/// entities do not exist.
pub fn validate_rigs_system<M: Component>(
    mut commands: Commands,
    moverless: Query<Entity, (Added<Character>, Without<M>)>,
    rigs: Query<(Entity, &ViewModelRig), Added<ViewModelRig>>,
    entities: Query<(), With<Transform>>,
) {
    for entity in &moverless {
        commands.trigger(ConfigurationError {
            entity,
            error: ConfigError::MissingMover(format!("{entity}")),
        });
    }
    for (entity, rig) in &rigs {
        for (node, &target) in rig.animator().nodes().iter().zip(rig.targets()) {
            if entities.get(target).is_err() {
                commands.trigger(ConfigurationError {
                    entity,
                    error: ConfigError::MissingNode {
                        node: node.name().to_owned(),
                        entity: format!("{target}"),
                    },
                });
            }
        }
    }
}

/// Pushes the spawn-time capsule of each new controller to its mover.
pub fn attach_movers_system<M: Mover + Component<Mutability = Mutable>>(
    mut added: Query<(&LocomotionController, &mut M), Added<LocomotionController>>,
) {
    for (controller, mut mover) in &mut added {
        controller.attach(&mut *mover);
    }
}

type LocomotionRow<'w, M> = (
    &'w FrameInput,
    &'w mut LocomotionController,
    &'w mut LocomotionSnapshot,
    &'w mut M,
    Option<&'w CharacterCamera>,
    Option<&'w mut Transform>,
);

/// Steps every character's locomotion, publishes its snapshot and moves its
/// camera mount to the current camera height.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems receive resources by value."
)]
pub fn locomotion_system<M: Mover + Component<Mutability = Mutable>>(
    time: Res<Time>,
    mut characters: Query<LocomotionRow<'_, M>, With<Character>>,
    mut mounts: Query<&mut Transform, (With<CameraMount>, Without<Character>)>,
) {
    let dt = time.delta_secs();
    for (input, mut controller, mut snapshot, mut mover, camera, transform) in &mut characters {
        *snapshot = controller.step(dt, input.locomotion, &mut *mover);
        if let Some(mut transform) = transform {
            transform.translation = mover.position();
        }
        let Some(&CharacterCamera(mount)) = camera else {
            continue;
        };
        match mounts.get_mut(mount) {
            Ok(mut mount) => mount.translation.y = snapshot.camera_height,
            Err(_) => trace!("camera mount {mount} is gone"),
        }
    }
}

/// Advances every rig and writes node transforms and visibility.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems receive resources by value."
)]
pub fn view_model_system(
    time: Res<Time>,
    mut rigs: Query<(&FrameInput, &LocomotionSnapshot, &mut ViewModelRig), With<Character>>,
    mut nodes: Query<(&mut Transform, Option<&mut NodeVisibility>), Without<Character>>,
) {
    let dt = time.delta_secs();
    for (input, snapshot, mut rig) in &mut rigs {
        let poses = rig.animator_mut().step(dt, input.look, snapshot);
        let anchor = rig
            .anchor()
            .and_then(|anchor| nodes.get(anchor).ok())
            .map_or(Pose::IDENTITY, |(transform, _)| Pose::from(transform));
        for (node, &target) in poses.iter().zip(rig.targets()) {
            let Ok((mut transform, visibility)) = nodes.get_mut(target) else {
                continue;
            };
            *transform = anchor.compose(node.pose).into();
            if let Some(mut visibility) = visibility {
                visibility.alpha = node.visibility.alpha;
                visibility.active = node.visibility.active;
            }
        }
    }
}

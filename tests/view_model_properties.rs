//! View-model animation driven by hand-built and live locomotion snapshots.

use approx::assert_relative_eq;
use glam::Vec3;
use rstest::{fixture, rstest};
use stride::config::SwayConfig;
use stride::view_model::{sway_target, Stance};
use stride::{
    LocomotionInput, LocomotionSnapshot, LookInput, NodeConfig, NodeFeatures, RigConfig,
    SmoothingLaw, ViewModelAnimator,
};
use test_utils::assertions::assert_vec3_near;
use test_utils::locomotion::{default_controller, flat_mover};

fn only(features: NodeFeatures) -> NodeConfig {
    NodeConfig {
        features,
        ..NodeConfig::weapon()
    }
}

fn none() -> NodeFeatures {
    NodeFeatures {
        sway: false,
        bob: false,
        stance: false,
        jump_land: false,
        sprint_visibility: false,
    }
}

fn animator(node: NodeConfig) -> ViewModelAnimator {
    ViewModelAnimator::new(vec![node]).unwrap_or_else(|e| panic!("invalid node: {e}"))
}

fn grounded() -> LocomotionSnapshot {
    LocomotionSnapshot {
        is_grounded: true,
        ..LocomotionSnapshot::default()
    }
}

fn walking() -> LocomotionSnapshot {
    LocomotionSnapshot {
        current_speed: 6.0,
        move_input_magnitude: 1.0,
        ..grounded()
    }
}

fn sprinting() -> LocomotionSnapshot {
    LocomotionSnapshot {
        is_sprinting: true,
        current_speed: 9.0,
        ..walking()
    }
}

fn airborne() -> LocomotionSnapshot {
    LocomotionSnapshot::default()
}

#[fixture]
fn jump_only() -> ViewModelAnimator {
    animator(only(NodeFeatures {
        jump_land: true,
        ..none()
    }))
}

#[test]
fn large_mouse_delta_is_clamped() {
    let look = LookInput {
        mouse_x: 10.0,
        mouse_y: 0.0,
    };
    let target = sway_target(look, &SwayConfig::default());
    assert_relative_eq!(target.x, -0.06);
    assert_relative_eq!(target.y, 0.0);

    let mut node = only(NodeFeatures {
        sway: true,
        ..none()
    });
    node.tuning.smoothing = SmoothingLaw::ClampedLinear;
    let mut rig = animator(node);
    rig.step(1.0, look, &grounded());
    let sway = rig.nodes()[0].sway();
    assert_relative_eq!(sway.offset.x, -0.06);
    assert_relative_eq!(sway.rotation.y, -6.0, epsilon = 1e-5);
}

#[rstest]
#[case(0.004)]
#[case(0.033)]
#[case(0.25)]
fn sway_never_leaves_its_limit(#[case] dt: f32) {
    let mut rig = animator(NodeConfig::weapon());
    for frame in 0..200_u16 {
        let sign = if frame % 7 < 3 { 1.0 } else { -1.0 };
        let look = LookInput {
            mouse_x: sign * f32::from(frame),
            mouse_y: -sign * 40.0,
        };
        rig.step(dt, look, &grounded());
        let offset = rig.nodes()[0].sway().offset;
        assert!(offset.x.abs() <= 0.06 + 1e-6, "x sway {}", offset.x);
        assert!(offset.y.abs() <= 0.06 + 1e-6, "y sway {}", offset.y);
    }
}

#[test]
fn sprinting_pulls_sway_back_to_center() {
    let mut rig = animator(NodeConfig::weapon());
    let look = LookInput {
        mouse_x: 3.0,
        mouse_y: 3.0,
    };
    rig.step(0.1, look, &walking());
    let before = rig.nodes()[0].sway().offset.length();
    rig.step(0.1, look, &sprinting());
    assert!(rig.nodes()[0].sway().offset.length() < before);
}

#[rstest]
#[case::stopped(grounded())]
#[case::in_the_air(LocomotionSnapshot { current_speed: 6.0, move_input_magnitude: 1.0, ..airborne() })]
fn bob_resets_when_motion_stops(#[case] stop: LocomotionSnapshot) {
    let mut rig = animator(only(NodeFeatures {
        bob: true,
        ..none()
    }));
    for _ in 0..12 {
        rig.step(1.0 / 60.0, LookInput::default(), &walking());
    }
    assert!(rig.nodes()[0].bob().phase > 0.0);
    let poses = rig.step(1.0 / 60.0, LookInput::default(), &stop);
    let bob = rig.nodes()[0].bob();
    assert_eq!(bob.phase, 0.0);
    assert_eq!(bob.offset, Vec3::ZERO);
    assert_vec3_near(poses[0].pose.position, NodeConfig::weapon().rest_position, 1e-6);
}

#[test]
fn bob_follows_published_input_magnitude() {
    let mut rig = animator(only(NodeFeatures {
        bob: true,
        ..none()
    }));
    let pushing_a_wall = LocomotionSnapshot {
        move_input_magnitude: 1.0,
        ..grounded()
    };
    rig.step(0.1, LookInput::default(), &pushing_a_wall);
    assert_relative_eq!(rig.nodes()[0].bob().phase, 1.0, epsilon = 1e-5);

    let released = LocomotionSnapshot {
        move_input_magnitude: 0.05,
        ..grounded()
    };
    rig.step(0.1, LookInput::default(), &released);
    assert_eq!(rig.nodes()[0].bob().phase, 0.0);
}

#[rstest]
#[case::walk(walking(), 1.0)]
#[case::sprint(sprinting(), 1.5)]
#[case::crouch(LocomotionSnapshot { is_crouching: true, current_speed: 3.0, ..walking() }, 0.5)]
fn bob_phase_advances_by_tier(#[case] snapshot: LocomotionSnapshot, #[case] tier: f32) {
    let mut rig = animator(only(NodeFeatures {
        bob: true,
        ..none()
    }));
    rig.step(0.1, LookInput::default(), &snapshot);
    assert_relative_eq!(rig.nodes()[0].bob().phase, 0.1 * 10.0 * tier, epsilon = 1e-5);
}

#[rstest]
fn takeoff_kicks_by_jump_rotation(mut jump_only: ViewModelAnimator) {
    jump_only.step(0.1, LookInput::default(), &grounded());
    jump_only.step(0.1, LookInput::default(), &airborne());
    let state = jump_only.nodes()[0].jump_land();
    assert_relative_eq!(state.rotation_x, -10.0);
    assert_relative_eq!(state.landing_timer, 0.0);
}

#[rstest]
fn first_frame_never_kicks(mut jump_only: ViewModelAnimator) {
    jump_only.step(0.1, LookInput::default(), &airborne());
    assert_relative_eq!(jump_only.nodes()[0].jump_land().rotation_x, 0.0);
}

#[rstest]
fn landing_timer_decays_to_zero(mut jump_only: ViewModelAnimator) {
    jump_only.step(0.1, LookInput::default(), &grounded());
    jump_only.step(0.1, LookInput::default(), &airborne());
    jump_only.step(0.1, LookInput::default(), &grounded());
    let landed = *jump_only.nodes()[0].jump_land();
    assert_relative_eq!(landed.landing_timer, 0.8, epsilon = 1e-6);
    assert!(landed.rotation_x > -10.0);

    let mut timers = vec![landed.landing_timer];
    for _ in 0..6 {
        jump_only.step(0.1, LookInput::default(), &grounded());
        timers.push(jump_only.nodes()[0].jump_land().landing_timer);
    }
    assert!(timers.windows(2).all(|w| w[1] <= w[0]));
    assert_eq!(timers.last().copied(), Some(0.0));
}

#[test]
fn crouch_and_sprint_never_blend_together() {
    let both = LocomotionSnapshot {
        is_crouching: true,
        is_sprinting: true,
        ..walking()
    };
    assert_eq!(Stance::of(&both), Stance::Crouch);

    let mut node = only(NodeFeatures {
        stance: true,
        ..none()
    });
    node.tuning.smoothing = SmoothingLaw::ClampedLinear;
    let crouch_offset = node.tuning.stance.crouch_offset;
    let mut rig = animator(node);
    rig.step(1.0, LookInput::default(), &both);
    let stance = rig.nodes()[0].stance();
    assert_eq!(stance.stance(), Stance::Crouch);
    assert_vec3_near(stance.offset, crouch_offset, 1e-6);
}

#[test]
fn sprint_arm_fades_in_and_out() {
    let mut rig = animator(NodeConfig::left_arm());
    let walk = rig.step(0.05, LookInput::default(), &walking());
    assert!(!walk[0].visibility.active);
    assert_relative_eq!(walk[0].visibility.alpha, 0.0);

    let first = rig.step(0.05, LookInput::default(), &sprinting());
    assert!(first[0].visibility.active);
    assert!(first[0].visibility.alpha > 0.0 && first[0].visibility.alpha < 1.0);
    for _ in 0..60 {
        rig.step(0.05, LookInput::default(), &sprinting());
    }

    let mut frames = 0;
    loop {
        let pose = rig.step(0.05, LookInput::default(), &walking())[0];
        frames += 1;
        if !pose.visibility.active {
            assert!(pose.visibility.alpha < 0.01);
            break;
        }
        assert!(frames < 40, "arm never deactivated");
    }
    assert!(frames > 1);
}

#[test]
fn disabled_node_holds_its_rest_pose() {
    let mut rig = animator(only(none()));
    let rest = rig.nodes()[0].rest();
    let look = LookInput {
        mouse_x: 4.0,
        mouse_y: -4.0,
    };
    for snapshot in [walking(), sprinting(), airborne(), grounded()] {
        let pose = rig.step(0.1, look, &snapshot)[0].pose;
        assert_vec3_near(pose.position, rest.position, 1e-6);
        assert!(pose.rotation.abs_diff_eq(rest.rotation, 1e-6));
    }
}

#[test]
fn default_rig_animates_over_a_live_controller() {
    let mut controller = default_controller();
    let mut mover = flat_mover(&controller);
    let rig = RigConfig {
        nodes: vec![NodeConfig::weapon(), NodeConfig::left_arm()],
        ..RigConfig::default()
    };
    let mut view = ViewModelAnimator::new(rig.nodes).unwrap_or_else(|e| panic!("{e}"));
    let walk = LocomotionInput {
        move_z: 1.0,
        ..LocomotionInput::default()
    };
    let look = LookInput {
        mouse_x: 0.5,
        mouse_y: 0.0,
    };

    let mut poses = Vec::new();
    for _ in 0..20 {
        let snapshot = controller.step(1.0 / 60.0, walk, &mut mover);
        poses = view.step(1.0 / 60.0, look, &snapshot);
    }
    let weapon = view.node("weapon").unwrap_or_else(|| panic!("weapon node"));
    assert!(weapon.bob().phase > 0.0);
    assert!(weapon.sway().offset.x < 0.0);
    assert_ne!(poses[0].pose, weapon.rest());
    assert!(!poses[1].visibility.active);

    let jump = LocomotionInput {
        jump_pressed: true,
        ..walk
    };
    let snapshot = controller.step(1.0 / 60.0, jump, &mut mover);
    view.step(1.0 / 60.0, look, &snapshot);
    let snapshot = controller.step(1.0 / 60.0, walk, &mut mover);
    assert!(!snapshot.is_grounded);
    view.step(1.0 / 60.0, look, &snapshot);
    let weapon = view.node("weapon").unwrap_or_else(|| panic!("weapon node"));
    assert!(weapon.jump_land().rotation_x < -9.0);
    assert_eq!(weapon.bob().phase, 0.0);
}

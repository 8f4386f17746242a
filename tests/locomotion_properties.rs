//! Locomotion behaviour over the reference mover and a mocked body.

use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use glam::{Quat, Vec3};
use mockall::mock;
use rstest::rstest;
use stride::{LocomotionConfig, LocomotionInput, Mover, Pose};
use test_utils::assertions::{assert_strictly_decreasing, assert_vec3_near};
use test_utils::locomotion::{
    ceiling_over_origin, controller_with, crouch_input, default_controller, drive, flat_mover,
};

mock! {
    Body {}
    impl Mover for Body {
        fn move_by(&mut self, motion: Vec3);
        fn is_grounded(&self) -> bool;
        fn position(&self) -> Vec3;
        fn rotation(&self) -> Quat;
        fn set_capsule(&mut self, height: f32, center_y: f32);
        fn raycast_up(&self, origin: Vec3, distance: f32) -> Option<f32>;
    }
}

fn forward() -> LocomotionInput {
    LocomotionInput {
        move_z: 1.0,
        ..LocomotionInput::default()
    }
}

#[test]
fn holding_crouch_shrinks_capsule_within_five_frames() {
    let mut controller = default_controller();
    let mut mover = flat_mover(&controller);
    let heights: Vec<f32> = drive(&mut controller, &mut mover, 0.1, crouch_input(), 5)
        .iter()
        .map(|s| s.capsule_height)
        .collect();

    let mut series = vec![2.0];
    series.extend(&heights);
    assert_strictly_decreasing(&series);
    assert_relative_eq!(heights[0], 1.0 + (-1.0_f32).exp(), epsilon = 1e-5);
    let last = heights[4];
    assert!((last - 1.0).abs() <= 0.01, "capsule at {last}");
    assert_relative_eq!(mover.height(), last);
    assert_relative_eq!(mover.feet_y(), 0.0, epsilon = 1e-5);
}

#[rstest]
#[case(0.005)]
#[case(1.0 / 60.0)]
#[case(0.1)]
#[case(0.5)]
fn crouching_converges_without_overshoot(#[case] dt: f32) {
    let mut controller = default_controller();
    let mut mover = flat_mover(&controller);
    let snapshots = drive(&mut controller, &mut mover, dt, crouch_input(), 400);
    for pair in snapshots.windows(2) {
        assert!(pair[1].capsule_height <= pair[0].capsule_height);
        assert!(pair[1].camera_height <= pair[0].camera_height);
        assert!(pair[1].capsule_height >= 1.0);
    }
    let last = snapshots.last().copied().unwrap_or_default();
    assert_relative_eq!(last.capsule_height, 1.0);
    assert_relative_eq!(last.camera_height, 0.8);
}

#[test]
fn grounded_flag_lags_the_move_by_one_frame() {
    let mut controller = default_controller();
    let mut mover = flat_mover(&controller);
    let jump = LocomotionInput {
        jump_pressed: true,
        ..LocomotionInput::default()
    };
    let takeoff = controller.step(1.0 / 60.0, jump, &mut mover);
    assert!(takeoff.is_grounded, "snapshot reports pre-move contact");
    assert!(!mover.is_grounded());
    assert!(mover.position().y > 0.0);

    let airborne = controller.step(1.0 / 60.0, LocomotionInput::default(), &mut mover);
    assert!(!airborne.is_grounded);
}

#[test]
fn jump_while_crouched_stays_on_the_ground() {
    let mut controller = default_controller();
    let mut mover = flat_mover(&controller);
    drive(&mut controller, &mut mover, 0.05, crouch_input(), 10);
    let jump = LocomotionInput {
        jump_pressed: true,
        ..crouch_input()
    };
    let snapshot = controller.step(0.05, jump, &mut mover);
    assert!(snapshot.vertical_velocity < 0.0);
    assert_relative_eq!(mover.position().y, 0.0);
    assert!(mover.is_grounded());
}

#[rstest]
#[case::walk(false, false, 6.0)]
#[case::sprint(true, false, 9.0)]
#[case::crouch(false, true, 3.0)]
#[case::crouch_beats_sprint(true, true, 3.0)]
fn speed_tiers(#[case] sprint: bool, #[case] crouch: bool, #[case] expected: f32) {
    let mut controller = default_controller();
    let mut mover = flat_mover(&controller);
    let input = LocomotionInput {
        sprint_held: sprint,
        crouch_held: crouch,
        ..forward()
    };
    for _ in 0..3 {
        let start = mover.position();
        let snapshot = controller.step(0.1, input, &mut mover);
        assert_relative_eq!(snapshot.current_speed, expected, epsilon = 1e-5);
        assert_relative_eq!(start.z - mover.position().z, expected * 0.1, epsilon = 1e-5);
        assert_eq!(snapshot.is_sprinting, sprint && !crouch);
    }
}

#[test]
fn first_crouch_frame_never_moves_at_sprint_speed() {
    let mut controller = default_controller();
    let mut mover = flat_mover(&controller);
    let input = LocomotionInput {
        move_z: 1.0,
        sprint_held: true,
        ..crouch_input()
    };
    let snapshot = controller.step(0.1, input, &mut mover);
    assert!(snapshot.is_crouching);
    assert!(!snapshot.is_sprinting);
    assert_relative_eq!(snapshot.current_speed, 3.0, epsilon = 1e-5);
    assert_relative_eq!(-mover.position().z, 0.3, epsilon = 1e-5);
}

#[test]
fn low_ceiling_holds_the_crouch_until_cleared() {
    let mut controller = default_controller();
    let mut mover = flat_mover(&controller).with_ceiling(ceiling_over_origin(1.5));
    drive(&mut controller, &mut mover, 0.1, crouch_input(), 30);
    let held = drive(&mut controller, &mut mover, 0.1, LocomotionInput::default(), 10);
    assert!(held.iter().all(|s| s.is_crouching));
    assert_relative_eq!(held[9].capsule_height, 1.0);

    mover.clear_ceilings();
    let released = controller.step(0.1, LocomotionInput::default(), &mut mover);
    assert!(!released.is_crouching);
    assert!(released.capsule_height > 1.0);
}

#[test]
fn movement_follows_body_yaw() {
    let mut controller = default_controller();
    let mut mover = flat_mover(&controller).with_rotation(Quat::from_rotation_y(FRAC_PI_2));
    controller.step(0.1, forward(), &mut mover);
    assert_vec3_near(mover.position(), Vec3::new(-0.6, 0.0, 0.0), 1e-5);
}

#[test]
fn every_resize_frame_pushes_the_capsule() {
    let mut controller = default_controller();
    let mut body = MockBody::new();
    body.expect_is_grounded().return_const(true);
    body.expect_position().return_const(Vec3::ZERO);
    body.expect_rotation().return_const(Quat::IDENTITY);
    body.expect_move_by().return_const(());
    body.expect_raycast_up().return_const(None);
    body.expect_set_capsule()
        .withf(|height, center| {
            (1.0..2.0).contains(height) && (*center - height * 0.5).abs() < 1e-5
        })
        .times(3)
        .return_const(());
    for _ in 0..3 {
        controller.step(0.1, crouch_input(), &mut body);
    }
}

#[test]
fn settled_capsule_is_not_pushed() {
    let mut controller = default_controller();
    let mut body = MockBody::new();
    body.expect_is_grounded().return_const(true);
    body.expect_rotation().return_const(Quat::IDENTITY);
    body.expect_move_by().return_const(());
    body.expect_set_capsule().never();
    for _ in 0..5 {
        controller.step(0.1, forward(), &mut body);
    }
}

#[test]
fn invalid_dt_freezes_the_body() {
    let mut controller = controller_with(LocomotionConfig::default());
    let mut mover = flat_mover(&controller);
    for dt in [f32::NAN, f32::INFINITY, -0.5] {
        controller.step(dt, forward(), &mut mover);
        assert_vec3_near(mover.position(), Vec3::ZERO, 1e-6);
    }
}

#[test]
fn identity_anchor_leaves_pose_unchanged() {
    let child = Pose::from_euler_degrees(Vec3::new(0.5, -0.3, -0.5), Vec3::new(0.0, -90.0, 0.0));
    let composed = Pose::IDENTITY.compose(child);
    assert_vec3_near(composed.position, child.position, 1e-6);
    assert!(composed.rotation.abs_diff_eq(child.rotation, 1e-6));
}

//! The kinematic mover contract consumed by the locomotion controller.
//!
//! A mover owns the character body: it performs the swept move, reports
//! ground contact, accepts live capsule resizes and answers the clearance
//! ray cast used before standing up. [`PlaneMover`] is a minimal implementation
//! over a flat floor with optional ceiling slabs, used by the replay tool and
//! the tests; hosts with a real collision engine implement [`Mover`] on their
//! own character body.

use bevy::prelude::Component;
use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Kinematic capsule body driven by the locomotion controller.
#[cfg_attr(test, mockall::automock)]
pub trait Mover {
    /// Moves the body by `motion`, resolving collisions.
    fn move_by(&mut self, motion: Vec3);

    /// Whether the last move ended in contact with the ground.
    fn is_grounded(&self) -> bool;

    /// Position of the body origin (the capsule's feet at rest).
    fn position(&self) -> Vec3;

    /// Orientation of the body; its planar projection is the movement basis.
    fn rotation(&self) -> Quat;

    /// Resizes the capsule to `height` centred `center_y` above the origin.
    fn set_capsule(&mut self, height: f32, center_y: f32);

    /// Casts a ray straight up from `origin` for `distance` units and returns
    /// the distance to the first obstruction, if any.
    fn raycast_up(&self, origin: Vec3, distance: f32) -> Option<f32>;
}

/// Horizontal slab whose underside sits at `y`, covering the XZ rectangle
/// from `min` to `max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ceiling {
    /// Minimum corner on the XZ plane.
    pub min: Vec2,
    /// Maximum corner on the XZ plane.
    pub max: Vec2,
    /// Height of the underside.
    pub y: f32,
}

impl Ceiling {
    fn covers(&self, point: Vec3) -> bool {
        (self.min.x..=self.max.x).contains(&point.x) && (self.min.y..=self.max.y).contains(&point.z)
    }
}

/// Mover over an infinite flat floor at `floor_y` with optional ceilings.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct PlaneMover {
    position: Vec3,
    rotation: Quat,
    floor_y: f32,
    ceilings: Vec<Ceiling>,
    height: f32,
    center_y: f32,
    grounded: bool,
}

impl PlaneMover {
    /// Creates a mover standing on a floor at height `position.y`.
    #[must_use]
    pub fn on_floor(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            floor_y: position.y,
            ceilings: Vec::new(),
            height: 0.0,
            center_y: 0.0,
            grounded: true,
        }
    }

    /// Replaces the floor height; the body is not moved.
    #[must_use]
    pub fn with_floor(mut self, floor_y: f32) -> Self {
        self.floor_y = floor_y;
        self
    }

    /// Adds a ceiling slab.
    #[must_use]
    pub fn with_ceiling(mut self, ceiling: Ceiling) -> Self {
        self.ceilings.push(ceiling);
        self
    }

    /// Sets the body orientation.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Turns the body to face `rotation`.
    pub fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    /// Adds a ceiling slab to an existing mover.
    pub fn push_ceiling(&mut self, ceiling: Ceiling) {
        self.ceilings.push(ceiling);
    }

    /// Removes every ceiling slab.
    pub fn clear_ceilings(&mut self) {
        self.ceilings.clear();
    }

    /// Current capsule height.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Current capsule centre above the origin.
    #[must_use]
    pub const fn center_y(&self) -> f32 {
        self.center_y
    }

    /// Height of the capsule's bottom in world space.
    #[must_use]
    pub fn feet_y(&self) -> f32 {
        self.position.y + self.center_y - self.height * 0.5
    }

    fn head_clearance(&self, at: Vec3) -> Option<f32> {
        let head = at.y + self.center_y + self.height * 0.5;
        self.ceilings
            .iter()
            .filter(|c| c.covers(at) && c.y >= at.y)
            .map(|c| c.y - head)
            .reduce(f32::min)
    }
}

impl Mover for PlaneMover {
    fn move_by(&mut self, motion: Vec3) {
        if !motion.is_finite() {
            return;
        }
        let mut next = self.position + motion;
        if motion.y > 0.0 {
            if let Some(gap) = self.head_clearance(next) {
                if gap < 0.0 {
                    next.y += gap;
                }
            }
        }
        self.grounded = next.y <= self.floor_y;
        if self.grounded {
            next.y = self.floor_y;
        }
        self.position = next;
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_capsule(&mut self, height: f32, center_y: f32) {
        self.height = height;
        self.center_y = center_y;
    }

    fn raycast_up(&self, origin: Vec3, distance: f32) -> Option<f32> {
        self.ceilings
            .iter()
            .filter(|c| c.covers(origin))
            .map(|c| c.y - origin.y)
            .filter(|gap| (0.0..=distance).contains(gap))
            .reduce(f32::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn slab(y: f32) -> Ceiling {
        Ceiling {
            min: Vec2::splat(-1.0),
            max: Vec2::splat(1.0),
            y,
        }
    }

    #[test]
    fn falling_through_floor_snaps_and_grounds() {
        let mut mover = PlaneMover::on_floor(Vec3::ZERO);
        mover.move_by(Vec3::new(0.0, 1.0, 0.0));
        assert!(!mover.is_grounded());
        mover.move_by(Vec3::new(1.0, -3.0, 0.0));
        assert!(mover.is_grounded());
        assert_relative_eq!(mover.position().y, 0.0);
        assert_relative_eq!(mover.position().x, 1.0);
    }

    #[test]
    fn raycast_reports_nearest_ceiling_within_range() {
        let mover = PlaneMover::on_floor(Vec3::ZERO)
            .with_ceiling(slab(1.8))
            .with_ceiling(slab(1.5));
        let hit = mover.raycast_up(Vec3::new(0.0, 1.0, 0.0), 1.0);
        assert_relative_eq!(hit.unwrap_or(f32::NAN), 0.5);
        assert_eq!(mover.raycast_up(Vec3::new(0.0, 1.0, 0.0), 0.25), None);
        assert_eq!(mover.raycast_up(Vec3::new(5.0, 1.0, 0.0), 1.0), None);
    }

    #[test]
    fn head_bumps_stop_upward_motion() {
        let mut mover = PlaneMover::on_floor(Vec3::ZERO).with_ceiling(slab(2.5));
        mover.set_capsule(2.0, 1.0);
        mover.move_by(Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(mover.position().y, 0.5);
    }

    #[test]
    fn feet_follow_capsule_center() {
        let mut mover = PlaneMover::on_floor(Vec3::ZERO);
        mover.set_capsule(1.0, 0.5);
        assert_relative_eq!(mover.feet_y(), 0.0);
    }
}

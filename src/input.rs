//! Per-frame input consumed by the controllers.
//!
//! The core only sees [`LocomotionInput`] and [`LookInput`]; how they are
//! produced is up to the host. [`capture_input_system`] fills them from Bevy's
//! keyboard and mouse resources through configurable [`KeyBindings`] when the
//! input plugin is present, and leaves them untouched otherwise so tests and
//! scripted hosts can write [`FrameInput`] directly.

use bevy::input::keyboard::KeyCode;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::input::ButtonInput;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::Character;

/// Movement axes and buttons for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocomotionInput {
    /// Strafe axis in `[-1, 1]`; positive moves right.
    pub move_x: f32,
    /// Forward axis in `[-1, 1]`; positive moves forward.
    pub move_z: f32,
    /// Crouch key is held.
    pub crouch_held: bool,
    /// Jump was pressed this frame.
    pub jump_pressed: bool,
    /// Sprint key is held.
    pub sprint_held: bool,
}

impl LocomotionInput {
    /// Returns a copy with both axes clamped to `[-1, 1]` and NaN zeroed.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let axis = |value: f32| {
            if value.is_nan() {
                0.0
            } else {
                value.clamp(-1.0, 1.0)
            }
        };
        Self {
            move_x: axis(self.move_x),
            move_z: axis(self.move_z),
            ..self
        }
    }

    /// Length of the raw movement axes.
    #[must_use]
    pub fn move_magnitude(&self) -> f32 {
        Vec2::new(self.move_x, self.move_z).length()
    }
}

/// Mouse delta for one frame, already scaled to look-axis units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LookInput {
    /// Horizontal delta; positive turns right.
    pub mouse_x: f32,
    /// Vertical delta; positive looks up.
    pub mouse_y: f32,
}

/// Everything a character reads from its input devices in one frame.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameInput {
    /// Movement axes and buttons.
    pub locomotion: LocomotionInput,
    /// Mouse delta.
    pub look: LookInput,
}

/// Key assignments and mouse scaling used by [`capture_input_system`].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct KeyBindings {
    /// Moves forward.
    pub forward: KeyCode,
    /// Moves backward.
    pub back: KeyCode,
    /// Strafes left.
    pub left: KeyCode,
    /// Strafes right.
    pub right: KeyCode,
    /// Jumps on press.
    pub jump: KeyCode,
    /// Crouches while held.
    pub crouch: KeyCode,
    /// Sprints while held.
    pub sprint: KeyCode,
    /// Look-axis units per pixel of mouse motion.
    pub mouse_sensitivity: f32,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            crouch: KeyCode::ControlLeft,
            sprint: KeyCode::ShiftLeft,
            mouse_sensitivity: 0.1,
        }
    }
}

impl KeyBindings {
    /// Reads the bound keys from `keys`.
    #[must_use]
    pub fn locomotion(&self, keys: &ButtonInput<KeyCode>) -> LocomotionInput {
        let axis = |positive: KeyCode, negative: KeyCode| {
            f32::from(u8::from(keys.pressed(positive))) - f32::from(u8::from(keys.pressed(negative)))
        };
        LocomotionInput {
            move_x: axis(self.right, self.left),
            move_z: axis(self.forward, self.back),
            crouch_held: keys.pressed(self.crouch),
            jump_pressed: keys.just_pressed(self.jump),
            sprint_held: keys.pressed(self.sprint),
        }
    }

    /// Converts a mouse delta in pixels (y down) into look-axis units (y up).
    #[must_use]
    pub fn look(&self, delta: Vec2) -> LookInput {
        LookInput {
            mouse_x: delta.x * self.mouse_sensitivity,
            mouse_y: -delta.y * self.mouse_sensitivity,
        }
    }
}

/// Polls keyboard and mouse once per frame into every character's
/// [`FrameInput`].
///
/// Does nothing when the keyboard resource is missing, which is the case
/// under `MinimalPlugins`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy systems receive resources by value."
)]
pub fn capture_input_system(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    motion: Option<Res<AccumulatedMouseMotion>>,
    bindings: Res<KeyBindings>,
    mut characters: Query<&mut FrameInput, With<Character>>,
) {
    let Some(keys) = keys else {
        return;
    };
    let locomotion = bindings.locomotion(&keys);
    let look = motion.map_or_else(LookInput::default, |m| bindings.look(m.delta));
    for mut input in &mut characters {
        *input = FrameInput { locomotion, look };
    }
}

//! Sprint-only node fade.

use log::debug;

use crate::config::VisibilityConfig;
use crate::smoothing::{approach, SmoothingLaw};
use crate::VISIBILITY_THRESHOLD;

/// Fade alpha and activation of a node shown only while sprinting.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisibilityState {
    /// Opacity in `[0, 1]`.
    pub alpha: f32,
    /// Whether the node should be drawn at all.
    pub active: bool,
}

impl VisibilityState {
    /// Always drawn, fully opaque.
    pub const SHOWN: Self = Self {
        alpha: 1.0,
        active: true,
    };

    /// Shows the node the instant sprinting starts and hides it only once
    /// the fade drops below [`VISIBILITY_THRESHOLD`].
    pub(crate) fn step(
        &mut self,
        dt: f32,
        sprinting: bool,
        config: &VisibilityConfig,
        law: SmoothingLaw,
    ) {
        let target = if sprinting { 1.0 } else { 0.0 };
        self.alpha = approach(self.alpha, target, dt, config.transition_speed, law).clamp(0.0, 1.0);
        if sprinting && !self.active {
            debug!("sprint node activated");
            self.active = true;
        } else if !sprinting && self.active && self.alpha < VISIBILITY_THRESHOLD {
            debug!("sprint node deactivated");
            self.active = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_instantly_hides_late() {
        let config = VisibilityConfig::default();
        let law = SmoothingLaw::Exponential;
        let mut state = VisibilityState::default();
        state.step(0.016, true, &config, law);
        assert!(state.active);
        assert!(state.alpha < 0.5);

        for _ in 0..60 {
            state.step(0.016, true, &config, law);
        }
        state.step(0.016, false, &config, law);
        assert!(state.active, "hidden before the fade finished");

        let mut frames = 0;
        while state.active {
            state.step(0.016, false, &config, law);
            frames += 1;
            assert!(frames < 10_000, "node never deactivated");
        }
        assert!(state.alpha < VISIBILITY_THRESHOLD);
    }
}

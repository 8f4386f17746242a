//! Configuration errors raised when building controllers and rigs.
//!
//! Everything in this crate that can fail does so at initialisation; once a
//! controller or animator exists its `step` functions are infallible.

use thiserror::Error;

/// Reasons a locomotion or view-model configuration is rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A tunable was NaN or infinite.
    #[error("`{field}` must be finite, got {value}")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A speed, rate, height or amount that must not be negative was.
    #[error("`{field}` must not be negative, got {value}")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// A capsule or camera height that must be strictly positive was not.
    #[error("`{field}` must be positive, got {value}")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
        /// Rejected value.
        value: f32,
    },
    /// Gravity must pull the character down.
    #[error("gravity must be negative, got {0}")]
    GravityNotDownward(f32),
    /// Crouching would make the capsule taller than standing.
    #[error("crouch height {crouch} exceeds standing height {standing}")]
    CrouchTallerThanStanding {
        /// Configured crouch height.
        crouch: f32,
        /// Configured standing height.
        standing: f32,
    },
    /// An animator was created without any node to drive.
    #[error("a view-model animator needs at least one tracked node")]
    NoTrackedNodes,
    /// Two tracked nodes share a name.
    #[error("tracked node name `{0}` is used more than once")]
    DuplicateNode(String),
    /// A character entity was spawned without the mover it steers.
    #[error("character {0} has no mover component")]
    MissingMover(String),
    /// A rig refers to a node entity that does not exist.
    #[error("view-model node `{node}` targets a missing entity {entity}")]
    MissingNode {
        /// Name of the tracked node.
        node: String,
        /// Debug rendering of the missing entity.
        entity: String,
    },
    /// A rig lists a different number of target entities than nodes.
    #[error("rig drives {nodes} nodes but names {targets} target entities")]
    TargetCount {
        /// Tracked nodes in the animator.
        nodes: usize,
        /// Target entities supplied.
        targets: usize,
    },
    /// A configuration document could not be parsed.
    #[error("invalid configuration document: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Returns `Ok(value)` when `value` is finite.
pub(crate) fn finite(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NonFinite { field, value })
    }
}

/// Returns `Ok(value)` when `value` is finite and not negative.
pub(crate) fn non_negative(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if finite(field, value)? < 0.0 {
        return Err(ConfigError::Negative { field, value });
    }
    Ok(value)
}

/// Returns `Ok(value)` when `value` is finite and strictly positive.
pub(crate) fn positive(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if finite(field, value)? <= 0.0 {
        return Err(ConfigError::NonPositive { field, value });
    }
    Ok(value)
}

//! Headless Bevy apps running the first-person plugin.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use stride::{FirstPersonPlugin, PlaneMover};

/// App with `MinimalPlugins`, the plugin over [`PlaneMover`] and a fixed
/// `dt` of `step`.
///
/// The first `update` still reports a zero delta; callers that count frames
/// should tick once before measuring.
#[must_use]
pub fn headless_app(step: Duration) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(FirstPersonPlugin::<PlaneMover>::default());
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    app
}

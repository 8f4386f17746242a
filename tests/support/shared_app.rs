//! A Bevy `App` shareable across rspec closures.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bevy::prelude::App;

/// Mutex-guarded app handed to every rspec example.
#[derive(Debug, Clone)]
pub struct SharedApp(Arc<Mutex<GuardedApp>>);

/// The wrapped app; only reachable through the mutex.
#[derive(Debug)]
pub struct GuardedApp(pub App);

// SAFETY: rspec fixtures must be `Send + Sync`; the suite runs serially and
// every access goes through the mutex.
unsafe impl Send for GuardedApp {}
unsafe impl Sync for GuardedApp {}

impl SharedApp {
    /// Wraps a configured app.
    #[must_use]
    pub fn new(app: App) -> Self {
        Self(Arc::new(Mutex::new(GuardedApp(app))))
    }

    /// Locks the app, recovering from a poisoned mutex.
    pub fn lock(&self) -> MutexGuard<'_, GuardedApp> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Runs one frame.
    pub fn tick(&self) {
        self.lock().0.update();
    }
}

//! Shared fixtures for `stride` tests.
pub mod app;
pub mod assertions;
pub mod locomotion;

//! Logger bootstrap for the replay binary and tests.
use env_logger::{Builder, Env};
use log::debug;

const QUIET: &str = "info";
const VERBOSE: &str = concat!("info,", env!("CARGO_PKG_NAME"), "=debug");

/// Filter used when `RUST_LOG` is unset.
///
/// Verbose runs only raise this crate to `debug`; everything else stays at
/// `info`.
#[must_use]
pub const fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        VERBOSE
    } else {
        QUIET
    }
}

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` takes precedence over [`default_filter`]. Record targets are
/// printed in verbose mode so controller and plugin output can be told
/// apart. Calling this more than once is harmless.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let mut builder = Builder::from_env(env);
    builder.format_timestamp(None).format_target(verbose);
    if builder.try_init().is_err() {
        debug!("logger already initialised");
    }
}

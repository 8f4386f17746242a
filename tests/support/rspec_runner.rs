//! Drives `rspec` suites that share one Bevy `App` and turns failed examples
//! into a failed `cargo test`.
//!
//! rspec catches panics inside each example and only records them in its
//! report, so the report has to be checked here.

use std::fmt::Debug;
use std::io;
use std::sync::Arc;

use rspec::block::Suite;
use rspec::report::{Report, SuiteReport};
use rspec::{ConfigurationBuilder, Logger, Runner};

/// Runs `suite` on the calling thread and hands back its report.
pub fn run_suite<T>(suite: &Suite<T>) -> SuiteReport
where
    T: Clone + Send + Sync + Debug,
{
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(false)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    let logger = Arc::new(Logger::new(io::stdout()));
    Runner::new(config, vec![logger]).run(suite)
}

/// Runs `suite` serially and panics if any example failed.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + Debug,
{
    let report = run_suite(suite);
    assert!(
        report.is_success(),
        "{} of {} rspec examples failed",
        report.get_failed(),
        report.get_passed() + report.get_failed()
    );
}

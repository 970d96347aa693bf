use crate::checker;
use crate::config::CheckConfig;
use crate::error::CheckerError;
use std::time::{Duration, Instant};
use tracing::info;

/// Run the full check pipeline repeatedly and report the average latency.
///
/// Every iteration re-derives its own requirements, bag facts and report;
/// nothing mutable is shared between runs. Errors propagate exactly as they
/// would from a single check.
pub fn time_check_bag(config: &CheckConfig, num_runs: u32) -> Result<Duration, CheckerError> {
    if num_runs == 0 {
        return Err(CheckerError::Config(
            "num_runs must be at least 1 for the speed test".to_string(),
        ));
    }

    let start = Instant::now();
    for _ in 0..num_runs {
        let _report = checker::check_bag(config)?;
    }
    let average = start.elapsed() / num_runs;

    info!(
        "check_bag took an average of {:.3} ms to run (average over {} runs)",
        average.as_secs_f64() * 1000.0,
        num_runs
    );
    Ok(average)
}

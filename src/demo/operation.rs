//! Delay, busy loop and elapsed-time reporting.

use std::hint::black_box;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use tokio::time::Instant;

use crate::config::DemoConfig;
use crate::demo::types::{DemoResponsePayload, OperationError};
use crate::lifecycle::Shutdown;

/// Subject and pattern of the busy-loop match. The pattern is anchored so it
/// is a whole-string match.
const BURN_SUBJECT: &str = "Foo";
static BURN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^F.*$").expect("busy-loop pattern is a valid regex"));

/// What to do when a delay is cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbortPolicy {
    /// Hand the error to the caller.
    Propagate,
    /// Log the error and continue with a default result.
    LogAndDefault,
}

/// Run `rounds` rounds of `iterations` regex matches each.
///
/// The pattern is compiled once, so a round costs `iterations` matches and
/// nothing more. That is far cheaper than recompiling per match, so the
/// wall-clock cost of one round depends on the host and is calibrated through
/// `service.burn_iterations` rather than fixed by the iteration count.
///
/// Returns the number of successful matches so the work cannot be optimised away.
pub fn burn_cpu(rounds: u64, iterations: u64) -> u64 {
    let pattern = &*BURN_PATTERN;
    let mut matched = 0u64;
    for _ in 0..rounds {
        for _ in 0..iterations {
            if pattern.is_match(black_box(BURN_SUBJECT)) {
                matched += 1;
            }
        }
    }
    black_box(matched)
}

/// Text placed in `data` for a finished operation.
pub fn elapsed_message(elapsed_secs: u64) -> String {
    format!("Total time spent: {elapsed_secs} seconds")
}

/// Whole seconds in `elapsed`, truncated.
fn truncated_secs(elapsed: Duration) -> u64 {
    (elapsed.as_millis() / 1000) as u64
}

/// Executes the delayed operation for both demo routes.
#[derive(Clone)]
pub struct DemoOperation {
    env: String,
    burn_iterations: u64,
    shutdown: Arc<Shutdown>,
}

impl DemoOperation {
    pub fn new(config: &DemoConfig, shutdown: Arc<Shutdown>) -> Self {
        Self {
            env: config.env.clone(),
            burn_iterations: config.burn_iterations,
            shutdown,
        }
    }

    /// Sleep for `delay_secs`, or fail with [`OperationError::Aborted`] if the
    /// service shuts down first.
    pub async fn delay(&self, delay_secs: u64) -> Result<(), OperationError> {
        let mut rx = self.shutdown.subscribe();
        if self.shutdown.is_triggered() {
            return Err(OperationError::Aborted);
        }

        tokio::select! {
            _ = tokio::time::sleep(Duration::from_secs(delay_secs)) => Ok(()),
            _ = rx.recv() => {
                tracing::warn!(delay_secs, "Delay interrupted by shutdown");
                Err(OperationError::Aborted)
            }
        }
    }

    /// Sleep, burn CPU for `repeat_count` rounds, and report the elapsed time.
    pub async fn perform_delayed_operation(
        &self,
        delay_secs: u64,
        repeat_count: u64,
    ) -> Result<DemoResponsePayload, OperationError> {
        let start = Instant::now();

        self.delay(delay_secs).await?;

        if repeat_count > 0 {
            let iterations = self.burn_iterations;
            let matched = tokio::task::spawn_blocking(move || burn_cpu(repeat_count, iterations))
                .await
                .map_err(|e| OperationError::Worker(e.to_string()))?;
            tracing::debug!(repeat_count, matched, "Busy loop finished");
        }

        let elapsed = start.elapsed();
        let elapsed_secs = truncated_secs(elapsed);

        tracing::info!(
            delay_secs,
            repeat_count,
            elapsed_ms = elapsed.as_millis() as u64,
            "Demo operation complete"
        );

        Ok(DemoResponsePayload {
            environment: Some(self.env.clone()),
            data: Some(elapsed_message(elapsed_secs)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn operation(burn_iterations: u64) -> (DemoOperation, Arc<Shutdown>) {
        let shutdown = Arc::new(Shutdown::new());
        let config = DemoConfig {
            env: "test".into(),
            burn_iterations,
        };
        (DemoOperation::new(&config, shutdown.clone()), shutdown)
    }

    #[test]
    fn test_burn_cpu_counts_matches() {
        assert_eq!(burn_cpu(3, 10), 30);
        assert_eq!(burn_cpu(0, 10), 0);
    }

    #[test]
    fn test_pattern_is_whole_match() {
        assert!(BURN_PATTERN.is_match("Foo"));
        assert!(!BURN_PATTERN.is_match("oFoo"));
    }

    #[test]
    fn test_truncation_not_rounding() {
        assert_eq!(truncated_secs(Duration::from_millis(999)), 0);
        assert_eq!(truncated_secs(Duration::from_millis(1999)), 1);
        assert_eq!(truncated_secs(Duration::from_millis(2000)), 2);
    }

    #[test]
    fn test_elapsed_message() {
        assert_eq!(elapsed_message(3), "Total time spent: 3 seconds");
    }

    #[tokio::test]
    async fn test_zero_delay_zero_rounds() {
        let (op, _shutdown) = operation(10);
        let rs = op.perform_delayed_operation(0, 0).await.unwrap();
        assert_eq!(rs.environment.as_deref(), Some("test"));
        assert_eq!(rs.data.as_deref(), Some("Total time spent: 0 seconds"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_delay_reported_in_full() {
        let (op, _shutdown) = operation(10);
        let rs = op.perform_delayed_operation(301, 0).await.unwrap();
        assert_eq!(rs.data.as_deref(), Some("Total time spent: 301 seconds"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delay_reported_in_seconds() {
        let (op, _shutdown) = operation(10);
        let started = tokio::time::Instant::now();
        op.delay(2).await.unwrap();
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_delay_aborted_by_shutdown() {
        let (op, shutdown) = operation(10);
        let handle = tokio::spawn(async move { op.delay(30).await });

        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown.trigger();

        let result = tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("delay should end promptly")
            .unwrap();
        assert!(matches!(result, Err(OperationError::Aborted)));
    }

    #[tokio::test]
    async fn test_delay_after_shutdown_fails_fast() {
        let (op, shutdown) = operation(10);
        shutdown.trigger();
        assert!(matches!(op.delay(5).await, Err(OperationError::Aborted)));
    }
}

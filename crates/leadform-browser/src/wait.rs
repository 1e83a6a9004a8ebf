//! Polling primitives shared by navigation, locator actions and expectations.
//!
//! Nothing in the browser layer sleeps for a fixed amount of time. Every
//! "wait until" is a condition re-evaluated at `poll_interval` until it holds
//! or `timeout` elapses, which is the only retry mechanism the suite has.

use crate::error::{BrowserError, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;

/// Default timeout for page-level waits such as document load (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default poll interval for checking conditions (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Default window for `expect(..)` assertions (5 seconds).
pub const DEFAULT_EXPECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Default window for locator actions to find an actionable element (10 seconds).
pub const DEFAULT_ACTION_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout and poll interval for one wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Maximum time to wait for the condition.
    pub timeout: Duration,

    /// How often to check if the condition is satisfied.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a new wait configuration.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Creates a config with custom timeout and default poll interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Outcome of a [`poll_until`] run.
#[derive(Debug, Clone, PartialEq)]
pub enum Polled<T> {
    /// The predicate accepted this value.
    Satisfied(T),
    /// Time ran out. Holds the last value observed, if any probe succeeded.
    TimedOut(Option<T>),
}

/// Waits for a condition to become true, with timeout.
///
/// # Example
///
/// ```ignore
/// wait_for(
///     || async { banner_gone().await },
///     WaitConfig::default(),
///     "cookie banner to disappear"
/// ).await?;
/// ```
///
/// # Errors
///
/// Returns `WaitTimeout` when the condition is still false at the deadline.
pub async fn wait_for<F, Fut>(condition: F, config: WaitConfig, description: &str) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    let start = Instant::now();

    loop {
        if condition().await {
            return Ok(());
        }

        if start.elapsed() >= config.timeout {
            return Err(BrowserError::WaitTimeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}

/// Waits for a condition that returns a `Result<bool>`.
///
/// Errors from the condition are treated as "not yet": the element may not
/// exist yet, or the page may be mid-navigation.
///
/// # Errors
///
/// Returns `WaitTimeout` when the condition never returned `Ok(true)`.
pub async fn wait_for_result<F, Fut>(
    condition: F,
    config: WaitConfig,
    description: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();

    loop {
        match condition().await {
            Ok(true) => return Ok(()),
            Ok(false) | Err(_) => {}
        }

        if start.elapsed() >= config.timeout {
            return Err(BrowserError::WaitTimeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}

/// Probes repeatedly until `accept` likes the value or time runs out.
///
/// Unlike [`wait_for_result`] the caller keeps the observed value on both
/// paths, so expectations can report what they actually saw.
pub async fn poll_until<T, F, Fut, P>(probe: F, accept: P, config: WaitConfig) -> Polled<T>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T>>,
    P: Fn(&T) -> bool,
{
    let start = Instant::now();
    let mut last = None;

    loop {
        if let Ok(value) = probe().await {
            if accept(&value) {
                return Polled::Satisfied(value);
            }
            last = Some(value);
        }

        if start.elapsed() >= config.timeout {
            return Polled::TimedOut(last);
        }

        sleep(config.poll_interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn wait_for_succeeds_immediately() {
        let result = wait_for(|| async { true }, WaitConfig::default(), "test condition").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn wait_for_succeeds_eventually() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = wait_for(
            move || {
                let c = counter_clone.clone();
                async move { c.fetch_add(1, Ordering::SeqCst) >= 3 }
            },
            WaitConfig::with_timeout(Duration::from_secs(5)),
            "counter >= 3",
        )
        .await;

        assert!(result.is_ok());
        assert!(counter.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn wait_for_times_out() {
        let result = wait_for(
            || async { false },
            WaitConfig::new(Duration::from_millis(100), Duration::from_millis(10)),
            "impossible condition",
        )
        .await;

        assert!(matches!(result, Err(BrowserError::WaitTimeout { .. })));
    }

    #[tokio::test]
    async fn wait_for_result_keeps_polling_through_errors() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = wait_for_result(
            move || {
                let c = counter_clone.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(BrowserError::ScriptExecutionFailed("detached".into()))
                    } else {
                        Ok(true)
                    }
                }
            },
            WaitConfig::new(Duration::from_secs(1), Duration::from_millis(5)),
            "element attached",
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn poll_until_reports_last_value_on_timeout() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let outcome = poll_until(
            move || {
                let c = counter_clone.clone();
                async move { Ok(c.fetch_add(1, Ordering::SeqCst)) }
            },
            |n| *n > 1_000,
            WaitConfig::new(Duration::from_millis(50), Duration::from_millis(5)),
        )
        .await;

        match outcome {
            Polled::TimedOut(Some(last)) => assert!(last >= 1),
            other => panic!("expected a timeout with a value, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn poll_until_accepts_the_first_matching_probe() {
        let probes = Arc::new(AtomicU32::new(0));
        let probes_clone = probes.clone();

        // Shaped like a negated expectation: accept whenever the state is absent
        let outcome = poll_until(
            move || {
                let p = probes_clone.clone();
                async move {
                    p.fetch_add(1, Ordering::SeqCst);
                    Ok(false)
                }
            },
            |visible| !*visible,
            WaitConfig::new(Duration::from_secs(5), Duration::from_millis(500)),
        )
        .await;

        assert_eq!(outcome, Polled::Satisfied(false));
        assert_eq!(probes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn poll_until_times_out_without_value_when_every_probe_fails() {
        let outcome: Polled<u32> = poll_until(
            || async { Err(BrowserError::AlreadyClosed) },
            |_| true,
            WaitConfig::new(Duration::from_millis(30), Duration::from_millis(5)),
        )
        .await;

        assert_eq!(outcome, Polled::TimedOut(None));
    }
}

//! Polling assertions over locators.
//!
//! `expect(&locator).to_be_visible().await` re-probes the element until the
//! condition holds or the expectation window closes. Negation goes through
//! [`Expectation::not`], which is also how a scenario states that something
//! must *not* happen. A negated assertion passes on the first probe that does
//! not show the unwanted state, so `not().to_be_visible()` right after an
//! action only proves the state was absent at that instant.

use crate::error::{BrowserError, Result};
use crate::locator::Locator;
use crate::wait::{poll_until, Polled, WaitConfig, DEFAULT_EXPECT_TIMEOUT, DEFAULT_POLL_INTERVAL};
use std::fmt::Debug;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Starts an expectation against `locator` with the default 5 second window.
#[must_use]
pub fn expect(locator: &Locator) -> Expectation {
    Expectation::new(locator.clone())
}

/// A pending assertion about one locator.
#[derive(Debug, Clone)]
pub struct Expectation {
    locator: Locator,
    negated: bool,
    config: WaitConfig,
}

impl Expectation {
    fn new(locator: Locator) -> Self {
        Self {
            locator,
            negated: false,
            config: WaitConfig::new(DEFAULT_EXPECT_TIMEOUT, DEFAULT_POLL_INTERVAL),
        }
    }

    /// Inverts the matcher that follows.
    #[must_use]
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    /// Inverts the matcher when `expected` is false. Convenient for
    /// assertions that take the desired state as a flag.
    #[must_use]
    pub fn to_be(self, expected: bool) -> Self {
        if expected {
            self
        } else {
            self.not()
        }
    }

    /// Overrides the polling window.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    fn matcher_name(&self, matcher: &str) -> String {
        if self.negated {
            format!("not.{matcher}")
        } else {
            matcher.to_string()
        }
    }

    async fn assert_state<T, F, Fut>(&self, matcher: &str, expected: T, probe: F) -> Result<()>
    where
        T: PartialEq + Debug,
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let negated = self.negated;
        let name = self.matcher_name(matcher);
        debug!(locator = %self.locator.describe(), matcher = %name, "expect");

        match poll_until(probe, |value| (*value == expected) != negated, self.config).await {
            Polled::Satisfied(_) => Ok(()),
            Polled::TimedOut(last) => Err(BrowserError::ExpectationFailed {
                locator: self.locator.describe(),
                expected: name,
                received: last.map_or_else(|| "<no element>".to_string(), |v| format!("{v:?}")),
                timeout: self.config.timeout,
            }),
        }
    }

    /// Passes once the element is rendered with a non-empty box.
    ///
    /// # Errors
    ///
    /// Returns `ExpectationFailed` when the window closes first.
    pub async fn to_be_visible(&self) -> Result<()> {
        let locator = &self.locator;
        self.assert_state("to_be_visible()", true, move || locator.is_visible())
            .await
    }

    /// Passes once the element is absent or not rendered.
    ///
    /// # Errors
    ///
    /// Returns `ExpectationFailed` when the window closes first.
    pub async fn to_be_hidden(&self) -> Result<()> {
        let locator = &self.locator;
        self.assert_state("to_be_hidden()", false, move || locator.is_visible())
            .await
    }

    /// Passes once the element holds keyboard focus.
    ///
    /// # Errors
    ///
    /// Returns `ExpectationFailed` when the window closes first.
    pub async fn to_be_focused(&self) -> Result<()> {
        let locator = &self.locator;
        self.assert_state("to_be_focused()", true, move || locator.is_focused())
            .await
    }

    /// Passes once the element reads as checked.
    ///
    /// # Errors
    ///
    /// Returns `ExpectationFailed` when the window closes first.
    pub async fn to_be_checked(&self) -> Result<()> {
        let locator = &self.locator;
        self.assert_state("to_be_checked()", true, move || locator.is_checked())
            .await
    }

    /// Passes once the element's value equals `value`.
    ///
    /// # Errors
    ///
    /// Returns `ExpectationFailed` when the window closes first.
    pub async fn to_have_value(&self, value: &str) -> Result<()> {
        let locator = &self.locator;
        self.assert_state(
            &format!("to_have_value({value:?})"),
            value.to_string(),
            move || locator.input_value(),
        )
        .await
    }

    /// Passes once some part of the element intersects the viewport.
    ///
    /// # Errors
    ///
    /// Returns `ExpectationFailed` when the window closes first.
    pub async fn to_be_in_viewport(&self) -> Result<()> {
        let locator = &self.locator;
        self.assert_state("to_be_in_viewport()", true, move || locator.is_in_viewport())
            .await
    }

    /// Passes once the chain resolves to exactly `count` elements.
    ///
    /// # Errors
    ///
    /// Returns `ExpectationFailed` when the window closes first.
    pub async fn to_have_count(&self, count: usize) -> Result<()> {
        let locator = &self.locator;
        self.assert_state(&format!("to_have_count({count})"), count, move || {
            locator.count()
        })
        .await
    }
}

//! Error types for browser automation and page assertions.
//!
//! Every failure a scenario can hit funnels into [`BrowserError`]: the
//! browser refusing to start, a locator matching nothing (or too much), an
//! expectation that never became true inside its polling window, or a
//! captured request whose body does not decode. Each variant carries enough
//! context to read the failure straight from the test output.

use std::time::Duration;
use thiserror::Error;

/// The main error type for all browser testing operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process.
    ///
    /// This typically occurs when Chrome/Chromium is not installed,
    /// or when there are permission issues with the executable.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish or use the Chrome DevTools Protocol connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed or timed out.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// A wait condition was not satisfied within the timeout.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before timing out
        timeout: Duration,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// An action needed exactly one element but the locator matched several.
    #[error("strict mode violation: {locator} resolved to {count} elements")]
    StrictModeViolation {
        /// Rendered locator chain
        locator: String,
        /// Number of matched elements
        count: usize,
    },

    /// No element matched the locator before the action timeout elapsed.
    #[error("{locator} did not resolve to an element within {timeout:?}")]
    ElementNotFound {
        /// Rendered locator chain
        locator: String,
        /// Action timeout that elapsed
        timeout: Duration,
    },

    /// The element exists but never became actionable (hidden, disabled,
    /// detached) or the action had no effect.
    #[error("{locator} is not interactable: {reason}")]
    NotInteractable {
        /// Rendered locator chain
        locator: String,
        /// What blocked the action
        reason: String,
    },

    /// A polled expectation did not hold within its window.
    #[error("expect({locator}).{expected} failed after {timeout:?}: received {received}")]
    ExpectationFailed {
        /// Rendered locator chain
        locator: String,
        /// Matcher description, e.g. `not.to_be_visible()`
        expected: String,
        /// Last observed state
        received: String,
        /// Expectation timeout
        timeout: Duration,
    },

    /// A page object was asked for an identifier it has no locator for.
    #[error("no locator registered for '{0}'")]
    MissingLocator(String),

    /// Request interception failed before a request was observed.
    #[error("request capture failed: {0}")]
    RequestCapture(String),

    /// A captured request body was missing or did not decode.
    #[error("request payload invalid: {0}")]
    InvalidPayload(String),

    /// A payload assertion did not hold.
    #[error("payload assertion failed: {0}")]
    PayloadAssertion(String),

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// JSON (de)serialization errors, mostly from locator payloads and request bodies.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors, e.g. creating the browser profile directory.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

//! # leadform-browser
//!
//! Browser automation for the lead-form end-to-end suite, built on
//! chromiumoxide.
//!
//! The suite's page objects only ever talk to this crate. It supplies what a
//! Playwright-style framework would: a per-scenario Chrome process, lazy
//! locators that re-resolve on every use, auto-waiting actions, polling
//! expectations, and capture of outgoing requests.
//!
//! ## Architecture
//!
//! - **TestBrowser**: one Chrome process per scenario
//! - **Page**: a tab; root of every locator chain
//! - **Locator**: lazy, strict element reference (placeholder, label, role, text, CSS, nth)
//! - **Expectation**: `expect(&locator).not().to_be_visible()` style polling assertions
//! - **RequestWaiter**: captures the next request matching a predicate
//! - **Site**: base URL of the deployment under test
//!
//! ## Example Usage
//!
//! ```ignore
//! use leadform_browser::{expect, RequestMatcher, TestBrowser, TestBrowserConfig};
//!
//! let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
//! let page = browser.new_page().await?;
//! page.navigate("https://test.example.com/").await?;
//!
//! page.get_by_placeholder("First Name").fill("Ada").await?;
//! let submission = page.wait_for_request(RequestMatcher::method("POST")).await?;
//! page.get_by_role_named("button", "Get Price").click().await?;
//!
//! expect(&page.get_by_text("Thanks!")).to_be_visible().await?;
//! let request = submission.wait(std::time::Duration::from_secs(10)).await?;
//! browser.close().await?;
//! ```
//!
//! ## Testing Strategy
//!
//! Unit tests cover everything that does not need Chrome (locator chains,
//! waits, matchers). Tests that drive a real browser are `#[ignore]`d; run
//! them with `cargo test -- --ignored`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod error;
pub mod expect;
pub mod locator;
pub mod network;
pub mod page;
pub mod site;
pub mod wait;

pub use browser::{TestBrowser, TestBrowserConfig};
pub use error::{BrowserError, Result};
pub use expect::{expect, Expectation};
pub use locator::{Locator, Selector, Step};
pub use network::{CapturedRequest, RequestMatcher, RequestWaiter};
pub use page::Page;
pub use site::{Site, StaticSite};
pub use wait::{
    poll_until, wait_for, wait_for_result, Polled, WaitConfig, DEFAULT_ACTION_TIMEOUT,
    DEFAULT_EXPECT_TIMEOUT, DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT,
};

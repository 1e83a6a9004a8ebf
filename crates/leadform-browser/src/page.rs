//! Page-level browser operations and navigation.
//!
//! [`Page`] wraps one chromiumoxide tab. Besides navigation and scripting it
//! is the root every [`Locator`] chain starts from and the place request
//! capture is armed.

use crate::error::{BrowserError, Result};
use crate::locator::{Locator, Selector};
use crate::network::{RequestMatcher, RequestWaiter};
use crate::site::Site;
use crate::wait::{wait_for_result, WaitConfig, DEFAULT_ACTION_TIMEOUT};
use chromiumoxide::layout::Point;
use chromiumoxide::page::Page as ChromePage;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// A browser tab.
#[derive(Debug, Clone)]
pub struct Page {
    inner: Arc<ChromePage>,
    action_timeout: Duration,
}

impl Page {
    pub(crate) fn new(page: ChromePage) -> Self {
        Self {
            inner: Arc::new(page),
            action_timeout: DEFAULT_ACTION_TIMEOUT,
        }
    }

    /// Sets the action timeout inherited by locators created afterwards.
    #[must_use]
    pub fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    /// Navigates to an absolute URL and waits for `document.readyState == "complete"`.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        info!(url, "navigate");
        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        self.wait_for_load(WaitConfig::default()).await
    }

    /// Navigates to `path` on `site`.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load.
    pub async fn navigate_to(&self, site: &dyn Site, path: &str) -> Result<()> {
        self.navigate(&site.url(path)).await
    }

    /// Waits for the page load event.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the document never finishes loading.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        wait_for_result(
            || {
                let page = self.inner.clone();
                async move {
                    let result = page
                        .evaluate("document.readyState")
                        .await
                        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

                    Ok(result
                        .value()
                        .and_then(|v| v.as_str())
                        .is_some_and(|s| s == "complete"))
                }
            },
            config,
            "document ready",
        )
        .await
    }

    /// Executes JavaScript in the page context and returns the result.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails or the result cannot be deserialized.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    fn root(&self, selector: Selector) -> Locator {
        Locator::new(self.inner.clone(), selector, self.action_timeout)
    }

    /// Elements matching a CSS selector.
    #[must_use]
    pub fn locator(&self, css: &str) -> Locator {
        self.root(Selector::new()).locator(css)
    }

    /// Inputs whose placeholder contains `text` (case-insensitive).
    #[must_use]
    pub fn get_by_placeholder(&self, text: &str) -> Locator {
        self.root(Selector::new()).get_by_placeholder(text)
    }

    /// Inputs whose placeholder is exactly `text`.
    #[must_use]
    pub fn get_by_placeholder_exact(&self, text: &str) -> Locator {
        self.root(Selector::new()).get_by_placeholder_exact(text)
    }

    /// Controls labelled by `text`.
    #[must_use]
    pub fn get_by_label(&self, text: &str) -> Locator {
        self.root(Selector::new()).get_by_label(text)
    }

    /// Elements with an ARIA role.
    #[must_use]
    pub fn get_by_role(&self, role: &str) -> Locator {
        self.root(Selector::new()).get_by_role(role)
    }

    /// Elements with an ARIA role and matching accessible name.
    #[must_use]
    pub fn get_by_role_named(&self, role: &str, name: &str) -> Locator {
        self.root(Selector::new()).get_by_role_named(role, name)
    }

    /// Innermost elements containing `text`.
    #[must_use]
    pub fn get_by_text(&self, text: &str) -> Locator {
        self.root(Selector::new()).get_by_text(text)
    }

    /// Dispatches a real mouse click at viewport coordinates.
    ///
    /// # Errors
    ///
    /// Returns an error if the input events cannot be dispatched.
    pub async fn click_at(&self, x: f64, y: f64) -> Result<()> {
        self.inner.click(Point { x, y }).await?;
        Ok(())
    }

    /// Arms capture of the next request matching `matcher`.
    ///
    /// Call this before the action that sends the request.
    ///
    /// # Errors
    ///
    /// Returns an error if network events cannot be enabled.
    pub async fn wait_for_request(&self, matcher: RequestMatcher) -> Result<RequestWaiter> {
        RequestWaiter::start(self.inner.clone(), matcher).await
    }

    /// Returns the current page URL.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    /// Returns the page title.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Takes a screenshot of the page and returns PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if screenshot capture fails.
    pub async fn screenshot(&self) -> Result<Vec<u8>> {
        self.inner
            .screenshot(chromiumoxide::page::ScreenshotParams::default())
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Closes the tab.
    ///
    /// Locators hold clones of the tab handle, so the tab is only closed
    /// explicitly when this is the last handle; otherwise closing the
    /// browser takes it down.
    ///
    /// # Errors
    ///
    /// Returns an error if closing the page fails.
    pub async fn close(self) -> Result<()> {
        match Arc::try_unwrap(self.inner) {
            Ok(page) => {
                page.close().await.map_err(BrowserError::ChromiumOxide)?;
                Ok(())
            }
            Err(_shared) => {
                warn!("Page::close() with live locators - leaving the tab to browser shutdown");
                Ok(())
            }
        }
    }
}

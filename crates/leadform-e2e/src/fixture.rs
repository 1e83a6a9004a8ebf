//! Per-scenario setup.
//!
//! Every scenario gets its own Chrome process and a page object already on
//! its URL:
//!
//! ```rust,no_run
//! use leadform_e2e::{Fixture, FormPage};
//!
//! # async fn scenario() {
//! let pricing = Fixture::pricing().await.expect("fixture");
//! pricing.fill_form_default_values().await.expect("fill");
//! pricing.finish().await.expect("teardown");
//! # }
//! ```
//!
//! Dropping a fixture without [`Fixture::finish`] still kills the browser.

use crate::config::SuiteConfig;
use crate::contact::ContactPage;
use crate::error::SuiteResult;
use crate::form_page::FormPage;
use crate::logging::init_test_logging;
use crate::pricing::PricingPage;
use leadform_browser::{Page, TestBrowser};
use std::ops::Deref;
use std::time::Duration;
use tracing::{debug, info};

/// Accessible name of the cookie banner's accept button.
const COOKIE_ACCEPT: &str = "Accept";

/// A launched browser plus a navigated page object.
#[derive(Debug)]
pub struct Fixture<P> {
    browser: TestBrowser,
    page: P,
    config: SuiteConfig,
}

impl Fixture<ContactPage> {
    /// Landing page fixture using [`SuiteConfig::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, launch or navigation fails.
    pub async fn contact() -> SuiteResult<Self> {
        Self::contact_with(SuiteConfig::load()?).await
    }

    /// Landing page fixture with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if launch or navigation fails.
    pub async fn contact_with(config: SuiteConfig) -> SuiteResult<Self> {
        Self::start(config, |page, config| {
            ContactPage::new(page, config.site()).with_expect_timeout(config.expect_timeout())
        })
        .await
    }
}

impl Fixture<PricingPage> {
    /// Pricing page fixture using [`SuiteConfig::load`].
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, launch or navigation fails.
    pub async fn pricing() -> SuiteResult<Self> {
        Self::pricing_with(SuiteConfig::load()?).await
    }

    /// Pricing page fixture with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if launch or navigation fails.
    pub async fn pricing_with(config: SuiteConfig) -> SuiteResult<Self> {
        Self::start(config, |page, config| {
            PricingPage::new(page, config.site()).with_expect_timeout(config.expect_timeout())
        })
        .await
    }
}

impl<P: FormPage> Fixture<P> {
    async fn start<F>(config: SuiteConfig, build: F) -> SuiteResult<Self>
    where
        F: FnOnce(Page, &SuiteConfig) -> P,
    {
        init_test_logging();

        let browser = TestBrowser::launch(config.browser_config()).await?;

        let page = match Self::open(&browser, &config, build).await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = browser.close().await {
                    debug!("closing browser after failed setup: {close_err}");
                }
                return Err(e);
            }
        };

        info!(base_url = %config.base_url, path = page.path(), ci = config.ci, "fixture ready");

        Ok(Self {
            browser,
            page,
            config,
        })
    }

    async fn open<F>(browser: &TestBrowser, config: &SuiteConfig, build: F) -> SuiteResult<P>
    where
        F: FnOnce(Page, &SuiteConfig) -> P,
    {
        let tab = browser
            .new_page()
            .await?
            .with_action_timeout(config.action_timeout());
        let page = build(tab, config);
        page.goto().await?;

        if config.ci {
            debug!("CI run, not looking for a cookie banner");
        } else {
            dismiss_cookie_consent(page.page(), config.cookie_consent_timeout()).await;
        }

        Ok(page)
    }

    /// Settings this fixture was built with.
    #[must_use]
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Closes the browser.
    ///
    /// # Errors
    ///
    /// Returns an error if Chrome does not shut down cleanly.
    pub async fn finish(self) -> SuiteResult<()> {
        self.browser.close().await?;
        Ok(())
    }
}

impl<P> Deref for Fixture<P> {
    type Target = P;

    fn deref(&self) -> &P {
        &self.page
    }
}

/// Clicks the cookie banner's accept button if one shows up within `timeout`.
///
/// Best effort: a missing banner or a failed click is logged and otherwise
/// ignored. Returns whether the banner was dismissed.
pub async fn dismiss_cookie_consent(page: &Page, timeout: Duration) -> bool {
    let accept = page
        .get_by_role_named("button", COOKIE_ACCEPT)
        .first()
        .with_action_timeout(timeout);

    match accept.click().await {
        Ok(()) => {
            debug!("cookie consent dismissed");
            true
        }
        Err(e) => {
            debug!("cookie consent not dismissed, continuing: {e}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SuiteError;
    use leadform_browser::BrowserError;

    #[tokio::test]
    #[ignore] // Requires Chrome to be installed
    async fn unreachable_site_fails_setup_and_closes_the_browser() {
        let config = SuiteConfig {
            // Discard port, nothing listens there
            base_url: "http://127.0.0.1:9".to_string(),
            ci: true,
            ..SuiteConfig::default()
        };

        let err = Fixture::contact_with(config).await.unwrap_err();
        assert!(
            matches!(err, SuiteError::Browser(BrowserError::NavigationFailed { .. })),
            "unexpected error: {err}"
        );
    }
}

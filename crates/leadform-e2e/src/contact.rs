//! The landing page and its contact overlay.
//!
//! The lead form lives in an overlay that starts closed. Either the
//! "Contact Sales" button or the email teaser's "Get Started" button opens
//! it; the teaser copies its email into the form.

use crate::form_page::FormPage;
use crate::locator_map::FormLocators;
use async_trait::async_trait;
use leadform_browser::{Locator, Page, Result, Site, StaticSite, DEFAULT_EXPECT_TIMEOUT};
use std::time::Duration;
use tracing::debug;

/// Buttons that open the contact overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactTrigger {
    /// "Contact Sales" in the page header
    ContactSales,
    /// "Get Started" next to the email teaser
    GetStarted,
}

/// Page object for the site root.
#[derive(Debug, Clone)]
pub struct ContactPage {
    page: Page,
    site: StaticSite,
    locators: FormLocators,
    contact_sales: Locator,
    get_started: Locator,
    email_teaser: Locator,
    close_form: Locator,
    expect_timeout: Duration,
}

impl ContactPage {
    /// Path of the landing page.
    pub const PATH: &'static str = "/";

    /// Binds the page object to `page`. Does not navigate.
    #[must_use]
    pub fn new(page: Page, site: StaticSite) -> Self {
        let locators = FormLocators::standard(&page);

        Self {
            contact_sales: page.get_by_role_named("button", "Contact Sales"),
            get_started: page.get_by_role_named("button", "Get Started").first(),
            email_teaser: page.get_by_placeholder("Your Email Address"),
            // The overlay close icon precedes the success pop-up's one
            close_form: page.get_by_role_named("img", "Close").first(),
            locators,
            page,
            site,
            expect_timeout: DEFAULT_EXPECT_TIMEOUT,
        }
    }

    /// Overrides the assertion polling window.
    #[must_use]
    pub fn with_expect_timeout(mut self, timeout: Duration) -> Self {
        self.expect_timeout = timeout;
        self
    }

    fn trigger(&self, trigger: ContactTrigger) -> &Locator {
        match trigger {
            ContactTrigger::ContactSales => &self.contact_sales,
            ContactTrigger::GetStarted => &self.get_started,
        }
    }

    /// Opens the overlay with `trigger`.
    ///
    /// # Errors
    ///
    /// Returns an error if the trigger cannot be clicked.
    pub async fn open_contact_form(&self, trigger: ContactTrigger) -> Result<()> {
        debug!(?trigger, "open contact form");
        self.trigger(trigger).click().await
    }

    /// Closes the overlay. Entered values stay in the form.
    ///
    /// # Errors
    ///
    /// Returns an error if the close icon cannot be clicked.
    pub async fn close_contact_form(&self) -> Result<()> {
        debug!("close contact form");
        self.close_form.click().await
    }

    /// Types `email` into the teaser input, ahead of [`ContactTrigger::GetStarted`].
    ///
    /// # Errors
    ///
    /// Returns an error if the teaser input cannot be filled.
    pub async fn enter_email_to_get_started(&self, email: &str) -> Result<()> {
        self.email_teaser.fill(email).await
    }

    /// Asserts the teaser input shows `value`.
    ///
    /// # Errors
    ///
    /// Returns `ExpectationFailed` if it does not within the window.
    pub async fn assert_email_teaser_value(&self, value: &str) -> Result<()> {
        self.expect_that(&self.email_teaser).to_have_value(value).await
    }
}

#[async_trait]
impl FormPage for ContactPage {
    fn page(&self) -> &Page {
        &self.page
    }

    fn locators(&self) -> &FormLocators {
        &self.locators
    }

    fn site(&self) -> &dyn Site {
        &self.site
    }

    fn path(&self) -> &str {
        Self::PATH
    }

    fn expect_timeout(&self) -> Duration {
        self.expect_timeout
    }
}

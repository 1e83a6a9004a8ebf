//! The pricing page.
//!
//! The form is inline, so there is nothing to open. The page repeats the
//! field placeholders and module names in other sections, so inputs are
//! scoped to the pricing section and modules are picked by occurrence.

use crate::data::PriceFactors;
use crate::form_page::FormPage;
use crate::identifiers::{Checkbox, FormField, PriceFactor};
use crate::locator_map::{FormLocators, LocatorMap};
use async_trait::async_trait;
use leadform_browser::{
    CapturedRequest, Page, Result, Site, StaticSite, DEFAULT_EXPECT_TIMEOUT,
};
use std::time::Duration;
use tracing::debug;

const SECTION_TEXT: &str = "Pricing built for airlines of";

/// Page object for `/pricing/`.
#[derive(Debug, Clone)]
pub struct PricingPage {
    page: Page,
    site: StaticSite,
    locators: FormLocators,
    price_factors: LocatorMap<PriceFactor>,
    expect_timeout: Duration,
}

impl PricingPage {
    /// Path of the pricing page.
    pub const PATH: &'static str = "/pricing/";

    /// Binds the page object to `page`. Does not navigate.
    #[must_use]
    pub fn new(page: Page, site: StaticSite) -> Self {
        Self {
            locators: Self::form_locators(&page),
            price_factors: PriceFactor::ALL
                .into_iter()
                .map(|factor| (factor, page.get_by_placeholder(factor.placeholder())))
                .collect(),
            page,
            site,
            expect_timeout: DEFAULT_EXPECT_TIMEOUT,
        }
    }

    fn form_locators(page: &Page) -> FormLocators {
        let section = page.locator("section").filter_has_text(SECTION_TEXT);
        let standard = FormLocators::standard(page);

        let fields = FormField::ALL
            .into_iter()
            .map(|field| (field, section.get_by_placeholder(field.placeholder())))
            .collect();

        let checkboxes = Checkbox::ALL
            .into_iter()
            .map(|checkbox| {
                let locator = match checkbox.display_name() {
                    // Earlier occurrences belong to other sections of the page
                    Some(name) => page.get_by_text(name).nth(module_occurrence(checkbox)),
                    None => section.get_by_label(FormLocators::communication_label()),
                };
                (checkbox, locator)
            })
            .collect();

        FormLocators {
            fields,
            checkboxes,
            submit: page.get_by_role_named("button", "Get Price"),
            ..standard
        }
    }

    /// Overrides the assertion polling window.
    #[must_use]
    pub fn with_expect_timeout(mut self, timeout: Duration) -> Self {
        self.expect_timeout = timeout;
        self
    }

    /// Writes every present price factor.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be filled.
    pub async fn fill_price_factors(&self, factors: &PriceFactors) -> Result<()> {
        for (factor, value) in factors.iter() {
            debug!(%factor, value, "fill price factor");
            self.price_factors
                .get(factor)?
                .fill(&value.to_string())
                .await?;
        }
        Ok(())
    }

    /// Fills every price factor with random values and returns them.
    ///
    /// # Errors
    ///
    /// Returns an error if an input cannot be filled.
    pub async fn fill_price_factors_default_values(&self) -> Result<PriceFactors> {
        let factors = PriceFactors::generated();
        self.fill_price_factors(&factors).await?;
        Ok(factors)
    }

    /// Asserts that `factor` holds keyboard focus.
    ///
    /// # Errors
    ///
    /// Returns `ExpectationFailed` if it does not within the window.
    pub async fn assert_price_factor_focus(&self, factor: PriceFactor) -> Result<()> {
        self.expect_that(self.price_factors.get(factor)?)
            .to_be_focused()
            .await
    }

    /// Asserts that `factor` shows `value`.
    ///
    /// # Errors
    ///
    /// Returns `ExpectationFailed` if it does not within the window.
    pub async fn assert_price_factor_value(&self, factor: PriceFactor, value: &str) -> Result<()> {
        self.expect_that(self.price_factors.get(factor)?)
            .to_have_value(value)
            .await
    }

    /// Asserts the submission carries `value` under the wire name of `factor`.
    ///
    /// # Errors
    ///
    /// Returns `PayloadAssertion` if it does not.
    pub fn assert_price_factors_in_request(
        &self,
        request: &CapturedRequest,
        factor: PriceFactor,
        value: i64,
    ) -> Result<()> {
        self.assert_fields_in_request(request, factor.wire_name(), &value.to_string())
    }
}

const fn module_occurrence(module: Checkbox) -> i64 {
    match module {
        Checkbox::Platform => 3,
        _ => 2,
    }
}

#[async_trait]
impl FormPage for PricingPage {
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

//! Operations shared by every lead form page.
//!
//! A page implements the accessors ([`FormPage::page`], [`FormPage::locators`],
//! [`FormPage::site`], [`FormPage::path`]) and gets the form operations for
//! free. Actions fail when an element cannot be located or used; assertions
//! fail when the expected state is not reached within the expectation window.

use crate::data::FormData;
use crate::identifiers::{Checkbox, FormField, MODULES_OF_INTEREST};
use crate::locator_map::FormLocators;
use crate::payload::SubmissionPayload;
use async_trait::async_trait;
use leadform_browser::{
    expect, BrowserError, CapturedRequest, Expectation, Locator, Page, RequestMatcher,
    RequestWaiter, Result, Site, DEFAULT_EXPECT_TIMEOUT,
};
use std::time::Duration;
use tracing::{debug, info};

/// A page hosting the LimeFlight lead form.
#[async_trait]
pub trait FormPage: Send + Sync {
    /// The browser tab.
    fn page(&self) -> &Page;

    /// Locators for the form on this page.
    fn locators(&self) -> &FormLocators;

    /// The site the page belongs to.
    fn site(&self) -> &dyn Site;

    /// Path of the page on [`FormPage::site`].
    fn path(&self) -> &str;

    /// Polling window for assertions.
    fn expect_timeout(&self) -> Duration {
        DEFAULT_EXPECT_TIMEOUT
    }

    /// Starts an expectation with this page's polling window.
    fn expect_that(&self, locator: &Locator) -> Expectation {
        expect(locator).with_timeout(self.expect_timeout())
    }

    /// Navigates to the page.
    async fn goto(&self) -> Result<()> {
        self.page().navigate_to(self.site(), self.path()).await
    }

    /// Writes every present entry of `data`; absent fields keep their value.
    async fn fill_form(&self, data: &FormData) -> Result<()> {
        for (field, value) in data.iter() {
            debug!(%field, "fill");
            self.locators().fields.get(field)?.fill(value).await?;
        }
        Ok(())
    }

    /// Fills every field with fresh random values and returns them.
    async fn fill_form_default_values(&self) -> Result<FormData> {
        let data = FormData::generated();
        self.fill_form(&data).await?;
        Ok(data)
    }

    /// Asserts that `field` holds keyboard focus.
    async fn assert_form_field_focus(&self, field: FormField) -> Result<()> {
        self.expect_that(self.locators().fields.get(field)?)
            .to_be_focused()
            .await
    }

    /// Asserts that `field` currently shows `value`.
    async fn assert_form_field_value(&self, field: FormField, value: &str) -> Result<()> {
        self.expect_that(self.locators().fields.get(field)?)
            .to_have_value(value)
            .await
    }

    /// Checks `checkbox`; already checked is fine.
    async fn check_element(&self, checkbox: Checkbox) -> Result<()> {
        debug!(%checkbox, "check");
        self.locators().checkboxes.get(checkbox)?.check().await
    }

    /// Unchecks `checkbox`; already unchecked is fine.
    async fn uncheck_element(&self, checkbox: Checkbox) -> Result<()> {
        debug!(%checkbox, "uncheck");
        self.locators().checkboxes.get(checkbox)?.uncheck().await
    }

    /// Asserts the checked state of `checkbox`.
    async fn assert_checked(&self, checkbox: Checkbox, expected: bool) -> Result<()> {
        self.expect_that(self.locators().checkboxes.get(checkbox)?)
            .to_be(expected)
            .to_be_checked()
            .await
    }

    /// Unchecks all six modules. Leaves the communication consent alone.
    async fn uncheck_modules(&self) -> Result<()> {
        for module in Checkbox::MODULES {
            self.uncheck_element(module).await?;
        }
        Ok(())
    }

    /// Asserts every module's checked state. Ignores the communication consent.
    async fn assert_modules_checked(&self, expected: bool) -> Result<()> {
        for module in Checkbox::MODULES {
            self.assert_checked(module, expected).await?;
        }
        Ok(())
    }

    /// Arms capture of the form POST. Call before [`FormPage::submit`].
    async fn wait_for_submission(&self) -> Result<RequestWaiter> {
        self.page()
            .wait_for_request(RequestMatcher::method("POST"))
            .await
    }

    /// Clicks the submit button. Does not wait for the outcome.
    async fn submit(&self) -> Result<()> {
        info!(page = self.path(), "submit");
        self.locators().submit.click().await
    }

    /// Asserts that the success confirmation is shown, or with `false`, that it is not.
    async fn assert_success_pop_up_visible(&self, expected: bool) -> Result<()> {
        self.expect_that(&self.locators().success_pop_up)
            .to_be(expected)
            .to_be_visible()
            .await
    }

    /// Dismisses the success confirmation.
    async fn close_success_pop_up(&self) -> Result<()> {
        self.locators().success_pop_up_close.click().await
    }

    /// Asserts the form is on screen.
    async fn assert_form_open(&self) -> Result<()> {
        self.expect_that(self.locators().fields.get(FormField::FirstName)?)
            .to_be_in_viewport()
            .await
    }

    /// Asserts the form is off screen.
    async fn assert_form_closed(&self) -> Result<()> {
        self.expect_that(self.locators().fields.get(FormField::FirstName)?)
            .not()
            .to_be_in_viewport()
            .await
    }

    /// Asserts the submission contains an entry `name` = `value`.
    fn assert_fields_in_request(
        &self,
        request: &CapturedRequest,
        name: &str,
        value: &str,
    ) -> Result<()> {
        let payload = SubmissionPayload::from_request(request)?;
        if payload.contains(name, value) {
            return Ok(());
        }

        Err(BrowserError::PayloadAssertion(format!(
            "expected {name} = {value:?} in submission, found {:?}",
            payload.values_of(name)
        )))
    }

    /// Asserts each of `modules` was submitted under `modules_of_interest`.
    fn assert_modules_in_request(
        &self,
        request: &CapturedRequest,
        modules: &[Checkbox],
    ) -> Result<()> {
        for module in modules {
            let name = module.display_name().ok_or_else(|| {
                BrowserError::PayloadAssertion(format!("{module} is not a module"))
            })?;
            self.assert_fields_in_request(request, MODULES_OF_INTEREST, name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadform_browser::StaticSite;

    /// Payload assertions only read the captured request, so a page object
    /// without a browser is enough.
    struct Detached {
        site: StaticSite,
    }

    #[async_trait]
    impl FormPage for Detached {
        fn page(&self) -> &Page {
            unreachable!("payload assertions never touch the page")
        }

        fn locators(&self) -> &FormLocators {
            unreachable!("payload assertions never resolve locators")
        }

        fn site(&self) -> &dyn Site {
            &self.site
        }

        fn path(&self) -> &str {
            "/"
        }
    }

    fn detached() -> Detached {
        Detached {
            site: StaticSite::new("https://test.example.com"),
        }
    }

    fn submission(body: &str) -> CapturedRequest {
        CapturedRequest {
            url: "https://forms.example.com/submit".to_string(),
            method: "POST".to_string(),
            post_data: Some(body.to_string()),
        }
    }

    const BODY: &str = r#"{"fields": [
        {"name": "firstname", "value": "Ada"},
        {"name": "company", "value": "Polar Air"},
        {"name": "modules_of_interest", "value": "Platform"},
        {"name": "modules_of_interest", "value": "LoadPlanning"}
    ]}"#;

    #[test]
    fn field_assertion_passes_on_exact_entry() {
        let request = submission(BODY);
        detached()
            .assert_fields_in_request(&request, "firstname", "Ada")
            .unwrap();
        detached()
            .assert_fields_in_request(&request, FormField::Company.wire_name(), "Polar Air")
            .unwrap();
    }

    #[test]
    fn field_assertion_reports_what_was_sent_instead() {
        let err = detached()
            .assert_fields_in_request(&submission(BODY), "firstname", "Grace")
            .unwrap_err();

        match err {
            BrowserError::PayloadAssertion(message) => {
                assert!(message.contains(r#"firstname = "Grace""#), "{message}");
                assert!(message.contains(r#"["Ada"]"#), "{message}");
            }
            other => panic!("expected a payload assertion, got {other:?}"),
        }
    }

    #[test]
    fn field_assertion_fails_for_absent_name() {
        let err = detached()
            .assert_fields_in_request(&submission(BODY), "lastname", "Lovelace")
            .unwrap_err();
        assert!(matches!(err, BrowserError::PayloadAssertion(ref m) if m.contains("[]")));
    }

    #[test]
    fn field_assertion_rejects_a_bodyless_request() {
        let request = CapturedRequest {
            post_data: None,
            ..submission(BODY)
        };
        let err = detached()
            .assert_fields_in_request(&request, "firstname", "Ada")
            .unwrap_err();
        assert!(matches!(err, BrowserError::InvalidPayload(_)));
    }

    #[test]
    fn module_assertion_checks_every_listed_module() {
        let request = submission(BODY);
        detached()
            .assert_modules_in_request(&request, &[Checkbox::Platform, Checkbox::LoadPlanning])
            .unwrap();
        detached().assert_modules_in_request(&request, &[]).unwrap();

        let err = detached()
            .assert_modules_in_request(&request, &[Checkbox::Platform, Checkbox::MealPlanning])
            .unwrap_err();
        match err {
            BrowserError::PayloadAssertion(message) => {
                assert!(message.contains("MealPlanning"), "{message}");
            }
            other => panic!("expected a payload assertion, got {other:?}"),
        }
    }

    #[test]
    fn module_assertion_refuses_communication_consent() {
        let err = detached()
            .assert_modules_in_request(&submission(BODY), &[Checkbox::Communication])
            .unwrap_err();
        assert!(
            matches!(err, BrowserError::PayloadAssertion(ref m) if m.contains("is not a module")),
            "{err}"
        );
    }
}

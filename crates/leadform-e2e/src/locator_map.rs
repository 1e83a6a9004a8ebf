//! Identifier to locator lookup tables.
//!
//! Building a map touches nothing in the browser; locators resolve when an
//! action or expectation runs. Pages build their own [`FormLocators`], usually
//! starting from [`FormLocators::standard`] and replacing what differs.

use crate::identifiers::{Checkbox, FormField};
use leadform_browser::{BrowserError, Locator, Page, Result};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Ordered map from a closed identifier set to locators.
///
/// The value type defaults to [`Locator`]; it is generic so lookups can be
/// exercised without a browser.
#[derive(Debug, Clone)]
pub struct LocatorMap<K, V = Locator> {
    entries: BTreeMap<K, V>,
}

impl<K, V> Default for LocatorMap<K, V> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Copy + Display, V> LocatorMap<K, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the entry for `key`.
    #[must_use]
    pub fn with(mut self, key: K, value: V) -> Self {
        self.entries.insert(key, value);
        self
    }

    /// Replaces the entry for `key` in place.
    pub fn set(&mut self, key: K, value: V) {
        self.entries.insert(key, value);
    }

    /// Looks up `key`.
    ///
    /// # Errors
    ///
    /// Returns `MissingLocator` if the page never mapped `key`.
    pub fn get(&self, key: K) -> Result<&V> {
        self.entries
            .get(&key)
            .ok_or_else(|| BrowserError::MissingLocator(key.to_string()))
    }

    /// Entries in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> {
        self.entries.iter().map(|(k, v)| (*k, v))
    }

    /// Number of mapped identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is mapped.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for LocatorMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

const SUBMIT_FORM_TEXT: &str = "Get Started with LimeFlight!";
const SUCCESS_TEXT: &str = "Thanks!We'll be right with";
const COMMUNICATION_LABEL: &str = "I agree to receive other";

/// Everything a lead form page interacts with.
#[derive(Debug, Clone)]
pub struct FormLocators {
    /// Text inputs
    pub fields: LocatorMap<FormField>,
    /// Module and consent checkboxes
    pub checkboxes: LocatorMap<Checkbox>,
    /// The button that submits the form
    pub submit: Locator,
    /// Confirmation shown after a successful submission
    pub success_pop_up: Locator,
    /// Dismisses the confirmation
    pub success_pop_up_close: Locator,
}

impl FormLocators {
    /// The lead form as laid out in the site-wide contact overlay.
    ///
    /// Module checkboxes are styled `div`s inside their `<label>`; reading or
    /// toggling them goes through the label's input.
    #[must_use]
    pub fn standard(page: &Page) -> Self {
        let fields = FormField::ALL
            .into_iter()
            .map(|field| {
                let locator = match field {
                    // "Your Email Address" teaser inputs also contain the text
                    FormField::Email => page.get_by_placeholder_exact(field.placeholder()),
                    _ => page.get_by_placeholder(field.placeholder()),
                };
                (field, locator)
            })
            .collect();

        let checkboxes = Checkbox::ALL
            .into_iter()
            .map(|checkbox| {
                let locator = match checkbox.display_name() {
                    Some(name) => page.locator("label").filter_has_text(name).locator("div"),
                    None => page.get_by_label(COMMUNICATION_LABEL),
                };
                (checkbox, locator)
            })
            .collect();

        Self {
            fields,
            checkboxes,
            submit: page
                .locator("form")
                .filter_has_text(SUBMIT_FORM_TEXT)
                .get_by_role("button"),
            success_pop_up: page.get_by_text(SUCCESS_TEXT),
            success_pop_up_close: page.get_by_role_named("img", "Close").nth(1),
        }
    }

    /// Label text of the communication consent checkbox.
    #[must_use]
    pub const fn communication_label() -> &'static str {
        COMMUNICATION_LABEL
    }
}

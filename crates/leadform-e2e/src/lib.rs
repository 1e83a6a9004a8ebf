//! # leadform-e2e
//!
//! Page objects and fixtures for the LimeFlight lead forms: the contact
//! overlay on the landing page and the inline form on `/pricing/`.
//!
//! Scenarios live under `tests/` and drive a real Chrome, so they are
//! `#[ignore]`d by default:
//!
//! ```bash
//! cargo test -p leadform-e2e -- --ignored
//! LEADFORM_BASE_URL=https://staging.limeflight.com cargo test -p leadform-e2e -- --ignored
//! ```
//!
//! ## Layers
//!
//! - [`identifiers`]: closed sets of fields, checkboxes and price factors
//! - [`locator_map`]: identifier to locator tables per page
//! - [`FormPage`]: form operations shared by both pages
//! - [`ContactPage`], [`PricingPage`]: page-specific layout and actions
//! - [`Fixture`]: one browser and one navigated page per scenario

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod contact;
pub mod data;
pub mod error;
pub mod fixture;
pub mod form_page;
pub mod identifiers;
pub mod locator_map;
pub mod logging;
pub mod payload;
pub mod pricing;

pub use config::SuiteConfig;
pub use contact::{ContactPage, ContactTrigger};
pub use data::{FormData, PriceFactors};
pub use error::{ConfigError, SuiteError, SuiteResult};
pub use fixture::{dismiss_cookie_consent, Fixture};
pub use form_page::FormPage;
pub use identifiers::{Checkbox, FormField, PriceFactor, MODULES_OF_INTEREST};
pub use locator_map::{FormLocators, LocatorMap};
pub use logging::init_test_logging;
pub use payload::{SubmissionPayload, SubmittedField};
pub use pricing::PricingPage;

//! Suite configuration.
//!
//! Sources, lowest priority first:
//!
//! 1. Built-in defaults ([`SuiteConfig::default`])
//! 2. `leadform.toml` in the working directory, if present
//! 3. `LEADFORM_*` environment variables (`LEADFORM_BASE_URL`, `LEADFORM_HEADLESS`, ...)
//!
//! The conventional `CI` variable is honoured on top of that: any value other
//! than empty, `false` or `0` turns [`SuiteConfig::ci`] on.

use crate::error::ConfigError;
use figment::{
    providers::{Env, Format as _, Serialized, Toml},
    Figment,
};
use leadform_browser::{StaticSite, TestBrowserConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default target environment.
pub const DEFAULT_BASE_URL: &str = "https://test.limeflight.com";

/// Settings shared by every scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Site root; page paths are joined onto it.
    pub base_url: String,
    /// Run Chrome without a window.
    pub headless: bool,
    /// Running under CI. Disables the cookie-consent dismissal attempt.
    pub ci: bool,
    /// Polling window for assertions, in milliseconds.
    pub expect_timeout_ms: u64,
    /// Auto-wait window for clicks and fills, in milliseconds.
    pub action_timeout_ms: u64,
    /// How long to look for the cookie banner before giving up, in milliseconds.
    pub cookie_consent_timeout_ms: u64,
    /// Chrome executable; auto-detected when unset.
    pub chrome_path: Option<String>,
    /// Browser window width.
    pub window_width: u32,
    /// Browser window height.
    pub window_height: u32,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            headless: true,
            ci: false,
            expect_timeout_ms: 5_000,
            action_timeout_ms: 10_000,
            cookie_consent_timeout_ms: 3_000,
            chrome_path: None,
            window_width: 1920,
            window_height: 1080,
        }
    }
}

impl SuiteConfig {
    /// Config file looked up in the working directory.
    pub const FILE_NAME: &'static str = "leadform.toml";

    /// Loads configuration from `leadform.toml` and the environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(Self::FILE_NAME))
    }

    /// Loads configuration using `path` as the config file. A missing file is
    /// not an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source is malformed or a value fails validation.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        if path.exists() {
            figment = figment.merge(Toml::file(path));
        }

        // No `.split("_")`: keys such as `base_url` contain underscores.
        figment = figment.merge(Env::prefixed("LEADFORM_"));

        let mut config: Self = figment
            .extract()
            .map_err(|e| ConfigError::Load(e.to_string()))?;

        if ci_from_env() {
            config.ci = true;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                field: "base_url".to_string(),
                reason: format!("{:?} must start with http:// or https://", self.base_url),
            });
        }

        for (field, value) in [
            ("expect_timeout_ms", self.expect_timeout_ms),
            ("action_timeout_ms", self.action_timeout_ms),
        ] {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    reason: "must be greater than zero".to_string(),
                });
            }
        }

        if self.window_width == 0 || self.window_height == 0 {
            return Err(ConfigError::InvalidValue {
                field: "window_width/window_height".to_string(),
                reason: "window must have a non-zero size".to_string(),
            });
        }

        Ok(())
    }

    /// Assertion polling window.
    #[must_use]
    pub fn expect_timeout(&self) -> Duration {
        Duration::from_millis(self.expect_timeout_ms)
    }

    /// Action auto-wait window.
    #[must_use]
    pub fn action_timeout(&self) -> Duration {
        Duration::from_millis(self.action_timeout_ms)
    }

    /// Cookie banner lookup window.
    #[must_use]
    pub fn cookie_consent_timeout(&self) -> Duration {
        Duration::from_millis(self.cookie_consent_timeout_ms)
    }

    /// The site under test.
    #[must_use]
    pub fn site(&self) -> StaticSite {
        StaticSite::new(self.base_url.clone())
    }

    /// Browser launch settings derived from this config.
    #[must_use]
    pub fn browser_config(&self) -> TestBrowserConfig {
        let mut browser = TestBrowserConfig::new()
            .with_window_size(self.window_width, self.window_height);
        if !self.headless {
            browser = browser.visible();
        }
        if let Some(path) = &self.chrome_path {
            browser = browser.with_chrome_path(path.clone());
        }
        browser
    }
}

fn ci_from_env() -> bool {
    std::env::var("CI").is_ok_and(|value| is_truthy(&value))
}

fn is_truthy(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "" | "false" | "0"
    )
}

//! Error types for suite configuration and fixture setup.

use leadform_browser::BrowserError;
use thiserror::Error;

/// Configuration loading and validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A provider (file or environment) could not be read or merged.
    #[error("failed to load suite configuration: {0}")]
    Load(String),

    /// A value was read but is unusable.
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidValue {
        /// Config key
        field: String,
        /// What is wrong with it
        reason: String,
    },
}

/// Anything that can stop a fixture from handing out a ready page.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Browser launch, navigation or page interaction failed.
    #[error(transparent)]
    Browser(#[from] BrowserError),
}

/// Result alias for fixture setup.
pub type SuiteResult<T> = std::result::Result<T, SuiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_value_names_the_field() {
        let err = ConfigError::InvalidValue {
            field: "base_url".to_string(),
            reason: "must start with http:// or https://".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for `base_url`: must start with http:// or https://"
        );
    }

    #[test]
    fn browser_errors_pass_through_unchanged() {
        let err: SuiteError = BrowserError::AlreadyClosed.into();
        assert_eq!(err.to_string(), BrowserError::AlreadyClosed.to_string());
    }
}

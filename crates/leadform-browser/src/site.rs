//! Sites under test.
//!
//! Page objects never hard-code a host. They ask a [`Site`] for the URL of
//! their path, which lets the same suite point at the staging deployment, a
//! preview build, or a local mirror.

use std::fmt;

/// A deployed website the suite navigates to.
///
/// Page objects hand it to [`crate::Page::navigate_to`] as `&dyn Site`.
pub trait Site: Send + Sync {
    /// Base URL without a trailing slash, e.g. `https://test.example.com`.
    fn base_url(&self) -> &str;

    /// Joins `path` onto the base URL with exactly one slash between them.
    ///
    /// ```ignore
    /// site.url("/pricing/") // "https://test.example.com/pricing/"
    /// ```
    fn url(&self, path: &str) -> String {
        let base = self.base_url().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{base}/{path}")
    }
}

impl fmt::Debug for dyn Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Site")
            .field("base_url", &self.base_url())
            .finish()
    }
}

/// A site reachable at a fixed base URL that the suite does not manage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticSite {
    base_url: String,
}

impl StaticSite {
    /// Creates a site rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Site for StaticSite {
    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_with_a_single_slash() {
        let site = StaticSite::new("https://test.example.com");
        assert_eq!(site.url("/pricing/"), "https://test.example.com/pricing/");
        assert_eq!(site.url("pricing/"), "https://test.example.com/pricing/");

        let trailing = StaticSite::new("https://test.example.com/");
        assert_eq!(trailing.url("/"), "https://test.example.com/");
    }

    #[test]
    fn works_behind_a_trait_object() {
        let site: Box<dyn Site> = Box::new(StaticSite::new("https://test.example.com/"));
        assert_eq!(site.url("/"), "https://test.example.com/");
        assert_eq!(
            format!("{site:?}"),
            r#"Site { base_url: "https://test.example.com/" }"#
        );
    }
}

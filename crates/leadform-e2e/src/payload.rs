//! Decoding of the form submission request body.

use leadform_browser::{CapturedRequest, Result};
use serde::Deserialize;

/// One `{name, value}` entry of a submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SubmittedField {
    /// Wire name, e.g. `firstname` or `modules_of_interest`
    pub name: String,
    /// Submitted value
    pub value: String,
}

/// Body of the lead form POST: `{"fields": [{"name": ..., "value": ...}, ...]}`.
///
/// Other top-level keys (page context, consent blocks) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmissionPayload {
    /// Submitted fields in request order
    #[serde(default)]
    pub fields: Vec<SubmittedField>,
}

impl SubmissionPayload {
    /// Decodes the body of a captured request.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` if the request has no body or it is not this shape.
    pub fn from_request(request: &CapturedRequest) -> Result<Self> {
        request.post_data_json()
    }

    /// True if some entry has exactly this name and value.
    #[must_use]
    pub fn contains(&self, name: &str, value: &str) -> bool {
        self.fields
            .iter()
            .any(|field| field.name == name && field.value == value)
    }

    /// All values submitted under `name`, in request order.
    #[must_use]
    pub fn values_of(&self, name: &str) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| field.name == name)
            .map(|field| field.value.as_str())
            .collect()
    }
}

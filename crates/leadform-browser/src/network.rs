//! Outbound request capture.
//!
//! A [`RequestWaiter`] subscribes to `Network.requestWillBeSent` *before*
//! the action that triggers the request, then hands back the first request
//! that satisfies its [`RequestMatcher`]. The body comes from the event's
//! inline `postDataEntries` when present; large or multipart payloads that
//! the event does not inline are pulled through `Network.getRequestPostData`.

use crate::error::{BrowserError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventRequestWillBeSent, GetRequestPostDataParams, PostDataEntry,
};
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

/// Predicate selecting which request to capture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestMatcher {
    method: Option<String>,
    url_contains: Option<String>,
}

impl RequestMatcher {
    /// Matches any request.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Matches requests with the given HTTP method (case-insensitive).
    #[must_use]
    pub fn method(method: &str) -> Self {
        Self {
            method: Some(method.to_ascii_uppercase()),
            url_contains: None,
        }
    }

    /// Additionally requires the URL to contain `fragment`.
    #[must_use]
    pub fn url_contains(mut self, fragment: &str) -> Self {
        self.url_contains = Some(fragment.to_string());
        self
    }

    /// Returns true if a request with this method and URL should be captured.
    #[must_use]
    pub fn matches(&self, method: &str, url: &str) -> bool {
        let method_ok = self
            .method
            .as_deref()
            .is_none_or(|expected| expected.eq_ignore_ascii_case(method));
        let url_ok = self
            .url_contains
            .as_deref()
            .is_none_or(|fragment| url.contains(fragment));
        method_ok && url_ok
    }

    fn describe(&self) -> String {
        match (&self.method, &self.url_contains) {
            (Some(m), Some(u)) => format!("{m} request to *{u}*"),
            (Some(m), None) => format!("{m} request"),
            (None, Some(u)) => format!("request to *{u}*"),
            (None, None) => "any request".to_string(),
        }
    }
}

/// A request observed leaving the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedRequest {
    /// Request URL
    pub url: String,
    /// HTTP method
    pub method: String,
    /// Raw request body, if the request had one
    pub post_data: Option<String>,
}

impl CapturedRequest {
    /// Deserializes the request body as JSON.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPayload` if there is no body or it is not valid JSON for `T`.
    pub fn post_data_json<T: DeserializeOwned>(&self) -> Result<T> {
        let body = self.post_data.as_deref().ok_or_else(|| {
            BrowserError::InvalidPayload(format!("{} {} has no body", self.method, self.url))
        })?;

        serde_json::from_str(body).map_err(|e| {
            BrowserError::InvalidPayload(format!(
                "{} {} body is not the expected JSON: {e}",
                self.method, self.url
            ))
        })
    }
}

/// Joins and decodes the base64 body chunks a `requestWillBeSent` event
/// carries. `None` when the body was not inlined, or some chunk is missing or
/// does not decode to UTF-8 text.
fn inline_post_data(entries: Option<&[PostDataEntry]>) -> Option<String> {
    let entries = entries.filter(|entries| !entries.is_empty())?;

    let mut body = Vec::new();
    for entry in entries {
        let chunk: &str = entry.bytes.as_ref()?.as_ref();
        body.extend(STANDARD.decode(chunk).ok()?);
    }

    String::from_utf8(body).ok()
}

/// Pending capture of one request.
///
/// Create it with [`crate::Page::wait_for_request`] before triggering the
/// request, then call [`RequestWaiter::wait`].
#[derive(Debug)]
pub struct RequestWaiter {
    receiver: Option<oneshot::Receiver<Result<CapturedRequest>>>,
    task: JoinHandle<()>,
    description: String,
}

impl RequestWaiter {
    pub(crate) async fn start(page: Arc<ChromePage>, matcher: RequestMatcher) -> Result<Self> {
        page.execute(EnableParams::default()).await?;
        let mut events = page.event_listener::<EventRequestWillBeSent>().await?;
        let description = matcher.describe();
        let (sender, receiver) = oneshot::channel();

        let task = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if !matcher.matches(&event.request.method, &event.request.url) {
                    continue;
                }

                let inline = inline_post_data(event.request.post_data_entries.as_deref());
                let post_data = match inline {
                    Some(body) => Some(body),
                    None => match page
                        .execute(GetRequestPostDataParams::new(event.request_id.clone()))
                        .await
                    {
                        Ok(response) => Some(response.result.post_data.clone()),
                        Err(e) => {
                            debug!(url = %event.request.url, "no post data available: {e}");
                            None
                        }
                    },
                };

                let _ = sender.send(Ok(CapturedRequest {
                    url: event.request.url.clone(),
                    method: event.request.method.clone(),
                    post_data,
                }));
                return;
            }

            let _ = sender.send(Err(BrowserError::RequestCapture(
                "network event stream closed before a matching request".to_string(),
            )));
        });

        debug!(waiting_for = %description, "request capture armed");

        Ok(Self {
            receiver: Some(receiver),
            task,
            description,
        })
    }

    /// Waits up to `timeout` for the matching request.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if no matching request was sent in time, or
    /// `RequestCapture` if the listener died.
    pub async fn wait(mut self, timeout: Duration) -> Result<CapturedRequest> {
        let receiver = self
            .receiver
            .take()
            .ok_or_else(|| BrowserError::RequestCapture("waiter already consumed".to_string()))?;

        match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(captured)) => captured,
            Ok(Err(_)) => Err(BrowserError::RequestCapture(
                "request listener stopped unexpectedly".to_string(),
            )),
            Err(_) => Err(BrowserError::WaitTimeout {
                condition: self.description.clone(),
                timeout,
            }),
        }
    }
}

impl Drop for RequestWaiter {
    fn drop(&mut self) {
        self.task.abort();
    }
}

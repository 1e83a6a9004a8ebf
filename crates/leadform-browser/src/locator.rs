//! Lazy element locators.
//!
//! A [`Locator`] is a page handle plus a [`Selector`]: an ordered chain of
//! resolution steps (placeholder text, label, ARIA role, text content, CSS,
//! `has_text` filters, nth-match). Building one never touches the DOM.
//! Every action or probe serializes the chain into a small script and
//! resolves it inside the page at that moment, so markup that re-renders
//! between two steps of a scenario is picked up naturally.
//!
//! Actions (`fill`, `click`, `check`, `uncheck`) are strict and auto-wait:
//! they poll until exactly one element matches and is visible and enabled,
//! and fail with a strict-mode error as soon as more than one matches.
//! Probes (`is_visible`, `is_checked`, ...) report the current state once.
//!
//! Role steps only see elements exposed to assistive technology: anything
//! under `aria-hidden="true"`, the `hidden` attribute or `display: none`, or
//! itself `visibility: hidden`, is skipped before `nth` indexes the matches.
//! Text, label, placeholder and CSS steps still see hidden elements.

use crate::error::{BrowserError, Result};
use crate::wait::{poll_until, Polled, WaitConfig, DEFAULT_POLL_INTERVAL};
use chromiumoxide::layout::Point;
use chromiumoxide::page::Page as ChromePage;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// In-page resolver. Defines `resolve(steps)` plus the helpers the probe
/// bodies use (`retarget`, `isVisible`, `checkedState`).
const RESOLVER_JS: &str = r#"
const norm = (s) => (s || '').replace(/\s+/g, ' ').trim();
const textMatches = (value, text, exact) => exact
  ? norm(value) === norm(text)
  : norm(value).toLowerCase().includes(norm(text).toLowerCase());
const SKIPPED = new Set(['SCRIPT', 'STYLE', 'NOSCRIPT', 'TEMPLATE', 'HEAD', 'TITLE']);
const descendants = (root) => Array.from(root.querySelectorAll('*')).filter((el) => !SKIPPED.has(el.tagName));
const roleOf = (el) => {
  const explicit = el.getAttribute('role');
  if (explicit) return explicit.trim().split(/\s+/)[0];
  const tag = el.tagName.toLowerCase();
  if (/^h[1-6]$/.test(tag)) return 'heading';
  switch (tag) {
    case 'button': return 'button';
    case 'a': return el.hasAttribute('href') ? 'link' : null;
    case 'img': return el.getAttribute('alt') === '' ? 'presentation' : 'img';
    case 'svg': return 'img';
    case 'textarea': return 'textbox';
    case 'select': return 'combobox';
    case 'form': return 'form';
    case 'dialog': return 'dialog';
    case 'input': {
      const type = (el.getAttribute('type') || 'text').toLowerCase();
      if (['button', 'submit', 'reset', 'image'].includes(type)) return 'button';
      if (type === 'checkbox') return 'checkbox';
      if (type === 'radio') return 'radio';
      if (type === 'range') return 'slider';
      if (type === 'number') return 'spinbutton';
      if (type === 'search') return 'searchbox';
      if (type === 'hidden') return null;
      return 'textbox';
    }
    default: return null;
  }
};
const labelText = (el) => el.labels ? Array.from(el.labels).map((l) => l.textContent).join(' ') : '';
const accessibleName = (el) => {
  const aria = el.getAttribute('aria-label');
  if (aria) return aria;
  const labelledBy = el.getAttribute('aria-labelledby');
  if (labelledBy) {
    return labelledBy.split(/\s+/)
      .map((id) => document.getElementById(id))
      .filter(Boolean)
      .map((n) => n.textContent)
      .join(' ');
  }
  const tag = el.tagName.toLowerCase();
  if (tag === 'img') return el.getAttribute('alt') || el.getAttribute('title') || '';
  if (tag === 'svg') {
    const title = el.querySelector('title');
    return title ? title.textContent : (el.getAttribute('title') || '');
  }
  if (tag === 'input') {
    const type = (el.getAttribute('type') || 'text').toLowerCase();
    if (['button', 'submit', 'reset'].includes(type)) return el.value || (type === 'submit' ? 'Submit' : '');
    if (type === 'image') return el.getAttribute('alt') || '';
    return labelText(el) || el.getAttribute('title') || el.getAttribute('placeholder') || '';
  }
  if (tag === 'textarea' || tag === 'select') return labelText(el) || el.getAttribute('title') || '';
  return el.textContent || el.getAttribute('title') || '';
};
const isHiddenForRole = (el) => {
  for (let node = el; node; node = node.parentElement) {
    if (node.getAttribute('aria-hidden') === 'true' || node.hasAttribute('hidden')) return true;
    if (window.getComputedStyle(node).display === 'none') return true;
  }
  const visibility = window.getComputedStyle(el).visibility;
  return visibility === 'hidden' || visibility === 'collapse';
};
const isLabelledBy = (el, text, exact) => {
  if (el.labels && Array.from(el.labels).some((l) => textMatches(l.textContent, text, exact))) return true;
  const aria = el.getAttribute('aria-label');
  return aria !== null && textMatches(aria, text, exact);
};
const applyStep = (roots, step) => {
  switch (step.kind) {
    case 'css':
      return roots.flatMap((root) => Array.from(root.querySelectorAll(step.selector)));
    case 'placeholder':
      return roots.flatMap(descendants).filter((el) =>
        el.hasAttribute('placeholder') && textMatches(el.getAttribute('placeholder'), step.text, step.exact));
    case 'label':
      return roots.flatMap(descendants).filter((el) => isLabelledBy(el, step.text, step.exact));
    case 'role':
      return roots.flatMap(descendants).filter((el) =>
        roleOf(el) === step.role && !isHiddenForRole(el)
        && (step.name === null || textMatches(accessibleName(el), step.name, step.exact)));
    case 'text': {
      const hit = (el) => textMatches(el.textContent, step.text, step.exact);
      return roots.flatMap(descendants).filter((el) =>
        hit(el) && !Array.from(el.children).some((child) => !SKIPPED.has(child.tagName) && hit(child)));
    }
    case 'has_text':
      return roots.filter((el) => el !== document && textMatches(el.textContent, step.text, false));
    case 'nth': {
      const index = step.index < 0 ? roots.length + step.index : step.index;
      return index >= 0 && index < roots.length ? [roots[index]] : [];
    }
    default:
      throw new Error('unknown locator step: ' + step.kind);
  }
};
const resolve = (steps) => steps.reduce((roots, step) => Array.from(new Set(applyStep(roots, step))), [document]);
const retarget = (el) => {
  if (el.matches('input, textarea, select, [role=checkbox], [role=radio], [contenteditable]')) return el;
  const label = el.closest('label');
  return label && label.control ? label.control : el;
};
const isVisible = (el) => {
  const rect = el.getBoundingClientRect();
  const style = window.getComputedStyle(el);
  return rect.width > 0 && rect.height > 0 && style.visibility !== 'hidden';
};
const checkedState = (el) => {
  const target = retarget(el);
  if (target.type === 'checkbox' || target.type === 'radio') return target.checked;
  const aria = target.getAttribute('aria-checked');
  return aria === null ? null : aria === 'true';
};
"#;

/// One resolution step in a locator chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    /// Descendants matching a CSS selector.
    Css {
        /// CSS selector
        selector: String,
    },
    /// Elements whose `placeholder` attribute matches.
    Placeholder {
        /// Placeholder text
        text: String,
        /// Case-sensitive full match instead of substring
        exact: bool,
    },
    /// Controls associated with a matching `<label>` or `aria-label`.
    Label {
        /// Label text
        text: String,
        /// Case-sensitive full match instead of substring
        exact: bool,
    },
    /// Elements with an ARIA role and, optionally, a matching accessible name.
    Role {
        /// ARIA role, e.g. `button`
        role: String,
        /// Accessible name filter
        name: Option<String>,
        /// Case-sensitive full match of the name
        exact: bool,
    },
    /// Innermost elements whose text content matches.
    Text {
        /// Text to look for
        text: String,
        /// Case-sensitive full match instead of substring
        exact: bool,
    },
    /// Keeps current matches whose text content contains the text.
    HasText {
        /// Text to look for
        text: String,
    },
    /// Keeps only the n-th current match; negative indexes count from the end.
    Nth {
        /// Zero-based index
        index: i64,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let exact_suffix = |exact: bool| if exact { ", exact" } else { "" };
        match self {
            Step::Css { selector } => write!(f, "locator({selector:?})"),
            Step::Placeholder { text, exact } => {
                write!(f, "get_by_placeholder({text:?}{})", exact_suffix(*exact))
            }
            Step::Label { text, exact } => {
                write!(f, "get_by_label({text:?}{})", exact_suffix(*exact))
            }
            Step::Role { role, name, exact } => match name {
                Some(name) => write!(
                    f,
                    "get_by_role({role:?}, name={name:?}{})",
                    exact_suffix(*exact)
                ),
                None => write!(f, "get_by_role({role:?})"),
            },
            Step::Text { text, exact } => write!(f, "get_by_text({text:?}{})", exact_suffix(*exact)),
            Step::HasText { text } => write!(f, "filter(has_text={text:?})"),
            Step::Nth { index } => write!(f, "nth({index})"),
        }
    }
}

/// A pure, page-independent locator chain.
///
/// Kept separate from [`Locator`] so the chain can be built, compared and
/// rendered without a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Step>,
}

impl Selector {
    /// An empty chain, which resolves to the document itself.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of this chain with one more step.
    #[must_use]
    pub fn then(&self, step: Step) -> Self {
        let mut steps = self.steps.clone();
        steps.push(step);
        Self { steps }
    }

    /// The steps in resolution order.
    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Human-readable chain, e.g. `locator("section").get_by_placeholder("Company")`.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.steps.is_empty() {
            return "document".to_string();
        }
        self.steps
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Builds a script that resolves the chain and evaluates `body` against
    /// the single match, bound as `el`.
    ///
    /// The script evaluates to `{ count, value }`; `value` is only computed
    /// when exactly one element matched.
    ///
    /// # Errors
    ///
    /// Returns an error if the steps cannot be serialized.
    pub fn to_script(&self, body: &str) -> Result<String> {
        let steps = serde_json::to_string(&self.steps)?;
        Ok(format!(
            "(() => {{\n{RESOLVER_JS}\nconst els = resolve({steps});\n\
             if (els.length !== 1) return {{ count: els.length, value: null }};\n\
             const el = els[0];\n\
             return {{ count: 1, value: ({body}) }};\n}})()"
        ))
    }

    /// Builds a script that evaluates to the number of matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the steps cannot be serialized.
    pub fn to_count_script(&self) -> Result<String> {
        let steps = serde_json::to_string(&self.steps)?;
        Ok(format!(
            "(() => {{\n{RESOLVER_JS}\nreturn resolve({steps}).length;\n}})()"
        ))
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

#[derive(Debug, Deserialize)]
struct Probe<T> {
    count: usize,
    value: Option<T>,
}

#[derive(Debug, Deserialize)]
struct Actionability {
    visible: bool,
    enabled: bool,
    x: f64,
    y: f64,
}

/// A lazily resolved reference to one element on a page.
#[derive(Clone)]
pub struct Locator {
    page: Arc<ChromePage>,
    selector: Selector,
    action_timeout: Duration,
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator")
            .field("selector", &self.selector.describe())
            .field("action_timeout", &self.action_timeout)
            .finish()
    }
}

impl Locator {
    pub(crate) fn new(page: Arc<ChromePage>, selector: Selector, action_timeout: Duration) -> Self {
        Self {
            page,
            selector,
            action_timeout,
        }
    }

    fn chain(&self, step: Step) -> Self {
        Self {
            page: self.page.clone(),
            selector: self.selector.then(step),
            action_timeout: self.action_timeout,
        }
    }

    /// The underlying chain.
    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Human-readable chain for logs and error messages.
    #[must_use]
    pub fn describe(&self) -> String {
        self.selector.describe()
    }

    /// Overrides how long actions wait for the element to become actionable.
    #[must_use]
    pub fn with_action_timeout(mut self, timeout: Duration) -> Self {
        self.action_timeout = timeout;
        self
    }

    /// Scopes to descendants matching a CSS selector.
    #[must_use]
    pub fn locator(&self, css: &str) -> Self {
        self.chain(Step::Css {
            selector: css.to_string(),
        })
    }

    /// Scopes to inputs whose placeholder contains `text` (case-insensitive).
    #[must_use]
    pub fn get_by_placeholder(&self, text: &str) -> Self {
        self.chain(Step::Placeholder {
            text: text.to_string(),
            exact: false,
        })
    }

    /// Scopes to inputs whose placeholder is exactly `text`.
    #[must_use]
    pub fn get_by_placeholder_exact(&self, text: &str) -> Self {
        self.chain(Step::Placeholder {
            text: text.to_string(),
            exact: true,
        })
    }

    /// Scopes to controls labelled by `text`.
    #[must_use]
    pub fn get_by_label(&self, text: &str) -> Self {
        self.chain(Step::Label {
            text: text.to_string(),
            exact: false,
        })
    }

    /// Scopes to elements with the given ARIA role.
    #[must_use]
    pub fn get_by_role(&self, role: &str) -> Self {
        self.chain(Step::Role {
            role: role.to_string(),
            name: None,
            exact: false,
        })
    }

    /// Scopes to elements with the given ARIA role whose accessible name
    /// contains `name` (case-insensitive).
    #[must_use]
    pub fn get_by_role_named(&self, role: &str, name: &str) -> Self {
        self.chain(Step::Role {
            role: role.to_string(),
            name: Some(name.to_string()),
            exact: false,
        })
    }

    /// Scopes to the innermost elements containing `text`.
    #[must_use]
    pub fn get_by_text(&self, text: &str) -> Self {
        self.chain(Step::Text {
            text: text.to_string(),
            exact: false,
        })
    }

    /// Keeps matches whose text contains `text`.
    #[must_use]
    pub fn filter_has_text(&self, text: &str) -> Self {
        self.chain(Step::HasText {
            text: text.to_string(),
        })
    }

    /// Keeps the n-th match (zero-based; negative counts from the end).
    #[must_use]
    pub fn nth(&self, index: i64) -> Self {
        self.chain(Step::Nth { index })
    }

    /// Keeps the first match.
    #[must_use]
    pub fn first(&self) -> Self {
        self.nth(0)
    }

    /// Keeps the last match.
    #[must_use]
    pub fn last(&self) -> Self {
        self.nth(-1)
    }

    async fn evaluate<T: DeserializeOwned>(&self, script: String) -> Result<T> {
        let result = self
            .page
            .evaluate(script.as_str())
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    async fn probe<T: DeserializeOwned>(&self, body: &str) -> Result<Probe<T>> {
        self.evaluate(self.selector.to_script(body)?).await
    }

    /// Like [`Self::probe`] but requires exactly one match and a non-null value.
    async fn probe_strict<T: DeserializeOwned>(&self, body: &str, what: &str) -> Result<T> {
        let probe = self.probe::<T>(body).await?;
        match probe.count {
            0 => Err(BrowserError::ElementNotFound {
                locator: self.describe(),
                timeout: Duration::ZERO,
            }),
            1 => probe.value.ok_or_else(|| BrowserError::NotInteractable {
                locator: self.describe(),
                reason: format!("element has no {what}"),
            }),
            count => Err(BrowserError::StrictModeViolation {
                locator: self.describe(),
                count,
            }),
        }
    }

    /// Like [`Self::probe`] but an absent element reads as `false`.
    async fn probe_flag(&self, body: &str) -> Result<bool> {
        let probe = self.probe::<bool>(body).await?;
        match probe.count {
            0 => Ok(false),
            1 => Ok(probe.value.unwrap_or(false)),
            count => Err(BrowserError::StrictModeViolation {
                locator: self.describe(),
                count,
            }),
        }
    }

    /// Number of elements the chain currently resolves to.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn count(&self) -> Result<usize> {
        self.evaluate(self.selector.to_count_script()?).await
    }

    /// Whether the element is rendered with a non-empty box. Absent reads as hidden.
    ///
    /// # Errors
    ///
    /// Returns `StrictModeViolation` if several elements match.
    pub async fn is_visible(&self) -> Result<bool> {
        self.probe_flag("isVisible(el)").await
    }

    /// Whether the element (or its label's control) has keyboard focus.
    ///
    /// # Errors
    ///
    /// Returns `StrictModeViolation` if several elements match.
    pub async fn is_focused(&self) -> Result<bool> {
        self.probe_flag("document.activeElement === retarget(el) || document.activeElement === el")
            .await
    }

    /// Whether any part of the element intersects the viewport.
    ///
    /// # Errors
    ///
    /// Returns `StrictModeViolation` if several elements match.
    pub async fn is_in_viewport(&self) -> Result<bool> {
        self.probe_flag(
            "(() => { const r = el.getBoundingClientRect(); \
             return isVisible(el) && r.bottom > 0 && r.right > 0 \
             && r.top < window.innerHeight && r.left < window.innerWidth; })()",
        )
        .await
    }

    /// Checked state of a checkbox, radio, `aria-checked` element, or the
    /// control of the label the element sits in.
    ///
    /// # Errors
    ///
    /// Returns `NotInteractable` if the element is not checkable.
    pub async fn is_checked(&self) -> Result<bool> {
        self.probe_strict("checkedState(el)", "checked state").await
    }

    /// Current value of the input, textarea or select.
    ///
    /// # Errors
    ///
    /// Returns `NotInteractable` if the element has no value.
    pub async fn input_value(&self) -> Result<String> {
        self.probe_strict(
            "(() => { const t = retarget(el); return 'value' in t ? String(t.value) : null; })()",
            "value",
        )
        .await
    }

    /// Waits until exactly one visible, enabled element matches, scrolling it
    /// into view, and returns its centre.
    async fn wait_actionable(&self) -> Result<Point> {
        const BODY: &str = "(() => { el.scrollIntoView({ block: 'center', inline: 'center' }); \
             const r = el.getBoundingClientRect(); const t = retarget(el); \
             return { visible: isVisible(el), enabled: !(el.disabled || t.disabled), \
             x: r.left + r.width / 2, y: r.top + r.height / 2 }; })()";

        let config = WaitConfig::new(self.action_timeout, DEFAULT_POLL_INTERVAL);
        let outcome = poll_until(
            move || async move { self.probe::<Actionability>(BODY).await },
            |probe| {
                probe.count > 1
                    || probe
                        .value
                        .as_ref()
                        .is_some_and(|state| state.visible && state.enabled)
            },
            config,
        )
        .await;

        match outcome {
            Polled::Satisfied(probe) if probe.count > 1 => Err(BrowserError::StrictModeViolation {
                locator: self.describe(),
                count: probe.count,
            }),
            Polled::Satisfied(probe) => {
                let state = probe.value.ok_or_else(|| BrowserError::NotInteractable {
                    locator: self.describe(),
                    reason: "element detached".to_string(),
                })?;
                Ok(Point {
                    x: state.x,
                    y: state.y,
                })
            }
            Polled::TimedOut(Some(probe)) if probe.count == 1 => {
                let reason = match probe.value {
                    Some(state) if !state.visible => "element is not visible",
                    Some(state) if !state.enabled => "element is disabled",
                    _ => "element never became actionable",
                };
                Err(BrowserError::NotInteractable {
                    locator: self.describe(),
                    reason: format!("{reason} after {:?}", self.action_timeout),
                })
            }
            Polled::TimedOut(_) => Err(BrowserError::ElementNotFound {
                locator: self.describe(),
                timeout: self.action_timeout,
            }),
        }
    }

    /// Scrolls the element into view and clicks its centre with a real mouse event.
    ///
    /// # Errors
    ///
    /// Fails if the element never becomes actionable or the click cannot be dispatched.
    pub async fn click(&self) -> Result<()> {
        debug!(locator = %self.describe(), "click");
        let point = self.wait_actionable().await?;
        self.page.click(point).await?;
        Ok(())
    }

    /// Replaces the value of an input or textarea, firing `input` and `change`.
    ///
    /// # Errors
    ///
    /// Fails if the element never becomes actionable or is not fillable.
    pub async fn fill(&self, value: &str) -> Result<()> {
        debug!(locator = %self.describe(), value, "fill");
        self.wait_actionable().await?;

        let value_json = serde_json::to_string(value)?;
        let body = format!(
            "(() => {{ const t = retarget(el); \
             if (!(t instanceof HTMLInputElement || t instanceof HTMLTextAreaElement)) return null; \
             t.focus(); \
             const proto = t instanceof HTMLTextAreaElement ? HTMLTextAreaElement.prototype : HTMLInputElement.prototype; \
             Object.getOwnPropertyDescriptor(proto, 'value').set.call(t, {value_json}); \
             t.dispatchEvent(new Event('input', {{ bubbles: true }})); \
             t.dispatchEvent(new Event('change', {{ bubbles: true }})); \
             return true; }})()"
        );
        self.probe_strict::<bool>(&body, "fillable input").await?;
        Ok(())
    }

    /// Ensures the element is checked. A no-op when it already is.
    ///
    /// # Errors
    ///
    /// Fails if the element is not checkable or clicking does not check it.
    pub async fn check(&self) -> Result<()> {
        self.set_checked(true).await
    }

    /// Ensures the element is unchecked. A no-op when it already is.
    ///
    /// # Errors
    ///
    /// Fails if the element is not checkable or clicking does not uncheck it.
    pub async fn uncheck(&self) -> Result<()> {
        self.set_checked(false).await
    }

    async fn set_checked(&self, checked: bool) -> Result<()> {
        self.wait_actionable().await?;
        if self.is_checked().await? == checked {
            debug!(locator = %self.describe(), checked, "already in requested state");
            return Ok(());
        }

        self.click().await?;

        let settle = WaitConfig::new(Duration::from_secs(1), Duration::from_millis(50));
        match poll_until(move || self.is_checked(), |state| *state == checked, settle).await {
            Polled::Satisfied(_) => Ok(()),
            Polled::TimedOut(_) => Err(BrowserError::NotInteractable {
                locator: self.describe(),
                reason: format!("clicking did not change checked state to {checked}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pricing_first_name() -> Selector {
        Selector::new()
            .then(Step::Css {
                selector: "section".into(),
            })
            .then(Step::HasText {
                text: "Pricing built for airlines of".into(),
            })
            .then(Step::Placeholder {
                text: "First Name".into(),
                exact: false,
            })
    }

    #[test]
    fn describe_renders_the_chain_in_order() {
        assert_eq!(
            pricing_first_name().describe(),
            r#"locator("section").filter(has_text="Pricing built for airlines of").get_by_placeholder("First Name")"#
        );
    }

    #[test]
    fn describe_marks_exact_and_named_steps() {
        let email = Selector::new().then(Step::Placeholder {
            text: "Email Address".into(),
            exact: true,
        });
        assert_eq!(email.describe(), r#"get_by_placeholder("Email Address", exact)"#);

        let close = Selector::new()
            .then(Step::Role {
                role: "img".into(),
                name: Some("Close".into()),
                exact: false,
            })
            .then(Step::Nth { index: 1 });
        assert_eq!(close.describe(), r#"get_by_role("img", name="Close").nth(1)"#);
    }

    #[test]
    fn empty_selector_describes_document() {
        assert_eq!(Selector::new().describe(), "document");
    }

    #[test]
    fn then_leaves_the_original_untouched() {
        let base = Selector::new().then(Step::Text {
            text: "Platform".into(),
            exact: false,
        });
        let nth = base.then(Step::Nth { index: 3 });

        assert_eq!(base.steps().len(), 1);
        assert_eq!(nth.steps().len(), 2);
    }

    #[test]
    fn steps_serialize_with_kind_tags() {
        let json = serde_json::to_value(pricing_first_name().steps()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "kind": "css", "selector": "section" },
                { "kind": "has_text", "text": "Pricing built for airlines of" },
                { "kind": "placeholder", "text": "First Name", "exact": false },
            ])
        );

        let role = serde_json::to_value(Step::Role {
            role: "button".into(),
            name: None,
            exact: false,
        })
        .unwrap();
        assert_eq!(role["name"], serde_json::Value::Null);
    }

    #[test]
    fn script_embeds_steps_as_json() {
        let selector = Selector::new().then(Step::Text {
            text: r#"Thanks!We'll be right with "you""#.into(),
            exact: false,
        });
        let script = selector.to_script("isVisible(el)").unwrap();

        assert!(script.contains(r#""text":"Thanks!We'll be right with \"you\"""#));
        assert!(script.contains("value: (isVisible(el))"));
        assert!(script.trim_end().ends_with("})()"));
    }

    #[test]
    fn role_steps_skip_hidden_elements() {
        let script = Selector::new()
            .then(Step::Role {
                role: "button".into(),
                name: Some("Contact Sales".into()),
                exact: false,
            })
            .to_count_script()
            .unwrap();
        assert!(script.contains("roleOf(el) === step.role && !isHiddenForRole(el)"));
    }

    #[test]
    fn count_script_returns_length() {
        let script = pricing_first_name().to_count_script().unwrap();
        assert!(script.contains("return resolve("));
        assert!(script.contains(".length;"));
    }
}

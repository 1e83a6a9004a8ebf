//! Integration tests for leadform-browser
//!
//! These tests require Chrome/Chromium to be installed and are marked #[ignore]
//! by default. Run with: cargo test --package leadform-browser -- --ignored

use leadform_browser::{
    expect, BrowserError, Page, RequestMatcher, TestBrowser, TestBrowserConfig,
};
use std::time::Duration;

/// A miniature lead form with the markup patterns the page objects rely on:
/// placeholders that overlap, checkbox modules styled through a `div` inside
/// their label, an image-role close button, and a JSON POST on submit.
fn lead_form_html() -> String {
    r#"
    <!DOCTYPE html>
    <html>
    <head><title>Lead Form</title></head>
    <body>
        <input placeholder="Your Email Address" id="teaser">
        <section id="top"><p>Modules</p><label><input type="checkbox" name="top" checked><div>Platform</div></label></section>
        <form id="lead">
            <h2>Get Started with LimeFlight!</h2>
            <input name="firstname" placeholder="First Name" required>
            <input name="email" type="email" placeholder="Email Address" required>
            <textarea name="message" placeholder="Message" required></textarea>
            <label><input type="checkbox" name="platform" checked style="display:none"><div class="box">Platform</div></label>
            <label><input type="checkbox" name="mealPlanning" checked style="display:none"><div class="box">MealPlanning</div></label>
            <input type="checkbox" id="consent" checked><label for="consent">I agree to receive other communications</label>
            <button type="submit">Submit</button>
        </form>
        <div id="thanks" style="display:none"><h3>Thanks!</h3><p>We'll be right with you.</p><img alt="Close" src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" width="10" height="10"></div>
        <script>
            document.getElementById('lead').addEventListener('submit', (event) => {
                event.preventDefault();
                const data = new FormData(event.target);
                const fields = [];
                for (const [name, value] of data.entries()) fields.push({ name, value });
                fetch('https://forms.invalid/submit', { method: 'POST', body: JSON.stringify({ fields }) }).catch(() => {});
                document.getElementById('thanks').style.display = 'block';
            });
        </script>
    </body>
    </html>
    "#
    .to_string()
}

async fn open_lead_form() -> (TestBrowser, Page) {
    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");

    let data_url = format!("data:text/html,{}", urlencoding::encode(&lead_form_html()));
    page.navigate(&data_url).await.expect("failed to navigate");

    (browser, page)
}

#[tokio::test]
#[ignore] // Requires Chrome to be installed
async fn test_exact_placeholder_ignores_longer_matches() {
    let (browser, page) = open_lead_form().await;

    assert_eq!(page.get_by_placeholder("Email Address").count().await.unwrap(), 2);
    assert_eq!(page.get_by_placeholder_exact("Email Address").count().await.unwrap(), 1);

    let err = page
        .get_by_placeholder("Email Address")
        .fill("a@b.co")
        .await
        .unwrap_err();
    assert!(matches!(err, BrowserError::StrictModeViolation { count: 2, .. }));

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_fill_and_read_back_value() {
    let (browser, page) = open_lead_form().await;
    let first_name = page.get_by_placeholder("First Name");

    first_name.fill("Ada").await.expect("failed to fill");
    expect(&first_name).to_have_value("Ada").await.expect("value mismatch");

    first_name.fill("").await.expect("failed to clear");
    expect(&first_name).to_have_value("").await.expect("value not cleared");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_label_div_retargets_to_checkbox() {
    let (browser, page) = open_lead_form().await;
    let platform = page
        .locator("label")
        .filter_has_text("Platform")
        .locator("div")
        .nth(1);

    expect(&platform).to_be_checked().await.expect("checked by default");

    platform.uncheck().await.expect("failed to uncheck");
    expect(&platform).not().to_be_checked().await.expect("still checked");

    // Idempotent: a second uncheck is a no-op
    platform.uncheck().await.expect("second uncheck failed");
    expect(&platform).not().to_be_checked().await.expect("re-checked");

    platform.check().await.expect("failed to check");
    expect(&platform).to_be_checked().await.expect("not checked again");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_get_by_label_finds_consent_checkbox() {
    let (browser, page) = open_lead_form().await;
    let consent = page.get_by_label("I agree to receive other");

    consent.uncheck().await.expect("failed to uncheck consent");
    assert!(!consent.is_checked().await.unwrap());

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_get_by_text_and_nth_disambiguate_repeats() {
    let (browser, page) = open_lead_form().await;

    // "Platform" appears twice as innermost text; the wrapping labels are skipped
    assert_eq!(page.get_by_text("Platform").count().await.unwrap(), 2);
    assert!(page.get_by_text("Platform").nth(1).is_visible().await.unwrap());
    assert_eq!(page.get_by_text("Platform").nth(5).count().await.unwrap(), 0);

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_invalid_submit_moves_focus_and_hides_banner() {
    let (browser, page) = open_lead_form().await;
    let thanks = page.get_by_text("Thanks!We'll be right with");

    page.get_by_placeholder("First Name").fill("Ada").await.unwrap();
    page.get_by_placeholder_exact("Email Address").fill("incorrect_format").await.unwrap();
    page.get_by_placeholder("Message").fill("Hello").await.unwrap();
    page.locator("form").filter_has_text("Get Started with LimeFlight!").get_by_role("button").click().await.unwrap();

    expect(&thanks).not().to_be_visible().await.expect("banner shown for invalid form");
    expect(&page.get_by_placeholder_exact("Email Address"))
        .to_be_focused()
        .await
        .expect("focus did not move to email");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_submit_is_captured_as_json_post() {
    let (browser, page) = open_lead_form().await;

    page.get_by_placeholder("First Name").fill("Ada").await.unwrap();
    page.get_by_placeholder_exact("Email Address").fill("ada@example.com").await.unwrap();
    page.get_by_placeholder("Message").fill("Hello").await.unwrap();

    let waiter = page
        .wait_for_request(RequestMatcher::method("POST"))
        .await
        .expect("failed to arm capture");
    page.get_by_role_named("button", "Submit").click().await.unwrap();

    expect(&page.get_by_text("Thanks!We'll be right with"))
        .to_be_visible()
        .await
        .expect("banner not shown");

    let request = waiter.wait(Duration::from_secs(5)).await.expect("no POST captured");
    let body: serde_json::Value = request.post_data_json().expect("body not JSON");
    let fields = body["fields"].as_array().expect("fields list");
    assert!(fields
        .iter()
        .any(|f| f["name"] == "firstname" && f["value"] == "Ada"));

    page.get_by_role_named("img", "Close").click().await.expect("close not clickable");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_missing_element_times_out_quickly() {
    let (browser, page) = open_lead_form().await;

    let err = page
        .get_by_placeholder("Company")
        .with_action_timeout(Duration::from_millis(300))
        .fill("Acme")
        .await
        .unwrap_err();
    assert!(matches!(err, BrowserError::ElementNotFound { .. }));

    let err = expect(&page.get_by_placeholder("Company"))
        .with_timeout(Duration::from_millis(300))
        .to_be_visible()
        .await
        .unwrap_err();
    assert!(matches!(err, BrowserError::ExpectationFailed { .. }));

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_viewport_and_title() {
    let (browser, page) = open_lead_form().await;

    assert_eq!(page.title().await.unwrap(), "Lead Form");
    expect(&page.get_by_placeholder("First Name"))
        .to_be_in_viewport()
        .await
        .expect("form should be on screen");

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_page_helpers() {
    let (browser, page) = open_lead_form().await;

    assert!(page.url().await.unwrap().starts_with("data:text/html"));

    let png = page.screenshot().await.expect("screenshot failed");
    assert_eq!(&png[..4], b"\x89PNG");

    // The consent checkbox sits where its label says; a raw click toggles it
    let consent = page.get_by_label("I agree to receive other");
    let centre: (f64, f64) = page
        .evaluate(
            "(() => { const r = document.getElementById('consent').getBoundingClientRect(); \
             return [r.left + r.width / 2, r.top + r.height / 2]; })()",
        )
        .await
        .unwrap();
    page.click_at(centre.0, centre.1).await.expect("raw click failed");
    expect(&consent).not().to_be_checked().await.expect("raw click did not toggle");

    drop(consent);
    page.close().await.expect("failed to close page");
    browser.close().await.expect("failed to close");
}

/// A header button repeated in a collapsed mobile nav, plus close icons where
/// the first one sits in a hidden overlay.
fn repeated_header_html() -> String {
    r#"
    <!DOCTYPE html>
    <html>
    <body>
        <nav style="display:none" aria-hidden="true"><button>Contact Sales</button></nav>
        <header><button onclick="document.body.dataset.opened = 'yes'">Contact Sales</button></header>
        <div hidden><img alt="Close" src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" width="10" height="10"></div>
        <img alt="Close" id="first-close" onclick="document.body.dataset.closed = this.id" src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" width="10" height="10">
        <span aria-hidden="true"><img alt="Close" src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" width="10" height="10"></span>
        <img alt="Close" id="second-close" onclick="document.body.dataset.closed = this.id" src="data:image/gif;base64,R0lGODlhAQABAAAAACw=" width="10" height="10">
        <button style="visibility:hidden">Get Started</button>
    </body>
    </html>
    "#
    .to_string()
}

async fn open_repeated_header() -> (TestBrowser, Page) {
    let browser = TestBrowser::launch(TestBrowserConfig::default())
        .await
        .expect("failed to launch");
    let page = browser.new_page().await.expect("failed to create page");

    let data_url = format!("data:text/html,{}", urlencoding::encode(&repeated_header_html()));
    page.navigate(&data_url).await.expect("failed to navigate");

    (browser, page)
}

#[tokio::test]
#[ignore]
async fn test_role_skips_hidden_duplicate_button() {
    let (browser, page) = open_repeated_header().await;
    let contact_sales = page.get_by_role_named("button", "Contact Sales");

    assert_eq!(contact_sales.count().await.unwrap(), 1);
    contact_sales.click().await.expect("visible button should be clickable");

    let opened: Option<String> = page.evaluate("document.body.dataset.opened || null").await.unwrap();
    assert_eq!(opened.as_deref(), Some("yes"));

    // Text lookups still see the hidden copy
    assert_eq!(page.get_by_text("Contact Sales").count().await.unwrap(), 2);

    browser.close().await.expect("failed to close");
}

#[tokio::test]
#[ignore]
async fn test_role_nth_indexes_exposed_elements_only() {
    let (browser, page) = open_repeated_header().await;
    let close = page.get_by_role_named("img", "Close");

    assert_eq!(close.count().await.unwrap(), 2);

    let closed = || page.evaluate::<Option<String>>("document.body.dataset.closed || null");

    close.first().click().await.expect("first exposed close not clickable");
    assert_eq!(closed().await.unwrap().as_deref(), Some("first-close"));

    close.nth(1).click().await.expect("second exposed close not clickable");
    assert_eq!(closed().await.unwrap().as_deref(), Some("second-close"));

    assert_eq!(close.nth(2).count().await.unwrap(), 0);

    assert_eq!(page.get_by_role_named("button", "Get Started").count().await.unwrap(), 0);

    browser.close().await.expect("failed to close");
}

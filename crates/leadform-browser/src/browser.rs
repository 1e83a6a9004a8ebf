//! Browser lifecycle management and process control.
//!
//! [`TestBrowser`] launches one Chrome process per scenario. Scenarios never
//! share a browser, so nothing here is pooled or reused: launch, open a tab,
//! run, close.

use crate::error::{BrowserError, Result};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Configuration for launching a test browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestBrowserConfig {
    /// Run in headless mode (default: true).
    pub headless: bool,

    /// Browser window size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Chrome executable path (None = auto-detect).
    pub chrome_path: Option<String>,
}

impl TestBrowserConfig {
    /// Creates a new config with defaults for headless testing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Shows the browser window, for watching a scenario locally.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Adds additional Chrome arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Uses a specific Chrome executable.
    #[must_use]
    pub fn with_chrome_path(mut self, path: impl Into<String>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Builds the extra Chrome arguments. Headless mode and the per-launch
    /// profile directory are set on the chromiumoxide builder instead.
    #[must_use]
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));
        args.extend(self.args.iter().cloned());
        args
    }

    #[allow(clippy::result_large_err)]
    fn to_browser_config(&self, user_data_dir: &Path) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder()
            .args(self.chrome_args())
            .user_data_dir(user_data_dir);

        if !self.headless {
            config = config.with_head();
        }

        if let Some(path) = &self.chrome_path {
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for TestBrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_size: (1920, 1080),
            args: vec![
                // Containers without user namespaces cannot run the sandbox.
                "--no-sandbox".to_string(),
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
        }
    }
}

/// A running Chrome process and the throwaway profile it was started on.
struct Session {
    browser: Browser,
    // Declared after `browser` so the process is gone before the directory
    profile: TempDir,
}

/// A managed browser instance.
///
/// Prefer calling [`TestBrowser::close`] explicitly. Dropping it still kills
/// the Chrome process through chromiumoxide's own `Drop` and removes the
/// profile directory.
pub struct TestBrowser {
    inner: Arc<Mutex<Option<Session>>>,
}

impl TestBrowser {
    /// Launches a new browser instance with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the profile directory cannot be created, and
    /// `LaunchFailed` if Chrome is not installed, not executable, or fails
    /// to start.
    pub async fn launch(config: TestBrowserConfig) -> Result<Self> {
        debug!("Launching browser with config: {:?}", config);

        // Parallel scenarios each get their own profile; Chrome refuses to
        // start twice on one user-data-dir.
        let profile = tempfile::Builder::new().prefix("leadform-e2e-").tempdir()?;
        let browser_config = config.to_browser_config(profile.path())?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // chromiumoxide only makes progress while its handler is polled.
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("Browser handler error: {}", e);
                }
            }
        });

        debug!("Browser launched successfully");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(Session { browser, profile }))),
        })
    }

    /// Opens a new tab on `about:blank`.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` if the browser has been closed.
    pub async fn new_page(&self) -> Result<Page> {
        let session = self.inner.lock().await;

        let session = session.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let chrome_page = session
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Ok(Page::new(chrome_page))
    }

    /// Closes the browser, waits for the Chrome process to exit and removes
    /// its profile directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully.
    pub async fn close(&self) -> Result<()> {
        let mut session_guard = self.inner.lock().await;

        if let Some(Session {
            mut browser,
            profile,
        }) = session_guard.take()
        {
            debug!("Closing browser gracefully");
            browser
                .close()
                .await
                .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
            if let Err(e) = browser.wait().await {
                debug!("Waiting for Chrome to exit failed: {}", e);
            }

            let path = profile.path().to_path_buf();
            if let Err(e) = profile.close() {
                warn!("Failed to remove browser profile {}: {}", path.display(), e);
            }
        }

        Ok(())
    }

    /// Profile directory of the running browser, `None` once closed.
    pub async fn profile_dir(&self) -> Option<std::path::PathBuf> {
        self.inner
            .lock()
            .await
            .as_ref()
            .map(|session| session.profile.path().to_path_buf())
    }

    /// Returns true if the browser has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

impl fmt::Debug for TestBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestBrowser").finish_non_exhaustive()
    }
}

impl Drop for TestBrowser {
    fn drop(&mut self) {
        // Drop cannot await; if close() was skipped the inner Browser's own
        // Drop kills the process.
        if let Ok(guard) = self.inner.try_lock() {
            if guard.is_some() {
                warn!("TestBrowser dropped without explicit close() - forcing shutdown via Drop");
            }
        }
    }
}

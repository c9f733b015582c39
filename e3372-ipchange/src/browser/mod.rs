//! Browser backends and the seam the automation drives them through.

pub mod webdriver;

use std::fmt::{self, Display, Formatter};

use serde_json::Value;
use thiserror::Error;

pub use webdriver::WebDriverLauncher;

/// A browser the automation can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BrowserKind {
    Chrome,
    Firefox,
    Edge,
}

impl BrowserKind {
    /// Failover order used when the operator does not choose one.
    pub const DEFAULT_ORDER: [BrowserKind; 3] =
        [BrowserKind::Chrome, BrowserKind::Firefox, BrowserKind::Edge];

    pub fn name(self) -> &'static str {
        match self {
            BrowserKind::Chrome => "Chrome",
            BrowserKind::Firefox => "Firefox",
            BrowserKind::Edge => "Edge",
        }
    }

    /// WebDriver server binary that serves this browser.
    pub fn driver_binary(self) -> &'static str {
        match self {
            BrowserKind::Chrome => "chromedriver",
            BrowserKind::Firefox => "geckodriver",
            BrowserKind::Edge => "msedgedriver",
        }
    }
}

impl Display for BrowserKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("could not start {kind} session via {endpoint}: {reason}")]
    Launch {
        kind: BrowserKind,
        endpoint: String,
        reason: String,
    },
    #[error("failed to create WebDriver runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("{command} failed: {reason}")]
    Command {
        command: &'static str,
        reason: String,
    },
}

/// An open browser window.
pub trait BrowserSession {
    /// Navigate to `url` and return once the driver reports the load done.
    fn open(&mut self, url: &str) -> Result<(), BrowserError>;
    /// Whether the current page has an element with this id right now.
    fn has_element_id(&mut self, id: &str) -> Result<bool, BrowserError>;
    /// Run `script` as a function body in the page with `arguments` bound to
    /// `args`, returning its result.
    fn execute(&mut self, script: &str, args: Vec<Value>) -> Result<Value, BrowserError>;
    /// End the session and close the window.
    fn quit(self: Box<Self>) -> Result<(), BrowserError>;
}

/// Starts browser sessions by kind.
pub trait BrowserLauncher {
    fn launch(&self, kind: BrowserKind) -> Result<Box<dyn BrowserSession>, BrowserError>;
}

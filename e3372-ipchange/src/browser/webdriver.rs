use fantoccini::wd::Capabilities;
use fantoccini::{Client, ClientBuilder, Locator};
use log::debug;
use serde_json::{json, Value};
use tokio::runtime::{Builder, Runtime};

use super::{BrowserError, BrowserKind, BrowserLauncher, BrowserSession};
use crate::defaults::WebDriverEndpoints;

impl WebDriverEndpoints {
    pub fn url(&self, kind: BrowserKind) -> &str {
        match kind {
            BrowserKind::Chrome => &self.chrome,
            BrowserKind::Firefox => &self.firefox,
            BrowserKind::Edge => &self.edge,
        }
    }
}

/// Launches sessions against locally running WebDriver servers.
#[derive(Debug, Clone)]
pub struct WebDriverLauncher {
    endpoints: WebDriverEndpoints,
}

impl WebDriverLauncher {
    pub fn new(endpoints: WebDriverEndpoints) -> Self {
        Self { endpoints }
    }
}

impl BrowserLauncher for WebDriverLauncher {
    fn launch(&self, kind: BrowserKind) -> Result<Box<dyn BrowserSession>, BrowserError> {
        let endpoint = self.endpoints.url(kind).trim_end_matches('/').to_string();
        let launch_error = |reason: String| BrowserError::Launch {
            kind,
            endpoint: endpoint.clone(),
            reason,
        };

        // One current-thread runtime per session keeps every WebDriver call
        // blocking from the caller's side.
        let runtime = Builder::new_current_thread().enable_all().build()?;
        let mut builder = ClientBuilder::rustls().map_err(|err| launch_error(err.to_string()))?;
        builder.capabilities(capabilities(kind));

        debug!("connecting to {kind} WebDriver at {endpoint}");
        let client = runtime
            .block_on(builder.connect(&endpoint))
            .map_err(|err| launch_error(err.to_string()))?;

        Ok(Box::new(WebDriverSession { runtime, client }))
    }
}

/// Session capabilities for `kind`.
///
/// Chrome is asked not to announce automation: no "controlled by automated
/// test software" banner, no automation extension, and no
/// `AutomationControlled` blink feature, which some router UIs probe for.
pub fn capabilities(kind: BrowserKind) -> Capabilities {
    let caps = match kind {
        BrowserKind::Chrome => json!({
            "browserName": "chrome",
            "goog:chromeOptions": {
                "args": ["--disable-blink-features=AutomationControlled"],
                "excludeSwitches": ["enable-automation"],
                "useAutomationExtension": false,
            },
        }),
        BrowserKind::Firefox => json!({ "browserName": "firefox" }),
        BrowserKind::Edge => json!({ "browserName": "MicrosoftEdge" }),
    };
    caps.as_object().cloned().unwrap_or_default()
}

struct WebDriverSession {
    runtime: Runtime,
    client: Client,
}

fn command_error(command: &'static str) -> impl FnOnce(fantoccini::error::CmdError) -> BrowserError {
    move |err| BrowserError::Command {
        command,
        reason: err.to_string(),
    }
}

impl BrowserSession for WebDriverSession {
    fn open(&mut self, url: &str) -> Result<(), BrowserError> {
        self.runtime
            .block_on(self.client.goto(url))
            .map_err(command_error("navigate"))
    }

    fn has_element_id(&mut self, id: &str) -> Result<bool, BrowserError> {
        let found = self
            .runtime
            .block_on(self.client.find_all(Locator::Id(id)))
            .map_err(command_error("find element"))?;
        Ok(!found.is_empty())
    }

    fn execute(&mut self, script: &str, args: Vec<Value>) -> Result<Value, BrowserError> {
        self.runtime
            .block_on(self.client.execute(script, args))
            .map_err(command_error("execute script"))
    }

    fn quit(self: Box<Self>) -> Result<(), BrowserError> {
        let WebDriverSession { runtime, client } = *self;
        runtime
            .block_on(client.close())
            .map_err(command_error("close session"))
    }
}

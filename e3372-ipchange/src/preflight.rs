use std::time::Duration;

use log::{info, warn};
use thiserror::Error;

use crate::browser::BrowserKind;
use crate::defaults::WebDriverEndpoints;
use crate::probe::endpoint_reachable;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "no WebDriver server is reachable ({tried}); start one of them \
     (for example `chromedriver --port=9515`) or rerun with --manual-only \
     to print a script for the browser console"
)]
pub struct NoWebDriver {
    tried: String,
}

/// Start-up check that at least one selected backend has a WebDriver server
/// listening. Returns the backends that answered, in the given order.
pub fn require_webdriver(
    backends: &[BrowserKind],
    endpoints: &WebDriverEndpoints,
    timeout: Duration,
) -> Result<Vec<BrowserKind>, NoWebDriver> {
    let mut reachable = Vec::new();
    for &kind in backends {
        let endpoint = endpoints.url(kind);
        if endpoint_reachable(endpoint, timeout) {
            info!("{} answers at {endpoint}", kind.driver_binary());
            reachable.push(kind);
        } else {
            warn!("{} not reachable at {endpoint}", kind.driver_binary());
        }
    }

    if reachable.is_empty() {
        let tried = backends
            .iter()
            .map(|&kind| format!("{} at {}", kind.driver_binary(), endpoints.url(kind)))
            .collect::<Vec<_>>()
            .join(", ");
        return Err(NoWebDriver { tried });
    }
    Ok(reachable)
}

#[cfg(test)]
mod tests {
    use super::require_webdriver;
    use crate::browser::BrowserKind;
    use crate::defaults::WebDriverEndpoints;
    use std::net::TcpListener;
    use std::time::Duration;

    fn closed_port() -> u16 {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr").port()
    }

    #[test]
    fn keeps_only_listening_backends() {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let open = listener.local_addr().expect("addr").port();
        let endpoints = WebDriverEndpoints {
            chrome: format!("http://127.0.0.1:{}", closed_port()),
            firefox: format!("http://127.0.0.1:{open}"),
            edge: format!("http://127.0.0.1:{}", closed_port()),
        };

        let reachable = require_webdriver(
            &BrowserKind::DEFAULT_ORDER,
            &endpoints,
            Duration::from_millis(500),
        )
        .expect("firefox reachable");
        assert_eq!(reachable, vec![BrowserKind::Firefox]);
    }

    #[test]
    fn none_reachable_names_drivers_and_fallback() {
        let endpoints = WebDriverEndpoints {
            chrome: format!("http://127.0.0.1:{}", closed_port()),
            firefox: "not a url".to_string(),
            edge: format!("http://127.0.0.1:{}", closed_port()),
        };

        let err = require_webdriver(
            &[BrowserKind::Chrome, BrowserKind::Edge],
            &endpoints,
            Duration::from_millis(200),
        )
        .expect_err("nothing listening");
        let message = err.to_string();
        assert!(message.contains("chromedriver at http://127.0.0.1:"));
        assert!(message.contains("msedgedriver at"));
        assert!(!message.contains("geckodriver"));
        assert!(message.contains("--manual-only"));
    }
}

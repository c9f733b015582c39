use std::net::Ipv4Addr;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

const EMBEDDED: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/defaults/e3372.toml"
));

#[derive(Debug, Error)]
pub enum DefaultsError {
    #[error("failed to parse device defaults: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid device defaults: {0}")]
    Invalid(String),
}

/// Device constants: API paths, derived DHCP values, timings and WebDriver
/// endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceDefaults {
    pub device: DeviceApi,
    pub dhcp: DhcpDefaults,
    pub timing: TimingDefaults,
    pub webdriver: WebDriverEndpoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceApi {
    /// Address used when the operator leaves the current IP blank.
    pub default_address: Ipv4Addr,
    pub session_token_path: String,
    pub dhcp_settings_path: String,
    /// Element id whose presence means the web UI wants a login first.
    pub login_element_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DhcpDefaults {
    pub netmask: Ipv4Addr,
    pub range_start_host: u8,
    pub range_end_host: u8,
    /// Lease time in seconds.
    pub lease_time: u32,
    pub primary_dns: Ipv4Addr,
    pub secondary_dns: Ipv4Addr,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimingDefaults {
    pub page_settle_secs: u64,
    pub login_probe_secs: u64,
    pub apply_wait_secs: u64,
    pub poll_interval_ms: u64,
    pub preflight_timeout_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WebDriverEndpoints {
    pub chrome: String,
    pub firefox: String,
    pub edge: String,
}

/// Bounded waits used while driving a browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub page_settle: Duration,
    pub login_probe: Duration,
    pub apply_wait: Duration,
    pub poll_interval: Duration,
}

impl Timings {
    /// No waiting at all; every bounded poll checks its condition once.
    pub const IMMEDIATE: Timings = Timings {
        page_settle: Duration::ZERO,
        login_probe: Duration::ZERO,
        apply_wait: Duration::ZERO,
        poll_interval: Duration::ZERO,
    };
}

impl TimingDefaults {
    pub fn timings(&self) -> Timings {
        Timings {
            page_settle: Duration::from_secs(self.page_settle_secs),
            login_probe: Duration::from_secs(self.login_probe_secs),
            apply_wait: Duration::from_secs(self.apply_wait_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
        }
    }

    pub fn preflight_timeout(&self) -> Duration {
        Duration::from_millis(self.preflight_timeout_ms)
    }
}

impl DeviceDefaults {
    /// Defaults compiled into the binary.
    pub fn embedded() -> Result<Self, DefaultsError> {
        Self::parse(EMBEDDED)
    }

    pub fn parse(raw: &str) -> Result<Self, DefaultsError> {
        let defaults = toml::from_str::<DeviceDefaults>(raw)?;
        defaults.validate()?;
        Ok(defaults)
    }

    fn validate(&self) -> Result<(), DefaultsError> {
        let dhcp = &self.dhcp;
        if dhcp.range_start_host == 0 || dhcp.range_end_host == 255 {
            return Err(DefaultsError::Invalid(
                "DHCP range must not include the network or broadcast host".to_string(),
            ));
        }
        if dhcp.range_start_host > dhcp.range_end_host {
            return Err(DefaultsError::Invalid(format!(
                "DHCP range start .{} is above end .{}",
                dhcp.range_start_host, dhcp.range_end_host
            )));
        }
        Ok(())
    }
}

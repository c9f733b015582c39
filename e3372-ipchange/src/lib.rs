//! Change the LAN address of a Huawei E3372 HiLink modem.
//!
//! The modem's web UI only accepts a settings change from a logged-in page
//! session, so the change is made from inside a real browser: a WebDriver
//! backend opens the device page, fetches the session id and verification
//! token from `/api/webserver/SesTokInfo`, and posts the new DHCP/LAN
//! settings to `/api/dhcp/settings`.
//!
//! # Architecture
//!
//! ## Input
//!
//! - [`address`] — dotted-quad validation
//! - [`dhcp`] — DHCP range and request payload derived from the new address
//! - [`prompt`] — interactive collection and confirmation of a [`dhcp::ChangePlan`]
//!
//! ## Automation
//!
//! - [`browser`] — backend kinds, the session/launcher seam, WebDriver client
//! - [`automation`] — ordered failover across backends with tagged outcomes
//! - [`session`] — session id and token extraction
//! - [`script`] — page scripts and the manual console fallback
//! - [`preflight`] — start-up check for a reachable WebDriver server
//! - [`wait`], [`probe`] — bounded polling and TCP reachability
//!
//! ## Support
//!
//! - [`defaults`] — embedded device constants
//! - [`report`] — terminal rendering of outcomes and the fallback
//!
//! Request and response XML is handled by `hilink-xml`.

pub mod address;
pub mod automation;
pub mod browser;
pub mod defaults;
pub mod dhcp;
pub mod preflight;
pub mod probe;
pub mod prompt;
pub mod report;
pub mod script;
pub mod session;
pub mod wait;

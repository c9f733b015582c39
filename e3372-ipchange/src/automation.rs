//! Drives one browser backend after another until the device accepts the new
//! settings.
//!
//! Each backend gets exactly one attempt. The attempt ends in one of four
//! tagged outcomes; only [`AttemptOutcome::Success`] stops the failover.

use std::io;
use std::net::IpAddr;

use colored::Colorize;
use hilink_xml::{write_pretty, ApiResponse, WriteError};
use log::{debug, info, log_enabled, Level};
use serde_json::Value;
use thiserror::Error;

use crate::browser::{BrowserError, BrowserKind, BrowserLauncher, BrowserSession};
use crate::defaults::{DeviceApi, Timings};
use crate::dhcp::ChangePlan;
use crate::probe::http_host_reachable;
use crate::prompt::Operator;
use crate::script;
use crate::session::{ProtocolError, SessionToken};
use crate::wait::poll_until;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// The device acknowledged the settings POST.
    Success { response: String },
    /// The device answered, but with an error body.
    DeviceError {
        response: String,
        code: Option<u32>,
    },
    /// The browser session could not be started.
    BackendUnavailable { reason: String },
    /// Anything else that went wrong once the browser was up.
    UnexpectedFailure { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempt {
    pub backend: BrowserKind,
    pub outcome: AttemptOutcome,
}

/// Every attempt made during one run, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub attempts: Vec<Attempt>,
}

impl RunReport {
    /// The backend that delivered the change, if any.
    pub fn succeeded_with(&self) -> Option<BrowserKind> {
        self.attempts
            .iter()
            .find(|attempt| matches!(attempt.outcome, AttemptOutcome::Success { .. }))
            .map(|attempt| attempt.backend)
    }

    pub fn is_success(&self) -> bool {
        self.succeeded_with().is_some()
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("failed to build DHCP settings payload: {0}")]
    Payload(#[from] WriteError),
    #[error("console I/O failed: {0}")]
    Operator(#[from] io::Error),
}

#[derive(Debug, Error)]
enum DriveError {
    #[error(transparent)]
    Browser(#[from] BrowserError),
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
    #[error(transparent)]
    Operator(#[from] io::Error),
}

/// True when a settings response reports failure: the word "error" anywhere
/// in it, in any case.
pub fn is_device_error(response: &str) -> bool {
    response.to_lowercase().contains("error")
}

/// Text form of a script result. Strings are taken verbatim, everything else
/// as JSON (`null` for no value).
pub fn result_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub struct Automation<'a> {
    launcher: &'a dyn BrowserLauncher,
    backends: Vec<BrowserKind>,
    api: &'a DeviceApi,
    timings: Timings,
}

impl<'a> Automation<'a> {
    pub fn new(
        launcher: &'a dyn BrowserLauncher,
        backends: Vec<BrowserKind>,
        api: &'a DeviceApi,
        timings: Timings,
    ) -> Self {
        Self {
            launcher,
            backends,
            api,
            timings,
        }
    }

    /// Try each backend in order until one succeeds.
    pub fn run(
        &self,
        plan: &ChangePlan,
        operator: &mut dyn Operator,
    ) -> Result<RunReport, RunError> {
        let payload = plan.dhcp.payload()?;
        if log_enabled!(Level::Debug) {
            match write_pretty(&plan.dhcp.request()) {
                Ok(pretty) => debug!("settings payload:\n{pretty}"),
                Err(err) => debug!("settings payload not printable: {err}"),
            }
        }

        let mut report = RunReport::default();
        for &backend in &self.backends {
            let outcome = self.attempt(backend, plan, &payload, operator)?;
            let done = matches!(outcome, AttemptOutcome::Success { .. });
            report.attempts.push(Attempt { backend, outcome });
            if done {
                break;
            }
        }
        Ok(report)
    }

    fn attempt(
        &self,
        backend: BrowserKind,
        plan: &ChangePlan,
        payload: &str,
        operator: &mut dyn Operator,
    ) -> io::Result<AttemptOutcome> {
        operator.status("")?;
        operator.status(&format!("Trying with {backend}..."))?;

        let mut session = match self.launcher.launch(backend) {
            Ok(session) => session,
            Err(err) => {
                info!("{backend} unavailable: {err}");
                operator.status(&format!("Error with {backend}: {err}"))?;
                return Ok(AttemptOutcome::BackendUnavailable {
                    reason: err.to_string(),
                });
            }
        };

        let outcome = match self.drive(session.as_mut(), plan, payload, operator) {
            Ok(outcome) => outcome,
            Err(DriveError::Operator(err)) => {
                close(session, backend);
                return Err(err);
            }
            Err(err) => {
                info!("{backend} attempt failed: {err}");
                operator.status(&format!("Error with {backend}: {err}"))?;
                AttemptOutcome::UnexpectedFailure {
                    reason: err.to_string(),
                }
            }
        };

        close(session, backend);
        Ok(outcome)
    }

    fn drive(
        &self,
        session: &mut dyn BrowserSession,
        plan: &ChangePlan,
        payload: &str,
        operator: &mut dyn Operator,
    ) -> Result<AttemptOutcome, DriveError> {
        operator.status("Opening device page...")?;
        session.open(&plan.current_url())?;
        self.wait_for_page(session);

        if self.login_required(session) {
            operator.status("Login page detected - you may need to login manually")?;
            operator.wait_for_manual_login()?;
        }

        operator.status("Injecting JavaScript...")?;
        let response = self.submit(session, payload)?;
        operator.status(&format!("Result: {response}"))?;

        if is_device_error(&response) {
            let code = match ApiResponse::parse(&response) {
                Ok(ApiResponse::Error { code, .. }) => code,
                _ => None,
            };
            operator.status(&format!("Error response: {response}"))?;
            return Ok(AttemptOutcome::DeviceError { response, code });
        }

        operator.status("")?;
        operator.status(&"✓ IP change command sent successfully!".green().to_string())?;
        operator.status(&format!(
            "Device will reboot. New address: {}",
            plan.new_url()
        ))?;

        operator.status("")?;
        operator.status("Trying alternative injection methods...")?;
        self.supplementary_injection(session, plan);
        self.wait_for_new_address(plan);

        Ok(AttemptOutcome::Success { response })
    }

    /// Session handshake and settings POST, both run in the page's origin.
    fn submit(&self, session: &mut dyn BrowserSession, payload: &str) -> Result<String, DriveError> {
        let body = session.execute(
            script::FETCH_SESSION_TOKEN,
            script::fetch_session_token_args(self.api),
        )?;
        let body = match body {
            Value::String(body) => body,
            other => {
                return Err(ProtocolError::UnexpectedScriptResult {
                    found: other.to_string(),
                }
                .into())
            }
        };
        let token = SessionToken::extract(&body)?;
        debug!("session token acquired");

        let response = session.execute(
            script::SUBMIT_DHCP_SETTINGS,
            script::submit_dhcp_settings_args(self.api, &token.session_id, &token.token, payload),
        )?;
        Ok(result_text(&response))
    }

    fn wait_for_page(&self, session: &mut dyn BrowserSession) {
        let loaded = poll_until(self.timings.page_settle, self.timings.poll_interval, || {
            matches!(
                session.execute(script::READY_STATE, Vec::new()),
                Ok(Value::String(state)) if state == "complete"
            )
        });
        if !loaded {
            debug!("page not complete after {:?}, continuing", self.timings.page_settle);
        }
    }

    fn login_required(&self, session: &mut dyn BrowserSession) -> bool {
        let id = self.api.login_element_id.as_str();
        poll_until(self.timings.login_probe, self.timings.poll_interval, || {
            session.has_element_id(id).unwrap_or_else(|err| {
                debug!("login probe failed: {err}");
                false
            })
        })
    }

    /// Best-effort extra nudges; failures only get logged.
    fn supplementary_injection(&self, session: &mut dyn BrowserSession, plan: &ChangePlan) {
        let new_ip = plan.new.to_string();
        match session.execute(
            script::EMUI_SET_DHCP,
            vec![
                Value::from(new_ip.as_str()),
                Value::from(plan.dhcp.netmask.to_string()),
            ],
        ) {
            Ok(called) => debug!("EMUI DHCP setter called: {called}"),
            Err(err) => debug!("EMUI DHCP setter failed: {err}"),
        }
        match session.execute(script::FILL_IP_INPUTS, vec![Value::from(new_ip)]) {
            Ok(updated) => debug!("form inputs updated: {updated}"),
            Err(err) => debug!("form input update failed: {err}"),
        }
    }

    fn wait_for_new_address(&self, plan: &ChangePlan) {
        let host = IpAddr::V4(plan.new);
        let up = poll_until(self.timings.apply_wait, self.timings.poll_interval, || {
            http_host_reachable(host, self.timings.poll_interval)
        });
        if up {
            info!("device answers at {}", plan.new_url());
        } else {
            info!(
                "device not answering at {} yet; it may still be rebooting",
                plan.new_url()
            );
        }
    }
}

fn close(session: Box<dyn BrowserSession>, backend: BrowserKind) {
    if let Err(err) = session.quit() {
        debug!("closing {backend} failed: {err}");
    }
}

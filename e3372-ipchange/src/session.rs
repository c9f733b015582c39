use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

static SESSION_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SessionID=([^<]+)").expect("session pattern is valid"));
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"TokInfo>([^<]+)").expect("token pattern is valid"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The SesTokInfo answer did not carry the named value.
    #[error("{field} not found in session token response")]
    TokenNotFound { field: &'static str },
    #[error("page script returned {found} instead of a response body")]
    UnexpectedScriptResult { found: String },
}

/// Session cookie value and anti-CSRF token issued by `SesTokInfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    pub session_id: String,
    pub token: String,
}

impl SessionToken {
    /// Pull the first `SessionID=` value and the first `TokInfo` value out of
    /// a raw response body.
    ///
    /// The body is scanned as text rather than parsed, so firmware that wraps
    /// the values differently still works as long as both markers appear.
    pub fn extract(body: &str) -> Result<Self, ProtocolError> {
        let session_id = first_capture(&SESSION_ID, body)
            .ok_or(ProtocolError::TokenNotFound { field: "SessionID" })?;
        let token =
            first_capture(&TOKEN, body).ok_or(ProtocolError::TokenNotFound { field: "TokInfo" })?;
        Ok(Self { session_id, token })
    }
}

fn first_capture(pattern: &Regex, body: &str) -> Option<String> {
    pattern
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

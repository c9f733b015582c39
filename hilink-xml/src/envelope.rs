//! `<request>` and `<response>` envelopes used by the HiLink web API.
//!
//! Every state-changing call posts a `<request>` document whose children are
//! plain text fields. The firmware answers with either `<response>OK</response>`
//! (or a `<response>` carrying data) or an `<error>` element holding a numeric
//! `<code>` and an often empty `<message>`.

use crate::parser::{parse, ParseError};
use crate::tree::XmlNode;
use crate::writer::{write_document, WriteError};

/// Build a `<request>` element from ordered `(tag, text)` fields.
pub fn request_node<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> XmlNode
where
    K: Into<String>,
    V: Into<String>,
{
    let mut request = XmlNode::new("request");
    for (tag, text) in fields {
        request.push_text_child(tag, text);
    }
    request
}

/// Build and serialize a `<request>` document ready to be posted.
pub fn request_document<K, V>(
    fields: impl IntoIterator<Item = (K, V)>,
) -> Result<String, WriteError>
where
    K: Into<String>,
    V: Into<String>,
{
    write_document(&request_node(fields))
}

/// A parsed API answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiResponse {
    /// A `<response>` element; `OK` for acknowledged writes.
    Response(XmlNode),
    /// An `<error>` element, wherever it appears in the document.
    Error {
        code: Option<u32>,
        message: Option<String>,
    },
}

impl ApiResponse {
    /// Parse a raw body into a response or error.
    pub fn parse(body: &str) -> Result<Self, ParseError> {
        let root = parse(body)?;
        if let Some(error) = root.find("error") {
            return Ok(Self::Error {
                code: error
                    .get_text(&["code"])
                    .and_then(|code| code.trim().parse().ok()),
                message: error
                    .get_text(&["message"])
                    .map(str::trim)
                    .filter(|message| !message.is_empty())
                    .map(str::to_string),
            });
        }
        Ok(Self::Response(root))
    }
}

/// Human-readable meaning of the HiLink error codes seen when changing
/// settings.
pub fn describe_error_code(code: u32) -> Option<&'static str> {
    let text = match code {
        100002 => "API not supported by this firmware",
        100003 => "no rights (login required)",
        100004 => "system busy",
        100005 => "request format error",
        100006 => "parameter error",
        108001 => "wrong username",
        108002 => "wrong password",
        108003 => "already logged in elsewhere",
        108006 | 108007 => "username or password wrong",
        125001 => "verification token error",
        125002 => "session error",
        125003 => "session/token mismatch",
        _ => return None,
    };
    Some(text)
}

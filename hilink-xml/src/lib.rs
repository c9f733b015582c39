//! XML primitives for talking to Huawei HiLink routers.
//!
//! The web API exchanges small XML documents: `<request>` bodies posted with
//! a verification token, `<response>`/`<error>` answers. This crate provides
//! a minimal element tree, a quick-xml based parser and writer, and the
//! envelope helpers built on them.

pub mod envelope;
pub mod parser;
pub mod tree;
pub mod writer;

pub use envelope::{describe_error_code, request_document, request_node, ApiResponse};
pub use parser::{parse, ParseError};
pub use tree::XmlNode;
pub use writer::{write_document, write_pretty, WriteError};

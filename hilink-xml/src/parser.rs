use quick_xml::events::{BytesStart, Event};
use quick_xml::name::QName;
use quick_xml::Reader;
use thiserror::Error;

use crate::tree::XmlNode;

/// Errors that can occur while parsing a HiLink document into an [`XmlNode`].
#[derive(Debug, Error)]
pub enum ParseError {
    /// Input could not be tokenized.
    #[error("failed to parse XML: {0}")]
    Xml(#[from] quick_xml::Error),
    /// Tag, attribute or CDATA bytes were not valid UTF-8.
    #[error("invalid UTF-8 while parsing XML: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    /// An entity in text or an attribute could not be decoded.
    #[error("failed to decode XML text: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),
    /// Structural issue in the document.
    #[error("malformed XML: {0}")]
    Malformed(String),
}

/// Parse a document into an [`XmlNode`] tree.
///
/// Whitespace-only text is dropped, so pretty-printed and compact firmware
/// responses produce the same tree.
pub fn parse(xml: &str) -> Result<XmlNode, ParseError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut builder = TreeBuilder::default();
    loop {
        match reader.read_event()? {
            Event::Start(e) => builder.open(element(&e, &reader)?),
            Event::Empty(e) => {
                builder.open(element(&e, &reader)?);
                builder.close()?;
            }
            Event::End(_) => builder.close()?,
            Event::Text(e) => builder.text(&e.unescape()?),
            Event::CData(e) => builder.text(std::str::from_utf8(e.as_ref())?),
            Event::Eof => break,
            _ => {}
        }
    }
    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    open: Vec<XmlNode>,
    root: Option<XmlNode>,
}

impl TreeBuilder {
    fn open(&mut self, node: XmlNode) {
        self.open.push(node);
    }

    fn close(&mut self) -> Result<(), ParseError> {
        let node = self.open.pop().ok_or_else(|| {
            ParseError::Malformed("encountered closing tag without open tag".to_string())
        })?;

        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None if self.root.is_none() => self.root = Some(node),
            None => {
                return Err(ParseError::Malformed(
                    "multiple top-level elements found".to_string(),
                ))
            }
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        if let Some(current) = self.open.last_mut() {
            current.text.get_or_insert_with(String::new).push_str(text);
        }
    }

    fn finish(self) -> Result<XmlNode, ParseError> {
        if !self.open.is_empty() {
            return Err(ParseError::Malformed(
                "unclosed element(s) at end of document".to_string(),
            ));
        }
        self.root
            .ok_or_else(|| ParseError::Malformed("no root element found".to_string()))
    }
}

fn element(e: &BytesStart<'_>, reader: &Reader<&[u8]>) -> Result<XmlNode, ParseError> {
    let mut node = XmlNode::new(qname_to_string(e.name())?);
    for attr in e.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let value = attr
            .decode_and_unescape_value(reader.decoder())?
            .into_owned();
        node.attributes.insert(qname_to_string(attr.key)?, value);
    }
    Ok(node)
}

fn qname_to_string(name: QName<'_>) -> Result<String, ParseError> {
    Ok(std::str::from_utf8(name.as_ref())?.to_string())
}

use std::collections::BTreeMap;

/// An element of a HiLink API document.
///
/// Children keep document order, so a `<request>` is written exactly in the
/// order its fields were pushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Element tag name.
    pub tag: String,
    /// XML attributes keyed by name.
    pub attributes: BTreeMap<String, String>,
    /// Child elements in document order.
    pub children: Vec<XmlNode>,
    /// Optional text content.
    pub text: Option<String>,
}

impl XmlNode {
    /// Create an empty element.
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: None,
        }
    }

    /// Create a leaf element holding `text`.
    pub fn with_text(tag: impl Into<String>, text: impl Into<String>) -> Self {
        let mut node = Self::new(tag);
        node.text = Some(text.into());
        node
    }

    /// Append a leaf element and return `self` for chaining.
    pub fn push_text_child(&mut self, tag: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.children.push(Self::with_text(tag, text));
        self
    }

    /// Return the first child with the provided tag.
    pub fn get_child(&self, tag: &str) -> Option<&XmlNode> {
        self.children.iter().find(|child| child.tag == tag)
    }

    /// Walk a nested child path and return the terminal node's text.
    pub fn get_text<'a>(&'a self, path: &[&str]) -> Option<&'a str> {
        path.iter()
            .try_fold(self, |node, segment| node.get_child(segment))?
            .text
            .as_deref()
    }

    /// Depth-first search for the first element named `tag`, including `self`.
    pub fn find(&self, tag: &str) -> Option<&XmlNode> {
        if self.tag == tag {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(tag))
    }
}

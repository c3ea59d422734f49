//! XML serialization
//!
//! Text leaves escape only the markup delimiters `&`, `<` and `>`. Quotes
//! are left alone: the text must come back byte for byte, and nothing in
//! element content needs them escaped. No whitespace is ever added between
//! elements, since any added text would end up in the reconstructed source.

use crate::{Element, Node};

/// Serialization options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Emit a leading `<?xml version="1.0"?>`
    pub declaration: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self { declaration: true }
    }
}

/// Trait for writing tree nodes as XML
pub trait ToXml {
    fn write_xml(&self, out: &mut String);

    fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out);
        out
    }
}

const DECLARATION: &str = "<?xml version=\"1.0\"?>";

/// Serialize a tree to an XML document
pub fn serialize(root: &Element, options: &SerializeOptions) -> String {
    let mut out = String::new();
    if options.declaration {
        out.push_str(DECLARATION);
    }
    root.write_xml(&mut out);
    out
}

impl ToXml for Element {
    fn write_xml(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag());
        for (name, value) in self.attributes() {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            escape_attribute(value, out);
            out.push('"');
        }
        if self.children().is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        for child in self.children() {
            child.write_xml(out);
        }
        out.push_str("</");
        out.push_str(self.tag());
        out.push('>');
    }
}

impl ToXml for Node {
    fn write_xml(&self, out: &mut String) {
        match self {
            Node::Element(element) => element.write_xml(out),
            Node::Text(text) => escape_text(text, out),
        }
    }
}

/// Escape element content
pub fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Escape a double-quoted attribute value
///
/// Handler-produced values are identifiers, numbers and context names, so
/// in practice they pass through untouched.
pub fn escape_attribute(value: &str, out: &mut String) {
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

//! Minimal XML element tree and pretty-printing serializer.

use std::fmt::Write;

/// An XML element with attributes, optional text and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates an element holding only text.
    #[must_use]
    pub fn text(name: impl Into<String>, text: impl ToString) -> Self {
        Self::new(name).with_text(text)
    }

    /// Adds an attribute. Attributes are written in insertion order.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl ToString) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Appends a child element.
    pub fn push(&mut self, child: Element) {
        self.children.push(child);
    }

    /// Returns the element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the child elements.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Serializes the element as a standalone UTF-8 document with an XML
    /// declaration, indenting nested elements by two spaces.
    #[must_use]
    pub fn to_document(&self) -> String {
        let mut out = String::from("<?xml version='1.0' encoding='UTF-8'?>\n");
        self.write_into(&mut out, 0);
        out
    }

    fn write_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{indent}<{}", self.name);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {name}=\"{}\"", escape(value));
        }

        match (&self.text, self.children.is_empty()) {
            (None, true) => out.push_str("/>\n"),
            (Some(text), true) => {
                let _ = writeln!(out, ">{}</{}>", escape(text), self.name);
            }
            (text, false) => {
                out.push('>');
                if let Some(text) = text {
                    out.push_str(&escape(text));
                }
                out.push('\n');
                for child in &self.children {
                    child.write_into(out, depth + 1);
                }
                let _ = writeln!(out, "{indent}</{}>", self.name);
            }
        }
    }
}

/// Escapes the five XML special characters.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_element_self_closes() {
        let doc = Element::new("Activities").to_document();

        assert_eq!(doc, "<?xml version='1.0' encoding='UTF-8'?>\n<Activities/>\n");
    }

    #[test]
    fn test_nested_elements_are_indented() {
        let doc = Element::new("Lap")
            .with_attribute("StartTime", "2021-01-01T00:00:00.000Z")
            .with_child(Element::text("Calories", 12))
            .with_child(Element::new("Track").with_child(Element::text("Time", "t")))
            .to_document();

        let expected = "<?xml version='1.0' encoding='UTF-8'?>\n\
                        <Lap StartTime=\"2021-01-01T00:00:00.000Z\">\n  \
                        <Calories>12</Calories>\n  \
                        <Track>\n    \
                        <Time>t</Time>\n  \
                        </Track>\n\
                        </Lap>\n";
        assert_eq!(doc, expected);
    }

    #[test]
    fn test_text_and_attributes_are_escaped() {
        let doc = Element::new("Notes")
            .with_attribute("by", "\"me\"")
            .with_text("a < b & c")
            .to_document();

        assert!(doc.contains("by=\"&quot;me&quot;\""));
        assert!(doc.contains(">a &lt; b &amp; c</Notes>"));
    }

    #[test]
    fn test_escape_plain_text_unchanged() {
        assert_eq!(escape("Running"), "Running");
        assert_eq!(escape("it's"), "it&apos;s");
    }
}

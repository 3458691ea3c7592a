//! Document tree - the persisted form of sync logs.
//!
//! An [`Element`] is a named node with ordered attributes and child
//! elements. Text content is not modelled; nothing in a sync log carries it.
//! The XML text codec is built on `quick-xml`.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::{Reader, Writer};

use crate::DocumentError;

/// A single element in a document tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(key, value);
        self
    }

    /// Builder form of [`Element::push_child`].
    pub fn with_child(mut self, child: Element) -> Self {
        self.push_child(child);
        self
    }

    /// Element name (tag).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an attribute, replacing any existing value for the key.
    ///
    /// New keys keep insertion order.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    /// Look up an attribute value.
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// All attributes in document order.
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Append a child element.
    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// All child elements in document order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Child elements with the given name, in document order.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// First child element with the given name.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Parse XML text and return its root element.
    ///
    /// Declarations, comments, processing instructions and text are skipped.
    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        let mut reader = Reader::from_str(xml);
        let mut stack: Vec<Element> = Vec::new();

        loop {
            let event = reader
                .read_event()
                .map_err(|e| DocumentError::Malformed(e.to_string()))?;
            match event {
                Event::Start(start) => stack.push(element_from_start(&start)?),
                Event::Empty(start) => {
                    let element = element_from_start(&start)?;
                    match stack.last_mut() {
                        Some(parent) => parent.push_child(element),
                        None => return Ok(element),
                    }
                }
                Event::End(_) => {
                    let element = stack
                        .pop()
                        .ok_or_else(|| DocumentError::Malformed("unbalanced end tag".into()))?;
                    match stack.last_mut() {
                        Some(parent) => parent.push_child(element),
                        None => return Ok(element),
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if stack.is_empty() {
            Err(DocumentError::NoRootElement)
        } else {
            Err(DocumentError::Malformed("unexpected end of document".into()))
        }
    }

    /// Serialize this element as an indented XML document.
    pub fn to_xml_string(&self) -> Result<String, DocumentError> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(|e| DocumentError::Write(e.to_string()))?;
        self.write_to(&mut writer)?;
        String::from_utf8(writer.into_inner()).map_err(|e| DocumentError::Write(e.to_string()))
    }

    fn write_to(&self, writer: &mut Writer<Vec<u8>>) -> Result<(), DocumentError> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.children.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(|e| DocumentError::Write(e.to_string()));
        }

        writer
            .write_event(Event::Start(start))
            .map_err(|e| DocumentError::Write(e.to_string()))?;
        for child in &self.children {
            child.write_to(writer)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(|e| DocumentError::Write(e.to_string()))
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Result<Element, DocumentError> {
    let name = utf8(start.name().as_ref())?;
    let mut element = Element::new(name);
    for attr in start.attributes() {
        let attr = attr.map_err(|e| DocumentError::Malformed(e.to_string()))?;
        let key = utf8(attr.key.as_ref())?;
        let value = attr
            .unescape_value()
            .map_err(|e| DocumentError::Malformed(e.to_string()))?;
        element.set_attribute(key, value.into_owned());
    }
    Ok(element)
}

fn utf8(bytes: &[u8]) -> Result<String, DocumentError> {
    std::str::from_utf8(bytes)
        .map(str::to_owned)
        .map_err(|e| DocumentError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("synclog")
            .with_attribute("name", "calendar")
            .with_child(Element::new("syncresults").with_attribute("majorcode", "0"))
            .with_child(
                Element::new("syncresults")
                    .with_attribute("majorcode", "1")
                    .with_child(Element::new("target").with_attribute("name", "hcalendar")),
            )
    }

    #[test]
    fn set_attribute_replaces_existing() {
        let mut element = Element::new("a").with_attribute("x", "1");
        element.set_attribute("y", "2");
        element.set_attribute("x", "3");

        assert_eq!(element.attribute("x"), Some("3"));
        let keys: Vec<_> = element.attributes().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["x", "y"]);
    }

    #[test]
    fn children_named_filters_by_tag() {
        let mut root = sample();
        root.push_child(Element::new("other"));

        assert_eq!(root.children().len(), 3);
        assert_eq!(root.children_named("syncresults").count(), 2);
        assert!(root.child("other").is_some());
        assert!(root.child("missing").is_none());
    }

    #[test]
    fn xml_text_preserves_tree() {
        let root = sample();
        let xml = root.to_xml_string().unwrap();

        assert!(xml.starts_with("<?xml"));
        assert_eq!(Element::parse(&xml).unwrap(), root);
    }

    #[test]
    fn attribute_values_are_escaped() {
        let root = Element::new("synclog").with_attribute("name", "a<b & \"c\"");
        let xml = root.to_xml_string().unwrap();

        assert!(!xml.contains("a<b"));
        let parsed = Element::parse(&xml).unwrap();
        assert_eq!(parsed.attribute("name"), Some("a<b & \"c\""));
    }

    #[test]
    fn parse_skips_text_and_comments() {
        let xml = r#"<?xml version="1.0"?>
            <!-- written by the sync daemon -->
            <synclog name="p">
                some text
                <syncresults majorcode="0"/>
            </synclog>"#;

        let root = Element::parse(xml).unwrap();
        assert_eq!(root.name(), "synclog");
        assert_eq!(root.attribute("name"), Some("p"));
        assert_eq!(root.children().len(), 1);
    }

    #[test]
    fn parse_empty_document_fails() {
        assert!(matches!(
            Element::parse("<?xml version=\"1.0\"?>"),
            Err(DocumentError::NoRootElement)
        ));
    }

    #[test]
    fn parse_truncated_document_fails() {
        assert!(Element::parse("<synclog name=\"p\"><syncresults>").is_err());
    }
}

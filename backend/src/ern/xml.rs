//! Owned XML element tree.
//!
//! Builders assemble [`XmlElement`] values; [`to_xml_string`] writes them
//! with quick-xml. Optional nodes are only pushed when their value exists,
//! so the tree never carries empty placeholders.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::borrow::Cow;
use std::io::{Cursor, Write};

use crate::error::ErnResult;

/// One XML element with attributes and either text or child elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    pub text: Option<String>,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Leaf element holding text.
    pub fn with_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: Some(text.into()),
            ..Default::default()
        }
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    pub fn opt_child(mut self, child: Option<XmlElement>) -> Self {
        if let Some(child) = child {
            self.children.push(child);
        }
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = XmlElement>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text_child(self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.child(XmlElement::with_text(name, text))
    }

    pub fn opt_text_child<T: Into<String>>(self, name: impl Into<String>, text: Option<T>) -> Self {
        let child = text.map(|t| XmlElement::with_text(name, t));
        self.opt_child(child)
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(child);
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// First direct child with this name.
    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All direct children with this name, in document order.
    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Follow a `/`-separated path of first matches.
    pub fn find_path(&self, path: &str) -> Option<&XmlElement> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |el, segment| el.find(segment))
    }

    /// Text at the end of a `/`-separated path.
    pub fn path_text(&self, path: &str) -> Option<&str> {
        self.find_path(path).and_then(XmlElement::text)
    }

    /// Text of the first direct child with this name.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.find(name).and_then(XmlElement::text)
    }

    /// All descendants with this name, depth-first in document order.
    pub fn descendants(&self, name: &str) -> Vec<&XmlElement> {
        let mut found = Vec::new();
        self.collect_descendants(name, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, name: &str, found: &mut Vec<&'a XmlElement>) {
        for child in &self.children {
            if child.name == name {
                found.push(child);
            }
            child.collect_descendants(name, found);
        }
    }
}

// =============================================================================
// Serialization
// =============================================================================

/// Serialize a tree to UTF-8 text with a declaration and two-space indentation.
pub fn to_xml_string(root: &XmlElement) -> ErnResult<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner().into_inner();
    bytes.write_all(b"\n")?;
    Ok(String::from_utf8(bytes)?)
}

/// True for characters allowed by the XML 1.0 `Char` production.
fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Drop characters that cannot appear in an XML 1.0 document.
pub fn xml_safe(value: &str) -> Cow<'_, str> {
    if value.chars().all(is_xml_char) {
        Cow::Borrowed(value)
    } else {
        Cow::Owned(value.chars().filter(|c| is_xml_char(*c)).collect())
    }
}

fn write_element<W: Write>(writer: &mut Writer<W>, element: &XmlElement) -> ErnResult<()> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in &element.attributes {
        start.push_attribute((key.as_str(), xml_safe(value).as_ref()));
    }

    if element.text.is_none() && element.children.is_empty() {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }

    writer.write_event(Event::Start(start))?;
    if let Some(ref text) = element.text {
        writer.write_event(Event::Text(BytesText::new(&xml_safe(text))))?;
    }
    for child in &element.children {
        write_element(writer, child)?;
    }
    writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> XmlElement {
        XmlElement::new("Root")
            .attr("Version", "1")
            .child(
                XmlElement::new("Party")
                    .text_child("FullName", "Nox & Friends")
                    .opt_text_child("Role", None::<String>),
            )
            .text_child("Note", "a")
            .text_child("Note", "b")
    }

    #[test]
    fn test_optional_children_skipped() {
        let root = sample();
        let party = root.find("Party").unwrap();
        assert_eq!(party.children.len(), 1);
        assert!(party.find("Role").is_none());
    }

    #[test]
    fn test_queries() {
        let root = sample();
        assert_eq!(root.attribute("Version"), Some("1"));
        assert_eq!(root.path_text("Party/FullName"), Some("Nox & Friends"));
        let notes: Vec<_> = root.find_all("Note").filter_map(XmlElement::text).collect();
        assert_eq!(notes, vec!["a", "b"]);
        assert_eq!(root.descendants("FullName").len(), 1);
        assert_eq!(root.child_text("Note"), Some("a"));
    }

    #[test]
    fn test_serialization_escapes_and_indents() {
        let xml = to_xml_string(&sample()).unwrap();
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<Root Version=\"1\">"));
        assert!(xml.contains("\n  <Party>\n    <FullName>Nox &amp; Friends</FullName>\n  </Party>"));
        assert!(xml.contains("<Note>a</Note>"));
        assert!(xml.ends_with("</Root>\n"));
    }

    #[test]
    fn test_empty_element() {
        let xml = to_xml_string(&XmlElement::new("Empty").attr("Flag", "x")).unwrap();
        assert!(xml.contains("<Empty Flag=\"x\"/>"));
    }

    #[test]
    fn test_forbidden_characters_are_dropped() {
        let root = XmlElement::new("Title")
            .attr("Hint", "a\u{0}b")
            .text_child("TitleText", "Bad\u{1}Title\u{b}\u{c}\u{1f}\u{fffe}")
            .text_child("Keep", "tab\there\nline é ♪");
        let xml = to_xml_string(&root).unwrap();

        assert!(xml.contains("<TitleText>BadTitle</TitleText>"));
        assert!(xml.contains("Hint=\"ab\""));
        assert!(xml.contains("tab\there\nline é ♪"));
        assert!(xml.chars().all(is_xml_char));
    }

    #[test]
    fn test_xml_safe_borrows_clean_text() {
        assert!(matches!(xml_safe("Night Drive"), Cow::Borrowed(_)));
        assert_eq!(xml_safe("\u{7}ring"), "ring");
    }
}

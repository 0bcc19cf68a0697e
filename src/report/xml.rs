// Minimal XML element tree, rendered through quick-xml's indenting writer

use crate::error::{ReportError, Result};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::QName;
use std::borrow::Cow;
use std::io::Write;

const INDENT_WIDTH: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
    CData(String),
}

/// Owned XML element with ordered attributes
#[derive(Debug, Clone, PartialEq)]
pub struct XmlElement {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Set an attribute, replacing an existing value in place
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::Text(text.into()));
        self
    }

    pub fn cdata(mut self, text: impl Into<String>) -> Self {
        self.children.push(XmlNode::CData(text.into()));
        self
    }

    pub fn child(mut self, child: XmlElement) -> Self {
        self.push(child);
        self
    }

    pub fn push(&mut self, child: XmlElement) {
        self.children.push(XmlNode::Element(child));
    }

    /// Child elements, skipping text nodes
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            _ => None,
        })
    }

    pub fn find(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|el| el.name == name)
    }

    pub fn find_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.elements().filter(move |el| el.name == name)
    }

    /// Concatenated text and CDATA content of direct children
    pub fn text_content(&self) -> String {
        self.children
            .iter()
            .filter_map(|node| match node {
                XmlNode::Text(t) | XmlNode::CData(t) => Some(t.as_str()),
                XmlNode::Element(_) => None,
            })
            .collect()
    }

    /// Render as a standalone UTF-8 document with an XML declaration
    pub fn to_document_string(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT_WIDTH);
        writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
            .map_err(ReportError::serialize)?;
        self.write_to(&mut writer)?;

        let mut xml = String::from_utf8(writer.into_inner()).map_err(ReportError::serialize)?;
        xml.push('\n');
        Ok(xml)
    }

    fn write_to<W: Write>(&self, writer: &mut Writer<W>) -> Result<()> {
        let mut start = BytesStart::new(self.name.as_str());
        for (key, value) in &self.attributes {
            start.push_attribute(Attribute {
                key: QName(key.as_bytes()),
                value: Cow::Owned(escape_attribute(value).into_bytes()),
            });
        }

        if self.children.is_empty() {
            return writer
                .write_event(Event::Empty(start))
                .map_err(ReportError::serialize);
        }

        writer
            .write_event(Event::Start(start))
            .map_err(ReportError::serialize)?;
        for node in &self.children {
            match node {
                XmlNode::Element(el) => el.write_to(writer)?,
                XmlNode::Text(text) => writer
                    .write_event(Event::Text(BytesText::new(text)))
                    .map_err(ReportError::serialize)?,
                XmlNode::CData(text) => write_cdata(writer, text)?,
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.name.as_str())))
            .map_err(ReportError::serialize)
    }
}

/// Parsers normalize raw whitespace in attribute values to spaces, so line
/// breaks and tabs go out as character references
fn escape_attribute(value: &str) -> String {
    let escaped = escape(value);
    let mut out = String::with_capacity(escaped.len());
    for ch in escaped.chars() {
        match ch {
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            '\t' => out.push_str("&#9;"),
            _ => out.push(ch),
        }
    }
    out
}

/// CDATA cannot contain `]]>`, so the section is split around each occurrence
fn write_cdata<W: Write>(writer: &mut Writer<W>, text: &str) -> Result<()> {
    let parts: Vec<&str> = text.split("]]>").collect();
    let last = parts.len() - 1;
    for (i, part) in parts.iter().enumerate() {
        let mut chunk = String::with_capacity(part.len() + 3);
        if i > 0 {
            chunk.push('>');
        }
        chunk.push_str(part);
        if i < last {
            chunk.push_str("]]");
        }
        writer
            .write_event(Event::CData(BytesCData::new(chunk)))
            .map_err(ReportError::serialize)?;
    }
    Ok(())
}

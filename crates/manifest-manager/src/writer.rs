//! Manifest Writer
//!
//! Writes AndroidManifest.xml from the element tree.

use std::borrow::Cow;
use std::path::Path;
use quick_xml::{Writer, events::{Event, BytesStart, BytesEnd, BytesText, BytesCData, BytesDecl}};
use quick_xml::escape::escape;
use quick_xml::events::attributes::Attribute;
use quick_xml::name::QName;
use std::io::Cursor;
use tracing::info;

use crate::element::{Element, Node};
use crate::manifest::{ManifestDocument, XmlDeclaration};

/// Writer errors
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("XML write error: {0}")]
    XmlError(#[from] quick_xml::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Manifest writer
pub struct ManifestWriter {
    indent: usize,
}

impl ManifestWriter {
    /// Create a new writer with default settings
    pub fn new() -> Self {
        Self { indent: 4 }
    }

    /// Set indentation
    pub fn with_indent(mut self, spaces: usize) -> Self {
        self.indent = spaces;
        self
    }

    /// Write manifest to string
    pub fn write_to_string(&self, manifest: &ManifestDocument) -> Result<String, WriteError> {
        let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', self.indent);

        // XML declaration
        let default_decl = XmlDeclaration::default();
        let decl = manifest.declaration.as_ref().unwrap_or(&default_decl);
        writer.write_event(Event::Decl(BytesDecl::new(
            &decl.version,
            decl.encoding.as_deref(),
            decl.standalone.as_deref(),
        )))?;
        writer.write_event(Event::Text(BytesText::from_escaped("\n")))?;

        for node in &manifest.prolog {
            self.write_node(&mut writer, node)?;
        }

        self.write_element(&mut writer, &manifest.root)?;

        let mut result = String::from_utf8(writer.into_inner().into_inner())?;
        result.push('\n');
        Ok(result)
    }

    /// Write manifest to file
    pub async fn write_to_file(&self, manifest: &ManifestDocument, path: impl AsRef<Path>) -> Result<(), WriteError> {
        let content = self.write_to_string(manifest)?;
        tokio::fs::write(path.as_ref(), content).await?;
        info!("Wrote manifest to {:?}", path.as_ref());
        Ok(())
    }

    fn write_element<W: std::io::Write>(&self, writer: &mut Writer<W>, element: &Element) -> Result<(), WriteError> {
        let mut elem = BytesStart::new(element.name.as_str());
        for (key, value) in &element.attributes {
            elem.push_attribute(Attribute {
                key: QName(key.as_bytes()),
                value: Cow::Owned(escape_attribute(value).into_bytes()),
            });
        }

        if element.children.is_empty() {
            writer.write_event(Event::Empty(elem))?;
        } else {
            writer.write_event(Event::Start(elem))?;

            for child in &element.children {
                self.write_node(writer, child)?;
            }

            writer.write_event(Event::End(BytesEnd::new(element.name.as_str())))?;
        }

        Ok(())
    }

    fn write_node<W: std::io::Write>(&self, writer: &mut Writer<W>, node: &Node) -> Result<(), WriteError> {
        match node {
            Node::Element(element) => self.write_element(writer, element)?,
            Node::Text(text) => writer.write_event(Event::Text(BytesText::new(text)))?,
            Node::CData(text) => writer.write_event(Event::CData(BytesCData::new(text.as_str())))?,
            Node::Comment(text) => writer.write_event(Event::Comment(BytesText::from_escaped(text.as_str())))?,
            Node::DocType(text) => writer.write_event(Event::DocType(BytesText::from_escaped(text.as_str())))?,
            Node::ProcessingInstruction(text) => {
                writer.write_event(Event::PI(BytesText::from_escaped(text.as_str())))?
            }
        }
        Ok(())
    }
}

/// Escape an attribute value. Tab, CR and LF become character references,
/// otherwise a reader would normalize them to spaces.
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

impl Default for ManifestWriter {
    fn default() -> Self {
        Self::new()
    }
}

//! AndroidManifest.xml Parser
//!
//! Parses Android manifest files into an element tree.

use std::path::Path;
use quick_xml::Reader;
use quick_xml::events::{Event, BytesStart, BytesDecl};
use tracing::debug;

use crate::element::{Element, Node};
use crate::manifest::{tags, ManifestDocument, XmlDeclaration};

/// Parser errors
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("File not found: {0}")]
    FileNotFound(String),
    #[error("XML parsing error: {0}")]
    XmlError(#[from] quick_xml::Error),
    #[error("Malformed attribute: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),
    #[error("Invalid manifest structure: {0}")]
    InvalidStructure(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("UTF-8 error: {0}")]
    FromUtf8(#[from] std::string::FromUtf8Error),
}

/// Manifest parser
pub struct ManifestParser;

impl ManifestParser {
    /// Parse a manifest file from path
    pub async fn parse_file(path: impl AsRef<Path>) -> Result<ManifestDocument, ParseError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ParseError::FileNotFound(path.display().to_string()));
        }
        let content = tokio::fs::read_to_string(path).await?;
        debug!("Parsing manifest {:?} ({} bytes)", path, content.len());
        Self::parse_string(&content)
    }

    /// Parse manifest from string
    pub fn parse_string(xml: &str) -> Result<ManifestDocument, ParseError> {
        let mut reader = Reader::from_str(xml);

        let mut buf = Vec::new();
        let mut declaration = None;
        let mut prolog = Vec::new();
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Decl(ref e)) => {
                    declaration = Some(Self::parse_declaration(e)?);
                }
                Ok(Event::Start(ref e)) => {
                    open.push(Self::parse_element(e)?);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = Self::parse_element(e)?;
                    Self::close(&mut open, &mut root, element)?;
                }
                Ok(Event::End(_)) => {
                    let element = open.pop().ok_or_else(|| {
                        ParseError::InvalidStructure("closing tag without matching start".into())
                    })?;
                    Self::close(&mut open, &mut root, element)?;
                }
                Ok(Event::Text(ref e)) => {
                    // Whitespace-only runs are indentation; the writer regenerates it
                    let blank = e.iter().all(u8::is_ascii_whitespace);
                    match open.last_mut() {
                        Some(parent) if !blank => {
                            parent.children.push(Node::Text(e.unescape()?.into_owned()));
                        }
                        _ => {}
                    }
                }
                Ok(Event::CData(ref e)) => {
                    if let Some(parent) = open.last_mut() {
                        parent.children.push(Node::CData(String::from_utf8(e.to_vec())?));
                    }
                }
                Ok(Event::Comment(ref e)) => {
                    let node = Node::Comment(String::from_utf8(e.to_vec())?);
                    Self::push_misc(&mut open, &root, &mut prolog, node);
                }
                Ok(Event::DocType(ref e)) => {
                    let node = Node::DocType(String::from_utf8(e.to_vec())?);
                    Self::push_misc(&mut open, &root, &mut prolog, node);
                }
                Ok(Event::PI(ref e)) => {
                    let node = Node::ProcessingInstruction(String::from_utf8(e.to_vec())?);
                    Self::push_misc(&mut open, &root, &mut prolog, node);
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(ParseError::XmlError(e)),
            }
            buf.clear();
        }

        if let Some(unclosed) = open.last() {
            return Err(ParseError::InvalidStructure(format!("unclosed element <{}>", unclosed.name)));
        }

        let root = root.ok_or_else(|| ParseError::InvalidStructure("document has no root element".into()))?;
        if root.name != tags::MANIFEST {
            return Err(ParseError::InvalidStructure(format!(
                "root element is <{}>, expected <{}>",
                root.name,
                tags::MANIFEST
            )));
        }

        Ok(ManifestDocument {
            declaration,
            prolog,
            root,
        })
    }

    /// Attach a comment, doctype or processing instruction where it appeared
    fn push_misc(open: &mut [Element], root: &Option<Element>, prolog: &mut Vec<Node>, node: Node) {
        match open.last_mut() {
            Some(parent) => parent.children.push(node),
            None if root.is_none() => prolog.push(node),
            // Anything after the root element is dropped
            None => {}
        }
    }

    /// Attach a finished element to its parent, or make it the root
    fn close(open: &mut [Element], root: &mut Option<Element>, element: Element) -> Result<(), ParseError> {
        match open.last_mut() {
            Some(parent) => parent.children.push(Node::Element(element)),
            None if root.is_none() => *root = Some(element),
            None => {
                return Err(ParseError::InvalidStructure(format!(
                    "second root element <{}>",
                    element.name
                )))
            }
        }
        Ok(())
    }

    fn parse_element(e: &BytesStart) -> Result<Element, ParseError> {
        let mut element = Element::new(std::str::from_utf8(e.name().as_ref())?);
        for attr in e.attributes() {
            let attr = attr?;
            let key = std::str::from_utf8(attr.key.as_ref())?.to_string();
            let value = attr.unescape_value()?.into_owned();
            element.attributes.insert(key, value);
        }
        Ok(element)
    }

    fn parse_declaration(e: &BytesDecl) -> Result<XmlDeclaration, ParseError> {
        let version = String::from_utf8_lossy(&e.version()?).into_owned();
        let encoding = match e.encoding() {
            Some(encoding) => Some(String::from_utf8_lossy(&encoding?).into_owned()),
            None => None,
        };
        let standalone = match e.standalone() {
            Some(standalone) => Some(String::from_utf8_lossy(&standalone?).into_owned()),
            None => None,
        };
        Ok(XmlDeclaration {
            version,
            encoding,
            standalone,
        })
    }
}

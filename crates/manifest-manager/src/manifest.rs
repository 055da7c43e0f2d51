//! Android Manifest Document
//!
//! Wraps the parsed `<manifest>` element tree and exposes the parts the
//! prebuild reads and patches.

use serde::{Deserialize, Serialize};

use crate::components::Receiver;
use crate::element::{Element, Node};
use crate::permissions::Permission;

/// Android namespace URI
pub const ANDROID_NS: &str = "http://schemas.android.com/apk/res/android";

/// Tag names the prebuild cares about
pub mod tags {
    pub const MANIFEST: &str = "manifest";
    pub const USES_PERMISSION: &str = "uses-permission";
    pub const APPLICATION: &str = "application";
    pub const RECEIVER: &str = "receiver";
    pub const INTENT_FILTER: &str = "intent-filter";
    pub const ACTION: &str = "action";
    pub const CATEGORY: &str = "category";
}

/// `<?xml ...?>` declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XmlDeclaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

impl Default for XmlDeclaration {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            encoding: Some("utf-8".to_string()),
            standalone: None,
        }
    }
}

/// Complete AndroidManifest.xml document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDocument {
    /// XML declaration, if the source had one
    pub declaration: Option<XmlDeclaration>,

    /// Comments preceding the root element
    pub prolog: Vec<Node>,

    /// The `<manifest>` element
    pub root: Element,
}

impl ManifestDocument {
    /// Create a minimal manifest with an empty application block
    pub fn new(package: &str) -> Self {
        let root = Element::new(tags::MANIFEST)
            .with_attribute("xmlns:android", ANDROID_NS)
            .with_attribute("package", package)
            .with_child(Element::new(tags::APPLICATION));

        Self::from_root(root)
    }

    /// Wrap an existing `<manifest>` element
    pub fn from_root(root: Element) -> Self {
        Self {
            declaration: Some(XmlDeclaration::default()),
            prolog: Vec::new(),
            root,
        }
    }

    /// Package attribute of the root element
    pub fn package(&self) -> Option<&str> {
        self.root.attribute("package")
    }

    /// Top-level `<uses-permission>` elements in document order
    pub fn permissions(&self) -> impl Iterator<Item = &Element> {
        self.root.children_named(tags::USES_PERMISSION)
    }

    /// Declared permission identifiers in document order
    pub fn permission_names(&self) -> Vec<&str> {
        self.permissions()
            .filter_map(|p| p.android_attribute("name"))
            .collect()
    }

    /// Check if permission is declared
    pub fn has_permission(&self, name: &str) -> bool {
        self.permissions().any(|p| p.android_attribute("name") == Some(name))
    }

    /// Add a permission after the existing ones; returns false if already declared
    pub fn add_permission(&mut self, permission: &Permission) -> bool {
        if self.has_permission(&permission.name) {
            return false;
        }
        self.root
            .insert_grouped(permission.to_element(), Some(tags::APPLICATION));
        true
    }

    /// The `<application>` element
    pub fn application(&self) -> Option<&Element> {
        self.root.first_child(tags::APPLICATION)
    }

    /// Mutable access to the `<application>` element
    pub fn application_mut(&mut self) -> Option<&mut Element> {
        self.root.first_child_mut(tags::APPLICATION)
    }

    /// `<receiver>` elements of the application, in document order
    pub fn receivers(&self) -> impl Iterator<Item = &Element> + '_ {
        self.application()
            .into_iter()
            .flat_map(|app| app.children_named(tags::RECEIVER))
    }

    /// Check if a receiver with this exact `android:name` is declared
    pub fn has_receiver(&self, name: &str) -> bool {
        self.receivers().any(|r| r.android_attribute("name") == Some(name))
    }

    /// Read-only overview used for reporting
    pub fn summary(&self) -> ManifestSummary {
        ManifestSummary {
            package: self.package().map(str::to_string),
            permissions: self.permission_names().into_iter().map(str::to_string).collect(),
            receivers: self.receivers().map(Receiver::from_element).collect(),
        }
    }
}

/// Serializable overview of a manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ManifestSummary {
    pub package: Option<String>,
    pub permissions: Vec<String>,
    pub receivers: Vec<Receiver>,
}

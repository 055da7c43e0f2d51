//! MainApplication package registration
//!
//! Inserts a line after an anchor in the generated entry point unless a
//! marker shows it is already there.

use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::ModError;

/// `PackageList(this).packages.apply {` in the Expo-generated MainApplication.kt
static PACKAGE_LIST_ANCHOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"PackageList\(this\)\.packages\.apply \{").expect("Invalid package list regex")
});

/// Present once the storage package is registered
pub const NATIVE_STORAGE_MARKER: &str = "NativeStoragePackage";

/// Registration line, indented to match the generated `apply` block
pub const NATIVE_STORAGE_REGISTRATION: &str = "              add(NativeStoragePackage())";

/// Result of patching text in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextPatch {
    /// The marker is already present
    AlreadyPatched,
    /// The line was inserted; holds the new content
    Inserted(String),
    /// Neither marker nor anchor found
    AnchorMissing,
}

/// What happened to the file on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryPointOutcome {
    FileMissing,
    AlreadyPatched,
    Inserted,
    AnchorMissing,
}

/// Marker-guarded line insertion
#[derive(Debug, Clone)]
pub struct EntryPointPatch {
    marker: String,
    anchor: Regex,
    insertion: String,
}

impl EntryPointPatch {
    /// Patch with a regex anchor
    pub fn new(marker: impl Into<String>, anchor: Regex, insertion: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            anchor,
            insertion: insertion.into(),
        }
    }

    /// Patch anchored on literal text
    pub fn literal(marker: impl Into<String>, anchor: &str, insertion: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self::new(marker, Regex::new(&regex::escape(anchor))?, insertion))
    }

    /// Register `NativeStoragePackage()` in the React package list
    pub fn native_storage_package() -> Self {
        Self::new(
            NATIVE_STORAGE_MARKER,
            PACKAGE_LIST_ANCHOR.clone(),
            NATIVE_STORAGE_REGISTRATION,
        )
    }

    /// Apply to text. Only the first anchor match is used.
    pub fn patch_str(&self, content: &str) -> TextPatch {
        if content.contains(&self.marker) {
            return TextPatch::AlreadyPatched;
        }

        let Some(found) = self.anchor.find(content) else {
            return TextPatch::AnchorMissing;
        };

        let mut patched = String::with_capacity(content.len() + self.insertion.len() + 1);
        patched.push_str(&content[..found.end()]);
        patched.push('\n');
        patched.push_str(&self.insertion);
        patched.push_str(&content[found.end()..]);
        TextPatch::Inserted(patched)
    }

    /// Apply to a file. A missing file is a no-op.
    pub async fn apply(&self, path: impl AsRef<Path>) -> Result<EntryPointOutcome, ModError> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("{:?} does not exist, skipping", path);
            return Ok(EntryPointOutcome::FileMissing);
        }

        let content = tokio::fs::read_to_string(path).await?;
        match self.patch_str(&content) {
            TextPatch::AlreadyPatched => {
                debug!("{:?} already contains {}", path, self.marker);
                Ok(EntryPointOutcome::AlreadyPatched)
            }
            TextPatch::Inserted(patched) => {
                tokio::fs::write(path, patched).await?;
                info!("Registered {} in {:?}", self.marker, path);
                Ok(EntryPointOutcome::Inserted)
            }
            TextPatch::AnchorMissing => {
                tokio::fs::write(path, &content).await?;
                warn!(
                    "Anchor /{}/ not found in {:?}; {} was not registered",
                    self.anchor.as_str(),
                    path,
                    self.marker
                );
                Ok(EntryPointOutcome::AnchorMissing)
            }
        }
    }
}

impl Default for EntryPointPatch {
    fn default() -> Self {
        Self::native_storage_package()
    }
}

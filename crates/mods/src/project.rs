//! Project handle passed through the prebuild steps

use std::path::PathBuf;
use tracing::debug;

use junggae_core::AndroidLayout;
use junggae_manifest_manager::{ManifestDocument, ManifestParser, ManifestWriter};

use crate::ModError;

/// The generated Android project being patched
#[derive(Debug, Clone)]
pub struct ProjectConfig {
    /// Paths inside the platform project root
    pub layout: AndroidLayout,

    /// Parsed AndroidManifest.xml, mutated in memory by the manifest step
    pub manifest: ManifestDocument,
}

impl ProjectConfig {
    /// Wrap an already-parsed manifest
    pub fn new(layout: AndroidLayout, manifest: ManifestDocument) -> Self {
        Self { layout, manifest }
    }

    /// Load the manifest from the layout's manifest path
    pub async fn load(layout: AndroidLayout) -> Result<Self, ModError> {
        let manifest_path = layout.manifest_path();
        debug!("Loading project manifest {:?}", manifest_path);
        let manifest = ManifestParser::parse_file(&manifest_path).await?;
        Ok(Self::new(layout, manifest))
    }

    /// Serialize the manifest back to disk
    pub async fn save_manifest(&self, writer: &ManifestWriter) -> Result<PathBuf, ModError> {
        let manifest_path = self.layout.manifest_path();
        writer.write_to_file(&self.manifest, &manifest_path).await?;
        Ok(manifest_path)
    }
}

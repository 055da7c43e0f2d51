//! Android project layout
//! 
//! Resolves the generated files the prebuild touches inside the
//! platform project root.

use std::path::{Path, PathBuf};

use crate::error::{PrebuildError, Result};

/// Application id of the generated Android app
pub const APP_PACKAGE: &str = "com.junominu.junggaenote";

/// Entry-point file name inside the Java package directory
pub const MAIN_APPLICATION_FILE: &str = "MainApplication.kt";

/// Paths inside a generated Android project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidLayout {
    root: PathBuf,
}

impl AndroidLayout {
    /// Create a layout rooted at the platform project root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Create a layout, requiring the root directory to exist
    pub fn existing(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(PrebuildError::ProjectNotFound(root));
        }
        Ok(Self::new(root))
    }

    /// Platform project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `app/src/main`
    pub fn main_source_set(&self) -> PathBuf {
        self.root.join("app").join("src").join("main")
    }

    /// Get the manifest file path
    pub fn manifest_path(&self) -> PathBuf {
        self.main_source_set().join("AndroidManifest.xml")
    }

    /// Directory holding the app's Java/Kotlin sources
    pub fn java_package_dir(&self) -> PathBuf {
        APP_PACKAGE
            .split('.')
            .fold(self.main_source_set().join("java"), |dir, segment| dir.join(segment))
    }

    /// Generated application entry point
    pub fn main_application_path(&self) -> PathBuf {
        self.java_package_dir().join(MAIN_APPLICATION_FILE)
    }
}

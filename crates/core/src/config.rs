//! Prebuild Configuration
//! 
//! Optional `prebuild.toml` settings:
//! - location of the generated Android project
//! - how strictly the entry-point patch treats a missing anchor
//! - indentation of the rewritten manifest
//! - default log level

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{PrebuildError, Result};

/// Default configuration file name, looked up next to the app project
pub const CONFIG_FILE_NAME: &str = "prebuild.toml";

/// Prebuild configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrebuildConfig {
    /// Platform project root, relative to the app project directory
    pub platform_project_root: PathBuf,
    /// Fail instead of warning when the entry-point anchor is absent
    pub strict_entry_point: bool,
    /// Indentation width of the rewritten AndroidManifest.xml
    pub manifest_indent: usize,
    /// Log level used when RUST_LOG is not set
    pub log_level: String,
}

impl Default for PrebuildConfig {
    fn default() -> Self {
        Self {
            platform_project_root: PathBuf::from("android"),
            strict_entry_point: false,
            manifest_indent: 4,
            log_level: "info".to_string(),
        }
    }
}

impl PrebuildConfig {
    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: PrebuildConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file, falling back to defaults when it does not exist
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if path.exists() {
            debug!("Loading config from {:?}", path);
            let contents = tokio::fs::read_to_string(path).await?;
            Self::from_toml(&contents)
        } else {
            info!("Config file {:?} not found, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Resolve the platform project root against the app project directory
    pub fn platform_root(&self, project_dir: impl AsRef<Path>) -> PathBuf {
        if self.platform_project_root.is_absolute() {
            self.platform_project_root.clone()
        } else {
            project_dir.as_ref().join(&self.platform_project_root)
        }
    }

    fn validate(&self) -> Result<()> {
        if self.platform_project_root.as_os_str().is_empty() {
            return Err(PrebuildError::Config("platform_project_root must not be empty".into()));
        }
        if self.manifest_indent > 8 {
            return Err(PrebuildError::Config(format!(
                "manifest_indent must be at most 8, got {}",
                self.manifest_indent
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PrebuildConfig::default();
        assert_eq!(config.platform_project_root, PathBuf::from("android"));
        assert!(!config.strict_entry_point);
        assert_eq!(config.manifest_indent, 4);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = PrebuildConfig::from_toml("strict_entry_point = true\n").unwrap();
        assert!(config.strict_entry_point);
        assert_eq!(config.platform_project_root, PathBuf::from("android"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = PrebuildConfig::from_toml("strict = true\n").unwrap_err();
        assert!(matches!(err, PrebuildError::TomlParse(_)));
    }

    #[test]
    fn test_empty_root_rejected() {
        let err = PrebuildConfig::from_toml("platform_project_root = \"\"\n").unwrap_err();
        assert!(matches!(err, PrebuildError::Config(_)));
    }

    #[test]
    fn test_oversized_indent_rejected() {
        let err = PrebuildConfig::from_toml("manifest_indent = 40\n").unwrap_err();
        assert!(matches!(err, PrebuildError::Config(_)));
    }

    #[test]
    fn test_platform_root_resolution() {
        let config = PrebuildConfig::default();
        assert_eq!(
            config.platform_root("/work/app"),
            PathBuf::from("/work/app/android")
        );
    }

    #[tokio::test]
    async fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = PrebuildConfig::load(dir.path().join(CONFIG_FILE_NAME)).await.unwrap();
        assert_eq!(config, PrebuildConfig::default());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        tokio::fs::write(&path, "platform_project_root = \"native/android\"\nlog_level = \"debug\"\n")
            .await
            .unwrap();

        let config = PrebuildConfig::load(&path).await.unwrap();
        assert_eq!(config.platform_project_root, PathBuf::from("native/android"));
        assert_eq!(config.log_level, "debug");
    }
}

//! Error types for the Junggae prebuild
//! 
//! Centralized error handling using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for the shared prebuild layer
#[derive(Error, Debug)]
pub enum PrebuildError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Android project not found at {0}")]
    ProjectNotFound(PathBuf),
}

/// Result type alias for prebuild operations
pub type Result<T> = std::result::Result<T, PrebuildError>;

impl PrebuildError {
    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            PrebuildError::Io(e) => format!("File operation failed: {}", e),
            PrebuildError::Config(msg) => format!("Configuration error: {}", msg),
            PrebuildError::ProjectNotFound(path) => format!(
                "No Android project at {}. Run the Expo prebuild first so the android/ directory exists.",
                path.display()
            ),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_for_missing_project() {
        let err = PrebuildError::ProjectNotFound(PathBuf::from("/tmp/app/android"));
        let msg = err.user_message();
        assert!(msg.contains("/tmp/app/android"));
        assert!(msg.contains("prebuild"));
    }
}

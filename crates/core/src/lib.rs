//! Junggae prebuild core - shared types
//! 
//! Error type, `prebuild.toml` configuration and the layout of the
//! generated Android project.

pub mod config;
pub mod error;
pub mod project;

pub use config::{PrebuildConfig, CONFIG_FILE_NAME};
pub use error::{PrebuildError, Result};
pub use project::{AndroidLayout, APP_PACKAGE, MAIN_APPLICATION_FILE};

/// Prebuild version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Tool name used in log output
pub const APP_NAME: &str = "junggae-prebuild";

//! Junggae prebuild mods
//!
//! The three steps applied to a generated Android project, in order:
//! manifest patch, Java source injection, MainApplication registration.

pub mod payloads;
pub mod source_writer;
pub mod entry_point;
pub mod project;
pub mod runner;

pub use payloads::{SourcePayload, JAVA_SOURCES};
pub use source_writer::SourceWriter;
pub use entry_point::{EntryPointOutcome, EntryPointPatch, TextPatch};
pub use project::ProjectConfig;
pub use runner::{
    EntryPointStep, JavaSourcesStep, ManifestStep, PrebuildReport, PrebuildRunner, PrebuildStep,
    StepOutcome, StepRecord,
};

use std::path::PathBuf;

use junggae_core::PrebuildError;
use junggae_manifest_manager::{ParseError, PatchError, WriteError};

/// Prebuild step errors
#[derive(Debug, thiserror::Error)]
pub enum ModError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Manifest parse error: {0}")]
    Parse(#[from] ParseError),
    #[error("Manifest write error: {0}")]
    Write(#[from] WriteError),
    #[error("Manifest patch error: {0}")]
    Patch(#[from] PatchError),
    #[error(transparent)]
    Core(#[from] PrebuildError),
    #[error("Entry-point anchor not found in {0}")]
    AnchorNotFound(PathBuf),
}

//! Junggae prebuild
//! 
//! Patches the Android project generated for Junggae Note so incoming
//! calls can be matched against saved clients.
//! 
//! ## Steps
//! 
//! 1. **Manifest**: add the phone, notification and wake-lock permissions and
//!    register `.CallReceiver` for `android.intent.action.PHONE_STATE`
//! 2. **Java sources**: write the receiver, notification helper and native
//!    storage bridge into the app package
//! 3. **Entry point**: register `NativeStoragePackage()` in `MainApplication.kt`
//! 
//! Every step is idempotent; running the prebuild again changes nothing.
//! 
//! ## Architecture
//! 
//! - `junggae-core`: configuration, errors and project layout
//! - `junggae-manifest-manager`: AndroidManifest.xml parsing, writing and patching
//! - `junggae-mods`: the prebuild steps and their runner

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod commands;

// Re-export main components for library usage
pub use junggae_core as core;
pub use junggae_manifest_manager as manifest;
pub use junggae_mods as mods;

/// Prelude module for convenient imports
pub mod prelude {
    pub use junggae_core::{AndroidLayout, PrebuildConfig};
    pub use junggae_manifest_manager::{ManifestDocument, ManifestParser, ManifestPatch, ManifestWriter};
    pub use junggae_mods::{EntryPointPatch, PrebuildRunner, ProjectConfig, SourceWriter};
}

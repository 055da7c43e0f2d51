//! Idempotent manifest patching
//!
//! Ensures a fixed set of permissions and receivers is declared, adding
//! only what is missing. Existing declarations are never modified or
//! reordered, so applying the same patch again is a no-op.

use serde::Serialize;
use tracing::{debug, info};

use crate::call_receiver;
use crate::components::Receiver;
use crate::manifest::{tags, ManifestDocument};
use crate::permissions::Permission;

/// Patch errors
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("Manifest has no <application> element")]
    MissingApplication,
}

/// Declarations a manifest must contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestPatch {
    /// Required permission identifiers, appended in this order when missing
    pub permissions: Vec<String>,

    /// Required receivers, matched by exact `android:name`
    pub receivers: Vec<Receiver>,
}

/// What a patch run added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchReport {
    pub added_permissions: Vec<String>,
    pub added_receivers: Vec<String>,
}

impl PatchReport {
    /// True when the manifest already satisfied the patch
    pub fn is_noop(&self) -> bool {
        self.added_permissions.is_empty() && self.added_receivers.is_empty()
    }
}

impl ManifestPatch {
    /// Phone-state receiver plus its notification permissions
    pub fn call_receiver() -> Self {
        Self {
            permissions: call_receiver::PERMISSIONS.iter().map(|p| p.to_string()).collect(),
            receivers: vec![Receiver::call_receiver()],
        }
    }

    /// Apply the patch in place
    pub fn apply(&self, manifest: &mut ManifestDocument) -> Result<PatchReport, PatchError> {
        if manifest.application().is_none() {
            return Err(PatchError::MissingApplication);
        }

        let mut report = PatchReport::default();

        for name in &self.permissions {
            if manifest.add_permission(&Permission::new(name)) {
                debug!("Added permission {}", name);
                report.added_permissions.push(name.clone());
            }
        }

        for receiver in &self.receivers {
            if manifest.has_receiver(&receiver.name) {
                debug!("Receiver {} already declared", receiver.name);
                continue;
            }
            let app = manifest.application_mut().ok_or(PatchError::MissingApplication)?;
            app.insert_grouped(receiver.to_element(), None);
            debug!("Added receiver {}", receiver.name);
            report.added_receivers.push(receiver.name.clone());
        }

        if report.is_noop() {
            info!("Manifest already patched");
        } else {
            info!(
                "Patched manifest: {} permission(s), {} {}(s) added",
                report.added_permissions.len(),
                report.added_receivers.len(),
                tags::RECEIVER
            );
        }

        Ok(report)
    }
}

impl Default for ManifestPatch {
    fn default() -> Self {
        Self::call_receiver()
    }
}

//! Prebuild Runner
//!
//! Applies the registered steps to a project one after another and
//! persists the manifest afterwards.

use std::path::PathBuf;
use futures::future::BoxFuture;
use serde::Serialize;
use tracing::{info, debug};

use junggae_core::{AndroidLayout, PrebuildConfig};
use junggae_manifest_manager::{ManifestPatch, ManifestWriter, PatchReport};

use crate::{
    ModError, ProjectConfig, SourceWriter,
    entry_point::{EntryPointOutcome, EntryPointPatch},
    payloads::{SourcePayload, JAVA_SOURCES},
};

/// What a single step did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepOutcome {
    Manifest { report: PatchReport },
    SourcesWritten { files: Vec<PathBuf> },
    EntryPoint { outcome: EntryPointOutcome },
}

/// Outcome tagged with the step that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepRecord {
    pub step: &'static str,
    pub outcome: StepOutcome,
}

/// Prebuild output
#[derive(Debug, Clone, Serialize)]
pub struct PrebuildReport {
    /// Platform project root that was patched
    pub platform_root: PathBuf,
    /// Manifest written back after the steps ran
    pub manifest_path: PathBuf,
    /// Step outcomes in execution order
    pub steps: Vec<StepRecord>,
    /// Duration in seconds
    pub duration_secs: f64,
}

impl PrebuildReport {
    /// True when no step changed anything
    pub fn is_noop(&self) -> bool {
        self.steps.iter().all(|record| match &record.outcome {
            StepOutcome::Manifest { report } => report.is_noop(),
            // Sources are rewritten on every run
            StepOutcome::SourcesWritten { .. } => true,
            StepOutcome::EntryPoint { outcome } => *outcome != EntryPointOutcome::Inserted,
        })
    }
}

/// One mutation of the project
pub trait PrebuildStep: Send + Sync {
    /// Name used in logs and reports
    fn name(&self) -> &'static str;

    /// Apply the step, mutating the project in place
    fn apply<'a>(&'a self, project: &'a mut ProjectConfig) -> BoxFuture<'a, Result<StepOutcome, ModError>>;
}

/// Ensures permissions and receivers in the in-memory manifest
pub struct ManifestStep {
    patch: ManifestPatch,
}

impl ManifestStep {
    pub fn new(patch: ManifestPatch) -> Self {
        Self { patch }
    }
}

impl PrebuildStep for ManifestStep {
    fn name(&self) -> &'static str {
        "manifest"
    }

    fn apply<'a>(&'a self, project: &'a mut ProjectConfig) -> BoxFuture<'a, Result<StepOutcome, ModError>> {
        Box::pin(async move {
            let report = self.patch.apply(&mut project.manifest)?;
            Ok(StepOutcome::Manifest { report })
        })
    }
}

/// Writes the Java sources into the app package directory
pub struct JavaSourcesStep {
    payloads: Vec<SourcePayload>,
}

impl JavaSourcesStep {
    pub fn new(payloads: Vec<SourcePayload>) -> Self {
        Self { payloads }
    }
}

impl PrebuildStep for JavaSourcesStep {
    fn name(&self) -> &'static str {
        "java-sources"
    }

    fn apply<'a>(&'a self, project: &'a mut ProjectConfig) -> BoxFuture<'a, Result<StepOutcome, ModError>> {
        Box::pin(async move {
            let writer = SourceWriter::new(project.layout.java_package_dir());
            let files = writer.write_all(&self.payloads).await?;
            Ok(StepOutcome::SourcesWritten { files })
        })
    }
}

/// Registers the native package in MainApplication.kt
pub struct EntryPointStep {
    patch: EntryPointPatch,
    strict: bool,
}

impl EntryPointStep {
    pub fn new(patch: EntryPointPatch) -> Self {
        Self { patch, strict: false }
    }

    /// Treat a missing anchor as an error
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

impl PrebuildStep for EntryPointStep {
    fn name(&self) -> &'static str {
        "entry-point"
    }

    fn apply<'a>(&'a self, project: &'a mut ProjectConfig) -> BoxFuture<'a, Result<StepOutcome, ModError>> {
        Box::pin(async move {
            let path = project.layout.main_application_path();
            let outcome = self.patch.apply(&path).await?;
            if self.strict && outcome == EntryPointOutcome::AnchorMissing {
                return Err(ModError::AnchorNotFound(path));
            }
            Ok(StepOutcome::EntryPoint { outcome })
        })
    }
}

/// Runner that applies steps in registration order
pub struct PrebuildRunner {
    steps: Vec<Box<dyn PrebuildStep>>,
    writer: ManifestWriter,
}

impl PrebuildRunner {
    /// Create a runner with no steps
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            writer: ManifestWriter::new(),
        }
    }

    /// The call receiver prebuild: manifest, Java sources, entry point
    pub fn call_receiver(config: &PrebuildConfig) -> Self {
        Self::new()
            .with_writer(ManifestWriter::new().with_indent(config.manifest_indent))
            .with_step(ManifestStep::new(ManifestPatch::call_receiver()))
            .with_step(JavaSourcesStep::new(JAVA_SOURCES.to_vec()))
            .with_step(
                EntryPointStep::new(EntryPointPatch::native_storage_package())
                    .strict(config.strict_entry_point),
            )
    }

    /// Append a step
    pub fn with_step(mut self, step: impl PrebuildStep + 'static) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    /// Set the manifest writer
    pub fn with_writer(mut self, writer: ManifestWriter) -> Self {
        self.writer = writer;
        self
    }

    /// Registered step names, in order
    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|step| step.name()).collect()
    }

    /// Apply every step to an already-loaded project
    pub async fn apply(&self, project: &mut ProjectConfig) -> Result<Vec<StepRecord>, ModError> {
        let mut records = Vec::with_capacity(self.steps.len());
        for step in &self.steps {
            debug!("Running step {}", step.name());
            let outcome = step.apply(project).await?;
            records.push(StepRecord {
                step: step.name(),
                outcome,
            });
        }
        Ok(records)
    }

    /// Load the project, apply all steps and write the manifest back
    pub async fn run(&self, platform_root: impl Into<PathBuf>) -> Result<PrebuildReport, ModError> {
        let start = std::time::Instant::now();
        let layout = AndroidLayout::existing(platform_root)?;

        info!("Starting prebuild for {:?}", layout.root());

        let mut project = ProjectConfig::load(layout).await?;
        let steps = self.apply(&mut project).await?;
        let manifest_path = project.save_manifest(&self.writer).await?;

        let report = PrebuildReport {
            platform_root: project.layout.root().to_path_buf(),
            manifest_path,
            steps,
            duration_secs: start.elapsed().as_secs_f64(),
        };

        info!(
            "Prebuild finished in {:.2}s ({} step(s){})",
            report.duration_secs,
            report.steps.len(),
            if report.is_noop() { ", nothing changed" } else { "" }
        );

        Ok(report)
    }
}

impl Default for PrebuildRunner {
    fn default() -> Self {
        Self::call_receiver(&PrebuildConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use junggae_manifest_manager::{call_receiver, ManifestParser, PatchError};

    const MANIFEST: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<manifest xmlns:android="http://schemas.android.com/apk/res/android">
    <application android:name=".MainApplication" android:label="@string/app_name">
        <activity android:name=".MainActivity" android:exported="true"/>
    </application>
</manifest>
"#;

    const MAIN_APPLICATION: &str = "class MainApplication {\n  override fun getPackages(): List<ReactPackage> =\n            PackageList(this).packages.apply {\n            }\n}\n";

    async fn scaffold(manifest: &str, main_application: Option<&str>) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let layout = AndroidLayout::new(dir.path());
        tokio::fs::create_dir_all(layout.main_source_set()).await.unwrap();
        tokio::fs::write(layout.manifest_path(), manifest).await.unwrap();
        if let Some(contents) = main_application {
            tokio::fs::create_dir_all(layout.java_package_dir()).await.unwrap();
            tokio::fs::write(layout.main_application_path(), contents).await.unwrap();
        }
        dir
    }

    async fn read(path: impl AsRef<Path>) -> String {
        tokio::fs::read_to_string(path).await.unwrap()
    }

    #[test]
    fn test_step_order() {
        let runner = PrebuildRunner::default();
        assert_eq!(runner.step_names(), vec!["manifest", "java-sources", "entry-point"]);
    }

    #[tokio::test]
    async fn test_end_to_end() {
        let dir = scaffold(MANIFEST, Some(MAIN_APPLICATION)).await;
        let layout = AndroidLayout::new(dir.path());
        let runner = PrebuildRunner::default();

        let report = runner.run(dir.path()).await.unwrap();
        assert!(!report.is_noop());
        assert_eq!(report.steps.len(), 3);

        let manifest = ManifestParser::parse_file(layout.manifest_path()).await.unwrap();
        assert_eq!(manifest.permission_names(), call_receiver::PERMISSIONS.to_vec());
        assert_eq!(manifest.receivers().count(), 1);
        assert!(manifest.application().unwrap().first_child("activity").is_some());

        for payload in JAVA_SOURCES {
            let contents = read(layout.java_package_dir().join(payload.file_name)).await;
            assert_eq!(contents, payload.contents);
        }

        let main_application = read(layout.main_application_path()).await;
        assert!(main_application.contains("packages.apply {\n              add(NativeStoragePackage())\n"));
    }

    #[tokio::test]
    async fn test_second_run_changes_nothing() {
        let dir = scaffold(MANIFEST, Some(MAIN_APPLICATION)).await;
        let layout = AndroidLayout::new(dir.path());
        let runner = PrebuildRunner::default();

        runner.run(dir.path()).await.unwrap();
        let manifest_once = read(layout.manifest_path()).await;
        let main_once = read(layout.main_application_path()).await;

        let report = runner.run(dir.path()).await.unwrap();
        assert!(report.is_noop());
        assert_eq!(
            report.steps[2].outcome,
            StepOutcome::EntryPoint { outcome: EntryPointOutcome::AlreadyPatched }
        );
        assert_eq!(read(layout.manifest_path()).await, manifest_once);
        assert_eq!(read(layout.main_application_path()).await, main_once);
    }

    #[tokio::test]
    async fn test_manifest_written_with_configured_indent() {
        let dir = scaffold(MANIFEST, None).await;
        let layout = AndroidLayout::new(dir.path());
        let config = PrebuildConfig {
            manifest_indent: 2,
            ..Default::default()
        };

        PrebuildRunner::call_receiver(&config).run(dir.path()).await.unwrap();

        let written = read(layout.manifest_path()).await;
        assert!(written.contains("\n  <uses-permission android:name=\"android.permission.READ_PHONE_STATE\"/>"));
        assert!(written.contains("\n    <receiver android:name=\".CallReceiver\""));
    }

    #[tokio::test]
    async fn test_missing_entry_point_is_skipped() {
        let dir = scaffold(MANIFEST, None).await;
        let layout = AndroidLayout::new(dir.path());

        let report = PrebuildRunner::default().run(dir.path()).await.unwrap();

        assert_eq!(
            report.steps[2].outcome,
            StepOutcome::EntryPoint { outcome: EntryPointOutcome::FileMissing }
        );
        assert!(!layout.main_application_path().exists());
        assert!(layout.java_package_dir().join("CallReceiver.java").exists());
    }

    #[tokio::test]
    async fn test_strict_mode_fails_on_missing_anchor() {
        let dir = scaffold(MANIFEST, Some("class MainApplication\n")).await;
        let config = PrebuildConfig {
            strict_entry_point: true,
            ..Default::default()
        };

        let err = PrebuildRunner::call_receiver(&config).run(dir.path()).await.unwrap_err();
        assert!(matches!(err, ModError::AnchorNotFound(_)));
    }

    #[tokio::test]
    async fn test_lenient_mode_reports_missing_anchor() {
        let dir = scaffold(MANIFEST, Some("class MainApplication\n")).await;

        let report = PrebuildRunner::default().run(dir.path()).await.unwrap();
        assert_eq!(
            report.steps[2].outcome,
            StepOutcome::EntryPoint { outcome: EntryPointOutcome::AnchorMissing }
        );
    }

    #[tokio::test]
    async fn test_missing_application_aborts_before_writing_sources() {
        let dir = scaffold(
            r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"/>"#,
            None,
        )
        .await;
        let layout = AndroidLayout::new(dir.path());

        let err = PrebuildRunner::default().run(dir.path()).await.unwrap_err();

        assert!(matches!(err, ModError::Patch(PatchError::MissingApplication)));
        assert!(!layout.java_package_dir().exists());
    }

    #[tokio::test]
    async fn test_missing_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let err = PrebuildRunner::default().run(dir.path().join("android")).await.unwrap_err();
        assert!(matches!(err, ModError::Core(_)));
    }

    #[tokio::test]
    async fn test_apply_in_memory() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AndroidLayout::new(dir.path());
        let manifest = ManifestParser::parse_string(MANIFEST).unwrap();
        let mut project = ProjectConfig::new(layout, manifest);

        let runner = PrebuildRunner::new().with_step(ManifestStep::new(ManifestPatch::call_receiver()));
        let records = runner.apply(&mut project).await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].step, "manifest");
        assert!(project.manifest.has_receiver(".CallReceiver"));
        assert!(!project.layout.manifest_path().exists());
    }
}

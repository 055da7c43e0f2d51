//! CLI commands for the Junggae prebuild
//! 
//! Argument parsing and the command implementations behind the binary.

use std::path::PathBuf;
use anyhow::{bail, Context, Result};
use tracing::info;

use junggae_core::{AndroidLayout, PrebuildConfig, PrebuildError, CONFIG_FILE_NAME};
use junggae_manifest_manager::{ManifestParser, ManifestSummary};
use junggae_mods::{ModError, PrebuildReport, PrebuildRunner};

/// Subcommand selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Patch the Android project
    Prebuild,
    /// Print the manifest's permissions and receivers
    Inspect,
    /// Print usage
    Help,
}

/// Parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// Selected command
    pub command: CommandKind,
    /// App project directory (contains prebuild.toml and android/)
    pub project_dir: PathBuf,
    /// Explicit config file, otherwise `<project_dir>/prebuild.toml`
    pub config_path: Option<PathBuf>,
    /// Print the report as JSON
    pub json: bool,
}

/// Help text
pub const USAGE: &str = "\
Usage: junggae-prebuild [prebuild|inspect] [options]

Options:
  -p, --project <dir>   App project directory (default: .)
  -c, --config <file>   Config file (default: <project>/prebuild.toml)
      --json            Print the report as JSON
  -h, --help            Show this help";

impl CliArgs {
    /// Parse arguments, excluding the program name
    pub fn parse_from<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut command = None;
        let mut project_dir = PathBuf::from(".");
        let mut config_path = None;
        let mut json = false;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "prebuild" | "inspect" if command.is_none() => {
                    command = Some(if arg == "prebuild" {
                        CommandKind::Prebuild
                    } else {
                        CommandKind::Inspect
                    });
                }
                "-p" | "--project" => {
                    let value = args.next().with_context(|| format!("{} needs a directory", arg))?;
                    project_dir = PathBuf::from(value);
                }
                "-c" | "--config" => {
                    let value = args.next().with_context(|| format!("{} needs a file", arg))?;
                    config_path = Some(PathBuf::from(value));
                }
                "--json" => json = true,
                "-h" | "--help" => command = Some(CommandKind::Help),
                other => bail!("Unexpected argument: {}\n\n{}", other, USAGE),
            }
        }

        Ok(Self {
            command: command.unwrap_or(CommandKind::Prebuild),
            project_dir,
            config_path,
            json,
        })
    }

    /// Config file to load
    pub fn config_file(&self) -> PathBuf {
        self.config_path
            .clone()
            .unwrap_or_else(|| self.project_dir.join(CONFIG_FILE_NAME))
    }
}

/// Message shown on stderr when a command fails
pub fn error_message(err: &anyhow::Error) -> String {
    let core = err
        .downcast_ref::<PrebuildError>()
        .or_else(|| match err.downcast_ref::<ModError>() {
            Some(ModError::Core(inner)) => Some(inner),
            _ => None,
        });

    match core {
        Some(core) => core.user_message(),
        None => format!("{:#}", err),
    }
}

/// Prebuild command options
pub struct PrebuildCommand {
    pub project_dir: PathBuf,
    pub config: PrebuildConfig,
    pub json: bool,
}

impl PrebuildCommand {
    /// Execute the prebuild command
    pub async fn execute(&self) -> Result<PrebuildReport> {
        let platform_root = self.config.platform_root(&self.project_dir);
        info!("Patching Android project: {:?}", platform_root);

        let runner = PrebuildRunner::call_receiver(&self.config);
        let report = runner
            .run(&platform_root)
            .await
            .with_context(|| format!("Prebuild failed for {}", platform_root.display()))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            for record in &report.steps {
                println!("  {:<12} {}", record.step, serde_json::to_string(&record.outcome)?);
            }
            println!("Manifest: {}", report.manifest_path.display());
        }

        Ok(report)
    }
}

/// Inspect command options
pub struct InspectCommand {
    pub project_dir: PathBuf,
    pub config: PrebuildConfig,
    pub json: bool,
}

impl InspectCommand {
    /// Read the manifest and print what it declares
    pub async fn execute(&self) -> Result<ManifestSummary> {
        let layout = AndroidLayout::existing(self.config.platform_root(&self.project_dir))?;
        let manifest_path = layout.manifest_path();
        let manifest = ManifestParser::parse_file(&manifest_path)
            .await
            .with_context(|| format!("Cannot read {}", manifest_path.display()))?;

        let summary = manifest.summary();
        if self.json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
        } else {
            println!("Package: {}", summary.package.as_deref().unwrap_or("?"));
            println!("Permissions:");
            for permission in &summary.permissions {
                println!("  {}", permission);
            }
            println!("Receivers:");
            for receiver in &summary.receivers {
                println!(
                    "  {} (enabled: {:?}, exported: {:?})",
                    receiver.name, receiver.enabled, receiver.exported
                );
            }
        }

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = CliArgs::parse_from(Vec::<String>::new()).unwrap();
        assert_eq!(args.command, CommandKind::Prebuild);
        assert_eq!(args.project_dir, PathBuf::from("."));
        assert_eq!(args.config_file(), PathBuf::from("./prebuild.toml"));
        assert!(!args.json);
    }

    #[test]
    fn test_inspect_with_options() {
        let args = CliArgs::parse_from(["inspect", "--project", "expo-app", "-c", "ci.toml", "--json"]).unwrap();
        assert_eq!(args.command, CommandKind::Inspect);
        assert_eq!(args.project_dir, PathBuf::from("expo-app"));
        assert_eq!(args.config_file(), PathBuf::from("ci.toml"));
        assert!(args.json);
    }

    #[test]
    fn test_missing_option_value() {
        assert!(CliArgs::parse_from(["--project"]).is_err());
    }

    #[test]
    fn test_unknown_argument() {
        let err = CliArgs::parse_from(["prebuild", "--force"]).unwrap_err();
        assert!(err.to_string().contains("--force"));
    }

    #[test]
    fn test_help() {
        let args = CliArgs::parse_from(["-h"]).unwrap();
        assert_eq!(args.command, CommandKind::Help);
    }

    #[tokio::test]
    async fn test_missing_project_reported_plainly() {
        let dir = tempfile::tempdir().unwrap();
        let prebuild = PrebuildCommand {
            project_dir: dir.path().to_path_buf(),
            config: PrebuildConfig::default(),
            json: false,
        };
        let err = prebuild.execute().await.unwrap_err();
        assert!(error_message(&err).contains("Run the Expo prebuild first"));

        let inspect = InspectCommand {
            project_dir: dir.path().to_path_buf(),
            config: PrebuildConfig::default(),
            json: false,
        };
        let err = inspect.execute().await.unwrap_err();
        assert!(error_message(&err).contains("Run the Expo prebuild first"));
    }

    #[test]
    fn test_other_errors_keep_context_chain() {
        let err = anyhow::Error::from(ModError::AnchorNotFound(PathBuf::from("MainApplication.kt")))
            .context("Prebuild failed");
        let message = error_message(&err);
        assert!(message.starts_with("Prebuild failed: "));
        assert!(message.contains("MainApplication.kt"));
    }

    #[tokio::test]
    async fn test_prebuild_then_inspect() {
        let dir = tempfile::tempdir().unwrap();
        let layout = AndroidLayout::new(dir.path().join("android"));
        tokio::fs::create_dir_all(layout.main_source_set()).await.unwrap();
        tokio::fs::write(
            layout.manifest_path(),
            r#"<manifest xmlns:android="http://schemas.android.com/apk/res/android"><application/></manifest>"#,
        )
        .await
        .unwrap();

        let config = PrebuildConfig::default();
        let prebuild = PrebuildCommand {
            project_dir: dir.path().to_path_buf(),
            config: config.clone(),
            json: true,
        };
        prebuild.execute().await.unwrap();

        let inspect = InspectCommand {
            project_dir: dir.path().to_path_buf(),
            config,
            json: false,
        };
        let summary = inspect.execute().await.unwrap();
        assert_eq!(summary.permissions.len(), 6);
        assert_eq!(summary.receivers.len(), 1);
    }
}

//! Junggae prebuild - command-line entry point
//! 
//! Loads the configuration, installs logging and dispatches to the
//! selected command.

use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use junggae_core::{PrebuildConfig, APP_NAME, VERSION};
use junggae_prebuild::commands::{
    error_message, CliArgs, CommandKind, InspectCommand, PrebuildCommand, USAGE,
};

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse_from(std::env::args().skip(1))?;

    if args.command == CommandKind::Help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config_file = args.config_file();
    let config = PrebuildConfig::load(&config_file)
        .await
        .with_context(|| format!("Failed to load {}", config_file.display()))?;

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log level")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    info!("{} v{} starting...", APP_NAME, VERSION);

    let result = match args.command {
        CommandKind::Prebuild => PrebuildCommand {
            project_dir: args.project_dir,
            config,
            json: args.json,
        }
        .execute()
        .await
        .map(|_| ()),
        CommandKind::Inspect => InspectCommand {
            project_dir: args.project_dir,
            config,
            json: args.json,
        }
        .execute()
        .await
        .map(|_| ()),
        CommandKind::Help => Ok(()),
    };

    if let Err(err) = result {
        error!("{:?}", err);
        eprintln!("Error: {}", error_message(&err));
        std::process::exit(1);
    }

    Ok(())
}

use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use stirling_update_core::{MachineProfile, VersionAnnouncement};
use stirling_update_service::{
    AnnouncementSource, HttpAnnouncementSource, SourceError, StaticAnnouncementSource,
    UpdateConfig, UpdateFacade,
};
use thiserror::Error;

use crate::paths::{AppPaths, AppPathsError};
use crate::settings::{Settings, SettingsError};

#[derive(Debug, Parser)]
#[command(name = "stirling-update", version, about = "Check for Stirling-PDF updates")]
pub struct Cli {
    /// Settings file to use instead of the platform default.
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Read announcements from a JSON file instead of the update endpoint.
    #[arg(long, global = true)]
    pub announcements: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize releases newer than the current version.
    Summary(CheckArgs),
    /// List every release newer than the current version.
    Full(CheckArgs),
    /// Print the direct download URL for a machine profile.
    DownloadUrl(ProfileArgs),
    /// Write the effective settings to the settings file.
    WriteSettings,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(long)]
    pub current: String,

    #[command(flatten)]
    pub profile: ProfileArgs,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Docker, Kubernetes, Server-jar or Client-<win|mac|unix>.
    #[arg(long)]
    pub machine_type: String,

    #[arg(long)]
    pub active_security: bool,

    #[arg(long, default_value = "")]
    pub license_type: String,
}

impl ProfileArgs {
    #[must_use]
    pub fn to_profile(&self) -> MachineProfile {
        MachineProfile::new(self.machine_type.clone(), self.active_security)
            .with_license_type(self.license_type.clone())
    }
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error(transparent)]
    Paths(#[from] AppPathsError),
    #[error("Failed to read announcements file {path}: {details}")]
    AnnouncementsFile { path: String, details: String },
    #[error("Failed to encode output: {0}")]
    Output(#[from] serde_json::Error),
}

fn load_announcements(path: &Path) -> Result<Vec<VersionAnnouncement>, CliError> {
    let file_error = |details: String| CliError::AnnouncementsFile {
        path: path.display().to_string(),
        details,
    };
    let content = std::fs::read_to_string(path).map_err(|e| file_error(e.to_string()))?;
    serde_json::from_str(&content).map_err(|e| file_error(e.to_string()))
}

/// Pick the announcement source for this invocation.
///
/// # Errors
/// Returns an error when the announcements file cannot be loaded or the HTTP
/// client cannot be built.
pub fn build_source(
    announcements: Option<&Path>,
    config: &UpdateConfig,
) -> Result<Box<dyn AnnouncementSource>, CliError> {
    match announcements {
        Some(path) => Ok(Box::new(StaticAnnouncementSource::new(load_announcements(
            path,
        )?))),
        None => Ok(Box::new(HttpAnnouncementSource::from_config(config)?)),
    }
}

/// Rewrite the settings file with every field filled in.
///
/// Existing values are kept. A file that cannot be parsed is left untouched
/// and reported as an error.
///
/// # Errors
/// Returns an error when the settings path cannot be determined, or the file
/// cannot be parsed or written.
pub fn write_settings(path: Option<&Path>) -> Result<PathBuf, CliError> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => AppPaths::new()?.settings_file(),
    };
    let settings = Settings::load_or_default(&path)?;
    settings.save_to(&path)?;
    Ok(path)
}

/// Run a lookup command and render its result as pretty JSON.
///
/// An absent result renders as `null`.
///
/// # Errors
/// Returns an error when the result cannot be serialized.
pub async fn execute<S: AnnouncementSource>(
    facade: &UpdateFacade<S>,
    command: &Command,
) -> Result<String, CliError> {
    let rendered = match command {
        Command::Summary(args) => serde_json::to_string_pretty(
            &facade
                .update_summary(&args.current, &args.profile.to_profile())
                .await,
        )?,
        Command::Full(args) => serde_json::to_string_pretty(
            &facade
                .full_update_info(&args.current, &args.profile.to_profile())
                .await,
        )?,
        Command::DownloadUrl(args) => {
            serde_json::to_string_pretty(&facade.download_url(&args.to_profile()))?
        }
        Command::WriteSettings => serde_json::to_string_pretty(&serde_json::Value::Null)?,
    };
    Ok(rendered)
}

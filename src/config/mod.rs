mod file_config;

pub use file_config::{DialogueConfig, FileConfig};

use crate::dialogue::DialogueSettings;
use crate::server::RequestsLoggingLevel;
use anyhow::{bail, Result};
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

/// Hint probability used by the server when nothing is configured.
pub const DEFAULT_HINT_PROBABILITY: f64 = 0.5;

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_dir: Option<PathBuf>,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    pub classifier_url: Option<String>,
    pub classifier_timeout_sec: u64,
    pub frontend_dir_path: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_dir: PathBuf,
    pub port: u16,
    pub metrics_port: u16,
    pub logging_level: RequestsLoggingLevel,
    /// Base URL of the NLU service. Without it every free-text message is
    /// treated as not understood.
    pub classifier_url: Option<String>,
    pub classifier_timeout_sec: u64,
    /// Static playlist viewer served at the root instead of the stats page.
    pub frontend_dir_path: Option<String>,

    pub dialogue: DialogueSettings,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_dir = file
            .db_dir
            .map(PathBuf::from)
            .or_else(|| cli.db_dir.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("db_dir must be specified via --db-dir or in config file")
            })?;

        if !db_dir.exists() {
            bail!("Database directory does not exist: {:?}", db_dir);
        }
        if !db_dir.is_dir() {
            bail!("db_dir is not a directory: {:?}", db_dir);
        }

        let port = file.port.unwrap_or(cli.port);
        let metrics_port = file.metrics_port.unwrap_or(cli.metrics_port);

        let logging_level = file
            .logging_level
            .and_then(|s| parse_logging_level(&s))
            .unwrap_or_else(|| cli.logging_level.clone());

        let classifier_url = file
            .classifier_url
            .or_else(|| cli.classifier_url.clone())
            .filter(|url| !url.trim().is_empty());
        let classifier_timeout_sec = file
            .classifier_timeout_sec
            .unwrap_or(cli.classifier_timeout_sec);

        let frontend_dir_path = file
            .frontend_dir_path
            .or_else(|| cli.frontend_dir_path.clone());

        let dialogue = resolve_dialogue(file.dialogue.unwrap_or_default())?;

        Ok(Self {
            db_dir,
            port,
            metrics_port,
            logging_level,
            classifier_url,
            classifier_timeout_sec,
            frontend_dir_path,
            dialogue,
        })
    }

    pub fn catalog_db_path(&self) -> PathBuf {
        self.db_dir.join("catalog.db")
    }

    pub fn classifier_timeout(&self) -> Duration {
        Duration::from_secs(self.classifier_timeout_sec)
    }
}

fn resolve_dialogue(file: DialogueConfig) -> Result<DialogueSettings> {
    let defaults = DialogueSettings::default();
    let settings = DialogueSettings {
        confidence_threshold: file
            .confidence_threshold
            .unwrap_or(defaults.confidence_threshold),
        playlist_id: file.playlist_id.unwrap_or(defaults.playlist_id),
        recommendation_count: file
            .recommendation_count
            .unwrap_or(defaults.recommendation_count),
        max_clarification_retries: file
            .max_clarification_retries
            .unwrap_or(defaults.max_clarification_retries),
        hint_probability: file.hint_probability.unwrap_or(DEFAULT_HINT_PROBABILITY),
        max_listed_songs: file.max_listed_songs.unwrap_or(defaults.max_listed_songs),
    };

    if !(0.0..=1.0).contains(&settings.confidence_threshold) {
        bail!(
            "dialogue.confidence_threshold must be within [0, 1], got {}",
            settings.confidence_threshold
        );
    }
    if !(0.0..=1.0).contains(&settings.hint_probability) {
        bail!(
            "dialogue.hint_probability must be within [0, 1], got {}",
            settings.hint_probability
        );
    }
    if settings.recommendation_count == 0 {
        bail!("dialogue.recommendation_count must be positive");
    }
    Ok(settings)
}

/// Parses a logging level string into RequestsLoggingLevel.
/// Uses clap's ValueEnum trait for parsing.
fn parse_logging_level(s: &str) -> Option<RequestsLoggingLevel> {
    RequestsLoggingLevel::from_str(s, true).ok()
}

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub db_dir: Option<String>,
    pub port: Option<u16>,
    pub metrics_port: Option<u16>,
    pub logging_level: Option<String>,
    pub classifier_url: Option<String>,
    pub classifier_timeout_sec: Option<u64>,
    pub frontend_dir_path: Option<String>,

    pub dialogue: Option<DialogueConfig>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct DialogueConfig {
    pub confidence_threshold: Option<f64>,
    pub playlist_id: Option<i64>,
    pub recommendation_count: Option<usize>,
    pub max_clarification_retries: Option<u32>,
    pub hint_probability: Option<f64>,
    pub max_listed_songs: Option<usize>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

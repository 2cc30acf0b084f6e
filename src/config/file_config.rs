use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct FileConfig {
    // Core settings (can override CLI)
    pub input_data: Option<String>,
    pub output_data: Option<String>,

    /// Glob-style pattern for song metadata files, relative to `input_data`.
    pub song_data_pattern: Option<String>,
    /// Glob-style pattern for listening-session log files.
    pub log_data_pattern: Option<String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {:?}", path))
    }
}

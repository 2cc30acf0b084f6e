mod file_config;

pub use file_config::FileConfig;

use anyhow::{bail, Result};
use std::path::PathBuf;

/// Default discovery patterns, relative to the input root. The trees are
/// laid out as `song_data/<A>/<B>/<C>/<track>.json` and
/// `log_data/<year>/<month>/<day-file>.json`.
pub const DEFAULT_SONG_DATA_PATTERN: &str = "song_data/*/*/*/*.json";
pub const DEFAULT_LOG_DATA_PATTERN: &str = "log_data/*/*/*.json";

/// CLI arguments that can be used for config resolution.
/// This struct mirrors the CLI arguments that can be overridden by TOML config.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub input_data: Option<PathBuf>,
    pub output_data: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Root directory holding the `song_data` and `log_data` trees.
    pub input_data: PathBuf,
    /// Root directory the five table sub-trees are written under.
    pub output_data: PathBuf,
    pub song_data_pattern: String,
    pub log_data_pattern: String,
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let input_data = file
            .input_data
            .map(PathBuf::from)
            .or_else(|| cli.input_data.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("input_data must be specified on the CLI or in the config file")
            })?;

        if !input_data.exists() {
            bail!("Input directory does not exist: {:?}", input_data);
        }
        if !input_data.is_dir() {
            bail!("input_data is not a directory: {:?}", input_data);
        }

        let output_data = file
            .output_data
            .map(PathBuf::from)
            .or_else(|| cli.output_data.clone())
            .ok_or_else(|| {
                anyhow::anyhow!("output_data must be specified on the CLI or in the config file")
            })?;

        let song_data_pattern = file
            .song_data_pattern
            .unwrap_or_else(|| DEFAULT_SONG_DATA_PATTERN.to_string());
        let log_data_pattern = file
            .log_data_pattern
            .unwrap_or_else(|| DEFAULT_LOG_DATA_PATTERN.to_string());

        Ok(Self {
            input_data,
            output_data,
            song_data_pattern,
            log_data_pattern,
        })
    }
}

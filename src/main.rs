use anyhow::{Context, Result};
use clap::Parser;
use songlake::config::{AppConfig, CliConfig, FileConfig};
use songlake::{provision, Pipeline};
use std::path::PathBuf;
use tracing::{error, info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn parse_path(s: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(s);
    let original_path = match path_buf.canonicalize() {
        Ok(path) => path,
        Err(msg) => {
            if msg.kind() == std::io::ErrorKind::NotFound {
                path_buf
            } else {
                return Err(msg).with_context(|| format!("Error resolving path: {}", s));
            }
        }
    };
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(about = "Derive a star-schema data lake from song and listening-session logs")]
struct CliArgs {
    /// Root directory holding the `song_data` and `log_data` trees.
    #[clap(value_parser = parse_path)]
    pub input_data: PathBuf,

    /// Root directory to write the derived tables under.
    #[clap(value_parser = parse_path)]
    pub output_data: PathBuf,

    /// Path to an optional TOML config file; its values override the CLI.
    #[clap(short, long, value_parser = parse_path)]
    pub config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .unwrap();

    let file_config = match &cli_args.config {
        Some(path) => Some(FileConfig::load(path)?),
        None => None,
    };
    let cli_config = CliConfig {
        input_data: Some(cli_args.input_data),
        output_data: Some(cli_args.output_data),
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    if let Err(e) = provision::ensure_output_root(&config.output_data) {
        error!("Unable to provision output root: {e:#}");
        std::process::exit(1);
    }

    info!(
        "Deriving data lake from {:?} into {:?}",
        config.input_data, config.output_data
    );
    Pipeline::new(config).run()?;
    Ok(())
}

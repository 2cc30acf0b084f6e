//! Songlake: song-play event logs to a star-schema data lake.
//!
//! Reads raw song metadata and listening-session logs (newline-delimited
//! JSON), derives the `songs`, `artists`, `users`, `time` and `songplays`
//! tables, and writes them as partitioned Parquet under an output root.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod provision;
pub mod reader;
pub mod tables;
pub mod writer;

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, FileConfig};
pub use error::EtlError;
pub use pipeline::Pipeline;

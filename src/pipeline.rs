//! Orchestration of a full derivation run.
//!
//! One run recomputes every table from scratch: readers feed the dimension
//! builders, the fact builder consumes the filtered logs plus the song
//! dimension, and each table is persisted as soon as it is built. Builders
//! run sequentially; the song dimension is threaded in-memory into the fact
//! builder, so the song phase always completes first. Any failure aborts
//! the run, there is no checkpointing or partial resume.

use crate::config::AppConfig;
use crate::error::Result;
use crate::reader::scan_ndjson;
use crate::tables::{
    build_artists, build_songplays, build_songs, build_time, build_users, filter_plays,
    raw_logs_schema, raw_songs_schema,
};
use crate::writer::write_table;
use polars::prelude::*;
use std::time::Instant;
use tracing::info;

pub struct Pipeline {
    config: AppConfig,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the whole pipeline: song dimensions, then the log-derived tables.
    pub fn run(&self) -> Result<()> {
        let start = Instant::now();

        let songs = self.process_song_data()?;
        info!("Song data processed in {:?}", start.elapsed());

        let log_start = Instant::now();
        self.process_log_data(songs)?;
        info!("Log data processed in {:?}", log_start.elapsed());

        info!("Run finished in {:?}", start.elapsed());
        Ok(())
    }

    /// Build and persist `songs` and `artists`; returns the song dimension
    /// for the fact builder.
    fn process_song_data(&self) -> Result<DataFrame> {
        info!("Loading song files...");
        let raw_songs = scan_ndjson(
            &self.config.input_data,
            &self.config.song_data_pattern,
            raw_songs_schema(),
        )?;

        info!("Writing `songs` table...");
        let songs = build_songs(raw_songs.clone()).collect()?;
        info!("`songs`: {} rows", songs.height());
        write_table(
            songs.clone(),
            &self.config.output_data.join("songs"),
            &["year", "artist_id"],
        )?;

        info!("Writing `artists` table...");
        let artists = build_artists(raw_songs).collect()?;
        info!("`artists`: {} rows", artists.height());
        write_table(artists, &self.config.output_data.join("artists"), &[])?;

        Ok(songs)
    }

    /// Build and persist `users`, `time` and `songplays` from the log tree.
    fn process_log_data(&self, songs: DataFrame) -> Result<()> {
        info!("Loading song play log files...");
        let raw_logs = scan_ndjson(
            &self.config.input_data,
            &self.config.log_data_pattern,
            raw_logs_schema(),
        )?;
        let plays = filter_plays(raw_logs);

        info!("Writing `users` table...");
        let users = build_users(plays.clone()).collect()?;
        info!("`users`: {} rows", users.height());
        write_table(users, &self.config.output_data.join("users"), &[])?;

        info!("Writing `time` table...");
        let time = build_time(plays.clone()).collect()?;
        info!("`time`: {} rows", time.height());
        write_table(
            time,
            &self.config.output_data.join("time"),
            &["year", "month"],
        )?;

        info!("Writing `songplays` table...");
        let songplays = build_songplays(plays, songs.lazy()).collect()?;
        info!("`songplays`: {} rows", songplays.height());
        write_table(
            songplays,
            &self.config.output_data.join("songplays"),
            &["year", "month"],
        )?;

        Ok(())
    }
}

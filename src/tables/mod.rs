//! Builders for the star-schema tables.
//!
//! Each builder is a pure function from lazy input frames to a lazy output
//! frame; persistence is a separate step (see [`crate::writer`]). The
//! dimension builders dedup with a stable keep-first strategy, so repeated
//! runs over identical inputs produce identical tables.

mod songplays;
mod songs;
mod time;
mod users;

pub use songplays::build_songplays;
pub use songs::{build_artists, build_songs};
pub use time::build_time;
pub use users::build_users;

use polars::prelude::*;

/// Schema of raw song metadata records, one record per song file.
///
/// Used when no input files match, so downstream selects still resolve.
pub fn raw_songs_schema() -> Schema {
    Schema::from_iter([
        Field::new("song_id".into(), DataType::String),
        Field::new("title".into(), DataType::String),
        Field::new("artist_id".into(), DataType::String),
        Field::new("artist_name".into(), DataType::String),
        Field::new("artist_location".into(), DataType::String),
        Field::new("artist_latitude".into(), DataType::Float64),
        Field::new("artist_longitude".into(), DataType::Float64),
        Field::new("year".into(), DataType::Int64),
        Field::new("duration".into(), DataType::Float64),
    ])
}

/// Schema of raw listening-session log records, one record per event.
pub fn raw_logs_schema() -> Schema {
    Schema::from_iter([
        Field::new("userId".into(), DataType::String),
        Field::new("firstName".into(), DataType::String),
        Field::new("lastName".into(), DataType::String),
        Field::new("gender".into(), DataType::String),
        Field::new("level".into(), DataType::String),
        Field::new("ts".into(), DataType::Int64),
        Field::new("page".into(), DataType::String),
        Field::new("song".into(), DataType::String),
        Field::new("sessionId".into(), DataType::Int64),
        Field::new("location".into(), DataType::String),
        Field::new("userAgent".into(), DataType::String),
    ])
}

/// Restrict raw log records to actual song plays.
pub fn filter_plays(raw_logs: LazyFrame) -> LazyFrame {
    raw_logs.filter(col("page").eq(lit("NextSong")))
}

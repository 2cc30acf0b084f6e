//! Song and artist dimension tables, both projected from raw song metadata.

use polars::prelude::*;

/// Build the `songs` dimension: one row per `song_id`.
///
/// Casts `year` to int and `duration` to float; duplicate song ids keep the
/// first record in scan order.
pub fn build_songs(raw_songs: LazyFrame) -> LazyFrame {
    raw_songs
        .select([
            col("song_id"),
            col("title"),
            col("artist_id"),
            col("year").cast(DataType::Int32),
            col("duration").cast(DataType::Float32),
        ])
        .unique_stable(Some(vec!["song_id".into()]), UniqueKeepStrategy::First)
}

/// Build the `artists` dimension: one row per `artist_id`.
pub fn build_artists(raw_songs: LazyFrame) -> LazyFrame {
    raw_songs
        .select([
            col("artist_id"),
            col("artist_name"),
            col("artist_location"),
            col("artist_latitude")
                .cast(DataType::Float32)
                .alias("latitude"),
            col("artist_longitude")
                .cast(DataType::Float32)
                .alias("longitude"),
        ])
        .unique_stable(Some(vec!["artist_id".into()]), UniqueKeepStrategy::First)
}

//! Songplays fact table: play events joined against the song dimension.

use super::time::start_time_expr;
use polars::prelude::*;

/// Build the `songplays` fact table.
///
/// `songs` is the already-built song dimension, threaded in-memory from the
/// song builder. The join matches the log record's `song` field against the
/// dimension's `title` by exact string equality; plays with no matching
/// title produce no row. `songplay_id` is a monotonically increasing
/// surrogate assigned after the join, unique within the run.
pub fn build_songplays(plays: LazyFrame, songs: LazyFrame) -> LazyFrame {
    let song_dim = songs.select([col("song_id"), col("title"), col("artist_id")]);
    plays
        .with_column(start_time_expr())
        .join(
            song_dim,
            [col("song")],
            [col("title")],
            JoinArgs::new(JoinType::Inner),
        )
        .with_row_index("songplay_id", None)
        .with_columns([
            col("start_time").dt().year().cast(DataType::Int32).alias("year"),
            col("start_time").dt().month().cast(DataType::Int32).alias("month"),
        ])
        .select([
            col("songplay_id"),
            col("start_time"),
            col("year"),
            col("month"),
            col("userId").alias("user_id"),
            col("level"),
            col("song_id"),
            col("artist_id"),
            col("sessionId").alias("session_id"),
            col("location"),
            col("userAgent").alias("user_agent"),
        ])
}

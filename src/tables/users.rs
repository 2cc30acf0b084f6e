//! User dimension table.
//!
//! A user's profile attributes (name, gender, subscription level) can change
//! between events, e.g. an upgrade from free to paid. The table carries the
//! attribute values observed at each user's maximum `ts` among play events.

use polars::prelude::*;

/// Build the `users` dimension: exactly one row per `user_id`.
///
/// Implemented as a single reduction: stable sort by `ts` descending, group
/// by user preserving order, take the first row of each group. The stable
/// sort makes ties at the maximum `ts` resolve to the first-occurring event.
pub fn build_users(plays: LazyFrame) -> LazyFrame {
    plays
        .select([
            col("userId").alias("user_id"),
            col("firstName").alias("first_name"),
            col("lastName").alias("last_name"),
            col("gender"),
            col("level"),
            col("ts"),
        ])
        .sort(
            ["ts"],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .group_by_stable([col("user_id")])
        .agg([
            col("first_name").first(),
            col("last_name").first(),
            col("gender").first(),
            col("level").first(),
        ])
}

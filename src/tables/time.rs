//! Time dimension table: calendar components per distinct event timestamp.

use polars::prelude::*;

/// Interpret the raw epoch-milliseconds `ts` column as a naive datetime.
///
/// Naive interpretation keeps the derivation deterministic across hosts;
/// no timezone normalization is applied.
pub fn start_time_expr() -> Expr {
    col("ts")
        .cast(DataType::Datetime(TimeUnit::Milliseconds, None))
        .alias("start_time")
}

/// Build the `time` dimension: one row per distinct `start_time`, with
/// hour, day-of-month, ISO week, month, year and abbreviated weekday name.
pub fn build_time(plays: LazyFrame) -> LazyFrame {
    plays
        .select([start_time_expr()])
        .unique_stable(Some(vec!["start_time".into()]), UniqueKeepStrategy::First)
        .with_columns([
            col("start_time").dt().hour().cast(DataType::Int32).alias("hour"),
            col("start_time").dt().day().cast(DataType::Int32).alias("day"),
            col("start_time").dt().week().cast(DataType::Int32).alias("week"),
            col("start_time").dt().month().cast(DataType::Int32).alias("month"),
            col("start_time").dt().year().cast(DataType::Int32).alias("year"),
            col("start_time").dt().to_string("%a").alias("weekday"),
        ])
}

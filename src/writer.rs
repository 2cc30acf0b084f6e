//! Parquet persistence with optional hive-style partitioning.
//!
//! Output at a given path is fully overwritten on each run: the existing
//! tree is removed before writing, never merged. A failure mid-write leaves
//! the path in an undefined state and is fatal for the run.

use crate::error::Result;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::info;

const PART_FILE: &str = "part-00000.parquet";

/// Persist `df` as Parquet at `path`, replacing whatever was there.
///
/// With partition columns, rows are grouped by their partition values and
/// each group is written to a `col=value/` subdirectory chain; the
/// partition columns themselves are carried by the directory names and
/// dropped from the files. Without partition columns a single file is
/// written. An empty frame still produces a structurally valid tree.
pub fn write_table(df: DataFrame, path: &Path, partition_cols: &[&str]) -> Result<()> {
    if path.exists() {
        if path.is_dir() {
            fs::remove_dir_all(path)?;
        } else {
            fs::remove_file(path)?;
        }
    }
    fs::create_dir_all(path)?;

    if partition_cols.is_empty() {
        write_part(df, &path.join(PART_FILE))?;
        return Ok(());
    }

    let groups = df.partition_by(partition_cols.iter().copied(), true)?;
    info!(
        "Writing {} partitions to {:?} by {:?}",
        groups.len(),
        path,
        partition_cols
    );
    for group in groups {
        let dir = partition_dir(path, &group, partition_cols)?;
        fs::create_dir_all(&dir)?;
        let part = group.drop_many(partition_cols.iter().copied());
        write_part(part, &dir.join(PART_FILE))?;
    }
    Ok(())
}

fn write_part(mut df: DataFrame, file: &Path) -> Result<()> {
    let out = File::create(file)?;
    ParquetWriter::new(out).finish(&mut df)?;
    Ok(())
}

/// Directory for one partition group, one `col=value` segment per column.
/// All rows in a group share the same key values, so the first row is
/// representative.
fn partition_dir(root: &Path, group: &DataFrame, partition_cols: &[&str]) -> Result<PathBuf> {
    let mut dir = root.to_path_buf();
    for &name in partition_cols {
        let value = group.column(name)?.get(0)?;
        dir = dir.join(format!("{}={}", name, partition_value(&value)));
    }
    Ok(dir)
}

fn partition_value(value: &AnyValue) -> String {
    let raw = match value {
        AnyValue::String(s) => (*s).to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Null => "__HIVE_DEFAULT_PARTITION__".to_string(),
        other => other.to_string(),
    };
    // Partition values become directory names; keep them path-safe.
    raw.replace(['/', '\\'], "_")
}

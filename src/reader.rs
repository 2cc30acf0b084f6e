//! Discovery and scanning of raw newline-delimited JSON event files.
//!
//! Files are located by a glob-style relative pattern under a root
//! directory (e.g. `song_data/*/*/*/*.json`), where `*` matches within a
//! single path component. Matching files are scanned lazily and
//! concatenated into one frame; no row ordering is guaranteed.

use crate::error::{EtlError, Result};
use polars::prelude::*;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// Scan all NDJSON files under `root` matching `pattern` into a lazy frame.
///
/// Zero matching files is not an error: the result is an empty frame with
/// `empty_schema`, so downstream builders can run against it and produce
/// empty tables.
pub fn scan_ndjson(root: &Path, pattern: &str, empty_schema: Schema) -> Result<LazyFrame> {
    let paths = discover_files(root, pattern)?;
    if paths.is_empty() {
        info!("No files matched `{}` under {:?}", pattern, root);
        return Ok(DataFrame::empty_with_schema(&empty_schema).lazy());
    }
    info!("Found {} files matching `{}`", paths.len(), pattern);

    let mut scans = Vec::with_capacity(paths.len());
    for path in &paths {
        debug!("Scanning {:?}", path);
        let scan = LazyJsonLineReader::new(path).finish()?;
        scans.push(scan);
    }
    // Schemas are inferred per file; fields can be missing or all-null in
    // some files, so union diagonally and widen to supertypes.
    let args = UnionArgs {
        diagonal: true,
        to_supertypes: true,
        ..Default::default()
    };
    let frame = concat(scans.as_slice(), args)?;
    Ok(frame)
}

/// Walk `root` and collect files whose root-relative path matches the
/// glob pattern. Results are sorted so scan order is reproducible.
fn discover_files(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let matcher = compile_pattern(pattern)?;
    let mut paths = Vec::new();
    for entry in WalkDir::new(root).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        if matcher.is_match(&relative_key(rel)) {
            paths.push(entry.path().to_path_buf());
        }
    }
    paths.sort();
    Ok(paths)
}

/// Normalize a relative path to forward-slash form for matching.
fn relative_key(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Compile a glob-style pattern into an anchored regex. `*` matches any
/// run of characters except the path separator; everything else is literal.
fn compile_pattern(pattern: &str) -> Result<Regex> {
    let mut expr = String::with_capacity(pattern.len() + 16);
    expr.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => expr.push_str("[^/]*"),
            c => expr.push_str(&regex::escape(&c.to_string())),
        }
    }
    expr.push('$');
    Regex::new(&expr).map_err(|source| EtlError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

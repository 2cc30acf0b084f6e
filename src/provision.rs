//! Provisioning of the output location.
//!
//! Idempotent: an existing directory is accepted as-is, otherwise it is
//! created. Writability is verified up front with a probe file so the run
//! can abort before any transformation work starts.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::info;

const PROBE_FILE: &str = ".songlake-write-probe";

/// Ensure the output root exists and is writable.
pub fn ensure_output_root(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            bail!("Output location is not a directory: {:?}", path);
        }
        info!("Output root already exists: {:?}", path);
    } else {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create output root: {:?}", path))?;
        info!("Created output root: {:?}", path);
    }

    let probe = path.join(PROBE_FILE);
    fs::write(&probe, b"")
        .with_context(|| format!("Output root is not writable: {:?}", path))?;
    fs::remove_file(&probe).ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("lake/out");
        ensure_output_root(&root).unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn accepts_existing_root() {
        let dir = tempfile::tempdir().unwrap();
        ensure_output_root(dir.path()).unwrap();
        ensure_output_root(dir.path()).unwrap();
    }

    #[test]
    fn rejects_file_at_output_path() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("not-a-dir");
        fs::write(&file, b"x").unwrap();
        assert!(ensure_output_root(&file).is_err());
    }
}

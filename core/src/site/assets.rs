use crate::error::{CoreError, CoreResult};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

pub fn copy_static_assets(static_dir: &Path, out_dir: &Path) -> CoreResult<usize> {
    if !static_dir.is_dir() {
        warn!(path = %static_dir.display(), "static directory not found, skipping assets");
        return Ok(0);
    }

    let mut copied = 0;
    for e in WalkDir::new(static_dir).sort_by_file_name() {
        let e = e.map_err(|err| CoreError::Io(std::io::Error::other(err)))?;
        if !e.file_type().is_file() {
            continue;
        }
        let rel = e
            .path()
            .strip_prefix(static_dir)
            .map_err(|err| CoreError::InvalidInput(err.to_string()))?;
        let target = out_dir.join(rel);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(e.path(), &target)?;
        debug!(asset = %rel.display(), "copied");
        copied += 1;
    }
    Ok(copied)
}

use crate::error::{CoreError, CoreResult};
use crate::schema::SchemaRegistry;
use std::fs::{self, File};
use std::io::{self, Read, Seek};
use std::path::{Component, Path};
use tempfile::TempDir;
use tracing::debug;
use zip::ZipArchive;

/// Schema files unpacked from a repository archive.
///
/// The files live in a temporary directory that is deleted when the bundle is
/// dropped, so an aborted run leaves nothing behind.
#[derive(Debug)]
pub struct SchemaBundle {
    dir: TempDir,
    count: usize,
}

impl SchemaBundle {
    pub fn from_archive<R: Read + Seek>(archive: R) -> CoreResult<Self> {
        let dir = tempfile::Builder::new().prefix("ffdir-specs-").tempdir()?;
        let count = extract_specs(archive, dir.path())?;
        Ok(Self { dir, count })
    }

    pub fn specs_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn load_registry(&self) -> CoreResult<SchemaRegistry> {
        SchemaRegistry::load(self.specs_dir())
    }

    pub fn close(self) -> CoreResult<()> {
        self.dir.close()?;
        Ok(())
    }
}

/// Copies every `*.json` entry whose parent directory is named `specs` into
/// `dest`, flattened. Returns the number of files written.
pub fn extract_specs<R: Read + Seek>(archive: R, dest: &Path) -> CoreResult<usize> {
    let mut zip = ZipArchive::new(archive).map_err(|e| CoreError::Zip(e.to_string()))?;
    fs::create_dir_all(dest)?;

    let mut count = 0;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|e| CoreError::Zip(e.to_string()))?;
        if !entry.is_file() {
            continue;
        }
        // enclosed_name rejects absolute paths and `..` traversal.
        let Some(rel) = entry.enclosed_name() else {
            continue;
        };
        if !is_spec_entry(&rel) {
            continue;
        }
        let Some(file_name) = rel.file_name() else {
            continue;
        };

        let target = dest.join(file_name);
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        debug!(entry = %rel.display(), "extracted schema");
        count += 1;
    }
    Ok(count)
}

fn is_spec_entry(rel: &Path) -> bool {
    if rel.extension().and_then(|x| x.to_str()) != Some("json") {
        return false;
    }
    let parent = rel.parent().and_then(|p| p.components().next_back());
    matches!(parent, Some(Component::Normal(name)) if name == "specs")
}

pub mod assets;

use crate::error::{AssembleError, CoreError, CoreResult, SkipReason};
use crate::page::{IndexContext, IndexEntry, PageAssembler, Templates};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

pub use assets::copy_static_assets;

#[derive(Debug)]
pub struct SkippedRecord {
    pub key: String,
    pub reason: SkipReason,
}

#[derive(Debug, Default)]
pub struct SiteReport {
    pub rendered: Vec<String>,
    pub skipped: Vec<SkippedRecord>,
    pub index_path: PathBuf,
    pub assets_copied: usize,
}

pub struct SiteBuilder<'a, T: Templates> {
    out_dir: PathBuf,
    assembler: PageAssembler<'a>,
    templates: &'a T,
    static_dir: Option<PathBuf>,
}

impl<'a, T: Templates> SiteBuilder<'a, T> {
    pub fn new(out_dir: impl Into<PathBuf>, assembler: PageAssembler<'a>, templates: &'a T) -> Self {
        Self {
            out_dir: out_dir.into(),
            assembler,
            templates,
            static_dir: None,
        }
    }

    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = Some(dir.into());
        self
    }

    pub fn build(&self, directory: &Value) -> CoreResult<SiteReport> {
        let communities = directory.as_object().ok_or_else(|| {
            CoreError::InvalidInput("community directory is not a JSON object".to_string())
        })?;
        fs::create_dir_all(&self.out_dir)?;

        let ordered: BTreeMap<&str, &Value> =
            communities.iter().map(|(k, v)| (k.as_str(), v)).collect();

        let mut report = SiteReport::default();
        let mut index = Vec::new();
        for (key, record) in ordered {
            match self.render_community(key, record) {
                Ok(entry) => {
                    report.rendered.push(key.to_string());
                    index.push(entry);
                }
                Err(reason) => {
                    warn!(community = key, error = %reason, "skipping community");
                    report.skipped.push(SkippedRecord {
                        key: key.to_string(),
                        reason,
                    });
                }
            }
        }
        info!(
            rendered = report.rendered.len(),
            skipped = report.skipped.len(),
            "rendered communities"
        );

        let index_ctx = IndexContext {
            communities: index,
            now: self.assembler.now_display(),
        };
        report.index_path = self.out_dir.join("index.html");
        fs::write(&report.index_path, self.templates.render_index(&index_ctx)?)?;

        if let Some(static_dir) = &self.static_dir {
            report.assets_copied = copy_static_assets(static_dir, &self.out_dir)?;
        }

        Ok(report)
    }

    fn render_community(&self, key: &str, record: &Value) -> Result<IndexEntry, SkipReason> {
        let page = page_file_name(key)?;
        let ctx = self.assembler.assemble(record)?;
        let html = self.templates.render_community(&ctx)?;
        fs::write(self.out_dir.join(&page), html).map_err(CoreError::from)?;
        Ok(IndexEntry::from_context(key, &page, &ctx))
    }
}

pub fn read_directory(path: &Path) -> CoreResult<Value> {
    let text = fs::read_to_string(path)?;
    let directory: Value = serde_json::from_str(&text)?;
    if !directory.is_object() {
        return Err(CoreError::InvalidInput(format!(
            "{} does not contain a JSON object",
            path.display()
        )));
    }
    Ok(directory)
}

/// `<key>.html`, provided the key cannot escape the output directory or
/// produce a hidden file.
pub fn page_file_name(key: &str) -> Result<String, AssembleError> {
    let unsafe_name = key.is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\', '\0'])
        || Path::new(key).is_absolute();
    if unsafe_name {
        return Err(AssembleError::UnsafeName(key.to_string()));
    }
    Ok(format!("{}.html", key))
}

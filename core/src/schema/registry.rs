use crate::error::{CoreError, CoreResult};
use jsonschema::Validator;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

struct SchemaEntry {
    document: Value,
    validator: Validator,
}

pub struct SchemaRegistry {
    entries: BTreeMap<String, SchemaEntry>,
}

impl SchemaRegistry {
    pub fn load(schema_dir: &Path) -> CoreResult<Self> {
        let mut files: Vec<PathBuf> = Vec::new();
        for ent in fs::read_dir(schema_dir)? {
            let path = ent?.path();
            if path.is_file() && path.extension().and_then(|x| x.to_str()) == Some("json") {
                files.push(path);
            }
        }
        files.sort();

        let mut entries = BTreeMap::new();
        for path in files {
            let version = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| CoreError::SchemaLoad {
                    path: path.clone(),
                    message: "file name is not valid UTF-8".to_string(),
                })?
                .to_string();
            let text = fs::read_to_string(&path)?;
            let document: Value =
                serde_json::from_str(&text).map_err(|e| CoreError::SchemaLoad {
                    path: path.clone(),
                    message: e.to_string(),
                })?;
            let entry = compile(&path, document)?;
            debug!(version = %version, path = %path.display(), "loaded schema");
            entries.insert(version, entry);
        }

        Ok(Self { entries })
    }

    pub fn from_documents<I>(documents: I) -> CoreResult<Self>
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let mut entries = BTreeMap::new();
        for (version, document) in documents {
            let path = PathBuf::from(format!("{}.json", version));
            entries.insert(version, compile(&path, document)?);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, version: &str) -> Option<&Value> {
        self.entries.get(version).map(|e| &e.document)
    }

    pub fn validator(&self, version: &str) -> Option<&Validator> {
        self.entries.get(version).map(|e| &e.validator)
    }

    pub fn contains(&self, version: &str) -> bool {
        self.entries.contains_key(version)
    }

    pub fn versions(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("versions", &self.versions())
            .finish()
    }
}

fn compile(path: &Path, document: Value) -> CoreResult<SchemaEntry> {
    let validator = jsonschema::draft7::new(&document).map_err(|e| CoreError::SchemaLoad {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(SchemaEntry {
        document,
        validator,
    })
}

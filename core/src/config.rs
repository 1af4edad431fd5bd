use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_DIRECTORY_URL: &str = "https://api.freifunk.net/data/ffSummarizedDir.json";
pub const DEFAULT_SCHEMA_BUNDLE_URL: &str =
    "https://github.com/freifunk/api.freifunk.net/archive/refs/heads/master.zip";

/// Where a site build gets its inputs from.
///
/// Every field has a default, so a TOML file only needs the keys it changes.
/// Local `specs_dir` / `directory_file` take precedence over the URLs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    pub directory_url: String,
    pub schema_bundle_url: String,
    pub directory_timeout_secs: u64,
    pub bundle_timeout_secs: u64,
    pub static_dir: PathBuf,
    pub specs_dir: Option<PathBuf>,
    pub directory_file: Option<PathBuf>,
    pub site_title: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            directory_url: DEFAULT_DIRECTORY_URL.to_string(),
            schema_bundle_url: DEFAULT_SCHEMA_BUNDLE_URL.to_string(),
            directory_timeout_secs: 10,
            bundle_timeout_secs: 12,
            static_dir: PathBuf::from("static"),
            specs_dir: None,
            directory_file: None,
            site_title: None,
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(text: &str) -> CoreResult<Self> {
        let cfg: SiteConfig = toml::from_str(text).map_err(|e| CoreError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> CoreResult<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| match e {
            CoreError::Config(msg) => CoreError::Config(format!("{}: {}", path.display(), msg)),
            other => other,
        })
    }

    pub fn validate(&self) -> CoreResult<()> {
        self.directory_url()?;
        self.schema_bundle_url()?;
        if self.directory_timeout_secs == 0 || self.bundle_timeout_secs == 0 {
            return Err(CoreError::Config("timeouts must be at least 1 second".to_string()));
        }
        Ok(())
    }

    pub fn directory_url(&self) -> CoreResult<Url> {
        parse_http_url("directory_url", &self.directory_url)
    }

    pub fn schema_bundle_url(&self) -> CoreResult<Url> {
        parse_http_url("schema_bundle_url", &self.schema_bundle_url)
    }

    pub fn directory_timeout(&self) -> Duration {
        Duration::from_secs(self.directory_timeout_secs)
    }

    pub fn bundle_timeout(&self) -> Duration {
        Duration::from_secs(self.bundle_timeout_secs)
    }
}

fn parse_http_url(key: &str, raw: &str) -> CoreResult<Url> {
    let url = Url::parse(raw).map_err(|e| CoreError::Config(format!("{}: {}", key, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(CoreError::Config(format!(
            "{}: unsupported scheme {}",
            key, other
        ))),
    }
}

use super::bundle::SchemaBundle;
use crate::error::{CoreError, CoreResult};
use serde_json::Value;
use std::io::Cursor;
use std::time::Duration;
use tracing::info;
use url::Url;

// The only module in the crate allowed to open network connections.

/// Blocking GET; any non-2xx status is an error. No retries.
pub fn fetch_bytes(url: &Url, timeout: Duration) -> CoreResult<Vec<u8>> {
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| CoreError::Fetch(e.to_string()))?;

    let resp = client
        .get(url.clone())
        .send()
        .map_err(|e| CoreError::Fetch(format!("{}: {}", url, e)))?;
    let status = resp.status();
    if !status.is_success() {
        return Err(CoreError::Fetch(format!("{}: HTTP {}", url, status)));
    }

    let bytes = resp
        .bytes()
        .map_err(|e| CoreError::Fetch(format!("{}: {}", url, e)))?;
    info!(url = %url, bytes = bytes.len(), "fetched");
    Ok(bytes.to_vec())
}

pub fn fetch_directory(url: &Url, timeout: Duration) -> CoreResult<Value> {
    let bytes = fetch_bytes(url, timeout)?;
    let directory: Value = serde_json::from_slice(&bytes)?;
    if !directory.is_object() {
        return Err(CoreError::InvalidInput(format!(
            "community directory at {} is not a JSON object",
            url
        )));
    }
    Ok(directory)
}

pub fn fetch_schema_bundle(url: &Url, timeout: Duration) -> CoreResult<SchemaBundle> {
    let bytes = fetch_bytes(url, timeout)?;
    SchemaBundle::from_archive(Cursor::new(bytes))
}

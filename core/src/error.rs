use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to load schema {}: {message}", path.display())]
    SchemaLoad { path: PathBuf, message: String },

    #[error("config error: {0}")]
    Config(String),

    #[error("fetch error: {0}")]
    Fetch(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("zip error: {0}")]
    Zip(String),
}

pub type CoreResult<T> = Result<T, CoreError>;

/// Reasons a single community page cannot be assembled. These never abort a
/// run; the site builder logs them and moves on to the next record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssembleError {
    #[error("missing or non-string field '{0}'")]
    MissingField(&'static str),

    #[error("record has no usable location coordinates")]
    MissingCoordinates,

    #[error("coordinate '{field}' is not a number: {value}")]
    InvalidCoordinate { field: &'static str, value: String },

    #[error("community key '{0}' is not a safe file name")]
    UnsafeName(String),
}

/// Why one community was left out of a site build.
#[derive(Debug, Error)]
pub enum SkipReason {
    #[error(transparent)]
    Assemble(#[from] AssembleError),

    #[error(transparent)]
    Output(#[from] CoreError),
}

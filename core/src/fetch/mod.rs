pub mod bundle;
pub mod http;

pub use bundle::{extract_specs, SchemaBundle};
pub use http::{fetch_bytes, fetch_directory, fetch_schema_bundle};

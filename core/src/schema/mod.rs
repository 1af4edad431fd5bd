pub mod registry;
pub mod version;

pub use registry::SchemaRegistry;
pub use version::ApiVersion;

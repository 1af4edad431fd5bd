pub mod assembler;
pub mod context;
pub mod lastchange;
pub mod templates;

pub use assembler::{assemble, PageAssembler};
pub use context::{BoundingBox, IndexContext, IndexEntry, RenderContext};
pub use templates::{HtmlTemplates, Templates};

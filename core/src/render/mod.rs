pub mod tree;
pub mod urlize;

pub use tree::render_tree;
pub use urlize::{escape_html, urlize};

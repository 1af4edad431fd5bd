pub mod config;
pub mod fetch;
pub mod page;
pub mod render;
pub mod schema;
pub mod site;
pub mod validator;

pub mod error;

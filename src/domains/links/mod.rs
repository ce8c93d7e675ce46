pub mod models;
pub mod resolver;

pub use models::*;
pub use resolver::{resolve_link, LinkResolver};

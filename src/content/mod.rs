//! Content module - post front-matter, schema validation and filtering

mod filter;
mod frontmatter;
pub mod loader;
mod post;
pub mod schema;

pub use filter::PostFilter;
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use post::{OgType, Post, PostMetadata};
pub use schema::{validate, ValidationError, ValidationResult, Violation};

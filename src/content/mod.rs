//! Content module - the CMS post export and its loader

pub mod loader;
mod post;

pub use loader::{ContentLoader, ExportError};
pub use post::{Author, Category, Post};

pub mod config;
pub mod error;

// Dataset loading and the in-memory catalog
pub mod catalog;

// Ingredient matching and ranking
pub mod search;

// Outer surfaces
pub mod api;
pub mod cli;

// Re-exports
pub use catalog::{Catalog, CatalogStore};
pub use config::Settings;
pub use error::{Error, LoadError, Result};
pub use search::{search, SearchRequest};

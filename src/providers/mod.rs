pub mod openai;

// Re-export the cache for providers to easily use
pub use crate::core::cache::Cache;

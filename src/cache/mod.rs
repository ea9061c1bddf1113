//! Cache module - hierarchical directory-backed artifact cache
//!
//! Provides:
//! - Cache node lifecycle and subcache composition (node)
//! - CSV/JSON artifact storage and file resolution (store)
//! - Error taxonomy (error)

pub mod error;
pub mod node;
pub mod store;

pub use error::CacheError;
pub use node::Cache;

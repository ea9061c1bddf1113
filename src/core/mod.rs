//! Core module - shared utilities
//!
//! Provides:
//! - Path resolution helpers (paths)

pub mod paths;

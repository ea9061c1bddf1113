//! Cache error taxonomy

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by cache operations.
///
/// `Io` and `Serialize` are fatal and always propagate. The two `NotFound`
/// variants are recoverable by design: the public lookup entry points
/// (`Cache::file_path`, `Cache::subcache`) catch them internally and return
/// `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Directory or file creation/deletion failed at the filesystem level.
    #[error("cache I/O failed at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A named file was looked up in a cache directory but does not exist.
    #[error("file {name} does not exist in cache {cache}")]
    FileNotFound { cache: String, name: String },

    /// A subcache directory was looked up but does not exist.
    #[error("subcache {parent} > {name} does not exist")]
    SubcacheNotFound { parent: String, name: String },

    /// A JSON payload could not be serialized.
    #[error("failed to serialize JSON payload: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl CacheError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// True for the recoverable lookup-miss variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. } | Self::SubcacheNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_found() {
        let err = CacheError::FileNotFound {
            cache: "Cache".to_string(),
            name: "missing.csv".to_string(),
        };
        assert!(err.is_not_found());

        let err = CacheError::io("/tmp/x", io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display_includes_names() {
        let err = CacheError::SubcacheNotFound {
            parent: "Cache".to_string(),
            name: "Subcache 1".to_string(),
        };
        assert_eq!(err.to_string(), "subcache Cache > Subcache 1 does not exist");
    }
}

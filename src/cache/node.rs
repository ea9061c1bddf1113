//! Cache node - directory lifecycle, identity queries and subcache composition

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::cache::error::Result;
use crate::cache::CacheError;
use crate::core::paths;

/// One directory-backed cache node.
///
/// A `Cache` wraps a single directory on disk and optionally references the
/// cache it is nested under, forming a tree whose nodes are directories. The
/// filesystem, not the in-memory graph, is the source of truth: revisiting
/// the same directory constructs a new, independent instance.
#[derive(Debug, Clone)]
pub struct Cache {
    /// Absolute path this node owns; immutable after construction
    path: PathBuf,
    /// Back-reference to the owning cache; root caches have none
    parent: Option<Box<Cache>>,
}

impl Cache {
    /// Open or create a root cache directory.
    ///
    /// Relative names are anchored at the current working directory. An
    /// existing directory is left untouched unless `overwrite` is set, in
    /// which case its contents are irreversibly deleted and the directory
    /// recreated empty.
    pub fn new(dir: impl AsRef<Path>, overwrite: bool) -> Result<Self> {
        Self::construct(dir.as_ref(), overwrite, None)
    }

    fn construct(dir: &Path, overwrite: bool, parent: Option<Box<Cache>>) -> Result<Self> {
        let parent_path = parent.as_deref().map(Cache::path);
        let path =
            paths::resolve_target(dir, parent_path).map_err(|e| CacheError::io(dir, e))?;

        if path.exists() {
            if !path.is_dir() {
                return Err(CacheError::io(
                    &path,
                    io::Error::new(
                        io::ErrorKind::AlreadyExists,
                        "target exists and is not a directory",
                    ),
                ));
            }
            if overwrite {
                fs::remove_dir_all(&path).map_err(|e| CacheError::io(&path, e))?;
                fs::create_dir(&path).map_err(|e| CacheError::io(&path, e))?;
            }
        } else {
            // Non-recursive: subcache paths are always rooted under an
            // existing cache directory.
            fs::create_dir(&path).map_err(|e| CacheError::io(&path, e))?;
        }

        Ok(Self { path, parent })
    }

    /// Absolute directory path backing this cache.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final segment of the cache path.
    pub fn dir_name(&self) -> &str {
        paths::dir_name(&self.path)
    }

    /// The cache this one is nested under, if any.
    pub fn parent(&self) -> Option<&Cache> {
        self.parent.as_deref()
    }

    /// Create (or reopen) a subcache directly under this cache.
    ///
    /// Construction failures propagate as [`CacheError::Io`], same as
    /// [`Cache::new`].
    pub fn create_subcache(&self, dir: impl AsRef<Path>, overwrite: bool) -> Result<Cache> {
        let dir = dir.as_ref();
        if self.path.join(dir).exists() {
            info!(
                cache = self.dir_name(),
                subcache = %dir.display(),
                "subcache already exists"
            );
        } else {
            info!(
                cache = self.dir_name(),
                subcache = %dir.display(),
                "creating subcache"
            );
        }
        Self::construct(dir, overwrite, Some(Box::new(self.clone())))
    }

    /// Look up an existing subcache by directory name.
    ///
    /// Pure lookup: never creates. A missing directory is logged and
    /// reported as `Ok(None)`; only genuine I/O failures are errors.
    pub fn subcache(&self, dir: impl AsRef<Path>) -> Result<Option<Cache>> {
        match self.subcache_strict(dir.as_ref()) {
            Ok(cache) => Ok(Some(cache)),
            Err(err) if err.is_not_found() => {
                warn!("{err}");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn subcache_strict(&self, dir: &Path) -> Result<Cache> {
        let target = self.path.join(dir);
        if !target.exists() {
            return Err(CacheError::SubcacheNotFound {
                parent: self.dir_name().to_string(),
                name: dir.to_string_lossy().into_owned(),
            });
        }
        Self::construct(&target, false, Some(Box::new(self.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_creates_directory() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("Cache");

        let cache = Cache::new(&dir, false).unwrap();
        assert!(dir.is_dir());
        assert_eq!(cache.path(), dir);
        assert_eq!(cache.dir_name(), "Cache");
        assert!(cache.parent().is_none());
    }

    #[test]
    fn test_new_is_idempotent_without_overwrite() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("Cache");

        Cache::new(&dir, false).unwrap();
        fs::write(dir.join("keep.csv"), "row\n").unwrap();

        Cache::new(&dir, false).unwrap();
        Cache::new(&dir, false).unwrap();
        assert_eq!(fs::read_to_string(dir.join("keep.csv")).unwrap(), "row\n");
    }

    #[test]
    fn test_overwrite_destroys_prior_contents() {
        let temp = tempdir().unwrap();
        let dir = temp.path().join("Cache");

        Cache::new(&dir, false).unwrap();
        fs::write(dir.join("x.csv"), "stale\n").unwrap();
        fs::create_dir(dir.join("old-sub")).unwrap();

        Cache::new(&dir, true).unwrap();
        assert!(dir.is_dir());
        assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
    }

    #[test]
    fn test_new_fails_on_file_collision() {
        let temp = tempdir().unwrap();
        let target = temp.path().join("Cache");
        fs::write(&target, "not a directory").unwrap();

        let err = Cache::new(&target, false).unwrap_err();
        assert!(matches!(err, CacheError::Io { .. }));
    }

    #[test]
    fn test_new_fails_when_parent_missing() {
        let temp = tempdir().unwrap();
        // Creation is non-recursive, so a missing intermediate dir is fatal.
        let err = Cache::new(temp.path().join("a/b/Cache"), false).unwrap_err();
        assert!(matches!(err, CacheError::Io { .. }));
    }

    #[test]
    fn test_subcache_path_containment() {
        let temp = tempdir().unwrap();
        let root = Cache::new(temp.path().join("Cache"), false).unwrap();

        let sub = root.create_subcache("S1", false).unwrap();
        assert_eq!(sub.path(), root.path().join("S1"));
        assert_eq!(sub.dir_name(), "S1");
        assert_eq!(sub.parent().unwrap().path(), root.path());
    }

    #[test]
    fn test_create_subcache_reopens_existing() {
        let temp = tempdir().unwrap();
        let root = Cache::new(temp.path().join("Cache"), false).unwrap();

        let sub = root.create_subcache("S1", false).unwrap();
        fs::write(sub.path().join("keep.csv"), "row\n").unwrap();

        let reopened = root.create_subcache("S1", false).unwrap();
        assert_eq!(reopened.path(), sub.path());
        assert!(sub.path().join("keep.csv").exists());
    }

    #[test]
    fn test_create_subcache_overwrite_clears() {
        let temp = tempdir().unwrap();
        let root = Cache::new(temp.path().join("Cache"), false).unwrap();

        let sub = root.create_subcache("S1", false).unwrap();
        fs::write(sub.path().join("stale.csv"), "old\n").unwrap();

        let recreated = root.create_subcache("S1", true).unwrap();
        assert_eq!(fs::read_dir(recreated.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_subcache_lookup_miss_returns_none() {
        let temp = tempdir().unwrap();
        let root = Cache::new(temp.path().join("Cache"), false).unwrap();

        let missing = root.subcache("does-not-exist").unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_subcache_lookup_hit() {
        let temp = tempdir().unwrap();
        let root = Cache::new(temp.path().join("Cache"), false).unwrap();
        root.create_subcache("S1", false).unwrap();

        let sub = root.subcache("S1").unwrap().unwrap();
        assert_eq!(sub.path(), root.path().join("S1"));
        assert_eq!(sub.parent().unwrap().path(), root.path());
    }

    #[test]
    fn test_nested_subcaches() {
        let temp = tempdir().unwrap();
        let root = Cache::new(temp.path().join("Cache"), false).unwrap();

        let inner = root
            .create_subcache("a", false)
            .unwrap()
            .create_subcache("b", false)
            .unwrap();

        assert_eq!(inner.path(), root.path().join("a").join("b"));
        assert_eq!(inner.parent().unwrap().dir_name(), "a");
        assert_eq!(inner.parent().unwrap().parent().unwrap().dir_name(), "Cache");
    }
}

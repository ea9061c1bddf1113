//! Artifact storage - CSV/JSON persistence and shared file resolution

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::cache::error::Result;
use crate::cache::node::Cache;
use crate::cache::CacheError;

/// Extension given to delimited-text artifacts
pub const CSV_EXT: &str = "csv";
/// Extension given to structured artifacts
pub const JSON_EXT: &str = "json";

impl Cache {
    /// Store a delimited-text payload under `name.csv`.
    ///
    /// The payload is written verbatim; the caller owns row formatting and
    /// trailing newlines. With `overwrite` the file's contents are replaced
    /// wholesale, otherwise the payload is appended. Returns `Ok(false)`
    /// without writing when file resolution yields no usable path.
    pub fn store_csv(&self, name: &str, overwrite: bool, payload: &str) -> Result<bool> {
        let Some(file_path) = self.get_or_create_file(name, overwrite, CSV_EXT)? else {
            return Ok(false);
        };

        if overwrite {
            fs::write(&file_path, payload).map_err(|e| CacheError::io(&file_path, e))?;
        } else {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&file_path)
                .map_err(|e| CacheError::io(&file_path, e))?;
            file.write_all(payload.as_bytes())
                .map_err(|e| CacheError::io(&file_path, e))?;
        }
        Ok(true)
    }

    /// Store a structured payload under `name.json`, pretty-printed.
    ///
    /// JSON artifacts are always replaced wholesale; there is no append
    /// mode for structured data. Serialization failure is fatal, not a
    /// `false` return.
    pub fn store_json<T: Serialize>(&self, name: &str, payload: &T) -> Result<bool> {
        let Some(file_path) = self.get_or_create_file(name, true, JSON_EXT)? else {
            return Ok(false);
        };

        let json = serde_json::to_string_pretty(payload)?;
        fs::write(&file_path, json).map_err(|e| CacheError::io(&file_path, e))?;
        Ok(true)
    }

    /// Look up a cached file by its full on-disk name, extension included.
    ///
    /// A miss is logged and reported as `Ok(None)`; only genuine I/O
    /// failures (e.g. an unreadable cache directory) are errors.
    pub fn file_path(&self, name: &str) -> Result<Option<PathBuf>> {
        match self.find_file(name) {
            Ok(path) => Ok(Some(path)),
            Err(err) if err.is_not_found() => {
                warn!("{err}");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Resolve the backing file for an artifact, creating it empty if absent.
    ///
    /// The directory is probed for a regular file stored literally under the
    /// bare `name` first; only when none exists is `name.ext` synthesized.
    /// This differs deliberately from [`Cache::file_path`], which matches the
    /// full requested name.
    fn get_or_create_file(&self, name: &str, overwrite: bool, ext: &str) -> Result<Option<PathBuf>> {
        let file_path = match self.probe_file(name)? {
            Some(path) => path,
            None => self.path().join(format!("{name}.{ext}")),
        };

        if !file_path.exists() {
            info!(
                cache = self.dir_name(),
                file = %file_path.display(),
                "creating {} file",
                ext.to_uppercase()
            );
            fs::write(&file_path, "").map_err(|e| CacheError::io(&file_path, e))?;
        } else {
            if !file_path.is_file() {
                warn!(
                    cache = self.dir_name(),
                    file = %file_path.display(),
                    "resolved path is not a regular file"
                );
                return Ok(None);
            }
            info!(
                cache = self.dir_name(),
                file = %file_path.display(),
                "{} {} file",
                if overwrite { "overwriting" } else { "appending" },
                ext.to_uppercase()
            );
        }

        Ok(Some(file_path))
    }

    /// Linear scan for a regular file whose name equals `target` exactly.
    fn probe_file(&self, target: &str) -> Result<Option<PathBuf>> {
        let entries = fs::read_dir(self.path()).map_err(|e| CacheError::io(self.path(), e))?;
        for entry in entries {
            let entry = entry.map_err(|e| CacheError::io(self.path(), e))?;
            let file_type = entry.file_type().map_err(|e| CacheError::io(entry.path(), e))?;
            if file_type.is_file() && entry.file_name().to_string_lossy() == target {
                return Ok(Some(entry.path()));
            }
        }
        Ok(None)
    }

    fn find_file(&self, target: &str) -> Result<PathBuf> {
        self.probe_file(target)?.ok_or_else(|| CacheError::FileNotFound {
            cache: self.dir_name().to_string(),
            name: target.to_string(),
        })
    }
}

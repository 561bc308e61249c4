//! Inspection and pruning of a backend cache directory.
//!
//! Entries are stored as `<dir>/<mangled name>.<ext>`. Scanning decodes each
//! file stem; stems that fail to decode are treated as corrupted or foreign
//! files and can be evicted without touching valid entries.

use std::path::{Path, PathBuf};

use kcache_common::Arch;

use crate::error::CacheError;
use crate::mangle::{try_demangle_name, MangledName};
use crate::path::cache_path_by_arch;

/// A file in the cache directory whose name decoded successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Full path of the entry file.
    pub path: PathBuf,
    /// Decoded base name (usually the kernel name).
    pub base_name: String,
    /// Decoded fixed-length key.
    pub key: String,
}

/// Result of scanning a cache directory for one file extension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Files whose stems decoded, sorted by path.
    pub entries: Vec<CacheEntry>,
    /// Files with the scanned extension whose stems did not decode, sorted.
    pub invalid: Vec<PathBuf>,
}

/// One directory of cached kernel files.
#[derive(Debug, Clone)]
pub struct CacheDir {
    dir: PathBuf,
}

impl CacheDir {
    /// Creates a handle for an existing or not-yet-created directory.
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Creates a handle for the subdirectory `arch` uses under `root`.
    pub fn for_arch(root: &Path, arch: Arch) -> Self {
        Self {
            dir: cache_path_by_arch(root, arch),
        }
    }

    /// Returns the directory path.
    pub fn path(&self) -> &Path {
        &self.dir
    }

    /// Creates the directory if it does not exist.
    pub fn ensure_dir(&self) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| CacheError::Io {
            path: self.dir.clone(),
            source: e,
        })
    }

    /// Returns the file path for an entry directly inside this directory.
    ///
    /// Returns `None` if `key` has no mangled form (see [`MangledName::new`])
    /// or if the mangled name or `ext` contains a path separator, since such
    /// a file would land in a subdirectory that [`CacheDir::scan`] never visits.
    pub fn entry_path(&self, base_name: &str, key: &str, ext: &str) -> Option<PathBuf> {
        let stem = MangledName::new(base_name, key)?;
        if stem.as_str().chars().chain(ext.chars()).any(std::path::is_separator) {
            return None;
        }
        Some(self.dir.join(format!("{stem}.{ext}")))
    }

    /// Lists files with extension `ext`, splitting them into decodable
    /// entries and invalid names.
    ///
    /// A missing directory yields an empty report. Subdirectories and files
    /// with other extensions are ignored.
    pub fn scan(&self, ext: &str) -> Result<ScanReport, CacheError> {
        let mut report = ScanReport::default();
        if !self.dir.exists() {
            return Ok(report);
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| CacheError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        for entry in entries {
            let entry = entry.map_err(|e| CacheError::Io {
                path: self.dir.clone(),
                source: e,
            })?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(ext) {
                continue;
            }
            let decoded = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(try_demangle_name)
                .map(|d| (d.base_name.to_string(), d.key.to_string()));
            match decoded {
                Some((base_name, key)) => report.entries.push(CacheEntry {
                    path,
                    base_name,
                    key,
                }),
                None => {
                    tracing::debug!(path = %path.display(), "cache file name does not decode");
                    report.invalid.push(path);
                }
            }
        }

        // Sort for deterministic ordering
        report.entries.sort_by(|a, b| a.path.cmp(&b.path));
        report.invalid.sort();
        Ok(report)
    }

    /// Returns all decodable entries with the given base name.
    pub fn find(&self, base_name: &str, ext: &str) -> Result<Vec<CacheEntry>, CacheError> {
        let report = self.scan(ext)?;
        Ok(report
            .entries
            .into_iter()
            .filter(|e| e.base_name == base_name)
            .collect())
    }

    /// Deletes files with extension `ext` whose names do not decode.
    ///
    /// Returns the number of files removed. On error, files removed before
    /// the failing one stay removed.
    pub fn evict_invalid(&self, ext: &str) -> Result<usize, CacheError> {
        let report = self.scan(ext)?;
        for path in &report.invalid {
            remove(path)?;
        }
        Ok(report.invalid.len())
    }

    /// Deletes decodable entries whose key is not in `live_keys`.
    ///
    /// Invalid names are left alone; use [`CacheDir::evict_invalid`] for
    /// those. Returns the number of files removed. On error, files removed
    /// before the failing one stay removed.
    pub fn gc(&self, ext: &str, live_keys: &[&str]) -> Result<usize, CacheError> {
        let report = self.scan(ext)?;
        let mut removed = 0;
        for entry in &report.entries {
            if !live_keys.contains(&entry.key.as_str()) {
                remove(&entry.path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }
}

fn remove(path: &Path) -> Result<(), CacheError> {
    tracing::debug!(path = %path.display(), "removing cache file");
    std::fs::remove_file(path).map_err(|e| CacheError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mangle::mangle_name;
    use kcache_common::CacheKey;

    const EXT: &str = "tcb";

    fn make_dir() -> (tempfile::TempDir, CacheDir) {
        let tmp = tempfile::tempdir().unwrap();
        let dir = CacheDir::new(&tmp.path().join("llvm"));
        dir.ensure_dir().unwrap();
        (tmp, dir)
    }

    fn write_entry(dir: &CacheDir, base_name: &str, key: &CacheKey) -> PathBuf {
        let path = dir.entry_path(base_name, key.as_str(), EXT).unwrap();
        std::fs::write(&path, b"compiled kernel").unwrap();
        path
    }

    #[test]
    fn for_arch_uses_backend_subdir() {
        let dir = CacheDir::for_arch(Path::new("/cache"), Arch::Metal);
        assert_eq!(dir.path(), Path::new("/cache/metal"));
    }

    #[test]
    fn entry_path_format() {
        let (_tmp, dir) = make_dir();
        let key = CacheKey::digest(b"k");
        let path = dir.entry_path("fill", key.as_str(), EXT).unwrap();
        let expected = format!("{}.{EXT}", mangle_name("fill", key.as_str()));
        assert!(path.ends_with(expected));
    }

    #[test]
    fn entry_path_wrong_key_length() {
        let (_tmp, dir) = make_dir();
        assert!(dir.entry_path("fill", "short", EXT).is_none());
    }

    #[test]
    fn entry_path_rejects_path_separators() {
        let (_tmp, dir) = make_dir();
        let key = CacheKey::digest(b"x");
        assert!(dir.entry_path("ns/kern", key.as_str(), EXT).is_none());
        assert!(dir.entry_path("kern", key.as_str(), "a/tcb").is_none());
        if cfg!(windows) {
            assert!(dir.entry_path("ns\\kern", key.as_str(), EXT).is_none());
        }

        let slash_key = format!("/{}", &key.as_str()[1..]);
        assert!(dir.entry_path("kern", &slash_key, EXT).is_none());
    }

    #[test]
    fn every_written_entry_is_scanned() {
        let (_tmp, dir) = make_dir();
        let key = CacheKey::digest(b"x");
        let mut written = 0;
        for base_name in ["ns/kern", "ns-kern", "kern.v2", "snode_reader"] {
            if let Some(path) = dir.entry_path(base_name, key.as_str(), EXT) {
                std::fs::write(&path, b"x").unwrap();
                written += 1;
            }
        }
        assert_eq!(written, 3);
        assert_eq!(dir.scan(EXT).unwrap().entries.len(), 3);
        assert_eq!(dir.gc(EXT, &[]).unwrap(), 3);
        assert!(dir.scan(EXT).unwrap().entries.is_empty());
    }

    #[test]
    fn scan_missing_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = CacheDir::new(&tmp.path().join("nope"));
        assert_eq!(dir.scan(EXT).unwrap(), ScanReport::default());
    }

    #[test]
    fn scan_classifies_entries() {
        let (_tmp, dir) = make_dir();
        let key = CacheKey::digest(b"variant");
        let good = write_entry(&dir, "snode_writer", &key);

        let corrupted = dir.path().join(format!("snode_writer{key}_1.{EXT}"));
        std::fs::write(&corrupted, b"x").unwrap();
        let foreign = dir.path().join(format!("readme.{EXT}"));
        std::fs::write(&foreign, b"x").unwrap();
        std::fs::write(dir.path().join("metadata.json"), b"{}").unwrap();
        std::fs::create_dir(dir.path().join(format!("sub.{EXT}"))).unwrap();

        let report = dir.scan(EXT).unwrap();
        assert_eq!(
            report.entries,
            vec![CacheEntry {
                path: good,
                base_name: "snode_writer".to_string(),
                key: key.to_string(),
            }]
        );
        let mut invalid = vec![corrupted, foreign];
        invalid.sort();
        assert_eq!(report.invalid, invalid);
    }

    #[test]
    fn find_by_base_name() {
        let (_tmp, dir) = make_dir();
        write_entry(&dir, "add", &CacheKey::digest(b"f32"));
        write_entry(&dir, "add", &CacheKey::digest(b"f64"));
        write_entry(&dir, "mul", &CacheKey::digest(b"f32"));

        let found = dir.find("add", EXT).unwrap();
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|e| e.base_name == "add"));
        assert!(dir.find("sub", EXT).unwrap().is_empty());
    }

    #[test]
    fn evict_invalid_keeps_valid_entries() {
        let (_tmp, dir) = make_dir();
        let key = CacheKey::digest(b"v");
        let good = write_entry(&dir, "k", &key);
        let bad = dir.path().join(format!("garbage.{EXT}"));
        std::fs::write(&bad, b"x").unwrap();

        assert_eq!(dir.evict_invalid(EXT).unwrap(), 1);
        assert!(good.exists());
        assert!(!bad.exists());
        assert_eq!(dir.evict_invalid(EXT).unwrap(), 0);
    }

    #[test]
    fn gc_removes_dead_keys() {
        let (_tmp, dir) = make_dir();
        let live = CacheKey::digest(b"live");
        let dead = CacheKey::digest(b"dead");
        let live_path = write_entry(&dir, "k", &live);
        let dead_path = write_entry(&dir, "k", &dead);
        let bad = dir.path().join(format!("garbage.{EXT}"));
        std::fs::write(&bad, b"x").unwrap();

        let removed = dir.gc(EXT, &[live.as_str()]).unwrap();
        assert_eq!(removed, 1);
        assert!(live_path.exists());
        assert!(!dead_path.exists());
        assert!(bad.exists());
    }

    #[test]
    fn gc_missing_dir_returns_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = CacheDir::new(&tmp.path().join("nope"));
        assert_eq!(dir.gc(EXT, &[]).unwrap(), 0);
    }
}

//! Naming and layout of the kernel offline cache.
//!
//! Every cached, specialized kernel is stored under a single self-describing
//! file name produced by [`mangle_name`]: the kernel's base name, its
//! fixed-length key, and a checksum that lets [`try_demangle_name`] reject
//! corrupted or foreign names. [`cache_path_by_arch`] decides which backend
//! subdirectory holds the files, and [`CacheDir`] inspects and prunes one.

#![warn(missing_docs)]

pub mod dir;
pub mod error;
pub mod mangle;
pub mod path;

pub use dir::{CacheDir, CacheEntry, ScanReport};
pub use error::CacheError;
pub use kcache_common::{Arch, CacheKey, KEY_LENGTH};
pub use mangle::{
    mangle_name, try_demangle_name, DemangledName, MangledName, MIN_MANGLED_NAME_LENGTH,
    SEPARATOR,
};
pub use path::{arch_subdir, cache_path_by_arch};

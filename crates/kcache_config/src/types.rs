//! Configuration types deserialized from `kcache.toml`.

use kcache_common::Arch;
use serde::Deserialize;

/// Default root directory for offline cache files.
pub const DEFAULT_CACHE_PATH: &str = ".kcache";

/// The compile configuration relevant to the offline cache.
///
/// Every table is optional; an empty document yields the defaults
/// (x64 target, offline cache disabled, no IR printing).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CompileConfig {
    /// The backend kernels are compiled for.
    #[serde(default = "default_arch")]
    pub arch: Arch,
    /// Offline cache settings.
    #[serde(default)]
    pub offline_cache: OfflineCacheConfig,
    /// Diagnostic output options.
    #[serde(default)]
    pub debug: DebugConfig,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            arch: default_arch(),
            offline_cache: OfflineCacheConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

/// Offline cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OfflineCacheConfig {
    /// Whether compiled kernels are persisted to and loaded from disk.
    #[serde(default)]
    pub enabled: bool,
    /// Root directory of the cache; backend subdirectories live below it.
    #[serde(default = "default_cache_path")]
    pub file_path: String,
}

impl Default for OfflineCacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            file_path: default_cache_path(),
        }
    }
}

/// Options that dump intermediate representations while compiling.
///
/// Cached kernels skip compilation entirely, so none of these can be honored
/// while the offline cache is active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DebugConfig {
    /// Print the IR after every pass.
    #[serde(default)]
    pub print_ir: bool,
    /// Print the IR before any pass runs.
    #[serde(default)]
    pub print_preprocessed_ir: bool,
    /// Print the IR of generated field accessors.
    #[serde(default)]
    pub print_accessor_ir: bool,
}

impl DebugConfig {
    /// Returns `true` if any IR printing option is enabled.
    pub fn prints_ir(&self) -> bool {
        self.print_ir || self.print_preprocessed_ir || self.print_accessor_ir
    }
}

fn default_arch() -> Arch {
    Arch::X64
}

fn default_cache_path() -> String {
    DEFAULT_CACHE_PATH.to_string()
}

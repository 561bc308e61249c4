//! Snapshot of the environment variables the cache consults.

/// Environment variable that opts into the work-in-progress offline cache.
pub const WIP_OFFLINE_CACHE_VAR: &str = "KCACHE_WIP_OFFLINE_CACHE";

/// An immutable view of the cache-related environment.
///
/// Gate functions take this value instead of reading the process environment,
/// so the same decision logic can be driven from tests or embedding hosts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheEnv {
    /// Value of [`WIP_OFFLINE_CACHE_VAR`], if set and valid Unicode.
    pub wip_offline_cache: Option<String>,
}

impl CacheEnv {
    /// Reads the relevant variables from the current process environment.
    pub fn from_process() -> Self {
        Self {
            wip_offline_cache: std::env::var(WIP_OFFLINE_CACHE_VAR).ok(),
        }
    }

    /// Builds a snapshot with the work-in-progress switch set to `value`.
    pub fn with_wip_offline_cache(value: impl Into<String>) -> Self {
        Self {
            wip_offline_cache: Some(value.into()),
        }
    }
}

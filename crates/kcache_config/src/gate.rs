//! Decisions about whether the offline cache may be used.

use crate::env::CacheEnv;
use crate::types::CompileConfig;

/// Returns `config` with the offline cache turned off if IR printing is requested.
///
/// A kernel loaded from the cache is never compiled, so the IR dumps the user
/// asked for would silently not appear. When both are enabled the cache loses
/// and a warning is emitted.
pub fn disable_offline_cache_if_needed(mut config: CompileConfig) -> CompileConfig {
    if config.offline_cache.enabled && config.debug.prints_ir() {
        config.offline_cache.enabled = false;
        tracing::warn!(
            "disabling offline_cache because print_preprocessed_ir, print_ir or \
             print_accessor_ir is enabled"
        );
    }
    config
}

/// Returns `true` if the work-in-progress offline cache path should be taken.
///
/// Requires both the caller's `enable_hint` (normally the effective
/// `offline_cache.enabled` flag) and the environment switch set to exactly `"1"`.
pub fn enabled_wip_offline_cache(enable_hint: bool, env: &CacheEnv) -> bool {
    enable_hint && env.wip_offline_cache.as_deref() == Some("1")
}

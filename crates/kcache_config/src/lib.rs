//! Compile configuration and feature gates for the kernel offline cache.
//!
//! This crate reads the `kcache.toml` configuration into a strongly-typed
//! [`CompileConfig`] and decides, from that value and an explicit
//! [`CacheEnv`] snapshot, whether the offline cache (or its work-in-progress
//! variant) is active.

#![warn(missing_docs)]

pub mod env;
pub mod error;
pub mod gate;
pub mod loader;
pub mod types;

pub use env::{CacheEnv, WIP_OFFLINE_CACHE_VAR};
pub use error::ConfigError;
pub use gate::{disable_offline_cache_if_needed, enabled_wip_offline_cache};
pub use loader::{load_config, load_config_from_str};
pub use types::*;

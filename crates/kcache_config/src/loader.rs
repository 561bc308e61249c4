//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::CompileConfig;
use std::path::Path;

/// Loads and validates a `kcache.toml` configuration from a project directory.
///
/// Reads `<project_dir>/kcache.toml`, parses it, and validates required fields.
pub fn load_config(project_dir: &Path) -> Result<CompileConfig, ConfigError> {
    let config_path = project_dir.join("kcache.toml");
    let content = std::fs::read_to_string(&config_path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `kcache.toml` configuration from a string.
pub fn load_config_from_str(content: &str) -> Result<CompileConfig, ConfigError> {
    let config: CompileConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &CompileConfig) -> Result<(), ConfigError> {
    if config.offline_cache.enabled && config.offline_cache.file_path.trim().is_empty() {
        return Err(ConfigError::MissingField(
            "offline_cache.file_path".to_string(),
        ));
    }
    Ok(())
}

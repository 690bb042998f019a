use std::sync::OnceLock;

use super::StaticConfig;
use crate::errors::Result;

static CONFIG: OnceLock<StaticConfig> = OnceLock::new();

/// Get the global configuration instance
pub fn get_config() -> &'static StaticConfig {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
}

/// Initialize the global configuration
///
/// Loads `path` (or `config.toml` in the current directory when `None`,
/// falling back to defaults if that file is absent), then applies
/// environment overrides. Later calls return the first loaded value.
pub fn init_config(path: Option<&str>) -> Result<&'static StaticConfig> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }
    let loaded = StaticConfig::load(path)?;
    Ok(CONFIG.get_or_init(|| loaded))
}

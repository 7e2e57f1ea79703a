// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::UserConfig;
use crate::errors::Result;

/// Load `config.toml` from the given path, falling back to defaults when the
/// file does not exist.
///
/// A file that exists but fails to parse is a configuration error; silently
/// ignoring it would mask typos in user overrides.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<UserConfig> {
    let path = path.as_ref();
    if !path.is_file() {
        debug!(path = ?path, "no user config file; using defaults");
        return Ok(UserConfig::default());
    }

    let contents = fs::read_to_string(path)?;
    let config: UserConfig = toml::from_str(&contents)?;
    Ok(config)
}

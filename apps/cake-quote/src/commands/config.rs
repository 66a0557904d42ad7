//! # Config Commands
//!
//! Commands for reading and creating the configuration file.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ApiError;
use crate::state::{AppConfig, ConfigState};

/// Gets the current application configuration.
///
/// ## When Used
/// - `cake-quote config show`
/// - Quote header (business name) and currency formatting
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}

/// Writes a config file holding the defaults.
///
/// Refuses to overwrite an existing file unless `force` is set.
pub fn init_config(path: Option<&Path>, force: bool) -> Result<PathBuf, ApiError> {
    debug!(?path, force, "init_config command");
    let target = match path {
        Some(path) => path.to_path_buf(),
        None => crate::state::default_config_path()
            .ok_or_else(|| ApiError::internal("No config directory available on this platform"))?,
    };

    if target.exists() && !force {
        return Err(ApiError::validation(format!(
            "{} already exists (use --force to overwrite)",
            target.display()
        )));
    }

    AppConfig::default()
        .save(Some(&target))
        .map_err(|e| ApiError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cake-quote.toml");

        assert_eq!(init_config(Some(&path), false).unwrap(), path);
        let loaded = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(loaded.business_name, AppConfig::default().business_name);
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("cake-quote.toml");
        std::fs::write(&path, "business_name = \"Mine\"\n").unwrap();

        let err = init_config(Some(&path), false).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(init_config(Some(&path), true).is_ok());
    }
}

//! ConfigLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::ResgenConfig;
use crate::error::GenError;
use std::path::Path;

/// Configuration loader facade.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from files and environment.
    pub fn load(workspace_root: &Path) -> Result<ResgenConfig, GenError> {
        Ok(MergeService::load(workspace_root)?)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> Result<ResgenConfig, GenError> {
        if !path.exists() {
            return Err(GenError::ConfigError(format!(
                "Config file not found: {}",
                path.display()
            )));
        }
        Ok(MergeService::load_from_file(path)?)
    }
}

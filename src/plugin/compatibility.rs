//! Version Compatibility Checker
//!
//! Validates the API version a plugin declares against the host's.

use crate::plugin::traits::PluginInfo;
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::version::{get_api_version, major_version};

/// Checker for plugin version compatibility
#[derive(Debug, Clone, Copy)]
pub struct VersionCompatibilityChecker {
    api_version: i64,
}

impl VersionCompatibilityChecker {
    pub fn new(api_version: i64) -> Self {
        Self { api_version }
    }

    pub fn api_version(&self) -> i64 {
        self.api_version
    }

    /// Same major version (year) is compatible
    pub fn is_api_compatible(&self, plugin_api_version: i64) -> bool {
        major_version(self.api_version) == major_version(plugin_api_version)
    }

    pub fn check_plugin_compatibility(&self, plugin_info: &PluginInfo) -> PluginResult<()> {
        if !self.is_api_compatible(plugin_info.api_version) {
            return Err(PluginError::version_incompatible(format!(
                "Plugin '{}' requires API version {} but current version is {}",
                plugin_info.name,
                plugin_info.api_version,
                self.api_version
            )));
        }
        Ok(())
    }
}

impl Default for VersionCompatibilityChecker {
    fn default() -> Self {
        Self::new(get_api_version())
    }
}

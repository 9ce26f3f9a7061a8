//! Plugin Registry
//!
//! Owns plugin instances by name and routes invocations to them.

use std::collections::BTreeMap;
use std::sync::Arc;
use log::{debug, info};
use serde_json::Value;
use crate::plugin::action::ActionResult;
use crate::plugin::compatibility::VersionCompatibilityChecker;
use crate::plugin::error::{PluginError, PluginResult};
use crate::plugin::traits::Plugin;

/// Registry for managing plugin instances
pub struct PluginRegistry {
    plugins: BTreeMap<String, Arc<dyn Plugin>>,
    checker: VersionCompatibilityChecker,
}

impl PluginRegistry {
    /// Registry checking against the host's build-time API version
    pub fn new() -> Self {
        Self::with_checker(VersionCompatibilityChecker::default())
    }

    pub fn with_checker(checker: VersionCompatibilityChecker) -> Self {
        Self { plugins: BTreeMap::new(), checker }
    }

    /// Register a plugin; refuses duplicate names and incompatible API versions
    pub fn register_plugin(&mut self, plugin: Arc<dyn Plugin>) -> PluginResult<()> {
        let info = plugin.plugin_info();
        let name = info.name.clone();

        if self.plugins.contains_key(&name) {
            return Err(PluginError::plugin_already_registered(&name));
        }
        self.checker.check_plugin_compatibility(info)?;

        info!("Registered plugin {} v{}", name, info.version);
        self.plugins.insert(name, plugin);
        Ok(())
    }

    pub fn unregister_plugin(&mut self, name: &str) -> PluginResult<Arc<dyn Plugin>> {
        self.plugins.remove(name).ok_or_else(|| PluginError::plugin_not_found(name))
    }

    pub fn get_plugin(&self, name: &str) -> Option<Arc<dyn Plugin>> {
        self.plugins.get(name).cloned()
    }

    /// Registered plugin names, sorted
    pub fn list_plugins(&self) -> Vec<String> {
        self.plugins.keys().cloned().collect()
    }

    /// Plugins offering the named action, sorted by plugin name
    pub fn get_plugins_with_action(&self, action: &str) -> Vec<String> {
        self.plugins
            .iter()
            .filter(|(_, plugin)| plugin.supports_action(action))
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Invoke an action by name on a registered plugin.
    ///
    /// An unknown plugin is an error; everything past that follows the
    /// plugin's dispatcher and yields `Ok(None)` on failure.
    pub fn invoke(&self, plugin: &str, action: &str, args: Vec<Value>) -> PluginResult<Option<ActionResult>> {
        let target = self.plugins.get(plugin).ok_or_else(|| PluginError::plugin_not_found(plugin))?;
        debug!("Invoking {}::{} with {} argument(s)", plugin, action, args.len());
        Ok(target.activate_action_by_name(action, args))
    }

    pub fn plugin_count(&self) -> usize {
        self.plugins.len()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        Self::new()
    }
}

//! Core Plugin Traits
//!
//! A plugin answers typed actions. `handle_action` may fail; the provided
//! `activate_action*` methods are the dispatcher and never do.

use std::path::Path;
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::options::RecordSummary;
use super::action::{ActionDescription, ActionResult, PluginAction};
use super::error::PluginResult;

/// Core plugin interface that all plugins must implement
pub trait Plugin: Send + Sync {
    /// Get plugin metadata information
    fn plugin_info(&self) -> &PluginInfo;

    /// Load options from `options_dir`; plugins without options do nothing
    fn initialize(&self, _options_dir: &Path) -> PluginResult<()> {
        Ok(())
    }

    /// Active option records, in order; plugins without options have none
    fn option_records(&self) -> Vec<RecordSummary> {
        Vec::new()
    }

    /// Actions this plugin answers
    fn list_actions(&self) -> Vec<ActionDescription>;

    /// Execute one action. `Ok(None)` means the action has nothing to return.
    fn handle_action(&self, action: PluginAction) -> PluginResult<Option<ActionResult>>;

    /// Execute one action; failures are logged and become `None`
    fn activate_action(&self, action: PluginAction) -> Option<ActionResult> {
        let name = action.name();
        match self.handle_action(action) {
            Ok(result) => result,
            Err(e) => {
                error!("Plugin '{}' failed on action '{}': {}", self.plugin_info().name, name, e);
                None
            }
        }
    }

    /// Execute an action given by name with positional JSON arguments
    fn activate_action_by_name(&self, name: &str, args: Vec<Value>) -> Option<ActionResult> {
        match PluginAction::from_invocation(name, args) {
            Ok(Some(action)) => self.activate_action(action),
            Ok(None) => {
                debug!("Plugin '{}' has no action '{}'", self.plugin_info().name, name);
                None
            }
            Err(e) => {
                warn!("Plugin '{}': {}", self.plugin_info().name, e);
                None
            }
        }
    }

    /// Check if plugin lists an action
    fn supports_action(&self, name: &str) -> bool {
        self.list_actions().iter().any(|a| a.name == name)
    }
}

/// Plugin metadata and information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Plugin name (unique identifier)
    pub name: String,

    pub version: String,

    /// API version this plugin targets (YYYYMMDD)
    pub api_version: i64,

    pub description: String,

    pub author: String,

    pub license: Option<String>,
}

impl PluginInfo {
    pub fn new<N, V, D, A>(name: N, version: V, api_version: i64, description: D, author: A) -> Self
    where
        N: Into<String>,
        V: Into<String>,
        D: Into<String>,
        A: Into<String>,
    {
        Self {
            name: name.into(),
            version: version.into(),
            api_version,
            description: description.into(),
            author: author.into(),
            license: None,
        }
    }

    pub fn with_license<S: Into<String>>(mut self, license: S) -> Self {
        self.license = Some(license.into());
        self
    }
}

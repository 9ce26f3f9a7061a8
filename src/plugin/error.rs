//! Plugin Error Types
//!
//! Error handling for plugin registration and action execution.

use thiserror::Error;
use crate::options::OptionsError;

/// Result type for plugin operations
pub type PluginResult<T> = Result<T, PluginError>;

/// Error types for plugin operations
#[derive(Error, Debug, Clone)]
pub enum PluginError {
    /// Action execution error
    #[error("Plugin execution error: {message}")]
    ExecutionFailed { message: String },

    /// Plugin not found
    #[error("Plugin not found: {plugin_name}")]
    PluginNotFound { plugin_name: String },

    /// Plugin already registered
    #[error("Plugin already registered: {plugin_name}")]
    PluginAlreadyRegistered { plugin_name: String },

    /// Version compatibility error
    #[error("Version compatibility error: {message}")]
    VersionIncompatible { message: String },

    /// Action invoked with the wrong number or kind of arguments
    #[error("Invalid arguments for action '{action}': {message}")]
    InvalidArguments { action: String, message: String },

    /// Visual extension session unknown
    #[error("Session not found: {session_id}")]
    SessionNotFound { session_id: String },

    /// Options could not be loaded or upgraded
    #[error("Plugin options error: {0}")]
    Options(#[from] OptionsError),
}

impl PluginError {
    /// Create an execution error
    pub fn execution_failed<S: Into<String>>(message: S) -> Self {
        Self::ExecutionFailed { message: message.into() }
    }

    /// Create a plugin not found error
    pub fn plugin_not_found<S: Into<String>>(plugin_name: S) -> Self {
        Self::PluginNotFound { plugin_name: plugin_name.into() }
    }

    /// Create a plugin already registered error
    pub fn plugin_already_registered<S: Into<String>>(plugin_name: S) -> Self {
        Self::PluginAlreadyRegistered { plugin_name: plugin_name.into() }
    }

    /// Create a version incompatible error
    pub fn version_incompatible<S: Into<String>>(message: S) -> Self {
        Self::VersionIncompatible { message: message.into() }
    }

    /// Create an invalid arguments error
    pub fn invalid_arguments<A: Into<String>, S: Into<String>>(action: A, message: S) -> Self {
        Self::InvalidArguments { action: action.into(), message: message.into() }
    }

    /// Create a session not found error
    pub fn session_not_found<S: Into<String>>(session_id: S) -> Self {
        Self::SessionNotFound { session_id: session_id.into() }
    }
}

impl From<serde_json::Error> for PluginError {
    fn from(err: serde_json::Error) -> Self {
        PluginError::execution_failed(format!("JSON error: {}", err))
    }
}

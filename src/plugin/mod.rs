//! Plugin System Module
//!
//! Plugins answer a fixed vocabulary of typed actions. The registry routes
//! invocations by plugin name and checks API compatibility on registration.
//!
//! # Example Usage
//!
//! ```no_run
//! use std::sync::Arc;
//! use aasx_plugins::plugin::{PluginRegistry, builtin::GenericFormsPlugin};
//!
//! let mut registry = PluginRegistry::new();
//! registry.register_plugin(Arc::new(GenericFormsPlugin::new())).unwrap();
//! let titles = registry.invoke("AasxPluginGenericForms", "get-list-new-submodel", vec![]).unwrap();
//! println!("{:?}", titles);
//! ```

pub mod action;
pub mod traits;
pub mod error;
pub mod events;
pub mod session;
pub mod registry;
pub mod compatibility;
pub mod version;
pub mod builtin;

#[cfg(test)]
pub mod tests;

// Re-export core types for easier access
pub use action::{
    ActionDescription, ActionResult, GeneratedSubmodel, LicenseBundle, PluginAction, PluginEvent,
    PluginEventKind, PluginEventReturn, SessionId, VisualExtension, ACTION_NAMES,
};
pub use traits::{Plugin, PluginInfo};
pub use error::{PluginError, PluginResult};
pub use events::PluginEventStack;
pub use session::SessionRegistry;
pub use registry::PluginRegistry;
pub use compatibility::VersionCompatibilityChecker;

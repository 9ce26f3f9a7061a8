//! Built-in Plugin Implementations

use std::sync::Arc;
use crate::plugin::Plugin;

pub mod generic_forms;

pub use generic_forms::GenericFormsPlugin;

/// Names of all built-in plugins
pub fn get_builtin_plugins() -> Vec<&'static str> {
    vec![generic_forms::PLUGIN_NAME]
}

/// Create a built-in plugin by name
pub fn create_builtin_plugin(name: &str) -> Option<Arc<dyn Plugin>> {
    match name {
        generic_forms::PLUGIN_NAME => Some(Arc::new(GenericFormsPlugin::new())),
        _ => None,
    }
}

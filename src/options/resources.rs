//! Embedded JSON resources
//!
//! Resources are compiled into the binary and addressed as
//! `<root namespace>.Resources.<Name>.json`.

use super::error::{OptionsError, OptionsResult};

/// Root namespace of this crate's resources
pub const RESOURCE_NAMESPACE: &str = "aasx_plugins";

const RESOURCES: &[(&str, &str)] = &[(
    "aasx_plugins.Resources.Nameplate.json",
    include_str!("../../resources/Nameplate.json"),
)];

/// Full resource name for a short name such as `Nameplate`
pub fn resource_name(name: &str) -> String {
    format!("{}.Resources.{}.json", RESOURCE_NAMESPACE, name)
}

/// Accepts either a short or a full resource name
pub fn full_name(name: &str) -> String {
    if name.ends_with(".json") {
        name.to_string()
    } else {
        resource_name(name)
    }
}

/// Text of a resource, by full or short name
pub fn get(name: &str) -> OptionsResult<&'static str> {
    let full = full_name(name);
    RESOURCES
        .iter()
        .find(|(key, _)| *key == full)
        .map(|(_, text)| *text)
        .ok_or_else(|| OptionsError::resource_not_found(full))
}

/// All registered resource names
pub fn names() -> impl Iterator<Item = &'static str> {
    RESOURCES.iter().map(|(name, _)| *name)
}

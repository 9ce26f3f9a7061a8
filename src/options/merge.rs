//! Options merging
//!
//! Merging is list concatenation: incoming records are appended after the
//! current ones, in their own order, without de-duplication. Lookups take the
//! first match, so whatever was there first keeps precedence.

use std::any::Any;
use log::debug;
use super::record::PluginOptions;

/// Append all records of `incoming` to `current`
pub fn merge_options<T: PluginOptions>(current: &mut T, incoming: T) {
    let mut incoming = incoming;
    let added = incoming.records().len();
    current.records_mut().append(incoming.records_mut());
    debug!(
        "Merged {} record(s) into {} options, now {}",
        added,
        T::schema_name(),
        current.records().len()
    );
}

/// Type-erased merge for callers holding options of unknown concrete type.
///
/// Returns `false`, leaving `current` untouched, when `incoming` is not a `T`.
pub fn merge_any<T: PluginOptions>(current: &mut T, incoming: &dyn Any) -> bool {
    match incoming.downcast_ref::<T>() {
        Some(options) => {
            merge_options(current, options.clone());
            true
        }
        None => {
            debug!("Ignoring merge of non-{} options", T::schema_name());
            false
        }
    }
}

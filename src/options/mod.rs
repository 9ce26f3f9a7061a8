//! Plugin Options Module
//!
//! Loading, upgrading, merging and querying plugin options.
//!
//! # Example Usage
//!
//! ```no_run
//! use std::path::Path;
//! use aasx_plugins::options::OptionsLoader;
//! use aasx_plugins::plugin::builtin::generic_forms::{options::GenericFormOptions, legacy};
//!
//! let mappings = legacy::upgrade_mappings();
//! let loader = OptionsLoader::new("AasxPluginGenericForms", &mappings);
//! let options = loader.bootstrap(GenericFormOptions::builtin(), Path::new("./plugins"));
//! println!("{} records", options.records.len());
//! ```

pub mod error;
pub mod record;
pub mod upgrade;
pub mod loader;
pub mod merge;
pub mod lookup;
pub mod shared;
pub mod library;
pub mod resources;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{OptionsError, OptionsResult};
pub use record::{null_as_empty, OptionsRecord, PluginOptions, RecordSummary};
pub use upgrade::{select_mapping, upgrade_text, UpgradeMapping};
pub use loader::{OptionsLoader, ADDITIONAL_OPTIONS_FILE_SUFFIX, OPTIONS_FILE_SUFFIX};
pub use merge::{merge_any, merge_options};
pub use lookup::{find_by_semantic_id, find_by_tag, find_by_title};
pub use shared::SharedOptions;
pub use library::{embedded_library, Library, LibraryEntry};

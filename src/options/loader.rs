//! Options loader
//!
//! Per-plugin bootstrap of the active options:
//! 1. start from the built-in defaults,
//! 2. replace them with `<plugin>.options.json` when that file loads,
//! 3. merge each `<plugin>.add-options.json` / `<plugin>.*.add-options.json`
//!    that loads, in file-name order.
//!
//! Every failure is logged and leaves the options that were active before
//! the failing step in place.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use log::{debug, error, info};
use super::error::{OptionsError, OptionsResult};
use super::merge::merge_options;
use super::record::PluginOptions;
use super::upgrade::{upgrade_text, UpgradeMapping};

/// Suffix of the file that replaces the built-in defaults
pub const OPTIONS_FILE_SUFFIX: &str = ".options.json";

/// Suffix of files merged on top of the active options
pub const ADDITIONAL_OPTIONS_FILE_SUFFIX: &str = ".add-options.json";

/// Loads options for one plugin, upgrading legacy documents on the way
pub struct OptionsLoader<'a, T> {
    plugin_name: &'a str,
    mappings: &'a [UpgradeMapping<T>],
}

impl<'a, T: PluginOptions> OptionsLoader<'a, T> {
    pub fn new(plugin_name: &'a str, mappings: &'a [UpgradeMapping<T>]) -> Self {
        Self { plugin_name, mappings }
    }

    /// Path of the default options file inside `dir`
    pub fn options_file(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}{}", self.plugin_name, OPTIONS_FILE_SUFFIX))
    }

    /// Additional options files inside `dir`, sorted by file name
    pub fn additional_options_files(&self, dir: &Path) -> OptionsResult<Vec<PathBuf>> {
        let exact = format!("{}{}", self.plugin_name, ADDITIONAL_OPTIONS_FILE_SUFFIX);
        let prefix = format!("{}.", self.plugin_name);

        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(OptionsError::not_found(dir)),
            Err(e) => return Err(OptionsError::io(dir, e.to_string())),
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| {
                path.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| {
                        name == exact
                            || (name.starts_with(&prefix) && name.ends_with(ADDITIONAL_OPTIONS_FILE_SUFFIX))
                    })
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Run the upgrade pipeline on raw text
    pub fn load_text(&self, text: &str) -> OptionsResult<T> {
        upgrade_text(text, self.mappings)
    }

    /// Read and load one options file
    pub fn load_file(&self, path: &Path) -> OptionsResult<T> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => OptionsError::not_found(path),
            _ => OptionsError::io(path, e.to_string()),
        })?;
        self.load_text(&text)
    }

    /// Defaults, then the default options file, then additional files
    pub fn bootstrap(&self, defaults: T, dir: &Path) -> T {
        let mut options = defaults;

        let options_file = self.options_file(dir);
        match self.load_file(&options_file) {
            Ok(loaded) => {
                info!(
                    "Loaded {} record(s) for plugin '{}' from {}",
                    loaded.records().len(),
                    self.plugin_name,
                    options_file.display()
                );
                options = loaded;
            }
            Err(e) => self.report(&e, "default options"),
        }

        let additional = match self.additional_options_files(dir) {
            Ok(files) => files,
            Err(e) => {
                self.report(&e, "additional options");
                Vec::new()
            }
        };

        for path in additional {
            match self.load_file(&path) {
                Ok(loaded) => {
                    info!(
                        "Merging {} record(s) for plugin '{}' from {}",
                        loaded.records().len(),
                        self.plugin_name,
                        path.display()
                    );
                    merge_options(&mut options, loaded);
                }
                Err(e) => self.report(&e, "additional options"),
            }
        }

        options
    }

    fn report(&self, error: &OptionsError, what: &str) {
        if error.is_not_found() {
            debug!("No {} for plugin '{}': {}", what, self.plugin_name, error);
        } else {
            error!(
                "Failed to load {} for plugin '{}', keeping current options: {}",
                what, self.plugin_name, error
            );
        }
    }
}

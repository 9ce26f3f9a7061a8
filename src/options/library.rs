//! Definition libraries
//!
//! A library is a JSON object whose members are named entries; each entry
//! keeps its raw JSON text and is deserialized on demand. A top-level
//! `Version` (or `ReadVersion`) member describes the library itself and is
//! not an entry.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use log::{debug, warn};
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use super::error::{OptionsError, OptionsResult};
use super::resources;

const VERSION_MEMBERS: [&str; 2] = ["Version", "ReadVersion"];

/// One named entry of a library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryEntry {
    pub name: String,
    pub contents: String,
}

impl LibraryEntry {
    pub fn new<N: Into<String>, C: Into<String>>(name: N, contents: C) -> Self {
        Self { name: name.into(), contents: contents.into() }
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> OptionsResult<T> {
        serde_json::from_str(&self.contents)
            .map_err(|e| OptionsError::parse(self.name.as_str(), e.to_string()))
    }
}

/// Named entries, ordered by name
#[derive(Debug, Clone, Default)]
pub struct Library {
    version: Option<String>,
    entries: Vec<LibraryEntry>,
    index: HashMap<String, usize>,
}

impl Library {
    pub fn parse(text: &str) -> OptionsResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| OptionsError::parse("Library", e.to_string()))?;
        let Value::Object(members) = value else {
            return Err(OptionsError::parse("Library", "expected a JSON object"));
        };

        let mut library = Library::default();
        for (name, contents) in members {
            if VERSION_MEMBERS.contains(&name.as_str()) {
                library.version = Some(match contents {
                    Value::String(s) => s,
                    other => other.to_string(),
                });
                continue;
            }
            library.index.insert(name.clone(), library.entries.len());
            library.entries.push(LibraryEntry::new(name, contents.to_string()));
        }

        debug!("Parsed library with {} entries", library.entries.len());
        Ok(library)
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn get(&self, name: &str) -> Option<&LibraryEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn entries(&self) -> &[LibraryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Deserialize the named entry
    pub fn retrieve<T: DeserializeOwned>(&self, name: &str) -> OptionsResult<T> {
        self.get(name)
            .ok_or_else(|| OptionsError::resource_not_found(name))?
            .deserialize()
    }
}

type LibraryCache = Mutex<HashMap<String, Arc<Library>>>;

fn cache() -> &'static LibraryCache {
    static CACHE: OnceLock<LibraryCache> = OnceLock::new();
    CACHE.get_or_init(|| Mutex::new(HashMap::new()))
}

/// Library parsed from an embedded resource, cached for the process lifetime
pub fn embedded_library(name: &str) -> OptionsResult<Arc<Library>> {
    let full = resources::full_name(name);
    let mut cache = cache().lock();
    if let Some(library) = cache.get(&full) {
        return Ok(Arc::clone(library));
    }

    let library = Library::parse(resources::get(&full)?).map_err(|e| {
        warn!("Embedded library {} is invalid: {}", full, e);
        e
    })?;
    let library = Arc::new(library);
    cache.insert(full, Arc::clone(&library));
    Ok(library)
}

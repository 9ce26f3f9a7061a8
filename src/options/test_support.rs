//! Small options schema shared by the options unit tests

use serde::{Deserialize, Serialize};
use crate::aas::Key;
use super::record::{null_as_empty, OptionsRecord, PluginOptions};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestRecord {
    pub tag: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub semantic_id: Option<Key>,
}

impl TestRecord {
    pub fn new(tag: &str) -> Self {
        Self { tag: tag.to_string(), title: format!("Title {}", tag), semantic_id: None }
    }

    pub fn with_semantic_id(mut self, value: &str) -> Self {
        self.semantic_id = Some(Key::global(value));
        self
    }
}

impl OptionsRecord for TestRecord {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn key_semantic_id(&self) -> Option<&Key> {
        self.semantic_id.as_ref()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestOptions {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub records: Vec<TestRecord>,
}

impl TestOptions {
    pub fn with_tags(tags: &[&str]) -> Self {
        Self { records: tags.iter().map(|t| TestRecord::new(t)).collect() }
    }

    pub fn tags(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.tag.as_str()).collect()
    }
}

impl PluginOptions for TestOptions {
    type Record = TestRecord;

    fn schema_name() -> &'static str {
        "TestOptions"
    }

    fn records(&self) -> &[TestRecord] {
        &self.records
    }

    fn records_mut(&mut self) -> &mut Vec<TestRecord> {
        &mut self.records
    }
}

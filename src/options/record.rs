//! Options records and option roots
//!
//! An options root is an ordered list of records. Records have no identity
//! beyond their position; lookups take the first match.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use crate::aas::Key;

/// A configuration fragment scoped to one submodel template
pub trait OptionsRecord: Clone + Send + Sync {
    /// Short tag, e.g. "SMP"
    fn tag(&self) -> &str;

    /// Human readable title, used when offering new submodels
    fn title(&self) -> &str;

    /// Semantic id of the template this record describes, if any
    fn key_semantic_id(&self) -> Option<&Key>;
}

/// What a host shows of a record without knowing its plugin's schema
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSummary {
    pub tag: String,
    pub title: String,
    pub semantic_id: Option<Key>,
}

impl RecordSummary {
    pub fn of<R: OptionsRecord>(record: &R) -> Self {
        Self {
            tag: record.tag().to_string(),
            title: record.title().to_string(),
            semantic_id: record.key_semantic_id().cloned(),
        }
    }
}

/// Root object of a plugin's options document
pub trait PluginOptions:
    Serialize + DeserializeOwned + Clone + Default + Send + Sync + 'static
{
    type Record: OptionsRecord;

    /// Name of the schema, used in log and error messages
    fn schema_name() -> &'static str;

    fn records(&self) -> &[Self::Record];

    fn records_mut(&mut self) -> &mut Vec<Self::Record>;

    fn summaries(&self) -> Vec<RecordSummary> {
        self.records().iter().map(RecordSummary::of).collect()
    }
}

/// Deserializes a `null` list as an empty one
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

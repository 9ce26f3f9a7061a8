//! Generic forms options schema

use serde::{Deserialize, Serialize};
use crate::aas::{ConceptDescription, Key, KeyType};
use crate::options::{null_as_empty, OptionsRecord, PluginOptions};
use super::form_desc::{FormDescSubmodel, FormDescSubmodelElement, FormMultiplicity};

/// One form: a tag, a title shown in "new submodel" lists and the template
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenericFormsOptionsRecord {
    pub form_tag: String,
    #[serde(default)]
    pub form_title: String,
    #[serde(default)]
    pub form_submodel: FormDescSubmodel,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub concept_descriptions: Vec<ConceptDescription>,
}

impl OptionsRecord for GenericFormsOptionsRecord {
    fn tag(&self) -> &str {
        &self.form_tag
    }

    fn title(&self) -> &str {
        &self.form_title
    }

    fn key_semantic_id(&self) -> Option<&Key> {
        self.form_submodel.key_semantic_id.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenericFormOptions {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub records: Vec<GenericFormsOptionsRecord>,
}

impl PluginOptions for GenericFormOptions {
    type Record = GenericFormsOptionsRecord;

    fn schema_name() -> &'static str {
        "GenericFormOptions"
    }

    fn records(&self) -> &[Self::Record] {
        &self.records
    }

    fn records_mut(&mut self) -> &mut Vec<Self::Record> {
        &mut self.records
    }
}

/// Semantic id of the built-in "SMP" form
pub const SMP_SEMANTIC_ID: &str = "http://admin-shell.io/sandbox/SMP/1/0";

impl GenericFormOptions {
    /// Options the plugin starts from before any file is read
    pub fn builtin() -> Self {
        let form = FormDescSubmodel {
            form_title: "Sample Submodel Template".to_string(),
            form_info: Some("Minimal form shipped with the plugin".to_string()),
            key_semantic_id: Some(Key::new(KeyType::Submodel, SMP_SEMANTIC_ID)),
            preset_id_short: "SMP".to_string(),
            submodel_elements: vec![
                FormDescSubmodelElement::property("Name", FormMultiplicity::One),
                FormDescSubmodelElement::property("Remarks", FormMultiplicity::ZeroToMany),
            ],
        };
        Self {
            records: vec![GenericFormsOptionsRecord {
                form_tag: "SMP".to_string(),
                form_title: "Sample Submodel Template".to_string(),
                form_submodel: form,
                concept_descriptions: Vec::new(),
            }],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_single_smp_record() {
        let options = GenericFormOptions::builtin();
        assert_eq!(options.records.len(), 1);
        assert_eq!(options.records[0].tag(), "SMP");
        assert_eq!(options.records[0].key_semantic_id().unwrap().value, SMP_SEMANTIC_ID);
    }

    #[test]
    fn test_pascal_case_round_trip() {
        let options = GenericFormOptions::builtin();
        let json = serde_json::to_string(&options).unwrap();
        assert!(json.contains("\"Records\""));
        assert!(json.contains("\"FormTag\":\"SMP\""));
        assert!(json.contains("\"$type\":\"FormProperty\""));
        let back: GenericFormOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_null_records() {
        let options: GenericFormOptions = serde_json::from_str(r#"{"Records": null}"#).unwrap();
        assert!(options.records.is_empty());
    }
}

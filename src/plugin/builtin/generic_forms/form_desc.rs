//! Form descriptions
//!
//! A form description is the template of a submodel: which elements it has,
//! how often each may occur and which semantic id identifies it. Elements
//! are tagged by `$type`.

use serde::{Deserialize, Serialize};
use crate::aas::Key;
use crate::options::null_as_empty;

/// How often an element may occur in an instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FormMultiplicity {
    ZeroToOne,
    #[default]
    One,
    ZeroToMany,
    OneToMany,
}

impl FormMultiplicity {
    /// At least one occurrence is required
    pub fn is_mandatory(self) -> bool {
        matches!(self, FormMultiplicity::One | FormMultiplicity::OneToMany)
    }
}

/// Fields every form element carries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormElementHeader {
    #[serde(default)]
    pub form_title: String,
    #[serde(default)]
    pub form_info: Option<String>,
    #[serde(default)]
    pub key_semantic_id: Option<Key>,
    #[serde(default)]
    pub preset_id_short: String,
    #[serde(default)]
    pub multiplicity: FormMultiplicity,
}

impl FormElementHeader {
    pub fn new<S: Into<String>>(preset_id_short: S, multiplicity: FormMultiplicity) -> Self {
        let preset_id_short = preset_id_short.into();
        Self {
            form_title: preset_id_short.clone(),
            preset_id_short,
            multiplicity,
            ..Self::default()
        }
    }

    pub fn with_semantic_id(mut self, key: Key) -> Self {
        self.key_semantic_id = Some(key);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum FormDescSubmodelElement {
    FormProperty {
        #[serde(flatten)]
        header: FormElementHeader,
        #[serde(rename = "ValueType", default = "default_value_type")]
        value_type: String,
        #[serde(rename = "PresetValue", default)]
        preset_value: Option<String>,
    },
    FormMultiLangProp {
        #[serde(flatten)]
        header: FormElementHeader,
    },
    FormFile {
        #[serde(flatten)]
        header: FormElementHeader,
        #[serde(rename = "PresetMimeType", default)]
        preset_mime_type: Option<String>,
    },
    FormReferenceElement {
        #[serde(flatten)]
        header: FormElementHeader,
    },
    FormSubmodelElementCollection {
        #[serde(flatten)]
        header: FormElementHeader,
        #[serde(rename = "Value", default, deserialize_with = "null_as_empty")]
        value: Vec<FormDescSubmodelElement>,
    },
}

fn default_value_type() -> String {
    "xs:string".to_string()
}

impl FormDescSubmodelElement {
    pub fn header(&self) -> &FormElementHeader {
        match self {
            FormDescSubmodelElement::FormProperty { header, .. }
            | FormDescSubmodelElement::FormMultiLangProp { header }
            | FormDescSubmodelElement::FormFile { header, .. }
            | FormDescSubmodelElement::FormReferenceElement { header }
            | FormDescSubmodelElement::FormSubmodelElementCollection { header, .. } => header,
        }
    }

    pub fn property<S: Into<String>>(id_short: S, multiplicity: FormMultiplicity) -> Self {
        FormDescSubmodelElement::FormProperty {
            header: FormElementHeader::new(id_short, multiplicity),
            value_type: default_value_type(),
            preset_value: None,
        }
    }
}

/// Template of a whole submodel
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FormDescSubmodel {
    #[serde(default)]
    pub form_title: String,
    #[serde(default)]
    pub form_info: Option<String>,
    #[serde(default)]
    pub key_semantic_id: Option<Key>,
    #[serde(default)]
    pub preset_id_short: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub submodel_elements: Vec<FormDescSubmodelElement>,
}

impl FormDescSubmodel {
    /// Number of element descriptions, collections included, at any depth
    pub fn element_count(&self) -> usize {
        fn count(elements: &[FormDescSubmodelElement]) -> usize {
            elements
                .iter()
                .map(|e| match e {
                    FormDescSubmodelElement::FormSubmodelElementCollection { value, .. } => 1 + count(value),
                    _ => 1,
                })
                .sum()
        }
        count(&self.submodel_elements)
    }
}

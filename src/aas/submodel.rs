//! Submodels, submodel elements and concept descriptions
//!
//! Only the subset of the metamodel needed to instantiate form templates and
//! to carry concept descriptions through the plugin actions.

use serde::{Deserialize, Serialize};
use super::key::Reference;

/// Text in one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangString {
    pub language: String,
    pub text: String,
}

impl LangString {
    pub fn new<L: Into<String>, T: Into<String>>(language: L, text: T) -> Self {
        Self { language: language.into(), text: text.into() }
    }
}

/// A submodel instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submodel {
    pub id: String,
    #[serde(default)]
    pub id_short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
    #[serde(default)]
    pub submodel_elements: Vec<SubmodelElement>,
}

impl Submodel {
    pub fn new<I: Into<String>, S: Into<String>>(id: I, id_short: S) -> Self {
        Self {
            id: id.into(),
            id_short: id_short.into(),
            semantic_id: None,
            submodel_elements: Vec::new(),
        }
    }

    pub fn with_semantic_id(mut self, semantic_id: Reference) -> Self {
        self.semantic_id = Some(semantic_id);
        self
    }
}

/// Attributes every submodel element carries
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementHeader {
    pub id_short: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic_id: Option<Reference>,
}

/// Submodel element variants, discriminated by `modelType`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "modelType")]
pub enum SubmodelElement {
    #[serde(rename_all = "camelCase")]
    Property {
        #[serde(flatten)]
        header: ElementHeader,
        value_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    MultiLanguageProperty {
        #[serde(flatten)]
        header: ElementHeader,
        #[serde(default)]
        value: Vec<LangString>,
    },
    #[serde(rename_all = "camelCase")]
    File {
        #[serde(flatten)]
        header: ElementHeader,
        content_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    ReferenceElement {
        #[serde(flatten)]
        header: ElementHeader,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        value: Option<Reference>,
    },
    #[serde(rename_all = "camelCase")]
    SubmodelElementCollection {
        #[serde(flatten)]
        header: ElementHeader,
        #[serde(default)]
        value: Vec<SubmodelElement>,
    },
}

impl SubmodelElement {
    pub fn header(&self) -> &ElementHeader {
        match self {
            SubmodelElement::Property { header, .. }
            | SubmodelElement::MultiLanguageProperty { header, .. }
            | SubmodelElement::File { header, .. }
            | SubmodelElement::ReferenceElement { header, .. }
            | SubmodelElement::SubmodelElementCollection { header, .. } => header,
        }
    }

    pub fn id_short(&self) -> &str {
        &self.header().id_short
    }

    pub fn model_type(&self) -> &'static str {
        match self {
            SubmodelElement::Property { .. } => "Property",
            SubmodelElement::MultiLanguageProperty { .. } => "MultiLanguageProperty",
            SubmodelElement::File { .. } => "File",
            SubmodelElement::ReferenceElement { .. } => "ReferenceElement",
            SubmodelElement::SubmodelElementCollection { .. } => "SubmodelElementCollection",
        }
    }
}

/// A concept description; members not modelled here are carried through
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDescription {
    pub id: String,
    #[serde(default)]
    pub id_short: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ConceptDescription {
    pub fn new<I: Into<String>, S: Into<String>>(id: I, id_short: S) -> Self {
        Self { id: id.into(), id_short: id_short.into(), extra: serde_json::Map::new() }
    }
}

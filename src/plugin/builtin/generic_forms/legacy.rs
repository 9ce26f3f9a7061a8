//! Options written by V2.0 hosts
//!
//! V2.0 documents name their types after the `AdminShellNS.AdminShellV20`
//! namespace, use V2.0 keys (`type`, `local`, `value`, `idType`) and
//! identify concept descriptions through an `identification` object.
//! A concept description's `isCaseOf` references are upgraded to V3
//! references; its V2.0 embedded data specifications are dropped.

use std::str::FromStr;
use log::{debug, error};
use serde::Deserialize;
use serde_json::{Map, Value};
use crate::aas::{ConceptDescription, Key, KeyType, Reference, ReferenceType};
use crate::options::{null_as_empty, OptionsResult, UpgradeMapping};
use super::form_desc::{FormDescSubmodel, FormDescSubmodelElement, FormElementHeader, FormMultiplicity};
use super::options::{GenericFormOptions, GenericFormsOptionsRecord};

pub const V20_TRIGGER: &str = "AdminShellNS.AdminShellV20+";

const V20_ROOT_TYPE: &str = "GenericFormOptionsV20";

/// Concept description members whose V2.0 shape has no V3 reading
const V20_DROPPED_MEMBERS: [&str; 3] = ["$type", "embeddedDataSpecification", "embeddedDataSpecifications"];

/// Mappings tried, in order, when loading generic forms options
pub fn upgrade_mappings() -> Vec<UpgradeMapping<GenericFormOptions>> {
    match v20_mapping() {
        Ok(mapping) => vec![mapping],
        Err(e) => {
            error!("V2.0 options upgrade unavailable: {}", e);
            Vec::new()
        }
    }
}

fn v20_mapping() -> OptionsResult<UpgradeMapping<GenericFormOptions>> {
    UpgradeMapping::new::<GenericFormOptionsV20, _>(
        "generic forms options V2.0 to V3.0",
        V20_TRIGGER,
        upgrade_v20,
    )
    .with_replacement("AdminShellNS.AdminShellV20+GenericFormOptions", V20_ROOT_TYPE)
    .with_replacement("AdminShellNS.AdminShellV20+Key", "KeyV20")
    .with_replacement("AdminShellNS.AdminShellV20+ConceptDescription", "ConceptDescriptionV20")
    .with_regex_replacement(r#""\$type"\s*:\s*"Form(\w+)""#, r#""$$type":"Form${1}V20""#)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct GenericFormOptionsV20 {
    #[serde(rename = "$type", default)]
    type_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    records: Vec<RecordV20>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RecordV20 {
    form_tag: String,
    #[serde(default)]
    form_title: String,
    #[serde(default)]
    form_submodel: Option<FormSubmodelV20>,
    #[serde(default, deserialize_with = "null_as_empty")]
    concept_descriptions: Vec<ConceptDescriptionV20>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FormSubmodelV20 {
    #[serde(default)]
    form_title: String,
    #[serde(default)]
    form_info: Option<String>,
    #[serde(default)]
    key_semantic_id: Option<KeyV20>,
    #[serde(default)]
    preset_id_short: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    submodel_elements: Vec<FormElementV20>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct FormHeaderV20 {
    #[serde(default)]
    form_title: String,
    #[serde(default)]
    form_info: Option<String>,
    #[serde(default)]
    key_semantic_id: Option<KeyV20>,
    #[serde(default)]
    preset_id_short: String,
    #[serde(default)]
    multiplicity: FormMultiplicity,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "$type")]
enum FormElementV20 {
    FormPropertyV20 {
        #[serde(flatten)]
        header: FormHeaderV20,
        #[serde(rename = "PresetValue", default)]
        preset_value: Option<String>,
    },
    FormMultiLangPropV20 {
        #[serde(flatten)]
        header: FormHeaderV20,
    },
    FormFileV20 {
        #[serde(flatten)]
        header: FormHeaderV20,
        #[serde(rename = "PresetMimeType", default)]
        preset_mime_type: Option<String>,
    },
    FormReferenceElementV20 {
        #[serde(flatten)]
        header: FormHeaderV20,
    },
    FormSubmodelElementCollectionV20 {
        #[serde(flatten)]
        header: FormHeaderV20,
        #[serde(rename = "Value", default, deserialize_with = "null_as_empty")]
        value: Vec<FormElementV20>,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyV20 {
    #[serde(rename = "type")]
    key_type: String,
    #[serde(default)]
    #[allow(dead_code)]
    local: bool,
    value: String,
    #[serde(default)]
    #[allow(dead_code)]
    id_type: String,
}

#[derive(Debug, Deserialize)]
struct ReferenceV20 {
    #[serde(default, deserialize_with = "null_as_empty")]
    keys: Vec<KeyV20>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentificationV20 {
    id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConceptDescriptionV20 {
    identification: IdentificationV20,
    #[serde(default)]
    id_short: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    is_case_of: Vec<ReferenceV20>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

fn upgrade_v20(old: GenericFormOptionsV20) -> Option<GenericFormOptions> {
    if let Some(type_name) = &old.type_name {
        if type_name != V20_ROOT_TYPE {
            debug!("Not a V2.0 generic forms document: {}", type_name);
            return None;
        }
    }
    let records = old.records.into_iter().map(upgrade_record).collect();
    Some(GenericFormOptions { records })
}

fn upgrade_record(old: RecordV20) -> GenericFormsOptionsRecord {
    GenericFormsOptionsRecord {
        form_tag: old.form_tag,
        form_title: old.form_title,
        form_submodel: old.form_submodel.map(upgrade_form_submodel).unwrap_or_default(),
        concept_descriptions: old.concept_descriptions.into_iter().map(upgrade_concept_description).collect(),
    }
}

fn upgrade_form_submodel(old: FormSubmodelV20) -> FormDescSubmodel {
    FormDescSubmodel {
        form_title: old.form_title,
        form_info: old.form_info,
        key_semantic_id: old.key_semantic_id.map(upgrade_key),
        preset_id_short: old.preset_id_short,
        submodel_elements: old.submodel_elements.into_iter().map(upgrade_element).collect(),
    }
}

fn upgrade_header(old: FormHeaderV20) -> FormElementHeader {
    FormElementHeader {
        form_title: old.form_title,
        form_info: old.form_info,
        key_semantic_id: old.key_semantic_id.map(upgrade_key),
        preset_id_short: old.preset_id_short,
        multiplicity: old.multiplicity,
    }
}

fn upgrade_element(old: FormElementV20) -> FormDescSubmodelElement {
    match old {
        FormElementV20::FormPropertyV20 { header, preset_value } => FormDescSubmodelElement::FormProperty {
            header: upgrade_header(header),
            value_type: "xs:string".to_string(),
            preset_value,
        },
        FormElementV20::FormMultiLangPropV20 { header } => {
            FormDescSubmodelElement::FormMultiLangProp { header: upgrade_header(header) }
        }
        FormElementV20::FormFileV20 { header, preset_mime_type } => FormDescSubmodelElement::FormFile {
            header: upgrade_header(header),
            preset_mime_type,
        },
        FormElementV20::FormReferenceElementV20 { header } => {
            FormDescSubmodelElement::FormReferenceElement { header: upgrade_header(header) }
        }
        FormElementV20::FormSubmodelElementCollectionV20 { header, value } => {
            FormDescSubmodelElement::FormSubmodelElementCollection {
                header: upgrade_header(header),
                value: value.into_iter().map(upgrade_element).collect(),
            }
        }
    }
}

/// V2.0 key types without a V3 counterpart become global references
fn upgrade_key(old: KeyV20) -> Key {
    let key_type = KeyType::from_str(&old.key_type).unwrap_or_else(|_| {
        debug!("V2.0 key type '{}' mapped to GlobalReference", old.key_type);
        KeyType::GlobalReference
    });
    Key::new(key_type, old.value)
}

/// The first key decides the reference type
fn upgrade_reference(old: ReferenceV20) -> Reference {
    let keys: Vec<Key> = old.keys.into_iter().map(upgrade_key).collect();
    let reference_type = keys
        .first()
        .map(|key| key.key_type.reference_type())
        .unwrap_or(ReferenceType::ExternalReference);
    Reference::new(reference_type, keys)
}

fn upgrade_concept_description(old: ConceptDescriptionV20) -> ConceptDescription {
    let id = old.identification.id;
    let mut extra = old.extra;
    for member in V20_DROPPED_MEMBERS {
        if extra.remove(member).is_some() && member != "$type" {
            debug!("Concept description {}: V2.0 {} dropped", id, member);
        }
    }

    let is_case_of: Vec<Reference> = old
        .is_case_of
        .into_iter()
        .map(upgrade_reference)
        .filter(|reference| !reference.is_empty())
        .collect();
    if !is_case_of.is_empty() {
        match serde_json::to_value(&is_case_of) {
            Ok(value) => {
                extra.insert("isCaseOf".to_string(), value);
            }
            Err(e) => debug!("Concept description {}: isCaseOf dropped: {}", id, e),
        }
    }

    ConceptDescription { id, id_short: old.id_short, extra }
}

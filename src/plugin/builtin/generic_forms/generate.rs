//! Submodel instantiation from a form description
//!
//! Only mandatory elements (`One`, `OneToMany`) are created, once each.
//! Collections are filled the same way, recursively.

use uuid::Uuid;
use crate::aas::{ElementHeader, Reference, Submodel, SubmodelElement};
use super::form_desc::{FormDescSubmodel, FormDescSubmodelElement, FormElementHeader};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Identifier for a freshly generated submodel
pub fn new_submodel_id() -> String {
    format!("urn:uuid:{}", Uuid::new_v4())
}

pub fn instantiate_submodel(form: &FormDescSubmodel, id: String) -> Submodel {
    let id_short = if form.preset_id_short.is_empty() {
        form.form_title.clone()
    } else {
        form.preset_id_short.clone()
    };
    let mut submodel = Submodel::new(id, id_short);
    submodel.semantic_id = form.key_semantic_id.clone().map(Reference::from_key);
    submodel.submodel_elements = instantiate_elements(&form.submodel_elements);
    submodel
}

fn instantiate_elements(forms: &[FormDescSubmodelElement]) -> Vec<SubmodelElement> {
    forms
        .iter()
        .filter(|form| form.header().multiplicity.is_mandatory())
        .map(instantiate_element)
        .collect()
}

fn instantiate_element(form: &FormDescSubmodelElement) -> SubmodelElement {
    let header = element_header(form.header());
    match form {
        FormDescSubmodelElement::FormProperty { value_type, preset_value, .. } => SubmodelElement::Property {
            header,
            value_type: value_type.clone(),
            value: preset_value.clone(),
        },
        FormDescSubmodelElement::FormMultiLangProp { .. } => {
            SubmodelElement::MultiLanguageProperty { header, value: Vec::new() }
        }
        FormDescSubmodelElement::FormFile { preset_mime_type, .. } => SubmodelElement::File {
            header,
            content_type: preset_mime_type.clone().unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string()),
            value: None,
        },
        FormDescSubmodelElement::FormReferenceElement { .. } => {
            SubmodelElement::ReferenceElement { header, value: None }
        }
        FormDescSubmodelElement::FormSubmodelElementCollection { value, .. } => {
            SubmodelElement::SubmodelElementCollection { header, value: instantiate_elements(value) }
        }
    }
}

fn element_header(form: &FormElementHeader) -> ElementHeader {
    ElementHeader {
        id_short: form.preset_id_short.clone(),
        semantic_id: form.key_semantic_id.clone().map(Reference::from_key),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aas::{Key, KeyType, ReferenceType};
    use crate::plugin::builtin::generic_forms::form_desc::FormMultiplicity;

    fn form() -> FormDescSubmodel {
        let address = FormDescSubmodelElement::FormSubmodelElementCollection {
            header: FormElementHeader::new("Address", FormMultiplicity::OneToMany)
                .with_semantic_id(Key::global("urn:address")),
            value: vec![
                FormDescSubmodelElement::property("Street", FormMultiplicity::One),
                FormDescSubmodelElement::property("Zip", FormMultiplicity::ZeroToOne),
            ],
        };
        FormDescSubmodel {
            form_title: "Contact".to_string(),
            key_semantic_id: Some(Key::global("urn:contact")),
            preset_id_short: "Contact".to_string(),
            submodel_elements: vec![
                FormDescSubmodelElement::property("Name", FormMultiplicity::One),
                FormDescSubmodelElement::property("Phone", FormMultiplicity::ZeroToMany),
                FormDescSubmodelElement::FormFile {
                    header: FormElementHeader::new("Logo", FormMultiplicity::One),
                    preset_mime_type: Some("image/png".to_string()),
                },
                address,
            ],
            ..FormDescSubmodel::default()
        }
    }

    #[test]
    fn test_only_mandatory_elements_once_each() {
        let sm = instantiate_submodel(&form(), "urn:test".to_string());
        let ids: Vec<&str> = sm.submodel_elements.iter().map(|e| e.id_short()).collect();
        assert_eq!(ids, vec!["Name", "Logo", "Address"]);
        assert_eq!(sm.id, "urn:test");
        assert_eq!(sm.id_short, "Contact");
        assert_eq!(sm.semantic_id, Some(Reference::from_key(Key::global("urn:contact"))));
    }

    #[test]
    fn test_semantic_id_reference_type_follows_key() {
        let mut form = form();
        form.key_semantic_id = Some(Key::new(KeyType::Submodel, "urn:contact:template"));
        let sm = instantiate_submodel(&form, "urn:test".to_string());
        assert_eq!(sm.semantic_id.unwrap().reference_type, ReferenceType::ModelReference);

        let SubmodelElement::SubmodelElementCollection { header, .. } = &sm.submodel_elements[2] else {
            panic!("Address should be a collection");
        };
        assert_eq!(header.semantic_id.as_ref().unwrap().reference_type, ReferenceType::ExternalReference);
    }

    #[test]
    fn test_collections_recurse() {
        let sm = instantiate_submodel(&form(), "urn:test".to_string());
        match &sm.submodel_elements[2] {
            SubmodelElement::SubmodelElementCollection { header, value } => {
                assert!(header.semantic_id.is_some());
                assert_eq!(value.len(), 1);
                assert_eq!(value[0].id_short(), "Street");
            }
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_file_content_type() {
        let sm = instantiate_submodel(&form(), "urn:test".to_string());
        match &sm.submodel_elements[1] {
            SubmodelElement::File { content_type, .. } => assert_eq!(content_type, "image/png"),
            other => panic!("unexpected element {:?}", other),
        }
    }

    #[test]
    fn test_new_ids_are_unique() {
        assert_ne!(new_submodel_id(), new_submodel_id());
        assert!(new_submodel_id().starts_with("urn:uuid:"));
    }
}

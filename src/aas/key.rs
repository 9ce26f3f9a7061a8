//! Keys and references
//!
//! Semantic ids are references made of one or more keys. Matching comes in
//! two flavours: strict (type and value) and relaxed (value only, trimmed and
//! case-insensitive), the latter being what template lookup uses.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key types of the AAS V3 metamodel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    GlobalReference,
    FragmentReference,
    ConceptDescription,
    AssetAdministrationShell,
    Submodel,
    SubmodelElement,
    SubmodelElementCollection,
    SubmodelElementList,
    Property,
    MultiLanguageProperty,
    Range,
    File,
    Blob,
    ReferenceElement,
    RelationshipElement,
    AnnotatedRelationshipElement,
    Entity,
    Operation,
    Capability,
    BasicEventElement,
    Referable,
    Identifiable,
}

impl KeyType {
    const ALL: [KeyType; 22] = [
        KeyType::GlobalReference,
        KeyType::FragmentReference,
        KeyType::ConceptDescription,
        KeyType::AssetAdministrationShell,
        KeyType::Submodel,
        KeyType::SubmodelElement,
        KeyType::SubmodelElementCollection,
        KeyType::SubmodelElementList,
        KeyType::Property,
        KeyType::MultiLanguageProperty,
        KeyType::Range,
        KeyType::File,
        KeyType::Blob,
        KeyType::ReferenceElement,
        KeyType::RelationshipElement,
        KeyType::AnnotatedRelationshipElement,
        KeyType::Entity,
        KeyType::Operation,
        KeyType::Capability,
        KeyType::BasicEventElement,
        KeyType::Referable,
        KeyType::Identifiable,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::GlobalReference => "GlobalReference",
            KeyType::FragmentReference => "FragmentReference",
            KeyType::ConceptDescription => "ConceptDescription",
            KeyType::AssetAdministrationShell => "AssetAdministrationShell",
            KeyType::Submodel => "Submodel",
            KeyType::SubmodelElement => "SubmodelElement",
            KeyType::SubmodelElementCollection => "SubmodelElementCollection",
            KeyType::SubmodelElementList => "SubmodelElementList",
            KeyType::Property => "Property",
            KeyType::MultiLanguageProperty => "MultiLanguageProperty",
            KeyType::Range => "Range",
            KeyType::File => "File",
            KeyType::Blob => "Blob",
            KeyType::ReferenceElement => "ReferenceElement",
            KeyType::RelationshipElement => "RelationshipElement",
            KeyType::AnnotatedRelationshipElement => "AnnotatedRelationshipElement",
            KeyType::Entity => "Entity",
            KeyType::Operation => "Operation",
            KeyType::Capability => "Capability",
            KeyType::BasicEventElement => "BasicEventElement",
            KeyType::Referable => "Referable",
            KeyType::Identifiable => "Identifiable",
        }
    }

    /// Kind of reference a single key of this type forms
    pub fn reference_type(&self) -> ReferenceType {
        match self {
            KeyType::GlobalReference | KeyType::FragmentReference => ReferenceType::ExternalReference,
            _ => ReferenceType::ModelReference,
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyType::ALL
            .iter()
            .copied()
            .find(|kt| kt.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown key type: {}", s))
    }
}

/// How strictly two keys are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Key type and value must be equal
    Strict,
    /// Only values are compared, trimmed and ignoring ASCII case
    #[default]
    Relaxed,
}

/// A single key of a reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    #[serde(rename = "type")]
    pub key_type: KeyType,
    pub value: String,
}

impl Key {
    pub fn new<S: Into<String>>(key_type: KeyType, value: S) -> Self {
        Self { key_type, value: value.into() }
    }

    /// Shorthand for the usual semantic id key
    pub fn global<S: Into<String>>(value: S) -> Self {
        Self::new(KeyType::GlobalReference, value)
    }

    pub fn matches(&self, other: &Key, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Strict => self.key_type == other.key_type && self.value == other.value,
            MatchMode::Relaxed => self.value.trim().eq_ignore_ascii_case(other.value.trim()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}){}", self.key_type, self.value)
    }
}

/// Kind of a reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReferenceType {
    #[default]
    ExternalReference,
    ModelReference,
}

/// A reference, typically used as semantic id
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "type", default)]
    pub reference_type: ReferenceType,
    #[serde(default)]
    pub keys: Vec<Key>,
}

impl Reference {
    pub fn new(reference_type: ReferenceType, keys: Vec<Key>) -> Self {
        Self { reference_type, keys }
    }

    /// External reference holding one global key
    pub fn external<S: Into<String>>(value: S) -> Self {
        Self::new(ReferenceType::ExternalReference, vec![Key::global(value)])
    }

    /// Single key reference; global and fragment keys point outside the model
    pub fn from_key(key: Key) -> Self {
        Self::new(key.key_type.reference_type(), vec![key])
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Pairwise key comparison; references of different length never match
    pub fn matches(&self, other: &Reference, mode: MatchMode) -> bool {
        !self.keys.is_empty()
            && self.keys.len() == other.keys.len()
            && self.keys.iter().zip(&other.keys).all(|(a, b)| a.matches(b, mode))
    }

    /// True when this reference consists of exactly one key matching `key`
    pub fn matches_key(&self, key: &Key, mode: MatchMode) -> bool {
        match self.keys.as_slice() {
            [only] => only.matches(key, mode),
            _ => false,
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<String> = self.keys.iter().map(|k| k.to_string()).collect();
        write!(f, "[{}]", keys.join(", "))
    }
}

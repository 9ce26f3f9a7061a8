//! Minimal Asset Administration Shell model
//!
//! Keys, references and the handful of submodel element kinds the plugins
//! generate or match against.

pub mod key;
pub mod submodel;

pub use key::{Key, KeyType, MatchMode, Reference, ReferenceType};
pub use submodel::{ConceptDescription, ElementHeader, LangString, Submodel, SubmodelElement};

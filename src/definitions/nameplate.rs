//! Digital nameplate definitions
//!
//! Built from the embedded `Nameplate` library through an explicit table of
//! entry names to struct fields.

use log::warn;
use crate::aas::{ConceptDescription, Submodel};
use crate::options::{embedded_library, Library, OptionsResult};
use super::{assign, DefinitionField};

pub const LIBRARY_NAME: &str = "Nameplate";

#[derive(Debug, Clone, Default)]
pub struct NameplateDefinitions {
    pub sm_nameplate: Option<Submodel>,
    pub cd_uri_of_the_product: Option<ConceptDescription>,
    pub cd_manufacturer_name: Option<ConceptDescription>,
    pub cd_manufacturer_product_designation: Option<ConceptDescription>,
    pub cd_serial_number: Option<ConceptDescription>,
    pub cd_year_of_construction: Option<ConceptDescription>,
    pub cd_markings: Option<ConceptDescription>,
}

const FIELDS: &[DefinitionField<NameplateDefinitions>] = &[
    ("SM_Nameplate", |d, lib, name| assign(&mut d.sm_nameplate, lib, name)),
    ("CD_URIOfTheProduct", |d, lib, name| assign(&mut d.cd_uri_of_the_product, lib, name)),
    ("CD_ManufacturerName", |d, lib, name| assign(&mut d.cd_manufacturer_name, lib, name)),
    ("CD_ManufacturerProductDesignation", |d, lib, name| {
        assign(&mut d.cd_manufacturer_product_designation, lib, name)
    }),
    ("CD_SerialNumber", |d, lib, name| assign(&mut d.cd_serial_number, lib, name)),
    ("CD_YearOfConstruction", |d, lib, name| assign(&mut d.cd_year_of_construction, lib, name)),
    ("CD_Markings", |d, lib, name| assign(&mut d.cd_markings, lib, name)),
];

impl NameplateDefinitions {
    /// Populate from `library`; entries that are missing or malformed stay
    /// `None` and are logged
    pub fn from_library(library: &Library) -> Self {
        let mut definitions = Self::default();
        for (name, set) in FIELDS {
            if let Err(e) = set(&mut definitions, library, name) {
                warn!("Nameplate definition {} unavailable: {}", name, e);
            }
        }
        definitions
    }

    /// Definitions from the embedded library
    pub fn embedded() -> OptionsResult<Self> {
        let library = embedded_library(LIBRARY_NAME)?;
        Ok(Self::from_library(&library))
    }

    /// Entry names this definition set knows
    pub fn field_names() -> impl Iterator<Item = &'static str> {
        FIELDS.iter().map(|(name, _)| *name)
    }

    /// All concept descriptions that were found
    pub fn concept_descriptions(&self) -> Vec<&ConceptDescription> {
        [
            &self.cd_uri_of_the_product,
            &self.cd_manufacturer_name,
            &self.cd_manufacturer_product_designation,
            &self.cd_serial_number,
            &self.cd_year_of_construction,
            &self.cd_markings,
        ]
        .into_iter()
        .filter_map(|cd| cd.as_ref())
        .collect()
    }
}

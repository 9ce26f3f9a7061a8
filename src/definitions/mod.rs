//! Static definition sets
//!
//! Each set is a plain struct whose fields are filled from a library by a
//! table of `(entry name, setter)` pairs.

pub mod nameplate;

use serde::de::DeserializeOwned;
use crate::options::{Library, OptionsResult};

pub use nameplate::NameplateDefinitions;

/// Entry name and the setter that stores it into a definition set
pub type DefinitionField<D> = (&'static str, fn(&mut D, &Library, &str) -> OptionsResult<()>);

/// Deserialize entry `name` into `slot`
pub fn assign<T: DeserializeOwned>(slot: &mut Option<T>, library: &Library, name: &str) -> OptionsResult<()> {
    *slot = Some(library.retrieve(name)?);
    Ok(())
}

//! Plugin API Version
//!
//! The version is read from `package.metadata.aasx.api_version` in
//! Cargo.toml at build time. Format: YYYYMMDD; the year is the major part.

include!(concat!(env!("OUT_DIR"), "/version_api.rs"));

/// API version the host was built against
pub fn get_api_version() -> i64 {
    BASE_API_VERSION
}

/// Major component (year) of a YYYYMMDD API version
pub fn major_version(api_version: i64) -> i64 {
    api_version / 10000
}

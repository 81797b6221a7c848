//! Error code catalog and registry check.
//!
//! Every diagnostic carries a numeric code that is stable per error
//! *kind*. The catalog maps each code to its metadata, and [`verify`]
//! replaces convention-only uniqueness: instead of trusting each
//! constructor to hardcode a fresh literal, the assigned codes are
//! checked against the catalog at test time (or from a driver at
//! startup).

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata for an error code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorCodeInfo {
    /// Short title for the error kind
    pub title: String,

    /// Template of the summary this code produces (placeholders in braces)
    pub summary_template: String,

    /// Version this code was introduced in
    pub since_version: String,
}

/// Global error catalog, embedded at compile time.
///
/// Loaded from `error_catalog.json` via `include_str!()`, so there is no
/// runtime file I/O.
///
/// # Panics
///
/// Panics if the embedded JSON is invalid, which can only happen when the
/// catalog file itself is edited incorrectly.
pub static ERROR_CATALOG: Lazy<HashMap<u32, ErrorCodeInfo>> = Lazy::new(|| {
    let json_data = include_str!("../error_catalog.json");
    let by_key: HashMap<String, ErrorCodeInfo> =
        serde_json::from_str(json_data).expect("invalid error catalog JSON - this is a bug in sable");
    by_key
        .into_iter()
        .map(|(key, info)| {
            let code = key
                .parse::<u32>()
                .expect("non-numeric error catalog key - this is a bug in sable");
            (code, info)
        })
        .collect()
});

/// Look up the metadata for an error code.
pub fn get_code_info(code: u32) -> Option<&'static ErrorCodeInfo> {
    ERROR_CATALOG.get(&code)
}

/// A violation of the code registry contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// Two constructors assigned themselves the same code
    #[error("error code {code} is assigned to both `{first}` and `{second}`")]
    DuplicateCode {
        code: u32,
        first: &'static str,
        second: &'static str,
    },

    /// A constructor uses a code the catalog does not know
    #[error("error code {code} assigned to `{constructor}` is not in the catalog")]
    UnregisteredCode { code: u32, constructor: &'static str },
}

/// Check an assignment table against the catalog.
///
/// Each entry pairs a code with the constructor that claims it. Fails on
/// the first duplicate assignment or unregistered code.
pub fn verify_assignments(assignments: &[(u32, &'static str)]) -> Result<(), CatalogError> {
    let mut seen: HashMap<u32, &'static str> = HashMap::new();
    for &(code, constructor) in assignments {
        if get_code_info(code).is_none() {
            return Err(CatalogError::UnregisteredCode { code, constructor });
        }
        if let Some(first) = seen.insert(code, constructor) {
            return Err(CatalogError::DuplicateCode {
                code,
                first,
                second: constructor,
            });
        }
    }
    Ok(())
}

/// Check the crate's own constructor catalog.
///
/// Suitable for a driver to run once at startup; also exercised by the
/// test suite.
pub fn verify() -> Result<(), CatalogError> {
    verify_assignments(crate::errors::ASSIGNED_CODES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        assert!(!ERROR_CATALOG.is_empty());
    }

    #[test]
    fn test_lookup_known_code() {
        let info = get_code_info(1).unwrap();
        assert_eq!(info.title, "Unhandled Panic");
    }

    #[test]
    fn test_lookup_unknown_code() {
        assert!(get_code_info(9999).is_none());
    }

    #[test]
    fn test_shipped_assignments_verify() {
        verify().unwrap();
    }

    #[test]
    fn test_duplicate_assignment_is_rejected() {
        let err = verify_assignments(&[(2, "parse_error"), (2, "other_error")]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateCode {
                code: 2,
                first: "parse_error",
                second: "other_error",
            }
        );
    }

    #[test]
    fn test_unregistered_assignment_is_rejected() {
        let err = verify_assignments(&[(9999, "mystery_error")]).unwrap_err();
        assert!(matches!(err, CatalogError::UnregisteredCode { code: 9999, .. }));
    }

    #[test]
    fn test_code_info_serialization() {
        let info = get_code_info(7).unwrap();
        let json = serde_json::to_string(info).unwrap();
        let back: ErrorCodeInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(*info, back);
    }
}

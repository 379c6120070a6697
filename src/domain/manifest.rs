//! package.json manifest model
//!
//! Only the two dependency sections matter for a scan; every other
//! package.json field is ignored during deserialization.

use super::DependencyKind;
use crate::error::ManifestError;
use base64::{prelude::BASE64_STANDARD, Engine};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Path of the manifest inside a repository
pub const MANIFEST_PATH: &str = "package.json";

/// Dependency name to declared version range
pub type DependencyMap = BTreeMap<String, String>;

/// Parsed package.json dependency sections
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Regular dependencies
    #[serde(default)]
    pub dependencies: Option<DependencyMap>,
    /// Development dependencies
    #[serde(default)]
    pub dev_dependencies: Option<DependencyMap>,
}

impl Manifest {
    /// Parse a manifest from raw JSON text
    pub fn from_json(content: &str) -> Result<Self, ManifestError> {
        let content = content.trim_start_matches('\u{feff}');
        serde_json::from_str(content).map_err(|e| ManifestError::Parse {
            message: e.to_string(),
        })
    }

    /// Parse a manifest from the base64 payload returned by the contents API
    ///
    /// GitHub wraps the encoded content at 60 columns, so whitespace is
    /// stripped before decoding.
    pub fn from_base64(encoded: &str) -> Result<Self, ManifestError> {
        let compact: String = encoded.split_whitespace().collect();
        let bytes = BASE64_STANDARD
            .decode(compact.as_bytes())
            .map_err(|e| ManifestError::Decode {
                message: e.to_string(),
            })?;
        let text = String::from_utf8(bytes).map_err(|e| ManifestError::Decode {
            message: e.to_string(),
        })?;
        Self::from_json(&text)
    }

    /// Returns the mapping for a section, if declared
    pub fn section(&self, kind: DependencyKind) -> Option<&DependencyMap> {
        match kind {
            DependencyKind::Regular => self.dependencies.as_ref(),
            DependencyKind::Dev => self.dev_dependencies.as_ref(),
        }
    }

    /// Returns true if at least one section declares a dependency
    pub fn declares_dependencies(&self) -> bool {
        DependencyKind::ALL
            .iter()
            .any(|kind| self.section(*kind).is_some_and(|deps| !deps.is_empty()))
    }
}

//! The structured settings document
//!
//! Only three fields are interpreted (model, env, permissions); every other
//! top-level key is carried in [`SettingsDocument::extra`] so a document
//! written by a newer host tool round-trips through save/load untouched.

use crate::error::{self, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Permission allow/deny lists for the host tool
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allow: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deny: Vec<String>,
}

impl Permissions {
    /// True when neither list has entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.deny.is_empty()
    }
}

/// The settings document the host tool reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    /// Model identifier, if pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Environment variables injected by the host tool
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Tool permission lists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Permissions>,

    /// Unrecognized fields, preserved verbatim on write-back
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SettingsDocument {
    /// True when nothing at all is configured
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.model.is_none()
            && self.env.is_empty()
            && self.permissions.as_ref().is_none_or(Permissions::is_empty)
            && self.extra.is_empty()
    }
}

/// Load a settings document from a file
///
/// # Errors
///
/// Missing file is [`Error::FileRead`]; malformed JSON is [`Error::Parse`].
pub fn load(path: &Path) -> Result<SettingsDocument> {
    let content = error::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write a settings document as pretty JSON with a trailing newline
pub fn save(path: &Path, settings: &SettingsDocument) -> Result<()> {
    let mut content = serde_json::to_string_pretty(settings)?;
    content.push('\n');
    error::write_file(path, content)
}

//! Managed access to the service-registry document
//!
//! The registry file is shared with the host tool and may carry any number
//! of foreign top-level keys. This module only ever reads or replaces the
//! single `services` key; the rest of the document is handled as a generic
//! ordered map of raw values so nothing else is dropped or reordered.

use crate::error::{self, Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;

/// Top-level registry key owned by this crate
pub const MANAGED_KEY: &str = "services";

/// One entry of the managed `services` key
///
/// Either a launchable command (`command`/`args`/`env`) or a remote endpoint
/// (`url`/`headers`); `kind` disambiguates when the host tool needs it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// Service name to descriptor mapping
pub type ServiceMap = BTreeMap<String, ServiceDescriptor>;

fn read_document(path: &Path) -> Result<Map<String, Value>> {
    if !path.is_file() {
        return Ok(Map::new());
    }
    let content = error::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

fn write_document(path: &Path, document: &Map<String, Value>) -> Result<()> {
    let mut content = serde_json::to_string_pretty(document)?;
    content.push('\n');
    error::write_file(path, content)
}

/// Read the managed services out of the registry file
///
/// A missing file or a missing managed key both yield an empty map.
pub fn load_services(path: &Path) -> Result<ServiceMap> {
    let document = read_document(path)?;
    match document.get(MANAGED_KEY) {
        Some(value) => serde_json::from_value(value.clone()).map_err(|e| Error::Parse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
        None => Ok(ServiceMap::new()),
    }
}

/// Replace the managed services key in the registry file
///
/// Foreign top-level keys are re-written as read, in their original order.
/// An empty map removes the managed key entirely instead of writing `{}`.
pub fn save_services(path: &Path, services: &ServiceMap) -> Result<()> {
    let mut document = read_document(path)?;
    if services.is_empty() {
        document.shift_remove(MANAGED_KEY);
    } else {
        document.insert(MANAGED_KEY.to_string(), serde_json::to_value(services)?);
    }
    write_document(path, &document)
}

/// Read a standalone services snapshot (profile or backup copy)
pub fn read_services_file(path: &Path) -> Result<ServiceMap> {
    let content = error::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Write a standalone services snapshot
pub fn write_services_file(path: &Path, services: &ServiceMap) -> Result<()> {
    let mut content = serde_json::to_string_pretty(services)?;
    content.push('\n');
    error::write_file(path, content)
}

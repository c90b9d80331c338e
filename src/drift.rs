//! Detection of unsaved changes in the active configuration
//!
//! Before a switch abandons the outgoing profile, the orchestrator asks
//! whether the live files still match that profile's stored copy. The
//! comparison uses SHA-256 fingerprints: settings are hashed over a
//! canonical key-sorted serialization so JSON key order never produces a
//! false positive, instructions are hashed byte-exact. Comparison only;
//! nothing here mutates state.

use crate::error::{self, Result};
use crate::settings::{self, SettingsDocument};
use crate::store::ProfileStore;
use serde_json::Value;
use sha2::{Digest, Sha256};

/// Compares live active state against a stored profile
#[derive(Debug)]
pub struct DriftDetector<'a> {
    store: &'a ProfileStore,
}

impl<'a> DriftDetector<'a> {
    /// Create a detector over a store
    #[must_use]
    pub fn new(store: &'a ProfileStore) -> Self {
        Self { store }
    }

    /// Whether the live active configuration differs from the stored profile
    ///
    /// An unreadable or missing active settings document is conservatively
    /// reported as changed.
    ///
    /// # Errors
    ///
    /// [`crate::Error::ProfileNotFound`] when the profile is not stored.
    pub fn has_changed(&self, name: &str) -> Result<bool> {
        let stored = self.store.load(name)?;
        let paths = self.store.paths();

        let Ok(active_settings) = settings::load(&paths.settings_file) else {
            return Ok(true);
        };
        if settings_fingerprint(&active_settings)? != settings_fingerprint(&stored.settings)? {
            return Ok(true);
        }

        let active_instructions = if paths.instructions_file.is_file() {
            match error::read_to_string(&paths.instructions_file) {
                Ok(text) => text,
                Err(_) => return Ok(true),
            }
        } else {
            String::new()
        };

        Ok(text_fingerprint(&active_instructions) != text_fingerprint(&stored.instructions))
    }
}

/// Fingerprint of a settings document, independent of JSON key order
pub fn settings_fingerprint(document: &SettingsDocument) -> Result<String> {
    let canonical = canonicalize(serde_json::to_value(document)?);
    Ok(hex_digest(serde_json::to_string(&canonical)?.as_bytes()))
}

/// Byte-exact fingerprint of a text document
#[must_use]
pub fn text_fingerprint(text: &str) -> String {
    hex_digest(text.as_bytes())
}

/// Rebuild a JSON value with all object keys sorted, recursively
fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map
                .into_iter()
                .map(|(key, value)| (key, canonicalize(value)))
                .collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

fn hex_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

//! Profile export and import
//!
//! Serializes a profile into a versioned, self-contained JSON envelope that
//! can be shared between machines, and reconstructs a profile from one.

use crate::error::{Error, Result};
use crate::profile::Profile;
use crate::registry::ServiceMap;
use crate::settings::SettingsDocument;
use crate::store::ProfileStore;
use crate::validate;
use log::info;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use time::OffsetDateTime;

/// Export envelope format version
pub const EXPORT_VERSION: &str = "1.0.0";

// ----------------------------------------------------------------------------
// Envelope
// ----------------------------------------------------------------------------

/// A profile rendered into its portable JSON form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportedProfile {
    /// Envelope format version, checked on import
    pub version: String,
    /// Profile name at export time
    pub name: String,
    /// The settings document
    pub settings: SettingsDocument,
    /// Instructions text; omitted from the envelope when blank
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub instructions: String,
    /// Service definitions; omitted from the envelope when empty
    #[serde(default, skip_serializing_if = "ServiceMap::is_empty")]
    pub services: ServiceMap,
    /// When the envelope was produced
    #[serde(with = "time::serde::rfc3339")]
    pub exported_at: OffsetDateTime,
}

// ----------------------------------------------------------------------------
// Operations
// ----------------------------------------------------------------------------

/// Export a stored profile as pretty-printed JSON to `writer`.
pub fn export_profile(store: &ProfileStore, name: &str, writer: &mut impl Write) -> Result<()> {
    let profile = store.load(name)?;

    let exported = ExportedProfile {
        version: EXPORT_VERSION.to_string(),
        name: profile.name,
        settings: profile.settings,
        instructions: profile.instructions,
        services: profile.services,
        exported_at: OffsetDateTime::now_utc(),
    };

    let mut rendered = serde_json::to_string_pretty(&exported)?;
    rendered.push('\n');
    writer
        .write_all(rendered.as_bytes())
        .map_err(|e| Error::ExportWrite { source: e })?;

    info!("Exported profile '{name}'");
    Ok(())
}

/// Parse an export envelope from `reader` without storing anything.
pub fn read_export(reader: &mut impl Read) -> Result<ExportedProfile> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .map_err(|e| Error::ImportRead { source: e })?;
    Ok(serde_json::from_str(&raw)?)
}

/// Import a profile from an export envelope read from `reader`.
///
/// The stored name is `rename` when given, otherwise the name recorded in
/// the envelope. Fails if the envelope version is unsupported, the chosen
/// name is invalid or taken, or the payload fails validation. Nothing is
/// written in any failure case.
pub fn import_profile(
    store: &ProfileStore,
    reader: &mut impl Read,
    rename: Option<&str>,
) -> Result<Profile> {
    let exported = read_export(reader)?;

    if exported.version != EXPORT_VERSION {
        return Err(Error::UnsupportedExportVersion {
            expected: EXPORT_VERSION.to_string(),
            found: exported.version,
        });
    }

    let name = rename.unwrap_or(&exported.name);
    validate::profile_name(name)?;
    if store.exists(name) {
        return Err(Error::ProfileAlreadyExists(name.to_string()));
    }
    validate::settings(&exported.settings)?;
    validate::instructions(&exported.instructions)?;

    let profile = Profile::from_active(
        name,
        exported.settings,
        exported.instructions,
        exported.services,
    );
    store.save(&profile)?;

    info!("Imported profile '{name}'");
    Ok(profile)
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

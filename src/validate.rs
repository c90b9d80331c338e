//! Pure validation rules applied before any write
//!
//! Limits are deliberately loose; they exist to reject obviously broken
//! input (a pasted binary blob as a model name, a runaway generator filling
//! the env map), not to police reasonable configuration.

use crate::error::{Error, Result};
use crate::settings::SettingsDocument;

/// Maximum model identifier length in characters
pub const MAX_MODEL_LEN: usize = 255;

/// Maximum number of entries in each permission list
pub const MAX_PERMISSION_ENTRIES: usize = 1000;

/// Maximum number of environment variables
pub const MAX_ENV_ENTRIES: usize = 1000;

/// Maximum instructions document size in bytes (10 MiB)
pub const MAX_INSTRUCTIONS_BYTES: usize = 10 * 1024 * 1024;

/// Validate a profile name
///
/// Names become directory names, so anything that could escape the profiles
/// directory or confuse a path join is rejected: path separators, whitespace
/// of any kind, and the special names `.` and `..`.
///
/// # Errors
///
/// Returns [`Error::InvalidProfileName`] with the failing rule.
pub fn profile_name(name: &str) -> Result<()> {
    let invalid = |reason: &str| Error::InvalidProfileName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("name cannot be empty"));
    }
    if name == "." || name == ".." {
        return Err(invalid("name cannot be '.' or '..'"));
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("name cannot contain path separators"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("name cannot contain whitespace"));
    }

    Ok(())
}

/// Validate a settings document against the size limits
pub fn settings(document: &SettingsDocument) -> Result<()> {
    if let Some(model) = &document.model {
        if model.chars().count() > MAX_MODEL_LEN {
            return Err(Error::InvalidSettings(format!(
                "model name too long (max {MAX_MODEL_LEN} characters)"
            )));
        }
    }

    if let Some(permissions) = &document.permissions {
        if permissions.allow.len() > MAX_PERMISSION_ENTRIES {
            return Err(Error::InvalidSettings(format!(
                "too many entries in allow list (max {MAX_PERMISSION_ENTRIES})"
            )));
        }
        if permissions.deny.len() > MAX_PERMISSION_ENTRIES {
            return Err(Error::InvalidSettings(format!(
                "too many entries in deny list (max {MAX_PERMISSION_ENTRIES})"
            )));
        }
    }

    if document.env.len() > MAX_ENV_ENTRIES {
        return Err(Error::InvalidSettings(format!(
            "too many environment variables (max {MAX_ENV_ENTRIES})"
        )));
    }

    Ok(())
}

/// Validate an instructions document against the size limit
pub fn instructions(text: &str) -> Result<()> {
    if text.len() > MAX_INSTRUCTIONS_BYTES {
        return Err(Error::InvalidInstructions(format!(
            "document too large (max {MAX_INSTRUCTIONS_BYTES} bytes)"
        )));
    }
    Ok(())
}

//! Well-known file locations for the managed configuration surface
//!
//! Everything the crate touches lives under one base directory:
//!
//! ```text
//! <base>/settings.json        active settings document
//! <base>/INSTRUCTIONS.md      active instructions (optional)
//! <base>/registry.json        service registry (shared with foreign keys)
//! <base>/.current             current-pointer marker
//! <base>/.previous            previous-pointer marker
//! <base>/profiles/<name>/     stored profiles
//! <base>/backups/<id>/        snapshots
//! ```
//!
//! [`Paths`] is a pure value: construction never touches the filesystem.
//! Call [`Paths::ensure_dirs`] to create the directory skeleton.

use crate::error::{self, Error, Result};
use std::path::PathBuf;

/// Active settings document file name
pub const SETTINGS_FILE: &str = "settings.json";

/// Active instructions document file name
pub const INSTRUCTIONS_FILE: &str = "INSTRUCTIONS.md";

/// Service-registry document file name
pub const REGISTRY_FILE: &str = "registry.json";

/// Per-profile services snapshot file name
pub const SERVICES_FILE: &str = "services.json";

/// Current-pointer marker file name
pub const CURRENT_MARKER: &str = ".current";

/// Previous-pointer marker file name
pub const PREVIOUS_MARKER: &str = ".previous";

/// Default base directory name under the home directory
pub const DEFAULT_BASE_DIR: &str = ".ctxman";

/// All computed paths used by the crate
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root of the managed configuration surface
    pub base_dir: PathBuf,
    /// `<base>/profiles`
    pub profiles_dir: PathBuf,
    /// `<base>/backups`
    pub backups_dir: PathBuf,
    /// `<base>/settings.json`
    pub settings_file: PathBuf,
    /// `<base>/INSTRUCTIONS.md`
    pub instructions_file: PathBuf,
    /// `<base>/registry.json`
    pub registry_file: PathBuf,
    /// `<base>/.current`
    pub current_marker: PathBuf,
    /// `<base>/.previous`
    pub previous_marker: PathBuf,
}

impl Paths {
    /// Compute all locations from a base directory
    ///
    /// # Example
    ///
    /// ```
    /// use ctxman::Paths;
    ///
    /// let paths = Paths::new("/tmp/ctx");
    /// assert!(paths.profile_dir("work").ends_with("profiles/work"));
    /// ```
    #[must_use]
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let base_dir = base_dir.into();
        Self {
            profiles_dir: base_dir.join("profiles"),
            backups_dir: base_dir.join("backups"),
            settings_file: base_dir.join(SETTINGS_FILE),
            instructions_file: base_dir.join(INSTRUCTIONS_FILE),
            registry_file: base_dir.join(REGISTRY_FILE),
            current_marker: base_dir.join(CURRENT_MARKER),
            previous_marker: base_dir.join(PREVIOUS_MARKER),
            base_dir,
        }
    }

    /// Compute locations under `~/.ctxman`
    ///
    /// # Errors
    ///
    /// Returns [`Error::HomeDirNotFound`] when the home directory cannot be
    /// determined.
    pub fn from_home() -> Result<Self> {
        let home = dirs::home_dir().ok_or(Error::HomeDirNotFound)?;
        Ok(Self::new(home.join(DEFAULT_BASE_DIR)))
    }

    /// Directory holding a stored profile
    #[must_use]
    pub fn profile_dir(&self, name: &str) -> PathBuf {
        self.profiles_dir.join(name)
    }

    /// A stored profile's settings document
    #[must_use]
    pub fn profile_settings(&self, name: &str) -> PathBuf {
        self.profile_dir(name).join(SETTINGS_FILE)
    }

    /// A stored profile's instructions document
    #[must_use]
    pub fn profile_instructions(&self, name: &str) -> PathBuf {
        self.profile_dir(name).join(INSTRUCTIONS_FILE)
    }

    /// A stored profile's services snapshot
    #[must_use]
    pub fn profile_services(&self, name: &str) -> PathBuf {
        self.profile_dir(name).join(SERVICES_FILE)
    }

    /// Directory holding one backup snapshot
    #[must_use]
    pub fn backup_dir(&self, id: &str) -> PathBuf {
        self.backups_dir.join(id)
    }

    /// Create the base, profiles and backups directories if missing
    pub fn ensure_dirs(&self) -> Result<()> {
        error::create_dir(&self.base_dir)?;
        error::create_dir(&self.profiles_dir)?;
        error::create_dir(&self.backups_dir)?;
        Ok(())
    }
}

//! Reading the active configuration surface and syncing it back into a profile

use crate::error::{self, Result};
use crate::paths::Paths;
use crate::registry::{self, ServiceMap};
use crate::settings::{self, SettingsDocument};
use crate::store::ProfileStore;

/// A point-in-time capture of the files the host tool reads
///
/// `settings` is `None` when no active settings document exists yet (a fresh
/// base directory); callers decide whether that is an error or an empty
/// starting point.
#[derive(Debug, Clone, Default)]
pub struct ActiveConfig {
    pub settings: Option<SettingsDocument>,
    pub instructions: String,
    pub services: ServiceMap,
}

impl ActiveConfig {
    /// Read the live settings, instructions and managed services
    pub fn read(paths: &Paths) -> Result<Self> {
        let settings = if paths.settings_file.is_file() {
            Some(settings::load(&paths.settings_file)?)
        } else {
            None
        };

        let instructions = if paths.instructions_file.is_file() {
            error::read_to_string(&paths.instructions_file)?
        } else {
            String::new()
        };

        let services = registry::load_services(&paths.registry_file)?;

        Ok(Self {
            settings,
            instructions,
            services,
        })
    }

    /// The captured settings, or an empty default when none existed
    #[must_use]
    pub fn settings_or_default(&self) -> SettingsDocument {
        self.settings.clone().unwrap_or_default()
    }
}

/// Write the live settings and instructions back into a stored profile
///
/// The profile's stored services are left as they are; only the two
/// documents a user edits in place can drift. A missing active settings
/// document is a hard error here, unlike in [`ActiveConfig::read`].
pub(crate) fn sync_into(store: &ProfileStore, name: &str) -> Result<()> {
    let paths = store.paths();
    let settings = settings::load(&paths.settings_file)?;
    let instructions = if paths.instructions_file.is_file() {
        error::read_to_string(&paths.instructions_file)?
    } else {
        String::new()
    };

    let mut profile = store.load(name)?;
    profile.settings = settings;
    profile.instructions = instructions;
    profile.touch();
    store.save(&profile)
}

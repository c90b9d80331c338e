//! The top-level entry point
//!
//! [`ProfileManager`] wires the path resolver, profile store and backup
//! manager together and hosts the lifecycle operations a front-end calls:
//! create a profile from the live state, rename, delete, sync, switch and
//! toggle. Component access is available through the accessors for callers
//! that need finer control.

use crate::active::{self, ActiveConfig};
use crate::backup::BackupManager;
use crate::drift::DriftDetector;
use crate::error::{Error, Result};
use crate::export::{self, ExportedProfile};
use crate::health::{self, HealthReport};
use crate::paths::Paths;
use crate::profile::Profile;
use crate::store::ProfileStore;
use crate::switcher::{Switch, SwitchReport};
use crate::validate;
use log::{info, warn};
use std::io::{Read, Write};
use std::path::PathBuf;

/// Profile lifecycle operations over one base directory
#[derive(Debug, Clone)]
pub struct ProfileManager {
    paths: Paths,
    store: ProfileStore,
    backups: BackupManager,
}

impl ProfileManager {
    /// Open a manager over the given base directory, creating the skeleton
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ctxman::ProfileManager;
    ///
    /// let manager = ProfileManager::open("/home/me/.ctxman")?;
    /// manager.create_profile("work")?;
    /// manager.switch_to("work")?;
    /// # Ok::<(), ctxman::Error>(())
    /// ```
    pub fn open(base_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_paths(Paths::new(base_dir))
    }

    /// Open a manager over `~/.ctxman`
    pub fn open_default() -> Result<Self> {
        Self::with_paths(Paths::from_home()?)
    }

    /// Open a manager over precomputed locations
    pub fn with_paths(paths: Paths) -> Result<Self> {
        paths.ensure_dirs()?;
        Ok(Self {
            store: ProfileStore::new(paths.clone()),
            backups: BackupManager::new(paths.clone()),
            paths,
        })
    }

    /// The locations this manager operates on
    #[must_use]
    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// The profile store
    #[must_use]
    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// The backup manager
    #[must_use]
    pub fn backups(&self) -> &BackupManager {
        &self.backups
    }

    /// A drift detector over this manager's store
    #[must_use]
    pub fn drift(&self) -> DriftDetector<'_> {
        DriftDetector::new(&self.store)
    }

    // -------------------------------------------------------------------------
    // Lifecycle operations
    // -------------------------------------------------------------------------

    /// Create a profile by capturing the current active configuration
    ///
    /// A missing active settings document starts the profile from an empty
    /// one. Domain-rule violations in the captured state are logged as
    /// warnings rather than refused: the point of capture is to preserve
    /// what is there, fixable afterwards.
    ///
    /// # Errors
    ///
    /// [`Error::ProfileAlreadyExists`] on a name collision,
    /// [`Error::InvalidProfileName`] for an unusable name.
    pub fn create_profile(&self, name: &str) -> Result<Profile> {
        validate::profile_name(name)?;
        if self.store.exists(name) {
            return Err(Error::ProfileAlreadyExists(name.to_string()));
        }

        let active = ActiveConfig::read(&self.paths)?;
        let profile = Profile::from_active(
            name,
            active.settings_or_default(),
            active.instructions,
            active.services,
        );

        if let Err(e) = validate::settings(&profile.settings) {
            warn!("Captured settings fail validation: {e}");
        }
        if let Err(e) = validate::instructions(&profile.instructions) {
            warn!("Captured instructions fail validation: {e}");
        }

        self.store.save(&profile)?;
        info!("Created profile '{name}' from the active configuration");
        Ok(profile)
    }

    /// Delete a stored profile
    ///
    /// The previous pointer is cleared when it named the deleted profile,
    /// so a later toggle cannot land on a ghost.
    ///
    /// # Errors
    ///
    /// [`Error::CannotDeleteCurrentProfile`] for the profile that is
    /// current; [`Error::ProfileNotFound`] when it does not exist.
    pub fn delete_profile(&self, name: &str) -> Result<()> {
        if !self.store.exists(name) {
            return Err(Error::ProfileNotFound(name.to_string()));
        }
        if self.store.current()?.as_deref() == Some(name) {
            return Err(Error::CannotDeleteCurrentProfile(name.to_string()));
        }

        self.store.delete(name)?;

        if self.store.previous()?.as_deref() == Some(name) {
            self.store.set_previous(None)?;
        }

        info!("Deleted profile '{name}'");
        Ok(())
    }

    /// Rename a stored profile, repointing markers that named it
    ///
    /// Implemented as copy-under-new-name then delete-old; when the delete
    /// fails the new copy is removed again so the store never ends up with
    /// both names. Marker fixup failures are logged, not fatal: the rename
    /// itself has already happened.
    pub fn rename_profile(&self, old: &str, new: &str) -> Result<()> {
        validate::profile_name(new)?;
        if !self.store.exists(old) {
            return Err(Error::ProfileNotFound(old.to_string()));
        }
        if self.store.exists(new) {
            return Err(Error::ProfileAlreadyExists(new.to_string()));
        }

        let mut profile = self.store.load(old)?;
        profile.name = new.to_string();
        profile.touch();
        self.store.save(&profile)?;

        if let Err(e) = self.store.delete(old) {
            let _ = self.store.delete(new);
            return Err(e);
        }

        match self.store.current() {
            Ok(Some(name)) if name == old => {
                if let Err(e) = self.store.set_current(Some(new)) {
                    warn!("Failed to repoint current marker to '{new}': {e}");
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to read current marker during rename: {e}"),
        }
        match self.store.previous() {
            Ok(Some(name)) if name == old => {
                if let Err(e) = self.store.set_previous(Some(new)) {
                    warn!("Failed to repoint previous marker to '{new}': {e}");
                }
            }
            Ok(_) => {}
            Err(e) => warn!("Failed to read previous marker during rename: {e}"),
        }

        info!("Renamed profile '{old}' to '{new}'");
        Ok(())
    }

    /// Write the live active state back into a stored profile
    ///
    /// # Errors
    ///
    /// [`Error::ProfileNotFound`] when the profile does not exist; a
    /// missing active settings document is an I/O error (there is nothing
    /// to sync from).
    pub fn sync_profile(&self, name: &str) -> Result<()> {
        if !self.store.exists(name) {
            return Err(Error::ProfileNotFound(name.to_string()));
        }
        active::sync_into(&self.store, name)?;
        info!("Synced active configuration into profile '{name}'");
        Ok(())
    }

    /// Sync the current profile, returning its name
    ///
    /// # Errors
    ///
    /// [`Error::NoCurrentProfile`] when no current pointer is set.
    pub fn sync_current(&self) -> Result<String> {
        let name = self.store.current()?.ok_or(Error::NoCurrentProfile)?;
        self.sync_profile(&name)?;
        Ok(name)
    }

    // -------------------------------------------------------------------------
    // Switching
    // -------------------------------------------------------------------------

    /// Switch the active configuration to a stored profile
    ///
    /// See the crate docs for the full phase sequence: validate, snapshot,
    /// auto-sync, commit, pointer update, prune, with rollback to the
    /// snapshot on a failed commit.
    pub fn switch_to(&self, name: &str) -> Result<SwitchReport> {
        Switch::new(&self.store, &self.backups, name).run()
    }

    /// Switch back to the previous profile
    ///
    /// # Errors
    ///
    /// [`Error::NoPreviousProfile`] when no previous pointer is set;
    /// [`Error::ProfileNotFound`] when the pointed-to profile is gone.
    pub fn toggle(&self) -> Result<SwitchReport> {
        let previous = self.store.previous()?.ok_or(Error::NoPreviousProfile)?;
        if !self.store.exists(&previous) {
            return Err(Error::ProfileNotFound(previous));
        }
        self.switch_to(&previous)
    }

    // -------------------------------------------------------------------------
    // Inspection and interchange
    // -------------------------------------------------------------------------

    /// Run the non-fatal health checks against a stored profile
    pub fn check_health(&self, name: &str) -> Result<HealthReport> {
        let profile = self.store.load(name)?;
        Ok(health::check_profile(&profile))
    }

    /// Serialize a stored profile into an interchange document
    pub fn export_profile(&self, name: &str, writer: &mut impl Write) -> Result<()> {
        export::export_profile(&self.store, name, writer)
    }

    /// Import a profile from an interchange document
    ///
    /// `rename` overrides the name recorded in the document.
    pub fn import_profile(
        &self,
        reader: &mut impl Read,
        rename: Option<&str>,
    ) -> Result<Profile> {
        export::import_profile(&self.store, reader, rename)
    }

    /// Peek at an interchange document without storing anything
    pub fn inspect_export(&self, reader: &mut impl Read) -> Result<ExportedProfile> {
        export::read_export(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_creates_skeleton() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = ProfileManager::open(tmp.path().join("ctx")).unwrap();
        assert!(manager.paths().profiles_dir.is_dir());
        assert!(manager.paths().backups_dir.is_dir());
    }

    #[test]
    fn test_create_profile_collision() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = ProfileManager::open(tmp.path().join("ctx")).unwrap();

        manager.create_profile("work").unwrap();
        assert!(matches!(
            manager.create_profile("work"),
            Err(Error::ProfileAlreadyExists(_))
        ));
    }

    #[test]
    fn test_toggle_without_previous() {
        let tmp = tempfile::tempdir().unwrap();
        let manager = ProfileManager::open(tmp.path().join("ctx")).unwrap();
        let err = manager.toggle().unwrap_err();
        assert!(matches!(err, Error::NoPreviousProfile));
        assert!(err.is_not_found());
    }
}

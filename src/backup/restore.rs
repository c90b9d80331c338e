//! Restoring a snapshot over the active configuration

use super::BackupManager;
use crate::error::{self, Error, Result};
use crate::paths::{INSTRUCTIONS_FILE, SERVICES_FILE, SETTINGS_FILE};
use crate::registry::{self, ServiceMap};
use log::info;

impl BackupManager {
    /// Overwrite the active configuration with a backup's contents
    ///
    /// Snapshot files present in the backup are copied over the active
    /// files. Files absent from the backup were absent at capture time, so
    /// the restore removes the active instructions file and clears the
    /// registry's managed key (foreign registry keys stay untouched) rather
    /// than leaving current content behind.
    ///
    /// # Errors
    ///
    /// [`Error::BackupNotFound`] when no backup has this id.
    pub fn restore(&self, id: &str) -> Result<()> {
        let dir = self.paths.backup_dir(id);
        if !dir.is_dir() {
            return Err(Error::BackupNotFound(id.to_string()));
        }

        let settings_snapshot = dir.join(SETTINGS_FILE);
        if settings_snapshot.is_file() {
            error::copy_file(&settings_snapshot, &self.paths.settings_file)?;
        }

        let instructions_snapshot = dir.join(INSTRUCTIONS_FILE);
        if instructions_snapshot.is_file() {
            error::copy_file(&instructions_snapshot, &self.paths.instructions_file)?;
        } else if self.paths.instructions_file.is_file() {
            error::remove_file(&self.paths.instructions_file)?;
        }

        let services_snapshot = dir.join(SERVICES_FILE);
        if services_snapshot.is_file() {
            let services = registry::read_services_file(&services_snapshot)?;
            registry::save_services(&self.paths.registry_file, &services)?;
        } else if self.paths.registry_file.is_file() {
            registry::save_services(&self.paths.registry_file, &ServiceMap::new())?;
        }

        info!("Restored backup '{id}'");
        Ok(())
    }

    /// Restore the most recent backup, returning its id
    ///
    /// # Errors
    ///
    /// [`Error::NoBackups`] when no backups exist.
    pub fn restore_latest(&self) -> Result<String> {
        let id = self.latest()?.ok_or(Error::NoBackups)?;
        self.restore(&id)?;
        Ok(id)
    }
}

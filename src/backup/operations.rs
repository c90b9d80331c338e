//! Backup creation, listing and pruning

use super::types::{BACKUP_ID_PREFIX, Backup};
use crate::error::{self, Error, Result};
use crate::paths::{INSTRUCTIONS_FILE, Paths, SERVICES_FILE, SETTINGS_FILE};
use crate::registry;
use log::{debug, info, warn};
use std::path::Path;
use time::OffsetDateTime;

/// Snapshots of the active configuration, ordered newest-first
#[derive(Debug, Clone)]
pub struct BackupManager {
    pub(super) paths: Paths,
}

impl BackupManager {
    /// Create a manager over the given locations
    #[must_use]
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    /// Snapshot the active configuration into a new backup directory
    ///
    /// Copies each active file that currently exists; the services snapshot
    /// is the registry's managed key extracted into a standalone file. The
    /// backup is all-or-nothing: if any capture step fails, the partial
    /// directory is removed and the error propagated.
    ///
    /// # Errors
    ///
    /// I/O errors from the copies, or [`Error::Parse`] when the registry
    /// exists but cannot be read as JSON.
    pub fn create(&self) -> Result<String> {
        error::create_dir(&self.paths.backups_dir)?;

        let mut nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
        let mut id = format!("{BACKUP_ID_PREFIX}{nanos}");
        // bump until unused so rapid snapshots get distinct directories
        while self.paths.backup_dir(&id).exists() {
            nanos += 1;
            id = format!("{BACKUP_ID_PREFIX}{nanos}");
        }

        let dir = self.paths.backup_dir(&id);
        error::create_dir(&dir)?;

        if let Err(e) = self.capture_into(&dir) {
            let _ = std::fs::remove_dir_all(&dir);
            return Err(e);
        }

        info!("Created backup '{id}'");
        Ok(id)
    }

    fn capture_into(&self, dir: &Path) -> Result<()> {
        if self.paths.settings_file.is_file() {
            error::copy_file(&self.paths.settings_file, &dir.join(SETTINGS_FILE))?;
        }

        if self.paths.instructions_file.is_file() {
            error::copy_file(&self.paths.instructions_file, &dir.join(INSTRUCTIONS_FILE))?;
        }

        if self.paths.registry_file.is_file() {
            let services = registry::load_services(&self.paths.registry_file)?;
            if !services.is_empty() {
                registry::write_services_file(&dir.join(SERVICES_FILE), &services)?;
            }
        }

        Ok(())
    }

    /// All backups, newest first
    pub fn list(&self) -> Result<Vec<Backup>> {
        if !self.paths.backups_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();
        for entry in error::read_dir(&self.paths.backups_dir)? {
            let entry = entry.map_err(|e| Error::DirectoryRead {
                path: self.paths.backups_dir.clone(),
                source: e,
            })?;
            let Ok(id) = entry.file_name().into_string() else {
                continue;
            };
            if !id.starts_with(BACKUP_ID_PREFIX) || !entry.path().is_dir() {
                continue;
            }

            let created_at = Backup::timestamp_from_id(&id)
                .or_else(|| {
                    entry
                        .metadata()
                        .and_then(|m| m.modified())
                        .ok()
                        .map(OffsetDateTime::from)
                })
                .unwrap_or_else(OffsetDateTime::now_utc);
            backups.push(Backup { id, created_at });
        }

        backups.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(backups)
    }

    /// Id of the newest backup, if any exist
    pub fn latest(&self) -> Result<Option<String>> {
        Ok(self.list()?.first().map(|backup| backup.id.clone()))
    }

    /// Delete one backup
    ///
    /// # Errors
    ///
    /// [`Error::BackupNotFound`] when no backup has this id.
    pub fn delete(&self, id: &str) -> Result<()> {
        let dir = self.paths.backup_dir(id);
        if !dir.is_dir() {
            return Err(Error::BackupNotFound(id.to_string()));
        }
        error::remove_dir_all(&dir)?;
        debug!("Deleted backup '{id}'");
        Ok(())
    }

    /// Delete all but the `keep` newest backups, returning how many went
    ///
    /// Each delete is attempted independently so one stuck directory does
    /// not shield the rest from pruning; the first failure is returned
    /// after the sweep completes.
    pub fn prune(&self, keep: usize) -> Result<usize> {
        let backups = self.list()?;
        if backups.len() <= keep {
            return Ok(0);
        }

        let mut removed = 0;
        let mut first_error = None;
        for backup in &backups[keep..] {
            match error::remove_dir_all(&self.paths.backup_dir(&backup.id)) {
                Ok(()) => removed += 1,
                Err(e) => {
                    warn!("Failed to prune backup '{}': {e}", backup.id);
                    if first_error.is_none() {
                        first_error = Some(e);
                    }
                }
            }
        }

        debug!("Pruned {removed} backups, keeping {keep}");
        match first_error {
            Some(e) => Err(e),
            None => Ok(removed),
        }
    }
}

//! The switch algorithm
//!
//! No multi-file filesystem transaction exists, so a switch is modeled as
//! an explicit phase sequence with a compensating action: snapshot first,
//! then write the three active files in a fixed order, and restore the
//! snapshot if any write fails. Terminal states are Committed or
//! RolledBack; there is no partial success.

use crate::active;
use crate::backup::BackupManager;
use crate::drift::DriftDetector;
use crate::error::{self, Error, Result};
use crate::profile::Profile;
use crate::registry;
use crate::settings;
use crate::store::ProfileStore;
use crate::validate;
use log::{debug, info, warn};

/// How many backups survive the post-switch prune
pub const BACKUP_RETENTION: usize = 10;

/// Phases of one switch operation, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SwitchPhase {
    Validate,
    Snapshot,
    AutoSync,
    Commit,
    UpdatePointers,
    Committed,
    RolledBack,
}

/// What a completed switch did
#[derive(Debug, Clone)]
pub struct SwitchReport {
    /// Profile switched to
    pub profile: String,
    /// Profile that was current beforehand, if any
    pub previous: Option<String>,
    /// Snapshot taken before the commit; None when backup creation failed
    pub backup_id: Option<String>,
    /// Whether drifted live state was written back into the outgoing profile
    pub synced: bool,
    /// Non-fatal degradations encountered along the way
    pub warnings: Vec<String>,
}

/// One switch operation in flight
pub(crate) struct Switch<'a> {
    store: &'a ProfileStore,
    backups: &'a BackupManager,
    phase: SwitchPhase,
    report: SwitchReport,
}

impl<'a> Switch<'a> {
    pub(crate) fn new(
        store: &'a ProfileStore,
        backups: &'a BackupManager,
        target: impl Into<String>,
    ) -> Self {
        Self {
            store,
            backups,
            phase: SwitchPhase::Validate,
            report: SwitchReport {
                profile: target.into(),
                previous: None,
                backup_id: None,
                synced: false,
                warnings: Vec::new(),
            },
        }
    }

    /// Drive the switch to Committed or RolledBack
    pub(crate) fn run(mut self) -> Result<SwitchReport> {
        let incoming = self.validate()?;

        self.enter(SwitchPhase::Snapshot);
        self.snapshot();

        let outgoing = self.store.current()?;
        self.report.previous = outgoing.clone();

        self.enter(SwitchPhase::AutoSync);
        self.auto_sync(outgoing.as_deref());

        self.enter(SwitchPhase::Commit);
        if let Err(e) = self.commit(&incoming) {
            return Err(self.roll_back(e));
        }

        self.enter(SwitchPhase::UpdatePointers);
        if let Err(e) = self.update_pointers(outgoing.as_deref()) {
            return Err(self.roll_back(e));
        }

        self.enter(SwitchPhase::Committed);
        self.prune();

        info!("Switched to profile '{}'", self.report.profile);
        Ok(self.report)
    }

    fn enter(&mut self, phase: SwitchPhase) {
        debug!("Switch to '{}': {phase:?}", self.report.profile);
        self.phase = phase;
    }

    /// Target name, existence, load, domain rules. No side effects yet.
    fn validate(&mut self) -> Result<Profile> {
        self.enter(SwitchPhase::Validate);
        let target = self.report.profile.clone();
        validate::profile_name(&target)?;
        if !self.store.exists(&target) {
            return Err(Error::ProfileNotFound(target));
        }
        let profile = self.store.load(&target)?;
        validate::settings(&profile.settings)?;
        validate::instructions(&profile.instructions)?;
        Ok(profile)
    }

    /// Take the pre-commit snapshot; losing it costs rollback, not the switch
    fn snapshot(&mut self) {
        match self.backups.create() {
            Ok(id) => self.report.backup_id = Some(id),
            Err(e) => self.warn(format!(
                "Failed to create backup: {e}. Continuing without rollback protection."
            )),
        }
    }

    /// Persist drifted live state into the outgoing profile before it is abandoned
    fn auto_sync(&mut self, outgoing: Option<&str>) {
        let Some(outgoing) = outgoing else { return };
        if outgoing == self.report.profile {
            return;
        }

        match DriftDetector::new(self.store).has_changed(outgoing) {
            Ok(false) => {}
            Ok(true) => match active::sync_into(self.store, outgoing) {
                Ok(()) => {
                    self.report.synced = true;
                    info!("Synced unsaved changes back into profile '{outgoing}'");
                }
                Err(e) => self.warn(format!("Failed to sync profile '{outgoing}': {e}")),
            },
            Err(e) => self.warn(format!("Failed to check profile '{outgoing}' for drift: {e}")),
        }
    }

    /// The three active-file writes, fixed order, first failure aborts
    fn commit(&mut self, incoming: &Profile) -> Result<()> {
        let paths = self.store.paths();

        settings::save(&paths.settings_file, &incoming.settings)?;

        if incoming.has_instructions() {
            error::write_file(&paths.instructions_file, &incoming.instructions)?;
        } else if paths.instructions_file.is_file() {
            error::remove_file(&paths.instructions_file)?;
        }

        registry::save_services(&paths.registry_file, &incoming.services)?;
        Ok(())
    }

    fn update_pointers(&mut self, outgoing: Option<&str>) -> Result<()> {
        if let Some(outgoing) = outgoing {
            self.store.set_previous(Some(outgoing))?;
        }
        self.store.set_current(Some(&self.report.profile))
    }

    /// Compensate a failed commit; the original error always wins
    fn roll_back(&mut self, original: Error) -> Error {
        warn!(
            "Switch to '{}' failed during {:?}",
            self.report.profile, self.phase
        );
        self.enter(SwitchPhase::RolledBack);
        match self.report.backup_id.clone() {
            Some(id) => match self.backups.restore(&id) {
                Ok(()) => info!("Rolled back active configuration from backup '{id}'"),
                Err(e) => warn!("Failed to roll back from backup '{id}': {e}"),
            },
            None => warn!("No backup to roll back from; active files may be inconsistent"),
        }
        original
    }

    fn prune(&mut self) {
        if let Err(e) = self.backups.prune(BACKUP_RETENTION) {
            self.warn(format!("Failed to prune old backups: {e}"));
        }
    }

    fn warn(&mut self, message: String) {
        warn!("{message}");
        self.report.warnings.push(message);
    }
}

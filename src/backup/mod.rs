//! Backup and restore of the active configuration
//!
//! A backup is a plain directory under `backups/` named after its creation
//! time, holding a copy of whichever active files existed at capture time.
//! Absence of a snapshot file is meaningful: restoring a backup without an
//! instructions snapshot removes the active instructions file, and one
//! without a services snapshot clears the registry's managed key, so a
//! restore reproduces the captured state exactly instead of merging.

mod operations;
mod restore;
mod types;

pub use operations::BackupManager;
pub use types::{BACKUP_ID_PREFIX, Backup};

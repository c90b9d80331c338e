//! # ctxman - Configuration Context Manager
//!
//! A library for capturing a tool's live configuration into named profiles
//! and switching between them safely, with timestamped backups, drift
//! detection and automatic rollback.
//!
//! ## Features
//!
//! - **Profile Storage**: Named profiles persisted as plain directories of JSON and Markdown
//! - **Safe Switching**: Every switch snapshots the live files first and rolls back on failure
//! - **Auto-Sync**: Unsaved edits to the live files are folded back into the outgoing profile
//! - **Backup & Restore**: Timestamped snapshots with retention pruning, restorable at any time
//! - **Drift Detection**: Checksum comparison between the live files and a stored profile
//! - **Health Checks**: Advisory warnings for risky or likely-unintended settings
//! - **Export & Import**: Versioned JSON envelopes for moving profiles between machines
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ctxman::ProfileManager;
//!
//! let manager = ProfileManager::open_default()?;
//!
//! // Capture the live configuration under a name
//! manager.create_profile("work")?;
//!
//! // Activate another profile; the live files are backed up first and the
//! // outgoing profile picks up any unsaved edits
//! let report = manager.switch_to("personal")?;
//! println!("now on '{}', was {:?}", report.profile, report.previous);
//!
//! // Jump back to wherever we were before
//! manager.toggle()?;
//! # Ok::<(), ctxman::Error>(())
//! ```
//!
//! ## Backup & Restore
//!
//! ```rust,no_run
//! use ctxman::ProfileManager;
//!
//! # fn example() -> ctxman::Result<()> {
//! let manager = ProfileManager::open_default()?;
//!
//! // Snapshot the live configuration by hand
//! let backup = manager.backups().create()?;
//! println!("captured {backup}");
//!
//! // List what exists, newest first, and wind back to the latest
//! for backup in manager.backups().list()? {
//!     println!("{backup}");
//! }
//! manager.backups().restore_latest()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Export & Import
//!
//! ```rust,no_run
//! use ctxman::ProfileManager;
//!
//! # fn example() -> ctxman::Result<()> {
//! let manager = ProfileManager::open_default()?;
//!
//! // Render a profile into its portable JSON form
//! let mut envelope = Vec::new();
//! manager.export_profile("work", &mut envelope)?;
//!
//! // Bring it back in under a different name
//! manager.import_profile(&mut envelope.as_slice(), Some("work-laptop"))?;
//! # Ok(())
//! # }
//! ```

// Core modules
mod active;
mod drift;
mod error;
mod export;
mod health;
mod manager;
mod profile;
mod registry;
mod settings;
mod store;
mod switcher;

// Grouped modules
pub mod backup;
pub mod paths;
pub mod validate;

// Re-exports from core
pub use active::ActiveConfig;
pub use drift::{DriftDetector, settings_fingerprint, text_fingerprint};
pub use error::{Error, Result};
pub use export::{EXPORT_VERSION, ExportedProfile};
pub use health::{HealthReport, check_profile};
pub use manager::ProfileManager;
pub use paths::{DEFAULT_BASE_DIR, Paths};
pub use profile::Profile;
pub use registry::{MANAGED_KEY, ServiceDescriptor, ServiceMap};
pub use settings::{Permissions, SettingsDocument};
pub use store::ProfileStore;
pub use switcher::{BACKUP_RETENTION, SwitchReport};

// Backup re-exports
pub use backup::{BACKUP_ID_PREFIX, Backup, BackupManager};

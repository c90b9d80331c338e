//! Error types for the ctxman library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for ctxman operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the ctxman library
#[derive(Error, Debug)]
pub enum Error {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("Failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy '{from}' to '{to}': {source}")]
    FileCopy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete file '{path}': {source}")]
    FileDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read directory '{path}': {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete directory '{path}': {source}")]
    DirectoryDelete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not determine home directory")]
    HomeDirNotFound,

    // -------------------------------------------------------------------------
    // Serialization Errors
    // -------------------------------------------------------------------------
    #[error("Failed to serialize data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse '{path}': {reason}")]
    Parse { path: PathBuf, reason: String },

    // -------------------------------------------------------------------------
    // Profile Errors
    // -------------------------------------------------------------------------
    #[error("Profile '{0}' not found")]
    ProfileNotFound(String),

    #[error("Profile '{0}' already exists")]
    ProfileAlreadyExists(String),

    #[error("Cannot delete current profile '{0}'")]
    CannotDeleteCurrentProfile(String),

    #[error("Invalid profile name '{name}': {reason}")]
    InvalidProfileName { name: String, reason: String },

    #[error("No previous profile to switch to")]
    NoPreviousProfile,

    #[error("No current profile set")]
    NoCurrentProfile,

    // -------------------------------------------------------------------------
    // Validation Errors
    // -------------------------------------------------------------------------
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Invalid instructions: {0}")]
    InvalidInstructions(String),

    // -------------------------------------------------------------------------
    // Backup Errors
    // -------------------------------------------------------------------------
    #[error("Backup '{0}' not found")]
    BackupNotFound(String),

    #[error("No backups available")]
    NoBackups,

    // -------------------------------------------------------------------------
    // Export Errors
    // -------------------------------------------------------------------------
    #[error("Unsupported export version: expected {expected}, found {found}")]
    UnsupportedExportVersion { expected: String, found: String },

    #[error("Failed to write export data: {source}")]
    ExportWrite {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read import data: {source}")]
    ImportRead {
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Check if this is a "not found" type error
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Error::ProfileNotFound(_)
                | Error::BackupNotFound(_)
                | Error::NoBackups
                | Error::NoPreviousProfile
                | Error::NoCurrentProfile
        )
    }

    /// Check if this is a validation-type error detected before any mutation
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidProfileName { .. }
                | Error::InvalidSettings(_)
                | Error::InvalidInstructions(_)
                | Error::CannotDeleteCurrentProfile(_)
        )
    }
}

// =============================================================================
// Filesystem Helper Functions
// =============================================================================
// These reduce repetitive map_err patterns in the store and backup modules.

use std::path::Path;

/// Create a directory (and parents) with proper error handling
pub fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| Error::DirectoryCreate {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Copy a file with proper error handling
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64> {
    std::fs::copy(src, dest).map_err(|e| Error::FileCopy {
        from: src.to_path_buf(),
        to: dest.to_path_buf(),
        source: e,
    })
}

/// Read a file to a string with proper error handling
pub fn read_to_string(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write content to a file atomically (temp file + rename)
///
/// The content lands at `path` either completely or not at all; a reader
/// never observes a half-written file. The temp file is cleaned up when the
/// rename fails.
pub fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    let tmp = path.with_extension("tmp");
    std::fs::write(&tmp, contents).map_err(|e| Error::FileWrite {
        path: tmp.clone(),
        source: e,
    })?;
    std::fs::rename(&tmp, path).map_err(|e| {
        let _ = std::fs::remove_file(&tmp);
        Error::FileWrite {
            path: path.to_path_buf(),
            source: e,
        }
    })
}

/// Read directory entries with proper error handling
pub fn read_dir(path: &Path) -> Result<std::fs::ReadDir> {
    std::fs::read_dir(path).map_err(|e| Error::DirectoryRead {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Remove a file with proper error handling
pub fn remove_file(path: &Path) -> Result<()> {
    std::fs::remove_file(path).map_err(|e| Error::FileDelete {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Remove a directory tree with proper error handling
pub fn remove_dir_all(path: &Path) -> Result<()> {
    std::fs::remove_dir_all(path).map_err(|e| Error::DirectoryDelete {
        path: path.to_path_buf(),
        source: e,
    })
}

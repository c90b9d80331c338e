//! Profile persistence and current/previous pointer bookkeeping
//!
//! Each profile is a directory under `profiles/` holding a required
//! `settings.json` plus optional `INSTRUCTIONS.md` and `services.json`.
//! The current and previous pointers are two marker files in the base
//! directory, read and written on demand; there is no in-memory pointer
//! state to go stale.

use crate::error::{self, Error, Result};
use crate::paths::Paths;
use crate::profile::Profile;
use crate::registry::{self, ServiceMap};
use crate::settings;
use crate::validate;
use log::debug;
use std::path::Path;
use time::OffsetDateTime;

/// CRUD over stored profiles plus the pointer marker files
#[derive(Debug, Clone)]
pub struct ProfileStore {
    paths: Paths,
}

impl ProfileStore {
    /// Create a store over the given locations
    #[must_use]
    pub fn new(paths: Paths) -> Self {
        Self { paths }
    }

    /// The locations this store operates on
    #[must_use]
    pub fn paths(&self) -> &Paths {
        &self.paths
    }

    /// True iff a stored profile with this name has a settings document
    ///
    /// Presence of the settings file is the validity criterion; a corrupt
    /// document is only surfaced by [`ProfileStore::load`]. Names that fail
    /// the naming rules never exist: a name like `..` must not resolve to a
    /// path outside the profiles directory and then get deleted as one.
    #[must_use]
    pub fn exists(&self, name: &str) -> bool {
        validate::profile_name(name).is_ok() && self.paths.profile_settings(name).is_file()
    }

    /// Persist a profile, fully replacing any prior stored content
    ///
    /// The instructions file is written only when the profile has non-blank
    /// instructions, and the services file only when the service map is
    /// non-empty; a stale optional file from an earlier save is deleted so
    /// the stored directory always mirrors the record exactly.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidProfileName`] for unstorable names, otherwise I/O and
    /// serialization errors.
    pub fn save(&self, profile: &Profile) -> Result<()> {
        profile.validate()?;

        let dir = self.paths.profile_dir(&profile.name);
        error::create_dir(&dir)?;

        settings::save(&self.paths.profile_settings(&profile.name), &profile.settings)?;

        let instructions_path = self.paths.profile_instructions(&profile.name);
        if profile.has_instructions() {
            error::write_file(&instructions_path, &profile.instructions)?;
        } else if instructions_path.is_file() {
            error::remove_file(&instructions_path)?;
        }

        let services_path = self.paths.profile_services(&profile.name);
        if profile.services.is_empty() {
            if services_path.is_file() {
                error::remove_file(&services_path)?;
            }
        } else {
            registry::write_services_file(&services_path, &profile.services)?;
        }

        debug!("Saved profile '{}'", profile.name);
        Ok(())
    }

    /// Load a stored profile
    ///
    /// Instructions and services are optional on disk; the settings document
    /// is not, and a missing or malformed one is a hard error rather than an
    /// empty default.
    ///
    /// # Errors
    ///
    /// [`Error::ProfileNotFound`] when no such profile is stored.
    pub fn load(&self, name: &str) -> Result<Profile> {
        if !self.exists(name) {
            return Err(Error::ProfileNotFound(name.to_string()));
        }

        let settings_path = self.paths.profile_settings(name);
        let settings = settings::load(&settings_path)?;

        let instructions_path = self.paths.profile_instructions(name);
        let instructions = if instructions_path.is_file() {
            error::read_to_string(&instructions_path)?
        } else {
            String::new()
        };

        let services_path = self.paths.profile_services(name);
        let services = if services_path.is_file() {
            registry::read_services_file(&services_path)?
        } else {
            ServiceMap::new()
        };

        let (created_at, updated_at) = stored_times(&self.paths.profile_dir(name), &settings_path);

        Ok(Profile {
            name: name.to_string(),
            settings,
            instructions,
            services,
            created_at,
            updated_at,
        })
    }

    /// Names of all stored profiles, sorted
    ///
    /// Directories without a settings document are silently skipped; a
    /// missing profiles root yields an empty list.
    pub fn list(&self) -> Result<Vec<String>> {
        if !self.paths.profiles_dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        for entry in error::read_dir(&self.paths.profiles_dir)? {
            let entry = entry.map_err(|e| Error::DirectoryRead {
                path: self.paths.profiles_dir.clone(),
                source: e,
            })?;
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if entry.path().is_dir() && self.exists(&name) {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete a stored profile
    ///
    /// # Errors
    ///
    /// [`Error::ProfileNotFound`] when the profile never existed; deletion
    /// must not silently succeed on nothing.
    pub fn delete(&self, name: &str) -> Result<()> {
        if !self.exists(name) {
            return Err(Error::ProfileNotFound(name.to_string()));
        }
        error::remove_dir_all(&self.paths.profile_dir(name))?;
        debug!("Deleted profile '{name}'");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Pointer markers
    // -------------------------------------------------------------------------

    /// Name of the current profile, if one is set
    pub fn current(&self) -> Result<Option<String>> {
        read_marker(&self.paths.current_marker)
    }

    /// Set or clear the current pointer
    pub fn set_current(&self, name: Option<&str>) -> Result<()> {
        write_marker(&self.paths.current_marker, name)
    }

    /// Name of the previous profile, if one is set
    pub fn previous(&self) -> Result<Option<String>> {
        read_marker(&self.paths.previous_marker)
    }

    /// Set or clear the previous pointer
    pub fn set_previous(&self, name: Option<&str>) -> Result<()> {
        write_marker(&self.paths.previous_marker, name)
    }
}

/// Read a pointer marker; a missing or blank file is simply "unset"
fn read_marker(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = error::read_to_string(path)?;
    let name = content.trim();
    if name.is_empty() {
        Ok(None)
    } else {
        Ok(Some(name.to_string()))
    }
}

/// Write a pointer marker; clearing removes the file
fn write_marker(path: &Path, name: Option<&str>) -> Result<()> {
    match name {
        Some(name) => error::write_file(path, name),
        None => {
            if path.is_file() {
                error::remove_file(path)?;
            }
            Ok(())
        }
    }
}

/// Derive created/updated timestamps from stored file metadata
fn stored_times(dir: &Path, settings_path: &Path) -> (OffsetDateTime, OffsetDateTime) {
    let updated_at = std::fs::metadata(settings_path)
        .and_then(|m| m.modified())
        .map(OffsetDateTime::from)
        .unwrap_or_else(|_| OffsetDateTime::now_utc());
    let created_at = std::fs::metadata(dir)
        .and_then(|m| m.created().or_else(|_| m.modified()))
        .map(OffsetDateTime::from)
        .unwrap_or(updated_at);
    (created_at, updated_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_store() -> (tempfile::TempDir, ProfileStore) {
        let tmp = tempfile::tempdir().unwrap();
        let paths = Paths::new(tmp.path().join("ctx"));
        paths.ensure_dirs().unwrap();
        (tmp, ProfileStore::new(paths))
    }

    #[test]
    fn test_pointers_unset_by_default() {
        let (_tmp, store) = test_store();
        assert_eq!(store.current().unwrap(), None);
        assert_eq!(store.previous().unwrap(), None);
    }

    #[test]
    fn test_pointer_set_and_clear() {
        let (_tmp, store) = test_store();

        store.set_current(Some("work")).unwrap();
        assert_eq!(store.current().unwrap().as_deref(), Some("work"));

        store.set_current(None).unwrap();
        assert_eq!(store.current().unwrap(), None);
        assert!(!store.paths().current_marker.exists());

        // clearing an already-unset pointer is fine
        store.set_previous(None).unwrap();
    }

    #[test]
    fn test_resave_deletes_stale_optional_files() {
        let (_tmp, store) = test_store();

        let mut profile = Profile::new("work");
        profile.instructions = "# Use tabs".to_string();
        profile.services.insert("svc".to_string(), Default::default());
        store.save(&profile).unwrap();
        assert!(store.paths().profile_instructions("work").is_file());
        assert!(store.paths().profile_services("work").is_file());

        profile.instructions.clear();
        profile.services.clear();
        store.save(&profile).unwrap();
        assert!(!store.paths().profile_instructions("work").exists());
        assert!(!store.paths().profile_services("work").exists());

        let loaded = store.load("work").unwrap();
        assert_eq!(loaded.instructions, "");
        assert!(loaded.services.is_empty());
    }

    #[test]
    fn test_list_skips_partial_directories() {
        let (_tmp, store) = test_store();

        store.save(&Profile::new("alpha")).unwrap();
        store.save(&Profile::new("beta")).unwrap();
        std::fs::create_dir_all(store.paths().profile_dir("broken")).unwrap();

        assert_eq!(store.list().unwrap(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_delete_missing_profile_fails() {
        let (_tmp, store) = test_store();
        assert!(matches!(
            store.delete("ghost"),
            Err(Error::ProfileNotFound(_))
        ));
    }

    #[test]
    fn test_traversal_name_is_never_a_profile() {
        let (_tmp, store) = test_store();

        // `profiles/../settings.json` resolves to the live settings file, so
        // without the name check `..` would look like a stored profile and
        // delete would wipe the base directory.
        settings::save(&store.paths().settings_file, &Default::default()).unwrap();

        assert!(!store.exists(".."));
        assert!(matches!(store.delete(".."), Err(Error::ProfileNotFound(_))));
        assert!(store.paths().settings_file.is_file());
    }
}

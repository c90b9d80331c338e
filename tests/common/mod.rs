//! Common test utilities for ctxman integration tests
//!
//! Provides a shared fixture owning a temporary base directory and helpers
//! for seeding the active configuration files.

#![allow(dead_code)]

use ctxman::{Paths, Profile, ProfileManager};
use tempfile::TempDir;

// =============================================================================
// Test Fixture
// =============================================================================

/// Test fixture that provides a temporary base directory and an open manager
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub manager: ProfileManager,
}

impl TestFixture {
    /// Create a new fixture with an empty base directory
    pub fn new() -> Self {
        let _ = env_logger::builder().is_test(true).try_init();
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let manager =
            ProfileManager::open(temp_dir.path().join("ctxman")).expect("Failed to open manager");
        Self { temp_dir, manager }
    }

    /// The locations the manager operates on
    pub fn paths(&self) -> &Paths {
        self.manager.paths()
    }

    // -------------------------------------------------------------------------
    // Active file seeding
    // -------------------------------------------------------------------------

    /// Write the active settings document verbatim
    pub fn write_settings(&self, content: &str) {
        std::fs::write(&self.paths().settings_file, content).expect("Failed to write settings");
    }

    /// Write the active instructions file verbatim
    pub fn write_instructions(&self, content: &str) {
        std::fs::write(&self.paths().instructions_file, content)
            .expect("Failed to write instructions");
    }

    /// Write the active registry document verbatim
    pub fn write_registry(&self, content: &str) {
        std::fs::write(&self.paths().registry_file, content).expect("Failed to write registry");
    }

    pub fn read_settings(&self) -> String {
        std::fs::read_to_string(&self.paths().settings_file).expect("Failed to read settings")
    }

    pub fn read_instructions(&self) -> String {
        std::fs::read_to_string(&self.paths().instructions_file)
            .expect("Failed to read instructions")
    }

    pub fn read_registry(&self) -> String {
        std::fs::read_to_string(&self.paths().registry_file).expect("Failed to read registry")
    }

    // -------------------------------------------------------------------------
    // Profile seeding
    // -------------------------------------------------------------------------

    /// Seed the active files with recognizable content and capture them as
    /// a named profile
    pub fn seed_profile(&self, name: &str) -> Profile {
        self.write_settings(&format!("{{\"model\": \"model-{name}\"}}\n"));
        self.write_instructions(&format!("# Instructions for {name}\n"));
        self.manager
            .create_profile(name)
            .expect("Failed to create profile")
    }

    /// The model value `seed_profile` writes for a name
    pub fn seeded_model(name: &str) -> String {
        format!("model-{name}")
    }
}

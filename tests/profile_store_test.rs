//! Profile Store Integration Tests
//!
//! Tests for profile persistence including:
//! - Directory layout of stored profiles
//! - Save/load round trips through the public API
//! - Capture of the live configuration into a new profile
//! - Error reporting for missing and corrupt profiles

mod common;

use common::TestFixture;
use ctxman::Error;

// =============================================================================
// Layout
// =============================================================================

#[test]
fn test_stored_profile_directory_layout() {
    let fixture = TestFixture::new();
    fixture.write_settings("{\"model\": \"fast\"}\n");
    fixture.write_instructions("# Keep it short\n");
    fixture.write_registry("{\"services\": {\"runner\": {\"command\": \"run\"}}}\n");

    fixture.manager.create_profile("work").unwrap();

    let paths = fixture.paths();
    assert!(paths.profile_dir("work").is_dir());
    assert!(paths.profile_settings("work").is_file());
    assert!(paths.profile_instructions("work").is_file());
    assert!(paths.profile_services("work").is_file());
}

#[test]
fn test_optional_files_absent_for_minimal_profile() {
    let fixture = TestFixture::new();
    fixture.write_settings("{}\n");

    fixture.manager.create_profile("bare").unwrap();

    let paths = fixture.paths();
    assert!(paths.profile_settings("bare").is_file());
    assert!(!paths.profile_instructions("bare").exists());
    assert!(!paths.profile_services("bare").exists());
}

// =============================================================================
// Capture and Round Trips
// =============================================================================

#[test]
fn test_capture_preserves_unknown_settings_fields() {
    let fixture = TestFixture::new();
    fixture.write_settings(
        "{\"model\": \"fast\", \"theme\": \"dark\", \"nested\": {\"a\": [1, 2]}}\n",
    );

    fixture.manager.create_profile("work").unwrap();
    let profile = fixture.manager.store().load("work").unwrap();

    assert_eq!(profile.settings.model.as_deref(), Some("fast"));
    assert!(profile.settings.extra.contains_key("theme"));
    assert!(profile.settings.extra.contains_key("nested"));
}

#[test]
fn test_capture_picks_up_registry_services() {
    let fixture = TestFixture::new();
    fixture.write_settings("{}\n");
    fixture.write_registry(
        "{\"services\": {\"indexer\": {\"command\": \"indexd\", \"args\": [\"--quiet\"]}}, \
         \"unrelated\": true}\n",
    );

    let profile = fixture.manager.create_profile("work").unwrap();

    assert_eq!(profile.services.len(), 1);
    let indexer = &profile.services["indexer"];
    assert_eq!(indexer.command.as_deref(), Some("indexd"));
    assert_eq!(indexer.args, vec!["--quiet"]);
}

#[test]
fn test_create_profile_on_empty_base_dir() {
    let fixture = TestFixture::new();

    // no active files at all: the profile starts from an empty document
    let profile = fixture.manager.create_profile("fresh").unwrap();
    assert!(profile.is_empty());
    assert!(fixture.manager.store().exists("fresh"));
}

#[test]
fn test_list_is_sorted() {
    let fixture = TestFixture::new();
    fixture.write_settings("{}\n");
    for name in ["zeta", "alpha", "mid"] {
        fixture.manager.create_profile(name).unwrap();
    }

    assert_eq!(
        fixture.manager.store().list().unwrap(),
        vec!["alpha", "mid", "zeta"]
    );
}

// =============================================================================
// Error Reporting
// =============================================================================

#[test]
fn test_load_missing_profile() {
    let fixture = TestFixture::new();
    let err = fixture.manager.store().load("ghost").unwrap_err();
    assert!(matches!(err, Error::ProfileNotFound(_)));
    assert!(err.is_not_found());
}

#[test]
fn test_load_corrupt_profile_settings() {
    let fixture = TestFixture::new();
    fixture.write_settings("{}\n");
    fixture.manager.create_profile("work").unwrap();

    std::fs::write(fixture.paths().profile_settings("work"), "not json").unwrap();

    assert!(matches!(
        fixture.manager.store().load("work"),
        Err(Error::Parse { .. })
    ));
}

#[test]
fn test_invalid_profile_names_rejected() {
    let fixture = TestFixture::new();
    fixture.write_settings("{}\n");

    for name in ["", ".", "..", "a/b", "a\\b", "has space"] {
        let result = fixture.manager.create_profile(name);
        assert!(
            matches!(result, Err(Error::InvalidProfileName { .. })),
            "name {name:?} should be rejected"
        );
    }
}

//! Profile Lifecycle Integration Tests
//!
//! Tests for the manager-level operations including:
//! - Delete guards and pointer cleanup
//! - Rename with marker repointing
//! - Manual sync of live edits into a stored profile
//! - Export/import round trips and health checks

mod common;

use common::TestFixture;
use ctxman::{EXPORT_VERSION, Error};

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_refuses_current_profile() {
    let fixture = TestFixture::new();
    fixture.seed_profile("work");
    fixture.manager.switch_to("work").unwrap();

    let err = fixture.manager.delete_profile("work").unwrap_err();
    assert!(matches!(err, Error::CannotDeleteCurrentProfile(_)));
    assert!(err.is_validation_error());
    assert!(fixture.manager.store().exists("work"));
}

#[test]
fn test_delete_clears_stale_previous_pointer() {
    let fixture = TestFixture::new();
    fixture.seed_profile("a");
    fixture.seed_profile("b");
    fixture.manager.switch_to("a").unwrap();
    fixture.manager.switch_to("b").unwrap();

    fixture.manager.delete_profile("a").unwrap();

    assert_eq!(fixture.manager.store().previous().unwrap(), None);
    assert!(matches!(
        fixture.manager.toggle(),
        Err(Error::NoPreviousProfile)
    ));
}

// =============================================================================
// Rename
// =============================================================================

#[test]
fn test_rename_moves_stored_content() {
    let fixture = TestFixture::new();
    fixture.seed_profile("draft");

    fixture.manager.rename_profile("draft", "final").unwrap();

    assert!(!fixture.manager.store().exists("draft"));
    let renamed = fixture.manager.store().load("final").unwrap();
    assert_eq!(
        renamed.settings.model.as_deref(),
        Some(TestFixture::seeded_model("draft").as_str())
    );
    assert_eq!(renamed.instructions, "# Instructions for draft\n");
}

#[test]
fn test_rename_repoints_markers() {
    let fixture = TestFixture::new();
    fixture.seed_profile("a");
    fixture.seed_profile("b");
    fixture.manager.switch_to("a").unwrap();
    fixture.manager.switch_to("b").unwrap();

    fixture.manager.rename_profile("b", "main").unwrap();
    fixture.manager.rename_profile("a", "old").unwrap();

    let store = fixture.manager.store();
    assert_eq!(store.current().unwrap().as_deref(), Some("main"));
    assert_eq!(store.previous().unwrap().as_deref(), Some("old"));

    // the repointed previous marker still toggles
    let report = fixture.manager.toggle().unwrap();
    assert_eq!(report.profile, "old");
}

#[test]
fn test_rename_collision_rejected() {
    let fixture = TestFixture::new();
    fixture.seed_profile("a");
    fixture.seed_profile("b");

    assert!(matches!(
        fixture.manager.rename_profile("a", "b"),
        Err(Error::ProfileAlreadyExists(_))
    ));
    assert!(fixture.manager.store().exists("a"));
    assert!(fixture.manager.store().exists("b"));
}

// =============================================================================
// Sync
// =============================================================================

#[test]
fn test_sync_current_folds_live_edits_back() {
    let fixture = TestFixture::new();
    fixture.seed_profile("work");
    fixture.manager.switch_to("work").unwrap();

    fixture.write_settings("{\"model\": \"tuned\"}\n");
    fixture.write_instructions("# Updated notes\n");

    let synced = fixture.manager.sync_current().unwrap();
    assert_eq!(synced, "work");

    let profile = fixture.manager.store().load("work").unwrap();
    assert_eq!(profile.settings.model.as_deref(), Some("tuned"));
    assert_eq!(profile.instructions, "# Updated notes\n");
    assert!(!fixture.manager.drift().has_changed("work").unwrap());
}

#[test]
fn test_sync_current_without_pointer_fails() {
    let fixture = TestFixture::new();
    fixture.seed_profile("work");

    assert!(matches!(
        fixture.manager.sync_current(),
        Err(Error::NoCurrentProfile)
    ));
}

#[test]
fn test_drift_reported_after_live_edit() {
    let fixture = TestFixture::new();
    fixture.seed_profile("work");
    fixture.manager.switch_to("work").unwrap();

    assert!(!fixture.manager.drift().has_changed("work").unwrap());

    fixture.write_instructions("# Scribbles\n");
    assert!(fixture.manager.drift().has_changed("work").unwrap());
}

// =============================================================================
// Export, Import and Health
// =============================================================================

#[test]
fn test_export_import_round_trip_through_manager() {
    let fixture = TestFixture::new();
    fixture.write_settings("{\"model\": \"fast\", \"env\": {\"API_URL\": \"https://x\"}}\n");
    fixture.write_registry("{\"services\": {\"runner\": {\"command\": \"run\"}}}\n");
    fixture.manager.create_profile("work").unwrap();

    let mut envelope = Vec::new();
    fixture.manager.export_profile("work", &mut envelope).unwrap();

    let inspected = fixture
        .manager
        .inspect_export(&mut envelope.as_slice())
        .unwrap();
    assert_eq!(inspected.version, EXPORT_VERSION);
    assert_eq!(inspected.name, "work");

    let imported = fixture
        .manager
        .import_profile(&mut envelope.as_slice(), Some("work-copy"))
        .unwrap();
    assert_eq!(imported.name, "work-copy");

    let reloaded = fixture.manager.store().load("work-copy").unwrap();
    assert_eq!(reloaded.settings.model.as_deref(), Some("fast"));
    assert!(reloaded.services.contains_key("runner"));
}

#[test]
fn test_health_check_reports_and_clears_warnings() {
    let fixture = TestFixture::new();
    fixture.write_settings("{}\n");
    fixture.manager.create_profile("sparse").unwrap();

    let report = fixture.manager.check_health("sparse").unwrap();
    assert!(!report.is_clean());
    assert!(report.warning_count() >= 2);

    fixture.write_settings("{\"model\": \"fast\", \"env\": {\"API_URL\": \"https://x\"}}\n");
    fixture.manager.create_profile("full").unwrap();

    let report = fixture.manager.check_health("full").unwrap();
    assert!(report.is_clean());
    assert_eq!(report.summary(), "Healthy");
}

//! Backup and restore scenarios against a scratch save layout.

mod common;

use std::fs;

use common::Fixture;
use savesnap::{Engine, SnapError};

#[test]
fn test_first_backup_creates_backup_slot() {
    let fx = Fixture::with_account();
    fx.write_save("v1");
    let engine = Engine::new(fx.layout.clone());

    assert_eq!(engine.layout(), &fx.layout);
    engine.backup().expect("backup");

    assert_eq!(fx.backup().as_deref(), Some("v1"));
    assert_eq!(fx.previous_backup(), None);
    assert_eq!(fx.save().as_deref(), Some("v1"));
    fx.assert_no_staging();
}

#[test]
fn test_backup_rotates_previous_generation() {
    let fx = Fixture::with_account();
    fx.write_backup("v1");
    fx.write_save("v2");
    let engine = Engine::new(fx.layout.clone());

    engine.backup().expect("backup");

    assert_eq!(fx.previous_backup().as_deref(), Some("v1"));
    assert_eq!(fx.backup().as_deref(), Some("v2"));
    fx.assert_no_staging();
}

#[test]
fn test_restore_overwrites_live_save() {
    let fx = Fixture::with_account();
    fx.write_backup("v2");
    fx.write_save("v3 after dying to a boss");
    let engine = Engine::new(fx.layout.clone());

    engine.restore().expect("restore");

    assert_eq!(fx.save().as_deref(), Some("v2"));
    assert_eq!(fx.backup().as_deref(), Some("v2"));
    fx.assert_no_staging();
}

#[test]
fn test_backup_without_save_fails_and_changes_nothing() {
    let fx = Fixture::without_account();
    let engine = Engine::new(fx.layout.clone());

    let err = engine.backup().expect_err("backup should fail");

    assert!(matches!(err, SnapError::MissingSource { ref path } if *path == fx.layout.save));
    assert!(!err.is_fatal());
    assert_eq!(fx.save(), None);
    assert_eq!(fx.backup(), None);
    assert_eq!(fx.previous_backup(), None);
    fx.assert_no_staging();
}

#[test]
fn test_restore_without_backup_fails_and_keeps_save() {
    let fx = Fixture::with_account();
    fx.write_save("v1");
    let engine = Engine::new(fx.layout.clone());

    let err = engine.restore().expect_err("restore should fail");

    assert!(matches!(err, SnapError::MissingSource { ref path } if *path == fx.layout.backup));
    assert_eq!(fx.save().as_deref(), Some("v1"));
}

#[test]
fn test_repeated_backup_fills_both_slots() {
    let fx = Fixture::with_account();
    fx.write_save("v1");
    let engine = Engine::new(fx.layout.clone());

    engine.backup().expect("first backup");
    engine.backup().expect("second backup");

    assert_eq!(fx.backup().as_deref(), Some("v1"));
    assert_eq!(fx.previous_backup().as_deref(), Some("v1"));
    fx.assert_no_staging();
}

#[test]
fn test_backup_with_missing_save_still_rotates() {
    let fx = Fixture::without_account();
    fx.write_backup("v1");
    let engine = Engine::new(fx.layout.clone());

    let err = engine.backup().expect_err("backup should fail");

    assert!(matches!(err, SnapError::MissingSource { .. }));
    // Rotation ran before the capture failed; the backup slot is untouched.
    assert_eq!(fx.previous_backup().as_deref(), Some("v1"));
    assert_eq!(fx.backup().as_deref(), Some("v1"));
}

#[test]
fn test_failed_rotation_still_captures_save() {
    let fx = Fixture::with_account();
    fx.write_backup("old");
    fx.write_save("new");
    // Block the previous-backup slot with a directory remove_file cannot delete.
    fs::create_dir(&fx.layout.previous_backup).expect("mkdir");
    fs::write(fx.layout.previous_backup.join("blocker"), "x").expect("write");
    let engine = Engine::new(fx.layout.clone());

    let err = engine.backup().expect_err("backup should fail");

    assert!(matches!(
        err,
        SnapError::DeleteFailed { ref path, .. } if *path == fx.layout.previous_backup
    ));
    assert_eq!(fx.backup().as_deref(), Some("new"));
    assert!(fx.layout.previous_backup.join("blocker").exists());
    fx.assert_no_staging();
}

#[test]
fn test_backup_then_restore_roundtrip() {
    let fx = Fixture::with_account();
    fx.write_save("checkpoint");
    let engine = Engine::new(fx.layout.clone());

    engine.backup().expect("backup");
    fx.write_save("ruined");
    engine.restore().expect("restore");

    assert_eq!(fx.save().as_deref(), Some("checkpoint"));
}

#[test]
fn test_failed_restore_leaves_live_save_byte_identical() {
    let fx = Fixture::with_account();
    let live: &[u8] = b"\x00\x01live save\xff\xfe";
    fs::write(&fx.layout.save, live).expect("write save");
    // A directory in the backup slot exists but cannot be copied.
    fs::create_dir(&fx.layout.backup).expect("mkdir");
    let engine = Engine::new(fx.layout.clone());

    let err = engine.restore().expect_err("restore should fail");

    assert!(matches!(err, SnapError::CopyFailed { .. }));
    assert_eq!(fs::read(&fx.layout.save).expect("read save"), live);
    fx.assert_no_staging();
}

//! Ledger persistence tests.

use std::fs;

use proptest::prelude::*;
use tempfile::TempDir;

use medrxiv_ideation::Ledger;

#[test]
fn test_missing_file_is_empty_ledger() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("processed_titles.txt");

    let ledger = Ledger::open(&path).unwrap();
    assert!(ledger.is_empty());
    assert!(!path.exists(), "opening must not create the file");
}

#[test]
fn test_record_persists_across_instances() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("processed_titles.txt");

    let mut ledger = Ledger::open(&path).unwrap();
    ledger.record("Sleep and Blood Pressure").unwrap();
    assert!(ledger.contains("Sleep and Blood Pressure"));

    let reopened = Ledger::open(&path).unwrap();
    assert!(reopened.contains("Sleep and Blood Pressure"));
    assert_eq!(reopened.len(), 1);
}

#[test]
fn test_file_is_one_title_per_line() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.txt");

    let mut ledger = Ledger::open(&path).unwrap();
    ledger.record("  First title ").unwrap();
    ledger.record("Second\ntitle").unwrap();
    ledger.record("First title").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "First title\nSecond title\n");
    assert!(ledger.contains("Second title"));
    assert!(ledger.contains("Second \n title"));
}

#[test]
fn test_existing_file_is_loaded_and_appended() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.txt");
    fs::write(&path, "Old paper\n\n  Another old paper  \n").unwrap();

    let mut ledger = Ledger::open(&path).unwrap();
    assert_eq!(ledger.len(), 2);
    assert!(ledger.contains("Another old paper"));
    assert!(!ledger.contains(""));

    ledger.record("New paper").unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Old paper\n\n  Another old paper  \nNew paper\n"
    );
}

#[test]
fn test_blank_identifier_is_not_recorded() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.txt");

    let mut ledger = Ledger::open(&path).unwrap();
    ledger.record("   ").unwrap();
    assert!(ledger.is_empty());
    assert!(!path.exists());
}

#[test]
fn test_unreadable_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be read as a ledger file.
    let err = Ledger::open(dir.path()).unwrap_err();
    assert_eq!(err.path, dir.path());
}

#[test]
fn test_failed_append_still_marks_title_processed() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("missing_dir").join("ledger.txt");

    let mut ledger = Ledger::open(&path).unwrap();
    let err = ledger.record("Sleep and Blood Pressure").unwrap_err();
    assert_eq!(err.path, path);
    assert!(ledger.contains("Sleep and Blood Pressure"));

    // Already in memory: no second write attempt, no second error.
    assert!(ledger.record("Sleep and Blood Pressure").is_ok());
    assert!(!path.exists());
}

proptest! {
    /// Anything recorded is found again, in this instance and the next.
    #[test]
    fn recorded_titles_stay_processed(titles in proptest::collection::vec("[A-Za-z0-9 :,-]{1,60}", 1..8)) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ledger.txt");

        let mut ledger = Ledger::open(&path).unwrap();
        for title in &titles {
            ledger.record(title).unwrap();
            prop_assert!(ledger.contains(title) || title.trim().is_empty());
        }

        let reopened = Ledger::open(&path).unwrap();
        for title in &titles {
            prop_assert!(reopened.contains(title) || title.trim().is_empty());
        }
    }
}

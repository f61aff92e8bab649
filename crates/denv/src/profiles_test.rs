// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use tempfile::TempDir;

use super::*;

fn test_settings(tmp: &TempDir) -> Settings {
    let home = dunce::canonicalize(tmp.path()).unwrap();
    Settings::new(home.clone(), home.join("config"))
}

#[rstest]
fn test_set_and_get_active_profile() {
    let tmp = TempDir::new().unwrap();
    let settings = test_settings(&tmp);

    let mut store = ProfileStore::open(&settings).expect("Should open");
    store
        .set_active(tmp.path(), "staging")
        .expect("Should set profile");

    assert_eq!(store.active(tmp.path()), Some("staging"));
}

#[rstest]
fn test_unassigned_directory_has_no_profile() {
    let tmp = TempDir::new().unwrap();
    let settings = test_settings(&tmp);

    let store = ProfileStore::open(&settings).expect("Should open");

    assert_eq!(store.active(tmp.path()), None);
}

#[rstest]
fn test_assignments_persist_across_open() {
    let tmp = TempDir::new().unwrap();
    let settings = test_settings(&tmp);

    {
        let mut store = ProfileStore::open(&settings).expect("Should open");
        store.set_active(tmp.path(), "dev").expect("Should set");
    }

    let store = ProfileStore::open(&settings).expect("Should reopen");
    assert_eq!(store.active(tmp.path()), Some("dev"));
}

#[rstest]
fn test_clear_active_profile() {
    let tmp = TempDir::new().unwrap();
    let settings = test_settings(&tmp);

    let mut store = ProfileStore::open(&settings).expect("Should open");
    store.set_active(tmp.path(), "dev").expect("Should set");

    assert!(store.clear_active(tmp.path()).expect("Should clear"));
    assert_eq!(store.active(tmp.path()), None);

    // Clearing again reports nothing removed.
    assert!(!store.clear_active(tmp.path()).expect("Should clear"));
}

#[rstest]
#[case("has space")]
#[case("9leading-digit")]
#[case("bad/slash")]
#[case("")]
fn test_invalid_profile_names_rejected(#[case] name: &str) {
    let tmp = TempDir::new().unwrap();
    let settings = test_settings(&tmp);

    let mut store = ProfileStore::open(&settings).expect("Should open");
    let result = store.set_active(tmp.path(), name);

    assert!(matches!(
        result,
        Err(crate::Error::InvalidProfileName(_))
    ));
}

#[rstest]
fn test_profile_name_length_cap() {
    let tmp = TempDir::new().unwrap();
    let settings = test_settings(&tmp);

    let mut store = ProfileStore::open(&settings).expect("Should open");

    let at_cap = "p".repeat(crate::constants::MAX_PROFILE_NAME_LEN);
    store.set_active(tmp.path(), &at_cap).expect("Should set");

    let over_cap = "p".repeat(crate::constants::MAX_PROFILE_NAME_LEN + 1);
    let result = store.set_active(tmp.path(), &over_cap);

    assert!(matches!(
        result,
        Err(crate::Error::InvalidProfileName(_))
    ));
}

#[rstest]
fn test_overlay_filename_convention() {
    assert_eq!(crate::profile_filename("staging"), ".envrc.staging");
}

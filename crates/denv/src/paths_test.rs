// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

use rstest::rstest;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use super::*;

#[rstest]
#[case("/home/user/../etc/passwd")]
#[case("../sibling/.envrc")]
#[case("project/../../escape")]
fn test_traversal_segments_rejected(#[case] raw: &str) {
    let result = validate_path(Path::new(raw), &[]);

    match result {
        Err(crate::Error::PathTraversal(path)) => {
            assert_eq!(path, PathBuf::from(raw));
        }
        other => panic!("Expected PathTraversal, got: {:?}", other),
    }
}

#[rstest]
fn test_existing_file_canonicalized() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("file.txt");
    std::fs::write(&file, "x").unwrap();

    let resolved = validate_path(&file, &[]).expect("Should validate");

    assert_eq!(resolved, dunce::canonicalize(&file).unwrap());
}

#[cfg(unix)]
#[rstest]
fn test_symlink_resolved_to_target() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("real.txt");
    std::fs::write(&file, "x").unwrap();
    let link = tmp.path().join("link.txt");
    std::os::unix::fs::symlink(&file, &link).unwrap();

    let resolved = validate_path(&link, &[]).expect("Should validate");

    assert_eq!(resolved, dunce::canonicalize(&file).unwrap());
}

#[rstest]
fn test_missing_file_resolves_through_parent() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing.txt");

    let resolved = validate_path(&missing, &[]).expect("Should validate");

    assert_eq!(
        resolved,
        dunce::canonicalize(tmp.path()).unwrap().join("missing.txt")
    );
}

#[rstest]
fn test_missing_parent_falls_back_to_lexical() {
    let resolved =
        validate_path(Path::new("/no/such/dir/file.txt"), &[]).expect("Should validate");

    assert_eq!(resolved, PathBuf::from("/no/such/dir/file.txt"));
}

#[rstest]
fn test_relative_path_made_absolute() {
    let resolved = validate_path(Path::new("some-file"), &[]).expect("Should validate");

    assert!(resolved.is_absolute());
    assert!(resolved.ends_with("some-file"));
}

#[rstest]
fn test_outside_trusted_bases_is_advisory_only() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("file.txt");
    std::fs::write(&file, "x").unwrap();

    // Succeeds regardless: the boundary check is not a sandbox.
    let trusted = vec![PathBuf::from("/somewhere/else")];
    let result = validate_path(&file, &trusted);

    assert!(result.is_ok());
}

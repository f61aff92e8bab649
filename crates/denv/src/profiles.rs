// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Per-directory active-profile assignments.
//!
//! A profile selects an alternate environment file named by convention
//! (`.envrc.<profile>`) that the loader overlays on top of the base
//! file for that directory.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::Settings;
use crate::constants::{MAX_PROFILE_NAME_LEN, MAX_STORE_ENTRIES};
use crate::paths::validate_path;
use crate::store;

#[cfg(test)]
#[path = "./profiles_test.rs"]
mod profiles_test;

static PROFILE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_-]*$").unwrap());

/// Persisted mapping of canonical directory path to active profile.
#[derive(Debug)]
pub struct ProfileStore {
    store_path: PathBuf,
    trusted_bases: Vec<PathBuf>,
    assignments: BTreeMap<PathBuf, String>,
}

impl ProfileStore {
    /// Load the store, tolerating a missing or corrupt file.
    pub fn open(settings: &Settings) -> crate::Result<Self> {
        let store_path = settings.profiles_file();
        let assignments: BTreeMap<PathBuf, String> = store::load_json(&store_path)?;

        if assignments.len() > MAX_STORE_ENTRIES {
            return Err(crate::Error::StoreTooManyEntries {
                path: store_path,
                count: assignments.len(),
                limit: MAX_STORE_ENTRIES,
            });
        }

        Ok(Self {
            store_path,
            trusted_bases: settings.trusted_bases.clone(),
            assignments,
        })
    }

    /// Assign `name` as the active profile for `directory` and persist.
    pub fn set_active(&mut self, directory: &Path, name: &str) -> crate::Result<()> {
        if name.len() > MAX_PROFILE_NAME_LEN || !PROFILE_NAME.is_match(name) {
            return Err(crate::Error::InvalidProfileName(name.to_string()));
        }

        let canonical = validate_path(directory, &self.trusted_bases)?;
        self.assignments.insert(canonical, name.to_string());
        self.save()
    }

    /// The active profile for `directory`, if any.
    pub fn active(&self, directory: &Path) -> Option<&str> {
        let canonical = validate_path(directory, &self.trusted_bases).ok()?;
        self.assignments.get(&canonical).map(String::as_str)
    }

    /// Remove any assignment for `directory`, reporting whether one
    /// existed.
    pub fn clear_active(&mut self, directory: &Path) -> crate::Result<bool> {
        let canonical = validate_path(directory, &self.trusted_bases)?;
        let removed = self.assignments.remove(&canonical).is_some();

        if removed {
            self.save()?;
        }
        Ok(removed)
    }

    fn save(&self) -> crate::Result<()> {
        store::save_json(&self.store_path, &self.assignments)
    }
}

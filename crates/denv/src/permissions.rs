// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Persisted allow/deny decisions for environment files.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::constants::MAX_STORE_ENTRIES;
use crate::paths::validate_path;
use crate::store;

#[cfg(test)]
#[path = "./permissions_test.rs"]
mod permissions_test;

/// A single allow/deny decision for one canonical file path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct PermissionEntry {
    /// Whether loading the file is permitted.
    pub allowed: bool,
    /// Decision time in milliseconds since the epoch.
    pub timestamp: i64,
}

/// On-disk mapping of canonical environment-file path to decision.
///
/// Every CLI invocation reads the store fresh from disk; there is no
/// in-memory caching across processes. Concurrent writers race with
/// last-writer-wins semantics over the whole-file rewrite.
#[derive(Debug)]
pub struct PermissionStore {
    store_path: PathBuf,
    trusted_bases: Vec<PathBuf>,
    entries: BTreeMap<PathBuf, PermissionEntry>,
}

impl PermissionStore {
    /// Load the store, tolerating a missing or corrupt file.
    pub fn open(settings: &Settings) -> crate::Result<Self> {
        let store_path = settings.permissions_file();
        let entries: BTreeMap<PathBuf, PermissionEntry> = store::load_json(&store_path)?;

        if entries.len() > MAX_STORE_ENTRIES {
            return Err(crate::Error::StoreTooManyEntries {
                path: store_path,
                count: entries.len(),
                limit: MAX_STORE_ENTRIES,
            });
        }

        Ok(Self {
            store_path,
            trusted_bases: settings.trusted_bases.clone(),
            entries,
        })
    }

    /// Record an allow decision for `path` and persist the store.
    /// Returns the canonical path the entry is keyed by.
    pub fn grant(&mut self, path: &Path) -> crate::Result<PathBuf> {
        self.record(path, true)
    }

    /// Record a deny decision for `path` and persist the store.
    pub fn revoke(&mut self, path: &Path) -> crate::Result<PathBuf> {
        self.record(path, false)
    }

    fn record(&mut self, path: &Path, allowed: bool) -> crate::Result<PathBuf> {
        let canonical = validate_path(path, &self.trusted_bases)?;
        self.entries.insert(
            canonical.clone(),
            PermissionEntry {
                allowed,
                timestamp: Utc::now().timestamp_millis(),
            },
        );
        self.save()?;
        Ok(canonical)
    }

    /// Whether `path` has an explicit allow entry.
    ///
    /// Absence of an entry means not allowed. A path failing the safety
    /// check is simply not allowed rather than an error.
    pub fn is_allowed(&self, path: &Path) -> bool {
        let Ok(canonical) = validate_path(path, &self.trusted_bases) else {
            return false;
        };
        self.entries
            .get(&canonical)
            .map(|entry| entry.allowed)
            .unwrap_or(false)
    }

    /// Drop entries whose file no longer exists on disk, persisting if
    /// anything was removed. Returns the number of entries removed.
    pub fn prune(&mut self) -> crate::Result<usize> {
        let before = self.entries.len();
        self.entries.retain(|path, _| path.exists());
        let removed = before - self.entries.len();

        if removed > 0 {
            self.save()?;
        }
        Ok(removed)
    }

    /// Iterate all entries, keyed by canonical path.
    pub fn entries(&self) -> impl Iterator<Item = (&PathBuf, &PermissionEntry)> {
        self.entries.iter()
    }

    /// Number of stored decisions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no decisions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn save(&self) -> crate::Result<()> {
        store::save_json(&self.store_path, &self.entries)
    }
}

// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Directory-chain loading and merge of environment files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::parser::{parse_config, VariableMapping};
use crate::permissions::PermissionStore;
use crate::profiles::ProfileStore;
use crate::{profile_filename, ENVRC_FILENAME};

#[cfg(test)]
#[path = "./loader_test.rs"]
mod loader_test;

/// Outcome of attempting to load one environment file.
///
/// Only successful parses contribute variables; the other outcomes make
/// the ignore-and-continue policy of the chain walk explicit.
#[derive(Debug)]
pub enum FileLoad {
    /// No file at this path.
    Missing,
    /// File exists but has no allow entry in the permission store.
    Denied,
    /// File exists but could not be read.
    Unreadable(std::io::Error),
    /// Parsed successfully.
    Loaded(VariableMapping),
}

/// Loads and merges environment files along a directory chain.
pub struct Loader<'a> {
    settings: &'a Settings,
    permissions: &'a PermissionStore,
    profiles: &'a ProfileStore,
}

impl<'a> Loader<'a> {
    pub fn new(
        settings: &'a Settings,
        permissions: &'a PermissionStore,
        profiles: &'a ProfileStore,
    ) -> Self {
        Self {
            settings,
            permissions,
            profiles,
        }
    }

    /// Merge environment files from the home directory (or filesystem
    /// root) down to `start`.
    ///
    /// Nearer directories override same-named variables from further
    /// out; within one directory the profile overlay overrides the base
    /// file. A directory that fails to load contributes no variables
    /// and never aborts the walk, except for validation failures
    /// (cyclic or too-deep interpolation), which propagate.
    pub fn load_upward(&self, start: &Path) -> crate::Result<VariableMapping> {
        let chain = self.directory_chain(start);

        let mut merged = VariableMapping::new();
        for dir in chain.iter().rev() {
            merged.extend(self.load_directory(dir)?);
        }
        Ok(merged)
    }

    /// Load exactly one directory (base file plus profile overlay),
    /// with no ancestor walk. Used for command-execution contexts where
    /// the caller's ancestry must not apply.
    pub fn load_single(&self, directory: &Path) -> crate::Result<VariableMapping> {
        self.load_directory(&absolute(directory))
    }

    /// The ordered directories from `start` up to the home directory or
    /// filesystem root, whichever comes first. Each directory is
    /// identified by device and inode, not by path string, so a symlink
    /// cycle terminates the walk at the first revisit.
    pub fn directory_chain(&self, start: &Path) -> Vec<PathBuf> {
        let mut chain = Vec::new();
        let mut seen = HashSet::new();
        let mut current = absolute(start);

        loop {
            if let Some(identity) = directory_identity(&current) {
                if !seen.insert(identity) {
                    tracing::debug!(
                        path = %current.display(),
                        "directory already visited, stopping walk"
                    );
                    break;
                }
            }

            chain.push(current.clone());

            if current == self.settings.home_dir {
                break;
            }
            if !current.pop() {
                break;
            }
        }

        chain
    }

    /// Variables contributed by one directory: the base file, then the
    /// active profile's overlay on top of it. Skipped files are logged
    /// and contribute nothing.
    fn load_directory(&self, dir: &Path) -> crate::Result<VariableMapping> {
        let mut vars = VariableMapping::new();

        let base = dir.join(ENVRC_FILENAME);
        self.merge_file(&base, &mut vars)?;

        if let Some(profile) = self.profiles.active(dir) {
            let overlay = dir.join(profile_filename(profile));
            self.merge_file(&overlay, &mut vars)?;
        }

        Ok(vars)
    }

    fn merge_file(&self, path: &Path, vars: &mut VariableMapping) -> crate::Result<()> {
        match self.load_file(path)? {
            FileLoad::Loaded(parsed) => vars.extend(parsed),
            FileLoad::Missing => {}
            FileLoad::Denied => {
                tracing::warn!(
                    path = %path.display(),
                    "environment file is not allowed; run 'denv allow' to trust it"
                );
            }
            FileLoad::Unreadable(error) => {
                tracing::debug!(
                    path = %path.display(),
                    %error,
                    "skipping unreadable environment file"
                );
            }
        }
        Ok(())
    }

    /// Load one environment file, reporting skips as explicit outcomes
    /// rather than errors. Parse validation failures propagate.
    pub fn load_file(&self, path: &Path) -> crate::Result<FileLoad> {
        if !path.is_file() {
            return Ok(FileLoad::Missing);
        }
        if !self.permissions.is_allowed(path) {
            return Ok(FileLoad::Denied);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) => return Ok(FileLoad::Unreadable(error)),
        };

        Ok(FileLoad::Loaded(parse_config(&content)?))
    }
}

/// Absolute form of `path`, joined onto the current directory when
/// relative.
fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir().unwrap_or_default().join(path)
    }
}

#[cfg(unix)]
fn directory_identity(path: &Path) -> Option<(u64, u64)> {
    use std::os::unix::fs::MetadataExt;

    let metadata = path.metadata().ok()?;
    Some((metadata.dev(), metadata.ino()))
}

#[cfg(not(unix))]
fn directory_identity(path: &Path) -> Option<(u64, u64)> {
    None
}

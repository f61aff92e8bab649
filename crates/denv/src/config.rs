// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Process-wide settings resolved once at startup and passed into the
//! stores and loader, rather than read from globals.

use std::path::PathBuf;

use crate::constants::{PERMISSIONS_FILENAME, PROFILES_FILENAME};

/// Environment variable overriding the configuration directory.
pub const CONFIG_DIR_ENV: &str = "DENV_CONFIG_DIR";

/// Where denv state lives and where the ancestor walk terminates.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Directory at which `load_upward` stops walking.
    pub home_dir: PathBuf,

    /// Directory holding the persisted permission and profile stores.
    pub config_dir: PathBuf,

    /// Base directories considered trusted for environment files.
    /// Paths outside these produce an advisory warning on validation.
    pub trusted_bases: Vec<PathBuf>,
}

impl Settings {
    /// Resolve settings from the process environment.
    pub fn from_env() -> crate::Result<Self> {
        let home_dir = dirs::home_dir().ok_or(crate::Error::NoHomeDir)?;

        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .unwrap_or_else(|| home_dir.join(".config"))
                .join("denv"),
        };

        Ok(Self::new(home_dir, config_dir))
    }

    /// Build settings with explicit directories. The home directory is
    /// the sole trusted base by default.
    pub fn new(home_dir: PathBuf, config_dir: PathBuf) -> Self {
        let trusted_bases = vec![home_dir.clone()];
        Self {
            home_dir,
            config_dir,
            trusted_bases,
        }
    }

    /// Replace the trusted base directories.
    pub fn with_trusted_bases(mut self, trusted_bases: Vec<PathBuf>) -> Self {
        self.trusted_bases = trusted_bases;
        self
    }

    /// Path of the persisted permission store.
    pub fn permissions_file(&self) -> PathBuf {
        self.config_dir.join(PERMISSIONS_FILENAME)
    }

    /// Path of the persisted profile assignments.
    pub fn profiles_file(&self) -> PathBuf {
        self.config_dir.join(PROFILES_FILENAME)
    }
}

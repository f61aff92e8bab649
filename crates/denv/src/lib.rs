// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! denv - Directory-Scoped Environment Manager
//!
//! This crate provides the core library for loading per-directory
//! environment files (`.envrc`), gated by a persisted allow/deny
//! permission store.
//!
//! # Overview
//!
//! denv loads `KEY=VALUE` pairs from `.envrc` files along the chain of
//! directories between the current directory and the home directory,
//! with a secure-by-default design: a file contributes nothing until it
//! has been explicitly allowed, and variables capable of hijacking
//! dynamic loading or shell startup are always stripped.
//!
//! # Example
//!
//! ```text
//! # .envrc
//! export DATABASE_URL=postgres://localhost/dev
//! APP_ROOT="/srv/app"
//! CACHE_DIR=${APP_ROOT}/cache
//!
//! # lines with invalid names or dangerous names (PATH, LD_PRELOAD...)
//! # are dropped; ${VAR} references resolve within the same file.
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod parser;
pub mod paths;
pub mod permissions;
pub mod profiles;
mod store;

pub use config::Settings;
pub use error::{Error, Result};
pub use loader::{FileLoad, Loader};
pub use parser::{parse_config, VariableMapping};
pub use paths::validate_path;
pub use permissions::{PermissionEntry, PermissionStore};
pub use profiles::ProfileStore;

/// Well-known filename for environment files.
pub const ENVRC_FILENAME: &str = ".envrc";

/// Filename of the profile-specific overlay for `profile`.
pub fn profile_filename(profile: &str) -> String {
    format!("{ENVRC_FILENAME}.{profile}")
}

// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for denv operations.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience Result type with denv Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during denv operations.
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Path contains a parent-directory traversal segment
    #[error("Path traversal detected in {0:?}")]
    #[diagnostic(
        code(denv::path_traversal),
        help("Remove the '..' segments and use an absolute or plain relative path")
    )]
    PathTraversal(PathBuf),

    /// Store file exceeds the size cap
    #[error("Store file too large: {path:?} is {size} bytes (limit {limit})")]
    #[diagnostic(
        code(denv::store_too_large),
        help("The store file may be corrupt or tampered with; remove it to start fresh")
    )]
    StoreTooLarge { path: PathBuf, size: u64, limit: u64 },

    /// Store holds more entries than the cap allows
    #[error("Store has too many entries: {path:?} holds {count} (limit {limit})")]
    #[diagnostic(
        code(denv::store_too_many_entries),
        help("Run 'denv prune' to drop entries for files that no longer exist")
    )]
    StoreTooManyEntries {
        path: PathBuf,
        count: usize,
        limit: usize,
    },

    /// Cyclic ${VAR} reference in one environment file
    #[error("Cyclic variable reference: {chain}")]
    #[diagnostic(
        code(denv::cyclic_reference),
        help("Break the reference cycle shown in the chain")
    )]
    CyclicReference { chain: String },

    /// ${VAR} chain deeper than the recursion limit
    #[error("Variable interpolation exceeded {limit} levels while resolving {name:?}")]
    #[diagnostic(
        code(denv::interpolation_too_deep),
        help("Shorten the reference chain; deeply nested references are rejected")
    )]
    InterpolationTooDeep { name: String, limit: usize },

    /// Profile name fails the pattern or length check
    #[error("Invalid profile name: {0:?}")]
    #[diagnostic(
        code(denv::invalid_profile_name),
        help("Profile names match [a-zA-Z_][a-zA-Z0-9_-]* and are at most 64 characters")
    )]
    InvalidProfileName(String),

    /// Home directory could not be determined
    #[error("No home directory available")]
    #[diagnostic(code(denv::no_home_dir), help("Set the HOME environment variable"))]
    NoHomeDir,

    /// Failed to read file
    #[error("Failed to read file: {path:?}")]
    #[diagnostic(code(denv::read_failed))]
    ReadFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// Failed to write file
    #[error("Failed to write file: {path:?}")]
    #[diagnostic(code(denv::write_failed))]
    WriteFailed {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },

    /// IO error passthrough
    #[error(transparent)]
    #[diagnostic(code(denv::io_error))]
    Io(#[from] std::io::Error),
}

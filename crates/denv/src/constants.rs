// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Fixed limits and denylists shared across the crate.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Filename of the persisted permission store, under the config dir.
pub const PERMISSIONS_FILENAME: &str = "permissions.json";

/// Filename of the persisted profile assignments.
pub const PROFILES_FILENAME: &str = "profiles.json";

/// Largest store file we are willing to parse.
pub const MAX_STORE_BYTES: u64 = 1024 * 1024;

/// Most entries a store may hold.
pub const MAX_STORE_ENTRIES: usize = 10_000;

/// Recursion limit for `${VAR}` interpolation.
pub const MAX_INTERPOLATION_DEPTH: usize = 10;

/// Longest accepted profile name.
pub const MAX_PROFILE_NAME_LEN: usize = 64;

/// Variable names that are never propagated out of a parsed file,
/// regardless of the file's permission state. These can influence
/// dynamic loading, interpreter search paths, or shell startup if they
/// reach a child process environment.
pub static DANGEROUS_VARIABLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Dynamic linker hooks
        "LD_PRELOAD",
        "LD_LIBRARY_PATH",
        "LD_AUDIT",
        "DYLD_INSERT_LIBRARIES",
        "DYLD_LIBRARY_PATH",
        "DYLD_FRAMEWORK_PATH",
        // Executable and interpreter search paths
        "PATH",
        "PYTHONPATH",
        "PYTHONSTARTUP",
        "PERL5LIB",
        "PERL5OPT",
        "RUBYLIB",
        "RUBYOPT",
        "NODE_OPTIONS",
        "NODE_PATH",
        "CLASSPATH",
        // Shell startup hooks
        "BASH_ENV",
        "ENV",
        "ZDOTDIR",
        "PROMPT_COMMAND",
        "SHELLOPTS",
        "IFS",
        // Toolchain overrides
        "GIT_SSH_COMMAND",
        "RUSTC_WRAPPER",
        "CC",
        "CXX",
    ]
    .into_iter()
    .collect()
});

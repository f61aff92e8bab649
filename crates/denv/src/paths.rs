// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Path safety checks used for permission and profile lookups.

use std::path::{Component, Path, PathBuf};

#[cfg(test)]
#[path = "./paths_test.rs"]
mod paths_test;

/// Validate a path and produce its canonical form.
///
/// Any parent-directory segment is a hard failure. A path resolving
/// outside every trusted base only produces an advisory warning; the
/// system is advisory, not a sandbox.
pub fn validate_path(path: &Path, trusted_bases: &[PathBuf]) -> crate::Result<PathBuf> {
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return Err(crate::Error::PathTraversal(path.to_path_buf()));
    }

    let resolved = resolve(path);

    if !is_warning_exempt(&resolved)
        && !trusted_bases.iter().any(|base| resolved.starts_with(base))
    {
        tracing::warn!(
            path = %resolved.display(),
            "path is outside all trusted base directories"
        );
    }

    Ok(resolved)
}

/// Canonicalize with fallbacks for targets that do not exist yet:
/// resolve the parent and re-append the file name, then fall back to a
/// lexical absolute path.
fn resolve(path: &Path) -> PathBuf {
    if let Ok(canonical) = dunce::canonicalize(path) {
        return canonical;
    }

    if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
        let parent = if parent.as_os_str().is_empty() {
            Path::new(".")
        } else {
            parent
        };
        if let Ok(canonical) = dunce::canonicalize(parent) {
            return canonical.join(name);
        }
    }

    lexical_absolute(path)
}

/// Absolute form of `path` without consulting the filesystem beyond the
/// current-directory lookup. `..` segments were rejected earlier.
fn lexical_absolute(path: &Path) -> PathBuf {
    let mut out = if path.is_absolute() {
        PathBuf::new()
    } else {
        std::env::current_dir().unwrap_or_default()
    };

    for component in path.components() {
        match component {
            Component::CurDir => {}
            other => out.push(other.as_os_str()),
        }
    }

    out
}

/// Development-workflow paths exempt from the out-of-bounds warning.
/// Only directory segments count as dot segments; the managed files are
/// themselves dot-files.
fn is_warning_exempt(path: &Path) -> bool {
    let text = path.to_string_lossy();
    if text.contains("/tmp") || text.contains("/test") {
        return true;
    }

    let count = path.components().count();
    path.components()
        .take(count.saturating_sub(1))
        .any(|c| matches!(c, Component::Normal(seg) if seg.to_string_lossy().starts_with('.')))
}

// Copyright (c) Contributors to the denv project.
// SPDX-License-Identifier: Apache-2.0

//! Shared persistence for the JSON state files.

use std::io::Write;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::constants::MAX_STORE_BYTES;

/// Read a JSON store from `path`.
///
/// A missing file yields the default (empty) value; so does a corrupt
/// one, with a warning. A file over the size cap is a hard error, as a
/// protection against oversized store files.
pub(crate) fn load_json<T>(path: &Path) -> crate::Result<T>
where
    T: DeserializeOwned + Default,
{
    let metadata = match std::fs::metadata(path) {
        Ok(metadata) => metadata,
        Err(_) => return Ok(T::default()),
    };

    if metadata.len() > MAX_STORE_BYTES {
        return Err(crate::Error::StoreTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            limit: MAX_STORE_BYTES,
        });
    }

    warn_if_world_writable(path, &metadata);

    let content = std::fs::read_to_string(path).map_err(|e| crate::Error::ReadFailed {
        path: path.to_path_buf(),
        error: e,
    })?;

    match serde_json::from_str(&content) {
        Ok(value) => Ok(value),
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                %error,
                "corrupt store file, continuing with an empty store"
            );
            Ok(T::default())
        }
    }
}

/// Persist a JSON store to `path` via a whole-file rewrite: the content
/// is written to a temporary file in the same directory and renamed
/// into place. The store file ends up owner-only (600) inside an
/// owner-only (700) configuration directory.
pub(crate) fn save_json<T: Serialize>(path: &Path, value: &T) -> crate::Result<()> {
    let dir = path.parent().ok_or_else(|| crate::Error::WriteFailed {
        path: path.to_path_buf(),
        error: std::io::Error::new(std::io::ErrorKind::InvalidInput, "store path has no parent"),
    })?;

    std::fs::create_dir_all(dir).map_err(|e| crate::Error::WriteFailed {
        path: dir.to_path_buf(),
        error: e,
    })?;
    restrict_mode(dir, 0o700);

    let json = serde_json::to_string_pretty(value).map_err(|e| crate::Error::WriteFailed {
        path: path.to_path_buf(),
        error: e.into(),
    })?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| crate::Error::WriteFailed {
        path: path.to_path_buf(),
        error: e,
    })?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| crate::Error::WriteFailed {
            path: path.to_path_buf(),
            error: e,
        })?;
    tmp.persist(path).map_err(|e| crate::Error::WriteFailed {
        path: path.to_path_buf(),
        error: e.error,
    })?;

    restrict_mode(path, 0o600);
    Ok(())
}

#[cfg(unix)]
fn restrict_mode(path: &Path, mode: u32) {
    use std::os::unix::fs::PermissionsExt;

    if let Err(error) = std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)) {
        tracing::warn!(path = %path.display(), %error, "failed to restrict permissions");
    }
}

#[cfg(not(unix))]
fn restrict_mode(_path: &Path, _mode: u32) {}

#[cfg(unix)]
fn warn_if_world_writable(path: &Path, metadata: &std::fs::Metadata) {
    use std::os::unix::fs::PermissionsExt;

    if metadata.permissions().mode() & 0o002 != 0 {
        tracing::warn!(
            path = %path.display(),
            "store file is world-writable; fix with chmod 600"
        );
    }
}

#[cfg(not(unix))]
fn warn_if_world_writable(_path: &Path, _metadata: &std::fs::Metadata) {}

//! Settings path resolution.

use std::io;
use std::path::{Component, Path, PathBuf};

use crate::{ModuleError, ModuleResult};

/// Make `path` absolute against the current directory and fold away `.` and
/// `..` components, without touching the filesystem.
///
/// Idempotent: resolving an already resolved path returns it unchanged.
pub fn resolve_settings_path(path: &Path) -> ModuleResult<PathBuf> {
    let fail = |source: io::Error| ModuleError::PathResolution { path: path.to_path_buf(), source };
    if path.as_os_str().is_empty() {
        return Err(fail(io::Error::new(io::ErrorKind::InvalidInput, "empty path")));
    }
    let absolute = std::path::absolute(path).map_err(fail)?;
    Ok(normalize(&absolute))
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            // `..` at the root stays at the root.
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for file system operations,
//! such as writing result files in a single atomic step.
//!
//! 此模块提供文件系统操作的实用功能，
//! 例如以单个原子步骤写入结果文件。

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes `contents` to `path` through a temporary file in the same directory
/// that is renamed into place, so readers never observe a half-written file.
/// Missing parent directories are created.
///
/// The result carries the same permissions a plain `fs::write` would give it:
/// an existing file keeps its mode, a new one gets `0o666` minus the umask.
/// A symlinked destination is written through to its target.
///
/// 通过同一目录中的临时文件写入 `contents`，然后将其重命名到位，
/// 因此读取者永远不会看到写了一半的文件。结果文件的权限与普通 `fs::write` 相同。
///
/// # Arguments
/// * `path` - Destination file
/// * `contents` - Full file contents
pub fn write_atomically(path: &Path, contents: &str) -> Result<()> {
    let target = resolve_destination(path);
    let parent = parent_dir(&target);
    if !parent.exists() {
        fs::create_dir_all(&parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    let existing_permissions = fs::metadata(&target).ok().map(|meta| meta.permissions());

    let mut builder = tempfile::Builder::new();
    builder.prefix(".sweep_runner_");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Passed to open(2), so the process umask still applies.
        builder.permissions(fs::Permissions::from_mode(0o666));
    }

    let mut file = builder
        .tempfile_in(&parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    write_and_sync(&mut file, contents)
        .with_context(|| format!("Failed to write {}", target.display()))?;
    if let Some(permissions) = existing_permissions {
        file.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("Failed to copy permissions of {}", target.display()))?;
    }
    file.persist(&target).with_context(|| {
        format!("Failed to move result file into place: {}", target.display())
    })?;
    Ok(())
}

/// Follows a symlinked destination so the link itself is not replaced.
/// Dangling links are replaced like any other path.
fn resolve_destination(path: &Path) -> PathBuf {
    match fs::symlink_metadata(path) {
        Ok(meta) if meta.file_type().is_symlink() => {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        }
        _ => path.to_path_buf(),
    }
}

fn write_and_sync(file: &mut NamedTempFile, contents: &str) -> std::io::Result<()> {
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

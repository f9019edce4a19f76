//! Whole-tree copy and delete used by the cross-device move fallback

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use tracing::trace;
use walkdir::WalkDir;

/// Copy a file, or a directory and everything below it, to `to`.
///
/// Modification times are carried over; symlinks are recreated rather than
/// followed.
pub(crate) fn copy_tree(from: &Path, to: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(from)?;
    if !meta.is_dir() {
        return copy_entry(from, to, &meta);
    }

    // Directory times and permissions are restored once their contents are written.
    let mut directories: Vec<(PathBuf, fs::Permissions, FileTime)> = Vec::new();

    for entry in WalkDir::new(from).follow_links(false) {
        let entry = entry?;
        let relative = entry.path().strip_prefix(from).map_err(io::Error::other)?;
        let target = to.join(relative);
        let meta = entry.metadata()?;

        if entry.file_type().is_dir() {
            fs::create_dir(&target)?;
            let mtime = FileTime::from_last_modification_time(&meta);
            directories.push((target.clone(), meta.permissions(), mtime));
        } else {
            copy_entry(entry.path(), &target, &meta)?;
        }
        trace!(from = %entry.path().display(), to = %target.display(), "copied");
    }

    for (dir, permissions, mtime) in directories.into_iter().rev() {
        filetime::set_file_mtime(&dir, mtime)?;
        fs::set_permissions(&dir, permissions)?;
    }
    Ok(())
}

fn copy_entry(from: &Path, to: &Path, meta: &fs::Metadata) -> io::Result<()> {
    if meta.file_type().is_symlink() {
        return copy_symlink(from, to);
    }
    fs::copy(from, to)?;
    filetime::set_file_times(
        to,
        FileTime::from_last_access_time(meta),
        FileTime::from_last_modification_time(meta),
    )
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(fs::read_link(from)?, to)
}

#[cfg(windows)]
fn copy_symlink(from: &Path, to: &Path) -> io::Result<()> {
    let target = fs::read_link(from)?;
    if fs::metadata(from).is_ok_and(|meta| meta.is_dir()) {
        std::os::windows::fs::symlink_dir(target, to)
    } else {
        std::os::windows::fs::symlink_file(target, to)
    }
}

/// Delete a file, symlink or whole directory tree.
pub(crate) fn remove_tree(path: &Path) -> io::Result<()> {
    if fs::symlink_metadata(path)?.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    }
}

//! Windows platform backend over std and filetime

use std::ffi::CStr;
use std::fs;
use std::io;
use std::os::windows::fs::MetadataExt;

use filetime::FileTime;
use npk_core::{FileAttributes, FileInfo, Platform, PlatformCapabilities, Resolver, Timestamp, UNC_PREFIX};

use crate::copy;
use crate::{path_bytes, path_from_bytes, to_path_buf};

/// ERROR_NOT_SAME_DEVICE
const NOT_SAME_DEVICE: i32 = 17;

fn file_time(ts: Timestamp) -> FileTime {
    FileTime::from_system_time(ts.to_system_time())
}

/// Drop the long-path marker `fs::canonicalize` adds, unless the caller
/// asked for it.
fn strip_verbatim(original: &[u8], mut resolved: Vec<u8>) -> Vec<u8> {
    if original.starts_with(UNC_PREFIX) || !resolved.starts_with(UNC_PREFIX) {
        return resolved;
    }
    let rest = &resolved[UNC_PREFIX.len()..];
    if rest.starts_with(br"UNC\") {
        // \\?\UNC\server\share -> \\server\share
        resolved.drain(2..UNC_PREFIX.len() + 4);
    } else if rest.get(1) == Some(&b':') {
        resolved.drain(..UNC_PREFIX.len());
    }
    resolved
}

/// Host backend for Windows
#[derive(Debug, Clone)]
pub struct WindowsPlatform {
    capabilities: PlatformCapabilities,
}

impl WindowsPlatform {
    pub fn new() -> Self {
        Self::with_capabilities(PlatformCapabilities::detect())
    }

    pub fn with_capabilities(capabilities: PlatformCapabilities) -> Self {
        Self { capabilities }
    }
}

impl Default for WindowsPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for WindowsPlatform {
    fn current_dir(&self) -> io::Result<Vec<u8>> {
        std::env::current_dir().map(|dir| path_bytes(&dir))
    }

    fn resolve(&self, path: &[u8]) -> Option<Vec<u8>> {
        let resolved = fs::canonicalize(path_from_bytes(path)).ok()?;
        Some(strip_verbatim(path, path_bytes(&resolved)))
    }
}

impl Platform for WindowsPlatform {
    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    fn stat(&self, path: &CStr) -> io::Result<FileInfo> {
        let meta = fs::metadata(to_path_buf(path))?;

        let mut attributes = if meta.is_dir() {
            FileAttributes::DIRECTORY
        } else if meta.is_file() {
            FileAttributes::NORMAL
        } else {
            FileAttributes::empty()
        };
        if meta.permissions().readonly() {
            attributes |= FileAttributes::READONLY;
        }

        Ok(FileInfo::new(
            attributes,
            meta.file_size(),
            Timestamp::from_win_filetime(meta.last_write_time()),
            Timestamp::from_win_filetime(meta.last_access_time()),
        ))
    }

    fn create_dir(&self, path: &CStr) -> io::Result<()> {
        fs::create_dir(to_path_buf(path))
    }

    fn rename(&self, from: &CStr, to: &CStr) -> io::Result<()> {
        fs::rename(to_path_buf(from), to_path_buf(to))
    }

    fn is_cross_device(&self, err: &io::Error) -> bool {
        err.raw_os_error() == Some(NOT_SAME_DEVICE)
    }

    fn copy(&self, from: &CStr, to: &CStr) -> io::Result<()> {
        copy::copy_tree(&to_path_buf(from), &to_path_buf(to))
    }

    fn remove(&self, path: &CStr) -> io::Result<()> {
        copy::remove_tree(&to_path_buf(path))
    }

    fn remove_dir(&self, path: &CStr) -> io::Result<()> {
        fs::remove_dir(to_path_buf(path))
    }

    fn set_times(&self, path: &CStr, access: Timestamp, modification: Timestamp) -> io::Result<()> {
        filetime::set_file_times(to_path_buf(path), file_time(access), file_time(modification))
    }

    fn set_read_only(&self, path: &CStr, read_only: bool) -> io::Result<()> {
        let path = to_path_buf(path);
        let mut permissions = fs::metadata(&path)?.permissions();
        permissions.set_readonly(read_only);
        fs::set_permissions(&path, permissions)
    }

    fn read_dir(&self, path: &CStr, visit: &mut dyn FnMut(&[u8], bool) -> bool) -> io::Result<bool> {
        for entry in fs::read_dir(to_path_buf(path))? {
            let entry = entry?;
            let is_directory = entry.file_type().is_ok_and(|kind| kind.is_dir());
            let name = entry.file_name();
            if visit(name.to_string_lossy().as_bytes(), is_directory) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    fn free_space(&self, _path: &CStr) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "free space query is not available on Windows",
        ))
    }

    fn set_len(&self, path: &CStr, len: u64) -> io::Result<()> {
        fs::OpenOptions::new()
            .write(true)
            .open(to_path_buf(path))?
            .set_len(len)
    }
}

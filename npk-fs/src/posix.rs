//! POSIX platform backend over libc

use std::ffi::CStr;
use std::fs;
use std::io;
use std::mem::MaybeUninit;
use std::os::unix::ffi::OsStrExt;

use filetime::FileTime;
use npk_core::{FileAttributes, FileInfo, Permissions, Platform, PlatformCapabilities, Resolver, Timestamp};
use tracing::trace;

use crate::copy;
use crate::{path_bytes, path_from_bytes, to_path_buf};

fn cvt(ret: libc::c_int) -> io::Result<()> {
    if ret == -1 {
        Err(io::Error::last_os_error())
    } else {
        Ok(())
    }
}

fn raw_stat(path: &CStr) -> io::Result<libc::stat> {
    let mut st = MaybeUninit::<libc::stat>::uninit();
    cvt(unsafe { libc::stat(path.as_ptr(), st.as_mut_ptr()) })?;
    // SAFETY: stat succeeded and filled the buffer.
    Ok(unsafe { st.assume_init() })
}

#[allow(clippy::unnecessary_cast)]
fn file_info(st: &libc::stat) -> FileInfo {
    let mode = u32::from(st.st_mode);

    let mut attributes = match mode & u32::from(libc::S_IFMT) {
        kind if kind == u32::from(libc::S_IFDIR) => FileAttributes::DIRECTORY,
        kind if kind == u32::from(libc::S_IFREG) => FileAttributes::NORMAL,
        // fifos, sockets and device nodes
        _ => FileAttributes::empty(),
    };
    if mode & 0o222 == 0 {
        attributes |= FileAttributes::READONLY;
    }

    FileInfo::new(
        attributes,
        st.st_size as u64,
        Timestamp::from_unix_parts(st.st_mtime as i64, st.st_mtime_nsec as i64),
        Timestamp::from_unix_parts(st.st_atime as i64, st.st_atime_nsec as i64),
    )
    .with_permissions(Permissions::new(mode & 0o7777))
}

/// Mode bits after marking a file read-only or writable.
///
/// Read-only clears every write bit; writable restores the owner's.
pub(crate) fn read_only_mode(mode: u32, read_only: bool) -> u32 {
    let mode = mode & 0o7777;
    if read_only {
        mode & !0o222
    } else {
        mode | 0o200
    }
}

fn file_time(ts: Timestamp) -> FileTime {
    FileTime::from_system_time(ts.to_system_time())
}

/// Host backend for Linux, macOS and other Unix systems
#[derive(Debug, Clone)]
pub struct PosixPlatform {
    capabilities: PlatformCapabilities,
}

impl PosixPlatform {
    pub fn new() -> Self {
        Self::with_capabilities(PlatformCapabilities::detect())
    }

    pub fn with_capabilities(capabilities: PlatformCapabilities) -> Self {
        Self { capabilities }
    }
}

impl Default for PosixPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Resolver for PosixPlatform {
    fn current_dir(&self) -> io::Result<Vec<u8>> {
        std::env::current_dir().map(|dir| path_bytes(&dir))
    }

    fn resolve(&self, path: &[u8]) -> Option<Vec<u8>> {
        fs::canonicalize(path_from_bytes(path))
            .ok()
            .map(|resolved| path_bytes(&resolved))
    }
}

impl Platform for PosixPlatform {
    fn capabilities(&self) -> &PlatformCapabilities {
        &self.capabilities
    }

    fn stat(&self, path: &CStr) -> io::Result<FileInfo> {
        raw_stat(path).map(|st| file_info(&st))
    }

    fn create_dir(&self, path: &CStr) -> io::Result<()> {
        cvt(unsafe { libc::mkdir(path.as_ptr(), 0o777 as libc::mode_t) })
    }

    fn rename(&self, from: &CStr, to: &CStr) -> io::Result<()> {
        cvt(unsafe { libc::rename(from.as_ptr(), to.as_ptr()) })
    }

    fn is_cross_device(&self, err: &io::Error) -> bool {
        err.raw_os_error() == Some(libc::EXDEV)
    }

    fn copy(&self, from: &CStr, to: &CStr) -> io::Result<()> {
        copy::copy_tree(&to_path_buf(from), &to_path_buf(to))
    }

    fn remove(&self, path: &CStr) -> io::Result<()> {
        copy::remove_tree(&to_path_buf(path))
    }

    fn remove_dir(&self, path: &CStr) -> io::Result<()> {
        cvt(unsafe { libc::rmdir(path.as_ptr()) })
    }

    fn set_times(&self, path: &CStr, access: Timestamp, modification: Timestamp) -> io::Result<()> {
        filetime::set_file_times(to_path_buf(path), file_time(access), file_time(modification))
    }

    fn set_read_only(&self, path: &CStr, read_only: bool) -> io::Result<()> {
        let mode = read_only_mode(u32::from(raw_stat(path)?.st_mode), read_only);
        trace!(path = ?path, mode = format_args!("{mode:o}"), "chmod");
        cvt(unsafe { libc::chmod(path.as_ptr(), mode as libc::mode_t) })
    }

    fn read_dir(&self, path: &CStr, visit: &mut dyn FnMut(&[u8], bool) -> bool) -> io::Result<bool> {
        for entry in fs::read_dir(to_path_buf(path))? {
            let entry = entry?;
            let is_directory = entry.file_type().is_ok_and(|kind| kind.is_dir());
            if visit(entry.file_name().as_bytes(), is_directory) {
                return Ok(true);
            }
        }
        Ok(false)
    }

    #[allow(clippy::unnecessary_cast)]
    fn free_space(&self, path: &CStr) -> io::Result<u64> {
        let mut st = MaybeUninit::<libc::statvfs>::uninit();
        cvt(unsafe { libc::statvfs(path.as_ptr(), st.as_mut_ptr()) })?;
        // SAFETY: statvfs succeeded and filled the buffer.
        let st = unsafe { st.assume_init() };
        Ok((st.f_bavail as u64).saturating_mul(st.f_frsize as u64))
    }

    fn set_len(&self, path: &CStr, len: u64) -> io::Result<()> {
        let len = libc::off_t::try_from(len).map_err(|_| io::Error::from(io::ErrorKind::InvalidInput))?;
        cvt(unsafe { libc::truncate(path.as_ptr(), len) })
    }
}

//! Filesystem operations for Native Path Kit
//!
//! [`FileSystem`] runs every operation through a [`NativePath`] and a
//! [`Platform`] backend. The host backend is picked at compile time:
//! libc calls on Unix, `std` plus `filetime` on Windows.
//!
//! [`NativePath`]: npk_core::NativePath
//! [`Platform`]: npk_core::Platform

mod copy;
mod local;

#[cfg(unix)]
mod posix;

#[cfg(windows)]
mod windows;

use std::ffi::CStr;
use std::path::PathBuf;

pub use local::FileSystem;

#[cfg(unix)]
pub use posix::PosixPlatform;

#[cfg(windows)]
pub use windows::WindowsPlatform;

/// Backend for the platform this crate was built for
#[cfg(unix)]
pub type HostPlatform = PosixPlatform;

/// Backend for the platform this crate was built for
#[cfg(windows)]
pub type HostPlatform = WindowsPlatform;

pub(crate) fn to_path_buf(path: &CStr) -> PathBuf {
    path_from_bytes(path.to_bytes())
}

pub(crate) fn path_from_bytes(path: &[u8]) -> PathBuf {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        PathBuf::from(std::ffi::OsStr::from_bytes(path))
    }

    #[cfg(not(unix))]
    {
        PathBuf::from(String::from_utf8_lossy(path).into_owned())
    }
}

#[cfg(unix)]
pub(crate) fn path_bytes(path: &std::path::Path) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    path.as_os_str().as_bytes().to_vec()
}

#[cfg(not(unix))]
pub(crate) fn path_bytes(path: &std::path::Path) -> Vec<u8> {
    path.to_string_lossy().into_owned().into_bytes()
}

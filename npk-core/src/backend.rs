//! Platform backend trait

use std::ffi::CStr;
use std::io;

use crate::canonical::Resolver;
use crate::metadata::FileInfo;
use crate::platform::{PathStyle, PlatformCapabilities};
use crate::time::Timestamp;

/// Raw OS primitives behind the filesystem operations.
///
/// Paths are native and NUL-terminated. Implementations report plain
/// `io::Error`s; mapping to [`PathError`](crate::PathError) and the
/// fallback logic above these primitives live in the operations layer.
pub trait Platform: Resolver {
    fn capabilities(&self) -> &PlatformCapabilities;

    fn style(&self) -> PathStyle {
        self.capabilities().style
    }

    /// Metadata for `path`, following symlinks.
    fn stat(&self, path: &CStr) -> io::Result<FileInfo>;

    /// Create one directory. Fails with `AlreadyExists` if anything is
    /// already at `path`.
    fn create_dir(&self, path: &CStr) -> io::Result<()>;

    fn rename(&self, from: &CStr, to: &CStr) -> io::Result<()>;

    /// Whether `err`, returned by [`rename`](Platform::rename), means source
    /// and destination live on different devices.
    fn is_cross_device(&self, err: &io::Error) -> bool;

    /// Copy a file or a whole directory tree.
    fn copy(&self, from: &CStr, to: &CStr) -> io::Result<()>;

    /// Delete a file or a whole directory tree.
    fn remove(&self, path: &CStr) -> io::Result<()>;

    /// Delete an empty directory.
    fn remove_dir(&self, path: &CStr) -> io::Result<()>;

    fn set_times(&self, path: &CStr, access: Timestamp, modification: Timestamp) -> io::Result<()>;

    fn set_read_only(&self, path: &CStr, read_only: bool) -> io::Result<()>;

    /// Feed every entry of the directory to `visit` as `(name, is_directory)`
    /// until it returns `true` to stop. The `.` and `..` pseudo-entries may
    /// be among them.
    ///
    /// Returns whether `visit` stopped the walk.
    fn read_dir(&self, path: &CStr, visit: &mut dyn FnMut(&[u8], bool) -> bool) -> io::Result<bool>;

    /// Bytes available to an unprivileged caller on the volume holding `path`.
    fn free_space(&self, path: &CStr) -> io::Result<u64>;

    fn set_len(&self, path: &CStr, len: u64) -> io::Result<()>;
}

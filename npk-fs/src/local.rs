//! Filesystem operations over native paths

use std::ffi::CStr;
use std::io;

use npk_core::{
    canonical, AttributeMode, FileAttributes, FileInfo, MoveMethod, NativePath, PathError, PathResult, PathStyle,
    Platform, WalkEntry,
};
use tracing::{debug, trace, warn};

use crate::HostPlatform;

fn lossy(path: &CStr) -> String {
    path.to_string_lossy().into_owned()
}

/// Filesystem operations backed by a [`Platform`]
#[derive(Debug, Clone, Default)]
pub struct FileSystem<P: Platform = HostPlatform> {
    platform: P,
}

impl FileSystem<HostPlatform> {
    pub fn new() -> Self {
        Self::with_platform(HostPlatform::new())
    }
}

impl<P: Platform> FileSystem<P> {
    pub fn with_platform(platform: P) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn style(&self) -> PathStyle {
        self.platform.style()
    }

    fn native(&self, path: &[u8]) -> PathResult<NativePath> {
        let native = NativePath::try_from_input(Some(path), self.style())?;
        if native.is_empty() {
            return Err(PathError::InvalidArgument("empty path".into()));
        }
        Ok(native)
    }

    /// Metadata for `path`.
    pub fn stat(&self, path: impl AsRef<[u8]>) -> PathResult<FileInfo> {
        let native = self.native(path.as_ref())?;
        self.platform
            .stat(native.as_c_str())
            .map_err(|err| PathError::os("stat", native.as_bytes(), err))
    }

    /// Attributes of `path`, or `None` when it cannot be queried.
    ///
    /// A missing path and one the caller may not stat look the same.
    pub fn exists(&self, path: impl AsRef<[u8]>) -> Option<FileAttributes> {
        self.stat(path).ok().map(|info| info.attributes)
    }

    /// Create `path` and every missing ancestor.
    ///
    /// Succeeds without changes when the directory already exists. An
    /// ancestor that exists as anything but a directory is an error;
    /// directories created before the failure are left in place.
    pub fn create_directory(&self, path: impl AsRef<[u8]>) -> PathResult<()> {
        let style = self.style();
        let mut native = self.native(path.as_ref())?;
        native.trim_trailing_separator(style);

        let bytes = native.as_bytes();
        let root = style.root_len(bytes);
        let mut ends: Vec<usize> = bytes
            .iter()
            .enumerate()
            .skip(root)
            .filter(|&(_, &b)| style.is_separator(b))
            .map(|(i, _)| i)
            .collect();
        ends.push(native.len());

        for end in ends {
            native.with_prefix(end, |dir| self.ensure_directory(dir))?;
        }
        Ok(())
    }

    fn ensure_directory(&self, dir: &CStr) -> PathResult<()> {
        match self.platform.stat(dir) {
            Ok(info) if info.is_directory() => return Ok(()),
            Ok(_) => return Err(PathError::NotADirectory(lossy(dir))),
            Err(_) => {}
        }

        debug!(path = %dir.to_string_lossy(), "creating directory");
        match self.platform.create_dir(dir) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => match self.platform.stat(dir) {
                // created concurrently
                Ok(info) if info.is_directory() => Ok(()),
                _ => Err(PathError::NotADirectory(lossy(dir))),
            },
            Err(err) => Err(PathError::os("create_dir", dir.to_bytes(), err)),
        }
    }

    /// Move a file or directory, never replacing an existing `to`.
    ///
    /// Within one device this is an atomic rename. Across devices the
    /// source is copied and then deleted, which is not atomic: a failure
    /// while deleting leaves both copies in place.
    pub fn move_path(&self, from: impl AsRef<[u8]>, to: impl AsRef<[u8]>) -> PathResult<MoveMethod> {
        let src = self.native(from.as_ref())?;
        let dst = self.native(to.as_ref())?;

        if self.platform.stat(dst.as_c_str()).is_ok() {
            return Err(PathError::AlreadyExists(dst.to_string_lossy().into_owned()));
        }

        let err = match self.platform.rename(src.as_c_str(), dst.as_c_str()) {
            Ok(()) => {
                trace!(from = %src, to = %dst, "renamed");
                return Ok(MoveMethod::Renamed);
            }
            Err(err) => err,
        };
        if !self.platform.is_cross_device(&err) {
            return Err(PathError::os("rename", src.as_bytes(), err));
        }

        debug!(from = %src, to = %dst, "rename crosses devices, copying");
        if let Err(err) = self.platform.copy(src.as_c_str(), dst.as_c_str()) {
            // AlreadyExists: another writer created `to` after the check above
            if err.kind() != io::ErrorKind::AlreadyExists {
                if let Err(cleanup) = self.platform.remove(dst.as_c_str()) {
                    if cleanup.kind() != io::ErrorKind::NotFound {
                        warn!(path = %dst, %cleanup, "could not remove partial copy");
                    }
                }
            }
            return Err(PathError::os("copy", src.as_bytes(), err));
        }
        self.platform
            .remove(src.as_c_str())
            .map_err(|err| PathError::os("remove", src.as_bytes(), err))?;

        Ok(MoveMethod::CopiedAndDeleted)
    }

    /// Remove an empty directory.
    pub fn remove_directory(&self, path: impl AsRef<[u8]>) -> PathResult<()> {
        let native = self.native(path.as_ref())?;
        self.platform
            .remove_dir(native.as_c_str())
            .map_err(|err| PathError::os("remove_dir", native.as_bytes(), err))
    }

    /// Apply the sub-operations requested in `mode` using the values in `info`.
    ///
    /// Every requested sub-operation is attempted. Each one that succeeds
    /// clears its bit in `mode`; the first failure is returned. `info` is
    /// invalidated once anything was changed.
    pub fn set_attributes(
        &self,
        path: impl AsRef<[u8]>,
        mode: &mut AttributeMode,
        info: &mut FileInfo,
    ) -> PathResult<()> {
        let native = self.native(path.as_ref())?;
        let path = native.as_c_str();
        let mut first_error = None;
        let mut changed = false;

        if mode.contains(AttributeMode::SET_TIMES) {
            match self.platform.set_times(path, info.access_time, info.modification_time) {
                Ok(()) => {
                    mode.remove(AttributeMode::SET_TIMES);
                    changed = true;
                }
                Err(err) => first_error = Some(PathError::os("set_times", native.as_bytes(), err)),
            }
        }

        if mode.contains(AttributeMode::SET_PERMS) {
            match self.platform.set_read_only(path, info.is_read_only()) {
                Ok(()) => {
                    mode.remove(AttributeMode::SET_PERMS);
                    changed = true;
                }
                Err(err) => {
                    if first_error.is_none() {
                        first_error = Some(PathError::os("set_read_only", native.as_bytes(), err));
                    }
                }
            }
        }

        if changed {
            info.invalidate();
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Call `callback` for each entry of the directory `path` until it
    /// returns `true` to stop.
    ///
    /// `.` and `..` are never reported. Returns whether the callback
    /// stopped the walk.
    pub fn enumerate_directory<F>(&self, path: impl AsRef<[u8]>, mut callback: F) -> PathResult<bool>
    where
        F: FnMut(&WalkEntry<'_>) -> bool,
    {
        let root = path.as_ref();
        let native = self.native(root)?;

        let mut visit = |name: &[u8], is_directory: bool| {
            if WalkEntry::is_pseudo(name) {
                return false;
            }
            callback(&WalkEntry::new(root, name, is_directory))
        };

        self.platform
            .read_dir(native.as_c_str(), &mut visit)
            .map_err(|err| PathError::os("read_dir", native.as_bytes(), err))
    }

    /// Absolute form of `path` with `.`, `..` and symlinks resolved.
    pub fn canonicalize(&self, path: impl AsRef<[u8]>) -> PathResult<Vec<u8>> {
        canonical::canonicalize_with(&self.platform, path.as_ref(), self.style())
    }

    /// Canonicalize `buf` in place; it is left as it was on error.
    pub fn canonicalize_in_place(&self, buf: &mut Vec<u8>) -> PathResult<()> {
        canonical::canonicalize_in_place(&self.platform, buf, self.style())
    }

    /// Bytes available on the volume holding `path`.
    pub fn free_space(&self, path: impl AsRef<[u8]>) -> PathResult<u64> {
        let native = self.native(path.as_ref())?;
        self.platform
            .free_space(native.as_c_str())
            .map_err(|err| PathError::os("free_space", native.as_bytes(), err))
    }

    /// Truncate or extend the file at `path` to `len` bytes.
    ///
    /// Running out of space is reported as [`PathError::NoSpace`].
    pub fn set_eof(&self, path: impl AsRef<[u8]>, len: u64, info: &mut FileInfo) -> PathResult<()> {
        let native = self.native(path.as_ref())?;
        self.platform
            .set_len(native.as_c_str(), len)
            .map_err(|err| PathError::os("set_eof", native.as_bytes(), err))?;
        info.invalidate();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use npk_core::{ErrorKind, PlatformCapabilities, Resolver, Timestamp};
    use std::cell::RefCell;
    use std::fs;
    use tempfile::TempDir;

    const XDEV: i32 = 18;

    #[derive(Default)]
    struct FakePlatform {
        entries: Vec<(&'static str, bool)>,
        cross_device: bool,
        copy_error: Option<io::ErrorKind>,
        fail_times: bool,
        set_len_error: Option<io::ErrorKind>,
        calls: RefCell<Vec<String>>,
    }

    impl FakePlatform {
        fn record(&self, call: impl Into<String>) {
            self.calls.borrow_mut().push(call.into());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl Resolver for FakePlatform {
        fn current_dir(&self) -> io::Result<Vec<u8>> {
            Ok(b"/fake".to_vec())
        }

        fn resolve(&self, _path: &[u8]) -> Option<Vec<u8>> {
            None
        }
    }

    impl Platform for FakePlatform {
        fn capabilities(&self) -> &PlatformCapabilities {
            static POSIX: std::sync::OnceLock<PlatformCapabilities> = std::sync::OnceLock::new();
            POSIX.get_or_init(PlatformCapabilities::posix)
        }

        fn stat(&self, _path: &CStr) -> io::Result<FileInfo> {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }

        fn create_dir(&self, path: &CStr) -> io::Result<()> {
            self.record(format!("mkdir {}", lossy(path)));
            Ok(())
        }

        fn rename(&self, from: &CStr, to: &CStr) -> io::Result<()> {
            self.record(format!("rename {} {}", lossy(from), lossy(to)));
            if self.cross_device {
                return Err(io::Error::from_raw_os_error(XDEV));
            }
            Ok(())
        }

        fn is_cross_device(&self, err: &io::Error) -> bool {
            err.raw_os_error() == Some(XDEV)
        }

        fn copy(&self, from: &CStr, to: &CStr) -> io::Result<()> {
            self.record(format!("copy {} {}", lossy(from), lossy(to)));
            match self.copy_error {
                Some(kind) => Err(io::Error::from(kind)),
                None => Ok(()),
            }
        }

        fn remove(&self, path: &CStr) -> io::Result<()> {
            self.record(format!("remove {}", lossy(path)));
            Ok(())
        }

        fn remove_dir(&self, path: &CStr) -> io::Result<()> {
            self.record(format!("rmdir {}", lossy(path)));
            Ok(())
        }

        fn set_times(&self, path: &CStr, _access: Timestamp, _modification: Timestamp) -> io::Result<()> {
            self.record(format!("set_times {}", lossy(path)));
            if self.fail_times {
                return Err(io::Error::from(io::ErrorKind::PermissionDenied));
            }
            Ok(())
        }

        fn set_read_only(&self, path: &CStr, read_only: bool) -> io::Result<()> {
            self.record(format!("set_read_only {} {read_only}", lossy(path)));
            Ok(())
        }

        fn read_dir(&self, _path: &CStr, visit: &mut dyn FnMut(&[u8], bool) -> bool) -> io::Result<bool> {
            for (name, is_directory) in &self.entries {
                if visit(name.as_bytes(), *is_directory) {
                    return Ok(true);
                }
            }
            Ok(false)
        }

        fn free_space(&self, _path: &CStr) -> io::Result<u64> {
            Ok(4096)
        }

        fn set_len(&self, _path: &CStr, _len: u64) -> io::Result<()> {
            match self.set_len_error {
                Some(kind) => Err(io::Error::from(kind)),
                None => Ok(()),
            }
        }
    }

    fn path_of(dir: &TempDir, rest: &str) -> String {
        format!("{}/{rest}", dir.path().display())
    }

    #[test]
    fn test_create_directory_recursive() {
        let dir = TempDir::new().unwrap();
        let fs_ops = FileSystem::new();
        let target = path_of(&dir, "a/b/c");

        fs_ops.create_directory(&target).unwrap();
        assert!(dir.path().join("a").is_dir());
        assert!(dir.path().join("a/b").is_dir());
        assert!(dir.path().join("a/b/c").is_dir());

        fs_ops.create_directory(&target).unwrap();
        assert!(dir.path().join("a/b/c").is_dir());
    }

    #[test]
    fn test_create_directory_trailing_separator() {
        let dir = TempDir::new().unwrap();
        let fs_ops = FileSystem::new();
        fs_ops.create_directory(path_of(&dir, "x/y/")).unwrap();
        assert!(dir.path().join("x/y").is_dir());
    }

    #[test]
    fn test_create_directory_blocked_by_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), b"not a dir").unwrap();

        let err = FileSystem::new().create_directory(path_of(&dir, "a/b/c")).unwrap_err();
        assert!(matches!(err, PathError::NotADirectory(_)));
        assert!(!dir.path().join("a/b").exists());
    }

    #[test]
    fn test_create_directory_empty_path() {
        let err = FileSystem::new().create_directory("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_exists_reports_directories_and_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("f"), b"").unwrap();
        let fs_ops = FileSystem::new();

        let attrs = fs_ops.exists(dir.path().to_string_lossy().as_bytes()).unwrap();
        assert!(attrs.contains(FileAttributes::DIRECTORY));
        assert!(!attrs.contains(FileAttributes::NORMAL));

        let attrs = fs_ops.exists(path_of(&dir, "f")).unwrap();
        assert!(attrs.contains(FileAttributes::NORMAL));

        assert!(fs_ops.exists(path_of(&dir, "missing")).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn test_exists_device_node_is_not_a_regular_file() {
        let attrs = FileSystem::new().exists("/dev/null").unwrap();
        assert!(!attrs.contains(FileAttributes::NORMAL));
        assert!(!attrs.contains(FileAttributes::DIRECTORY));
    }

    #[test]
    fn test_move_refuses_existing_destination() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("src"), b"source").unwrap();
        fs::write(dir.path().join("dst"), b"destination").unwrap();

        let err = FileSystem::new()
            .move_path(path_of(&dir, "src"), path_of(&dir, "dst"))
            .unwrap_err();
        assert!(matches!(err, PathError::AlreadyExists(_)));
        assert_eq!(fs::read(dir.path().join("src")).unwrap(), b"source");
        assert_eq!(fs::read(dir.path().join("dst")).unwrap(), b"destination");
    }

    #[test]
    fn test_move_renames() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("old")).unwrap();
        fs::write(dir.path().join("old/inner.txt"), b"1").unwrap();

        let method = FileSystem::new()
            .move_path(path_of(&dir, "old"), path_of(&dir, "new"))
            .unwrap();
        assert_eq!(method, MoveMethod::Renamed);
        assert!(!dir.path().join("old").exists());
        assert_eq!(fs::read(dir.path().join("new/inner.txt")).unwrap(), b"1");
    }

    #[test]
    fn test_move_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = FileSystem::new()
            .move_path(path_of(&dir, "nope"), path_of(&dir, "dst"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Os);
    }

    #[test]
    fn test_move_cross_device_falls_back() {
        let fs_ops = FileSystem::with_platform(FakePlatform { cross_device: true, ..Default::default() });
        let method = fs_ops.move_path("/mnt/a/file", "/mnt/b/file").unwrap();

        assert_eq!(method, MoveMethod::CopiedAndDeleted);
        assert_eq!(
            fs_ops.platform().calls(),
            vec![
                "rename /mnt/a/file /mnt/b/file",
                "copy /mnt/a/file /mnt/b/file",
                "remove /mnt/a/file",
            ]
        );
    }

    #[test]
    fn test_move_failed_copy_keeps_source() {
        let fs_ops = FileSystem::with_platform(FakePlatform {
            cross_device: true,
            copy_error: Some(io::ErrorKind::PermissionDenied),
            ..Default::default()
        });
        let err = fs_ops.move_path("/mnt/a/file", "/mnt/b/file").unwrap_err();

        assert!(matches!(err, PathError::Os { op: "copy", .. }));
        let calls = fs_ops.platform().calls();
        assert!(!calls.contains(&"remove /mnt/a/file".to_string()));
        assert_eq!(calls.last().map(String::as_str), Some("remove /mnt/b/file"));
    }

    #[test]
    fn test_move_keeps_destination_created_concurrently() {
        let fs_ops = FileSystem::with_platform(FakePlatform {
            cross_device: true,
            copy_error: Some(io::ErrorKind::AlreadyExists),
            ..Default::default()
        });
        let err = fs_ops.move_path("/mnt/a/file", "/mnt/b/file").unwrap_err();

        assert!(matches!(err, PathError::Os { op: "copy", .. }));
        assert_eq!(
            fs_ops.platform().calls(),
            vec!["rename /mnt/a/file /mnt/b/file", "copy /mnt/a/file /mnt/b/file"]
        );
    }

    #[test]
    fn test_remove_directory_only_empty() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("full")).unwrap();
        fs::write(dir.path().join("full/f"), b"").unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();

        let fs_ops = FileSystem::new();
        assert!(fs_ops.remove_directory(path_of(&dir, "full")).is_err());
        fs_ops.remove_directory(path_of(&dir, "empty")).unwrap();
        assert!(!dir.path().join("empty").exists());
        assert!(dir.path().join("full/f").exists());
    }

    #[test]
    fn test_set_attributes_partial_failure() {
        let fs_ops = FileSystem::with_platform(FakePlatform { fail_times: true, ..Default::default() });
        let mut mode = AttributeMode::SET_TIMES | AttributeMode::SET_PERMS;
        let mut info = FileInfo::new(FileAttributes::READONLY, 0, Timestamp(1), Timestamp(1));

        let err = fs_ops.set_attributes("/data/file", &mut mode, &mut info).unwrap_err();
        assert!(matches!(err, PathError::Os { op: "set_times", .. }));
        assert_eq!(mode, AttributeMode::SET_TIMES);
        assert!(!info.has_info());
        assert_eq!(
            fs_ops.platform().calls(),
            vec!["set_times /data/file", "set_read_only /data/file true"]
        );
    }

    #[test]
    fn test_set_attributes_on_disk() {
        let dir = TempDir::new().unwrap();
        let file = path_of(&dir, "f.txt");
        fs::write(&file, b"x").unwrap();

        let fs_ops = FileSystem::new();
        let when = Timestamp::from_unix_time(1_500_000_000);
        let mut mode = AttributeMode::all();
        let mut info = FileInfo::request(FileAttributes::READONLY, when);
        fs_ops.set_attributes(&file, &mut mode, &mut info).unwrap();

        assert!(mode.is_empty());
        let after = fs_ops.stat(&file).unwrap();
        assert!(after.is_read_only());
        assert_eq!(after.modification_time.to_unix_time(), 1_500_000_000);

        let mut mode = AttributeMode::SET_PERMS;
        let mut info = FileInfo::request(FileAttributes::NORMAL, when);
        fs_ops.set_attributes(&file, &mut mode, &mut info).unwrap();
        assert!(!fs_ops.stat(&file).unwrap().is_read_only());
    }

    #[test]
    fn test_enumerate_skips_pseudo_entries() {
        let fs_ops = FileSystem::with_platform(FakePlatform {
            entries: vec![(".", true), ("..", true), ("file1", false), ("subdir", true)],
            ..Default::default()
        });

        let mut seen = Vec::new();
        let stopped = fs_ops
            .enumerate_directory("/root", |entry| {
                assert_eq!(entry.root, b"/root");
                seen.push((entry.name.to_vec(), entry.is_directory));
                false
            })
            .unwrap();

        assert!(!stopped);
        assert_eq!(seen, vec![(b"file1".to_vec(), false), (b"subdir".to_vec(), true)]);
    }

    #[test]
    fn test_enumerate_stops_early() {
        let fs_ops = FileSystem::with_platform(FakePlatform {
            entries: vec![("a", false), ("b", false), ("c", false)],
            ..Default::default()
        });

        let mut count = 0;
        let stopped = fs_ops
            .enumerate_directory("/root", |_| {
                count += 1;
                count == 2
            })
            .unwrap();
        assert!(stopped);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_enumerate_real_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("file1"), b"").unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let mut seen = Vec::new();
        FileSystem::new()
            .enumerate_directory(dir.path().to_string_lossy().as_bytes(), |entry| {
                seen.push((entry.name_lossy().into_owned(), entry.is_directory));
                false
            })
            .unwrap();
        seen.sort();
        assert_eq!(seen, vec![("file1".to_string(), false), ("subdir".to_string(), true)]);
    }

    #[test]
    fn test_enumerate_visits_every_entry_until_stopped() {
        let dir = TempDir::new().unwrap();
        for name in ["a", "b", "c"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }
        let root = dir.path().to_string_lossy().into_owned();
        let fs_ops = FileSystem::new();

        let mut calls = 0;
        let stopped = fs_ops
            .enumerate_directory(&root, |_| {
                calls += 1;
                false
            })
            .unwrap();
        assert!(!stopped);
        assert_eq!(calls, 3);

        let mut calls = 0;
        let stopped = fs_ops
            .enumerate_directory(&root, |_| {
                calls += 1;
                true
            })
            .unwrap();
        assert!(stopped);
        assert_eq!(calls, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_canonicalize_real_path() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("x")).unwrap();
        let expected = fs::canonicalize(dir.path().join("x")).unwrap();

        let out = FileSystem::new().canonicalize(path_of(&dir, "./x/../x/.")).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.trim_end_matches('/'), expected.to_string_lossy());
    }

    #[test]
    fn test_canonicalize_relative_uses_current_dir() {
        let fs_ops = FileSystem::with_platform(FakePlatform::default());
        assert_eq!(fs_ops.canonicalize("a/./b/../c").unwrap(), b"/fake/a/c");

        let mut buf = b"../../up".to_vec();
        fs_ops.canonicalize_in_place(&mut buf).unwrap();
        assert_eq!(buf, b"/up");
    }

    #[test]
    fn test_set_eof_no_space() {
        let fs_ops = FileSystem::with_platform(FakePlatform {
            set_len_error: Some(io::ErrorKind::StorageFull),
            ..Default::default()
        });
        let mut info = FileInfo::new(FileAttributes::NORMAL, 1, Timestamp(0), Timestamp(0));

        let err = fs_ops.set_eof("/big", u64::MAX / 2, &mut info).unwrap_err();
        assert!(matches!(err, PathError::NoSpace(_)));
        assert!(err.is_resource_exhaustion());
        assert!(info.has_info());
    }

    #[test]
    fn test_set_eof_on_disk() {
        let dir = TempDir::new().unwrap();
        let file = path_of(&dir, "f.bin");
        fs::write(&file, b"0123456789").unwrap();

        let fs_ops = FileSystem::new();
        let mut info = fs_ops.stat(&file).unwrap();
        fs_ops.set_eof(&file, 4, &mut info).unwrap();
        assert!(!info.has_info());
        assert_eq!(fs::read(&file).unwrap(), b"0123");
    }

    #[test]
    fn test_free_space() {
        let fs_ops = FileSystem::with_platform(FakePlatform::default());
        assert_eq!(fs_ops.free_space("/").unwrap(), 4096);
        assert_eq!(fs_ops.free_space("").unwrap_err().kind(), ErrorKind::InvalidArgument);
    }
}

//! File and directory metadata

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

bitflags! {
    /// Attribute bits reported by a stat query.
    ///
    /// Special files (fifos, sockets, devices) have neither `DIRECTORY` nor `NORMAL`.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct FileAttributes: u32 {
        const READONLY = 0x01;
        const DIRECTORY = 0x10;
        const NORMAL = 0x80;
    }
}

/// Unix-style permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permissions {
    pub mode: u32,
}

impl Permissions {
    pub fn new(mode: u32) -> Self {
        Self { mode }
    }

    pub fn is_readable(&self) -> bool {
        self.mode & 0o444 != 0
    }

    pub fn is_writable(&self) -> bool {
        self.mode & 0o222 != 0
    }

    pub fn is_executable(&self) -> bool {
        self.mode & 0o111 != 0
    }
}

/// Snapshot of a file's metadata.
///
/// The snapshot goes stale as soon as the file is truncated, moved or has
/// its attributes changed; operations that do so clear [`has_info`].
///
/// [`has_info`]: FileInfo::has_info
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileInfo {
    pub attributes: FileAttributes,
    pub size: u64,
    pub permissions: Option<Permissions>,
    pub modification_time: Timestamp,
    pub access_time: Timestamp,
    #[serde(skip)]
    has_info: bool,
}

impl FileInfo {
    /// A freshly queried snapshot.
    pub fn new(
        attributes: FileAttributes,
        size: u64,
        modification_time: Timestamp,
        access_time: Timestamp,
    ) -> Self {
        Self {
            attributes,
            size,
            permissions: None,
            modification_time,
            access_time,
            has_info: true,
        }
    }

    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = Some(permissions);
        self
    }

    /// Request record for attribute updates; carries no queried state.
    pub fn request(attributes: FileAttributes, modification_time: Timestamp) -> Self {
        Self {
            attributes,
            modification_time,
            access_time: modification_time,
            ..Self::default()
        }
    }

    pub fn has_info(&self) -> bool {
        self.has_info
    }

    pub fn invalidate(&mut self) {
        self.has_info = false;
    }

    pub fn is_directory(&self) -> bool {
        self.attributes.contains(FileAttributes::DIRECTORY)
    }

    pub fn is_file(&self) -> bool {
        self.attributes.contains(FileAttributes::NORMAL)
    }

    pub fn is_read_only(&self) -> bool {
        self.attributes.contains(FileAttributes::READONLY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_valid() {
        let info = FileInfo::new(FileAttributes::NORMAL, 12, Timestamp(5), Timestamp(6));
        assert!(info.has_info());
        assert!(info.is_file());
        assert!(!info.is_directory());
        assert_eq!(info.size, 12);
    }

    #[test]
    fn test_invalidate() {
        let mut info = FileInfo::new(FileAttributes::DIRECTORY, 0, Timestamp(0), Timestamp(0));
        info.invalidate();
        assert!(!info.has_info());
        assert!(info.is_directory());
    }

    #[test]
    fn test_request_is_not_valid() {
        let info = FileInfo::request(FileAttributes::READONLY, Timestamp(99));
        assert!(!info.has_info());
        assert!(info.is_read_only());
        assert_eq!(info.access_time, Timestamp(99));
    }

    #[test]
    fn test_permissions() {
        let p = Permissions::new(0o644);
        assert!(p.is_readable());
        assert!(p.is_writable());
        assert!(!p.is_executable());
        assert!(!Permissions::new(0o444).is_writable());
    }

    #[test]
    fn test_serde_skips_validity() {
        let info = FileInfo::new(FileAttributes::NORMAL | FileAttributes::READONLY, 3, Timestamp(1), Timestamp(2))
            .with_permissions(Permissions::new(0o444));
        let json = serde_json::to_string(&info).unwrap();
        assert!(!json.contains("has_info"));

        let back: FileInfo = serde_json::from_str(&json).unwrap();
        assert!(!back.has_info());
        assert!(back.is_read_only());
        assert_eq!(back.modification_time, Timestamp(1));
    }
}

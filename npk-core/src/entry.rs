//! Directory walk entries

use std::borrow::Cow;

/// Longest entry name handed to a walk callback, terminator included
pub const MAX_ENTRY_NAME: usize = 256;

/// One directory entry, as seen by an enumeration callback.
///
/// Never describes the `.` or `..` pseudo-entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkEntry<'a> {
    /// Path the enumeration was started on, as the caller supplied it
    pub root: &'a [u8],
    /// Entry name, at most `MAX_ENTRY_NAME - 1` bytes
    pub name: &'a [u8],
    pub is_directory: bool,
}

impl<'a> WalkEntry<'a> {
    pub fn new(root: &'a [u8], name: &'a [u8], is_directory: bool) -> Self {
        let name = &name[..name.len().min(MAX_ENTRY_NAME - 1)];
        Self { root, name, is_directory }
    }

    pub fn name_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.name)
    }

    pub fn is_pseudo(name: &[u8]) -> bool {
        name == b"." || name == b".."
    }
}

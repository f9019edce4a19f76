//! Operation modes and outcomes

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Sub-operations requested from an attribute update.
    ///
    /// Each bit is cleared as its sub-operation succeeds, so a caller can
    /// tell which parts were applied when the update as a whole fails.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct AttributeMode: u32 {
        /// Set access and modification time from the `FileInfo`
        const SET_TIMES = 0x1;
        /// Apply `FileAttributes::READONLY` from the `FileInfo`
        const SET_PERMS = 0x2;
    }
}

/// How a move was carried out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveMethod {
    /// Atomic rename on one device
    Renamed,
    /// Cross-device copy followed by deleting the source
    CopiedAndDeleted,
}

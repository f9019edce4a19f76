//! Native Path Kit Core
//!
//! Native path buffers, separator style conversion, canonicalization and
//! the platform trait the filesystem operations are built on.

pub mod backend;
pub mod buffer;
pub mod canonical;
pub mod entry;
pub mod error;
pub mod metadata;
pub mod operations;
pub mod platform;
pub mod style;
pub mod time;

pub use backend::Platform;
pub use buffer::{NativePath, INLINE_CAPACITY};
pub use canonical::{canonicalize_in_place, canonicalize_with, collapse_segments, Resolver};
pub use entry::{WalkEntry, MAX_ENTRY_NAME};
pub use error::{ErrorKind, PathError, PathResult};
pub use metadata::{FileAttributes, FileInfo, Permissions};
pub use operations::{AttributeMode, MoveMethod};
pub use platform::{PathStyle, PlatformCapabilities, MAX_PATH, UNC_MAX_PATH, UNC_PREFIX};
pub use time::Timestamp;

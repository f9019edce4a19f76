//! Error types for Native Path Kit

use std::io;
use thiserror::Error;

/// Result type alias
pub type PathResult<T> = Result<T, PathError>;

/// Coarse classification of a [`PathError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller supplied something unusable
    InvalidArgument,
    /// Memory, length ceilings or disk space ran out
    ResourceExhaustion,
    /// The native call failed for another reason
    Os,
}

/// Main error type
#[derive(Error, Debug)]
pub enum PathError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Not a directory: {0}")]
    NotADirectory(String),

    #[error("Path too long: {len} bytes do not fit in a {capacity} byte buffer")]
    TooLong { len: usize, capacity: usize },

    #[error("Long path ceiling exceeded: {len} characters (limit {max})")]
    LongPathCeiling { len: usize, max: usize },

    #[error("Allocation of {size} bytes failed")]
    AllocationFailed { size: usize },

    #[error("No space left on device: {0}")]
    NoSpace(String),

    #[error("{op} failed for {path}: {source}")]
    Os {
        op: &'static str,
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl PathError {
    /// Wrap an error returned by a native call on `path`.
    pub fn os(op: &'static str, path: impl AsRef<[u8]>, source: io::Error) -> Self {
        let path = String::from_utf8_lossy(path.as_ref()).into_owned();
        if source.kind() == io::ErrorKind::StorageFull {
            return PathError::NoSpace(path);
        }
        PathError::Os { op, path, source }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            PathError::InvalidArgument(_)
            | PathError::AlreadyExists(_)
            | PathError::NotADirectory(_) => ErrorKind::InvalidArgument,
            PathError::TooLong { .. }
            | PathError::LongPathCeiling { .. }
            | PathError::AllocationFailed { .. }
            | PathError::NoSpace(_) => ErrorKind::ResourceExhaustion,
            PathError::Os { .. } | PathError::Io(_) => ErrorKind::Os,
        }
    }

    pub fn is_resource_exhaustion(&self) -> bool {
        self.kind() == ErrorKind::ResourceExhaustion
    }

    /// OS-provided error code, when the failure came from a native call
    pub fn os_code(&self) -> Option<i32> {
        match self {
            PathError::Os { source, .. } | PathError::Io(source) => source.raw_os_error(),
            _ => None,
        }
    }
}

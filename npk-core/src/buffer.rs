//! Native path buffer
//!
//! [`NativePath`] owns the native form of one caller-supplied path for the
//! duration of a single operation. A path whose required size fits the
//! inline array lives there; longer ones get a heap allocation of exactly
//! the required size, which is released when the value is dropped.

use std::borrow::Cow;
use std::ffi::CStr;
use std::fmt;
use std::path::PathBuf;

use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::error::{PathError, PathResult};
use crate::platform::{c_len, PathStyle, MAX_PATH};
use crate::style;

/// Bytes available before a path spills to the heap
pub const INLINE_CAPACITY: usize = MAX_PATH;

/// NUL-terminated native path with inline storage for short paths
pub struct NativePath {
    // Always ends with the terminator.
    buf: SmallVec<[u8; INLINE_CAPACITY]>,
    size: usize,
}

impl NativePath {
    /// An empty path; never allocates.
    pub fn empty() -> Self {
        let mut buf = SmallVec::new();
        buf.push(0);
        Self { buf, size: 0 }
    }

    /// Native form of `path` for the host platform.
    pub fn new(path: impl AsRef<[u8]>) -> PathResult<Self> {
        Self::try_from_input(Some(path.as_ref()), PathStyle::native())
    }

    /// Native form of `path` in `style`.
    ///
    /// `None` yields an empty path without allocating.
    pub fn try_from_input(path: Option<&[u8]>, style: PathStyle) -> PathResult<Self> {
        let Some(path) = path else {
            return Ok(Self::empty());
        };

        let size = c_len(path) + style.reserved_bytes();
        let mut buf = if size <= INLINE_CAPACITY {
            SmallVec::new()
        } else {
            debug!(size, "native path exceeds inline capacity, allocating");
            heap_buffer(size)?
        };
        buf.resize(size.max(INLINE_CAPACITY), 0);

        let len = style::make_native_path(path, &mut buf, style)?;
        buf.truncate(len + 1);
        Ok(Self { buf, size })
    }

    /// Like [`try_from_input`](Self::try_from_input), but a failed
    /// conversion leaves an empty, usable path.
    pub fn from_input(path: Option<&[u8]>, style: PathStyle) -> Self {
        Self::try_from_input(path, style).unwrap_or_else(|err| {
            warn!(%err, "native path conversion failed, using empty path");
            Self::empty()
        })
    }

    /// Storage the input required: its length plus reserved bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Whether the path is held in the inline array.
    pub fn is_inline(&self) -> bool {
        !self.buf.spilled()
    }

    pub fn len(&self) -> usize {
        self.buf.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len()]
    }

    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.buf
    }

    pub fn as_c_str(&self) -> &CStr {
        CStr::from_bytes_until_nul(&self.buf).unwrap_or_default()
    }

    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.as_bytes())
    }

    pub fn to_path_buf(&self) -> PathBuf {
        #[cfg(unix)]
        {
            use std::os::unix::ffi::OsStrExt;
            PathBuf::from(std::ffi::OsStr::from_bytes(self.as_bytes()))
        }

        #[cfg(not(unix))]
        {
            PathBuf::from(self.to_string_lossy().into_owned())
        }
    }

    /// Drop a single trailing separator, unless it is the whole root.
    pub fn trim_trailing_separator(&mut self, style: PathStyle) {
        let len = self.len();
        if len > style.root_len(self.as_bytes()) && style.is_separator(self.buf[len - 1]) {
            self.buf.truncate(len);
            self.buf[len - 1] = 0;
        }
    }

    /// Run `f` on the prefix ending just before byte `end`.
    ///
    /// The byte at `end` is replaced by a terminator while `f` runs and put
    /// back before this returns.
    pub fn with_prefix<R>(&mut self, end: usize, f: impl FnOnce(&CStr) -> R) -> R {
        let end = end.min(self.len());
        let saved = std::mem::replace(&mut self.buf[end], 0);
        let result = f(CStr::from_bytes_until_nul(&self.buf).unwrap_or_default());
        self.buf[end] = saved;
        result
    }
}

/// Empty buffer with exactly `size` bytes reserved on the heap.
fn heap_buffer(size: usize) -> PathResult<SmallVec<[u8; INLINE_CAPACITY]>> {
    let mut buf = SmallVec::new();
    buf.try_reserve_exact(size)
        .map_err(|_| PathError::AllocationFailed { size })?;
    Ok(buf)
}

impl Default for NativePath {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for NativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativePath")
            .field("path", &self.to_string_lossy())
            .field("size", &self.size)
            .field("inline", &self.is_inline())
            .finish()
    }
}

impl fmt::Display for NativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

impl AsRef<[u8]> for NativePath {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

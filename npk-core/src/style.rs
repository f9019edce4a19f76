//! Separator conversion between path conventions
//!
//! Every function writes a NUL-terminated result into a caller-sized
//! buffer and returns the length written, excluding the terminator. The
//! buffer's length is the capacity: nothing is written past it. When a
//! conversion does not fit, the output is reset to an empty string and an
//! error is returned, never a truncated path.

use crate::error::{PathError, PathResult};
use crate::platform::{c_len, PathStyle, UNC_MAX_PATH, UNC_PREFIX};

const SLASH: u8 = b'/';
const BACKSLASH: u8 = b'\\';

fn is_any_separator(byte: u8) -> bool {
    byte == SLASH || byte == BACKSLASH
}

fn reset(result: &mut [u8]) {
    if let Some(first) = result.first_mut() {
        *first = 0;
    }
}

fn copy_replacing(path: &[u8], result: &mut [u8], from: u8, to: u8) -> PathResult<usize> {
    let Some(ceiling) = result.len().checked_sub(1) else {
        return Err(PathError::InvalidArgument("zero-capacity path buffer".into()));
    };

    let len = c_len(path);
    if len > ceiling {
        reset(result);
        return Err(PathError::TooLong { len, capacity: result.len() });
    }

    for (dst, &src) in result.iter_mut().zip(&path[..len]) {
        *dst = if src == from { to } else { src };
    }
    result[len] = 0;
    Ok(len)
}

/// Convert every `/` to `\`.
pub fn make_backslash_path(path: &[u8], result: &mut [u8]) -> PathResult<usize> {
    copy_replacing(path, result, SLASH, BACKSLASH)
}

/// Convert every `\` to `/`.
pub fn make_univ_path(path: &[u8], result: &mut [u8]) -> PathResult<usize> {
    copy_replacing(path, result, BACKSLASH, SLASH)
}

/// Rewrite the whole path in the style of its last separator.
///
/// A path without any separator is copied unchanged.
pub fn make_consistent_path(path: &[u8], result: &mut [u8]) -> PathResult<usize> {
    let len = c_len(path);
    match path[..len].iter().rev().copied().find(|&b| is_any_separator(b)) {
        Some(BACKSLASH) => make_backslash_path(path, result),
        Some(_) => make_univ_path(path, result),
        None => copy_replacing(path, result, 0, 0),
    }
}

/// Convert to the Windows form, switching to the long-path marker for
/// drive-absolute paths.
///
/// UNC paths, relative paths and drive-relative paths (`C:foo`) only have
/// their slashes converted.
pub fn make_windows_path(path: &[u8], result: &mut [u8]) -> PathResult<usize> {
    if result.len() <= 2 {
        reset(result);
        return Err(PathError::TooLong { len: c_len(path), capacity: result.len() });
    }

    let path = &path[..c_len(path)];
    let sep = |i: usize| path.get(i).copied().is_some_and(is_any_separator);
    let already_unc = sep(0) && sep(1);
    let drive_absolute =
        path.first().is_some_and(u8::is_ascii_alphabetic) && path.get(1) == Some(&b':') && sep(2);

    if already_unc || !drive_absolute {
        return make_backslash_path(path, result);
    }

    make_unc_path(path, result)
}

fn make_unc_path(path: &[u8], result: &mut [u8]) -> PathResult<usize> {
    let len = UNC_PREFIX.len() + path.len();

    if len >= UNC_MAX_PATH {
        reset(result);
        return Err(PathError::LongPathCeiling { len, max: UNC_MAX_PATH });
    }
    if len >= result.len() {
        reset(result);
        return Err(PathError::TooLong { len, capacity: result.len() });
    }

    result[..UNC_PREFIX.len()].copy_from_slice(UNC_PREFIX);
    make_backslash_path(path, &mut result[UNC_PREFIX.len()..])?;
    Ok(len)
}

/// Convert to the native form of `style`.
pub fn make_native_path(path: &[u8], result: &mut [u8], style: PathStyle) -> PathResult<usize> {
    match style {
        PathStyle::Posix => make_univ_path(path, result),
        PathStyle::Windows => make_windows_path(path, result),
    }
}

/// Convert separators only, without any prefixing.
pub fn make_separators_native(path: &[u8], result: &mut [u8], style: PathStyle) -> PathResult<usize> {
    match style {
        PathStyle::Posix => make_univ_path(path, result),
        PathStyle::Windows => make_backslash_path(path, result),
    }
}

/// Separator to use when extending `path`: the first one it already
/// contains, else the native one of `style`.
pub fn infer_separator(path: &[u8], style: PathStyle) -> u8 {
    path[..c_len(path)]
        .iter()
        .copied()
        .find(|&b| is_any_separator(b))
        .unwrap_or(style.separator())
}

/// Make the NUL-terminated string in `buf` end with exactly one separator.
///
/// With `sep` unset, the separator is inferred from the original contents
/// before any trimming. Returns the new length.
pub fn force_trailing_separator(buf: &mut [u8], sep: Option<u8>, style: PathStyle) -> PathResult<usize> {
    let sep = sep.unwrap_or_else(|| infer_separator(buf, style));

    if buf.len() < 2 {
        return Err(PathError::InvalidArgument(
            "trailing separator needs a buffer of at least 2 bytes".into(),
        ));
    }

    let mut len = c_len(buf);
    if len > 0 && is_any_separator(buf[len - 1]) {
        len -= 1;
    }
    if len > buf.len() - 2 {
        return Err(PathError::TooLong { len: len + 1, capacity: buf.len() });
    }

    buf[len] = sep;
    buf[len + 1] = 0;
    Ok(len + 1)
}

/// Owned counterpart of [`force_trailing_separator`] for growable buffers.
pub fn push_trailing_separator(path: &mut Vec<u8>, sep: Option<u8>, style: PathStyle) -> PathResult<()> {
    let sep = sep.unwrap_or_else(|| infer_separator(path, style));
    path.truncate(c_len(path));
    if path.last().copied().is_some_and(is_any_separator) {
        path.pop();
    }
    path.try_reserve(1)
        .map_err(|_| PathError::AllocationFailed { size: path.len() + 1 })?;
    path.push(sep);
    Ok(())
}

/// Native form of `path` as an owned buffer without the terminator.
pub fn to_native(path: &[u8], style: PathStyle) -> PathResult<Vec<u8>> {
    let size = c_len(path) + style.reserved_bytes();
    let mut out = Vec::new();
    out.try_reserve_exact(size)
        .map_err(|_| PathError::AllocationFailed { size })?;
    out.resize(size, 0);
    let len = make_native_path(path, &mut out, style)?;
    out.truncate(len);
    Ok(out)
}

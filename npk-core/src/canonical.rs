//! Absolute path canonicalization
//!
//! Canonicalization runs in three passes:
//!
//! 1. anchor a relative path on the working directory;
//! 2. collapse `.` and `..` segments lexically with a segment stack;
//! 3. walk the surviving segments left to right, asking the [`Resolver`]
//!    to resolve each growing prefix. A resolved prefix replaces the
//!    lexical one, which absorbs symlinks; an unresolvable prefix is kept
//!    as written and the walk continues.
//!
//! `..` at the root is a no-op: `/../x` canonicalizes to `/x`.

use std::io;

use tracing::trace;

use crate::error::{PathError, PathResult};
use crate::platform::{c_len, PathStyle};
use crate::style;

/// Source of the working directory and of OS-level path resolution
pub trait Resolver {
    fn current_dir(&self) -> io::Result<Vec<u8>>;

    /// Fully resolved form of an existing `path`, or `None` if it cannot
    /// be resolved.
    fn resolve(&self, path: &[u8]) -> Option<Vec<u8>>;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn current_dir(&self) -> io::Result<Vec<u8>> {
        (**self).current_dir()
    }

    fn resolve(&self, path: &[u8]) -> Option<Vec<u8>> {
        (**self).resolve(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Empty,
    Current,
    Parent,
    Normal(&'a [u8]),
}

impl<'a> Segment<'a> {
    fn classify(raw: &'a [u8]) -> Self {
        match raw {
            b"" => Segment::Empty,
            b"." => Segment::Current,
            b".." => Segment::Parent,
            name => Segment::Normal(name),
        }
    }
}

/// A path split into its root and collapsed segments
#[derive(Debug)]
struct Lexical<'a> {
    root: &'a [u8],
    segments: Vec<&'a [u8]>,
    trailing: bool,
}

impl<'a> Lexical<'a> {
    fn scan(path: &'a [u8], style: PathStyle) -> Self {
        let path = &path[..c_len(path)];
        let (root, rest) = path.split_at(style.root_len(path));

        let mut segments = Vec::new();
        let mut last = Segment::Empty;
        for raw in rest.split(|&b| style.is_separator(b)) {
            last = Segment::classify(raw);
            match last {
                Segment::Normal(name) => segments.push(name),
                Segment::Parent => {
                    segments.pop();
                }
                Segment::Current | Segment::Empty => {}
            }
        }

        Self {
            root,
            segments,
            trailing: !matches!(last, Segment::Normal(_)),
        }
    }

    fn render(&self, sep: u8) -> Vec<u8> {
        let mut out = self.root.to_vec();
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                out.push(sep);
            }
            out.extend_from_slice(segment);
        }
        if self.trailing && !self.segments.is_empty() {
            out.push(sep);
        }
        if out.is_empty() {
            out.push(b'.');
        }
        out
    }
}

/// Collapse `.`, `..` and empty segments without touching the filesystem.
///
/// The root is kept as written; segments are joined with the native
/// separator of `style`. A trailing separator survives when the last
/// segment was empty, `.` or `..`.
pub fn collapse_segments(path: &[u8], style: PathStyle) -> Vec<u8> {
    Lexical::scan(path, style).render(style.separator())
}

/// Canonical form of `path`.
pub fn canonicalize_with<R: Resolver + ?Sized>(
    resolver: &R,
    path: &[u8],
    style: PathStyle,
) -> PathResult<Vec<u8>> {
    let path = &path[..c_len(path)];
    if path.is_empty() {
        return Err(PathError::InvalidArgument("cannot canonicalize an empty path".into()));
    }

    let absolute = absolutize(resolver, path, style)?;
    let native = native_separators(&absolute, style)?;
    let lexical = Lexical::scan(&native, style);
    trace!(
        segments = lexical.segments.len(),
        path = %String::from_utf8_lossy(&native),
        "collapsed path"
    );

    resolve_segments(resolver, &lexical, style)
}

/// Replace `buf` with its canonical form. On error `buf` is left as it was.
pub fn canonicalize_in_place<R: Resolver + ?Sized>(
    resolver: &R,
    buf: &mut Vec<u8>,
    style: PathStyle,
) -> PathResult<()> {
    *buf = canonicalize_with(resolver, buf, style)?;
    Ok(())
}

fn reserve(buf: &mut Vec<u8>, size: usize) -> PathResult<()> {
    buf.try_reserve_exact(size)
        .map_err(|_| PathError::AllocationFailed { size })
}

fn absolutize<R: Resolver + ?Sized>(resolver: &R, path: &[u8], style: PathStyle) -> PathResult<Vec<u8>> {
    let mut out = Vec::new();

    if style.is_absolute(path) {
        reserve(&mut out, path.len())?;
        out.extend_from_slice(path);
        return Ok(out);
    }

    // C:relative resolves against the drive root
    if style == PathStyle::Windows && style.root_len(path) == 2 {
        reserve(&mut out, path.len() + 1)?;
        out.extend_from_slice(&path[..2]);
        out.push(style.separator());
        out.extend_from_slice(&path[2..]);
        return Ok(out);
    }

    let cwd = resolver
        .current_dir()
        .map_err(|err| PathError::os("current_dir", path, err))?;
    reserve(&mut out, cwd.len() + 1 + path.len())?;

    if style.is_separator(path[0]) {
        // \rooted resolves against the working directory's drive or share
        let anchor = &cwd[..style.root_len(&cwd)];
        let anchor = anchor
            .strip_suffix(&[style.separator()])
            .or_else(|| anchor.strip_suffix(b"/"))
            .unwrap_or(anchor);
        out.extend_from_slice(anchor);
    } else {
        out.extend_from_slice(&cwd);
        style::push_trailing_separator(&mut out, Some(style.separator()), style)?;
    }
    out.extend_from_slice(path);
    Ok(out)
}

fn native_separators(path: &[u8], style: PathStyle) -> PathResult<Vec<u8>> {
    let mut out = Vec::new();
    reserve(&mut out, path.len() + 1)?;
    out.resize(path.len() + 1, 0);
    let len = style::make_separators_native(path, &mut out, style)?;
    out.truncate(len);
    Ok(out)
}

fn resolve_segments<R: Resolver + ?Sized>(
    resolver: &R,
    lexical: &Lexical<'_>,
    style: PathStyle,
) -> PathResult<Vec<u8>> {
    let sep = style.separator();
    let count = lexical.segments.len();

    let mut prefix = Vec::new();
    reserve(&mut prefix, lexical.root.len())?;
    prefix.extend_from_slice(lexical.root);

    for (i, segment) in lexical.segments.iter().enumerate() {
        let mut candidate = Vec::new();
        reserve(&mut candidate, prefix.len() + segment.len() + 1)?;
        candidate.extend_from_slice(&prefix);
        candidate.extend_from_slice(segment);

        prefix = match resolver.resolve(&candidate) {
            Some(resolved) => {
                if resolved != candidate {
                    trace!(
                        from = %String::from_utf8_lossy(&candidate),
                        to = %String::from_utf8_lossy(&resolved),
                        "prefix resolved"
                    );
                }
                resolved
            }
            None => candidate,
        };

        let more = i + 1 < count || lexical.trailing;
        if more && !prefix.last().is_some_and(|&b| style.is_separator(b)) {
            prefix.push(sep);
        }
    }

    if prefix.is_empty() {
        prefix.push(b'.');
    }
    Ok(prefix)
}

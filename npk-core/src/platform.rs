//! Platform-specific path conventions
//!
//! Both conventions are always compiled so either can be exercised on any
//! host; [`PathStyle::native`] picks the one matching the build target.

use serde::{Deserialize, Serialize};

/// Longest path the inline buffer holds without touching the heap
#[cfg(windows)]
pub const MAX_PATH: usize = 260;

/// Longest path the inline buffer holds without touching the heap
#[cfg(not(windows))]
pub const MAX_PATH: usize = 1024;

/// Windows long-path marker
pub const UNC_PREFIX: &[u8; 4] = br"\\?\";

/// Upper bound on a long-path (UNC) form, in characters
pub const UNC_MAX_PATH: usize = 0x7FFF;

/// Separator and prefix convention of a path string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathStyle {
    /// `/`-separated
    Posix,
    /// `\`-separated with drive letters; `/` is accepted as an alternate
    Windows,
}

impl PathStyle {
    pub const fn native() -> Self {
        if cfg!(windows) {
            PathStyle::Windows
        } else {
            PathStyle::Posix
        }
    }

    pub const fn separator(self) -> u8 {
        match self {
            PathStyle::Posix => b'/',
            PathStyle::Windows => b'\\',
        }
    }

    pub const fn is_separator(self, byte: u8) -> bool {
        match self {
            PathStyle::Posix => byte == b'/',
            PathStyle::Windows => byte == b'\\' || byte == b'/',
        }
    }

    /// Bytes reserved on top of the input length when sizing a native buffer:
    /// the terminator, plus room for the UNC marker on Windows.
    pub const fn reserved_bytes(self) -> usize {
        match self {
            PathStyle::Posix => 1,
            PathStyle::Windows => UNC_PREFIX.len() + 1,
        }
    }

    pub fn is_absolute(self, path: &[u8]) -> bool {
        let path = &path[..c_len(path)];
        match self {
            PathStyle::Posix => path.first() == Some(&b'/'),
            PathStyle::Windows => {
                let sep = |i: usize| path.get(i).is_some_and(|&b| self.is_separator(b));
                (sep(0) && sep(1)) || (is_drive(path, 0) && sep(2))
            }
        }
    }

    /// Length of the root component, including its trailing separator.
    ///
    /// Zero for relative paths.
    pub fn root_len(self, path: &[u8]) -> usize {
        let path = &path[..c_len(path)];
        match self {
            PathStyle::Posix => usize::from(path.first() == Some(&b'/')),
            PathStyle::Windows => windows_root_len(path),
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "posix" | "unix" => Some(PathStyle::Posix),
            "windows" | "win" | "dos" => Some(PathStyle::Windows),
            _ => None,
        }
    }
}

impl Default for PathStyle {
    fn default() -> Self {
        Self::native()
    }
}

/// Length of `bytes` up to, not including, the first NUL.
pub(crate) fn c_len(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len())
}

fn is_drive(path: &[u8], at: usize) -> bool {
    path.get(at).is_some_and(u8::is_ascii_alphabetic) && path.get(at + 1) == Some(&b':')
}

fn windows_root_len(path: &[u8]) -> usize {
    let style = PathStyle::Windows;
    let sep = |i: usize| path.get(i).is_some_and(|&b| style.is_separator(b));

    // \\?\C:\ or bare \\?\
    if sep(0) && sep(1) && path.get(2) == Some(&b'?') && sep(3) {
        if is_drive(path, 4) {
            return if sep(6) { 7 } else { 6 };
        }
        return UNC_PREFIX.len();
    }

    // \\server\share\
    if sep(0) && sep(1) {
        let mut seen = 0;
        for (i, &b) in path.iter().enumerate().skip(2) {
            if style.is_separator(b) {
                seen += 1;
                if seen == 2 {
                    return i + 1;
                }
            }
        }
        return path.len();
    }

    if is_drive(path, 0) {
        return if sep(2) { 3 } else { 2 };
    }

    usize::from(sep(0))
}

/// Platform capabilities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformCapabilities {
    pub style: PathStyle,
    pub max_path: usize,
    pub long_paths: bool,
    pub symlinks: bool,
    pub case_sensitive: bool,
}

impl PlatformCapabilities {
    pub fn detect() -> Self {
        #[cfg(target_os = "linux")]
        return Self::linux();

        #[cfg(target_os = "macos")]
        return Self::macos();

        #[cfg(target_os = "windows")]
        return Self::windows();

        #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
        return Self::posix();
    }

    pub fn posix() -> Self {
        Self {
            style: PathStyle::Posix,
            max_path: MAX_PATH,
            long_paths: false,
            symlinks: true,
            case_sensitive: true,
        }
    }

    pub fn linux() -> Self {
        Self::posix()
    }

    pub fn macos() -> Self {
        Self {
            case_sensitive: false, // APFS default
            ..Self::posix()
        }
    }

    pub fn windows() -> Self {
        Self {
            style: PathStyle::Windows,
            max_path: MAX_PATH,
            long_paths: true,
            symlinks: true, // requires admin or dev mode
            case_sensitive: false,
        }
    }
}

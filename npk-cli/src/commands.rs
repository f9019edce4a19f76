// SPDX-License-Identifier: AGPL-3.0-or-later
//! CLI command implementations

use console::style;
use npk_core::{
    style::push_trailing_separator, AttributeMode, FileAttributes, FileInfo, MoveMethod, NativePath, PathResult,
    PathStyle, Platform, Timestamp, INLINE_CAPACITY,
};
use npk_fs::FileSystem;
use std::io;
use tabled::{Table, Tabled};

/// Format a timestamp for display, in local time
fn format_time(ts: Timestamp) -> String {
    ts.to_datetime()
        .with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

/// Format file size
fn format_size(size: u64, human: bool) -> String {
    if human {
        bytesize::ByteSize(size).to_string()
    } else {
        size.to_string()
    }
}

fn format_kind(is_directory: bool) -> String {
    if is_directory {
        style("d").cyan().to_string()
    } else {
        "-".to_string()
    }
}

/// Format permissions
fn format_permissions(mode: Option<u32>) -> String {
    match mode {
        Some(m) => {
            let r = if m & 0o400 != 0 { 'r' } else { '-' };
            let w = if m & 0o200 != 0 { 'w' } else { '-' };
            let x = if m & 0o100 != 0 { 'x' } else { '-' };
            let gr = if m & 0o040 != 0 { 'r' } else { '-' };
            let gw = if m & 0o020 != 0 { 'w' } else { '-' };
            let gx = if m & 0o010 != 0 { 'x' } else { '-' };
            let or = if m & 0o004 != 0 { 'r' } else { '-' };
            let ow = if m & 0o002 != 0 { 'w' } else { '-' };
            let ox = if m & 0o001 != 0 { 'x' } else { '-' };
            format!("{r}{w}{x}{gr}{gw}{gx}{or}{ow}{ox}")
        }
        None => "---------".to_string(),
    }
}

fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// `root` joined with one directory entry name
fn join_entry(root: &[u8], name: &[u8], style: PathStyle) -> PathResult<Vec<u8>> {
    let mut path = root.to_vec();
    push_trailing_separator(&mut path, None, style)?;
    path.extend_from_slice(name);
    Ok(path)
}

fn print_json<T: serde::Serialize>(value: &T) -> PathResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}

#[derive(Tabled)]
struct LsEntry {
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Permissions")]
    perms: String,
    #[tabled(rename = "Size")]
    size: String,
    #[tabled(rename = "Modified")]
    modified: String,
    #[tabled(rename = "Name")]
    name: String,
}

/// Print the native form of a path
pub fn native(path: &str, path_style: PathStyle, verbose: bool) -> PathResult<()> {
    let native = NativePath::try_from_input(Some(path.as_bytes()), path_style)?;
    println!("{native}");

    if verbose {
        let storage = if native.is_inline() { "inline" } else { "heap" };
        eprintln!(
            "{}",
            style(format!("{} of {} bytes, {storage} (inline capacity {INLINE_CAPACITY})", native.len(), native.size())).dim()
        );
    }
    Ok(())
}

/// Print the canonical form of a path
pub fn canon(fs: &FileSystem, path: &str) -> PathResult<()> {
    let canonical = fs.canonicalize(path)?;
    println!("{}", lossy(&canonical));
    Ok(())
}

/// Show file/directory information
pub fn stat(fs: &FileSystem, path: &str, json: bool) -> PathResult<()> {
    let info = fs.stat(path)?;

    if json {
        return print_json(&info);
    }

    let kind = if info.is_directory() {
        "Directory"
    } else if info.is_file() {
        "File"
    } else {
        "Special"
    };
    println!("  Path: {path}");
    println!("  Type: {kind}");
    println!("  Size: {} ({})", info.size, bytesize::ByteSize(info.size));

    if let Some(perms) = info.permissions {
        println!("  Mode: {:o} ({})", perms.mode, format_permissions(Some(perms.mode)));
    }

    println!("  Read-only: {}", if info.is_read_only() { "yes" } else { "no" });
    println!("  Modified: {}", info.modification_time.to_datetime());
    println!("  Accessed: {}", info.access_time.to_datetime());

    Ok(())
}

/// List directory contents
pub fn ls(fs: &FileSystem, path: &str, long: bool, all: bool, human: bool) -> PathResult<()> {
    let mut names: Vec<(Vec<u8>, bool)> = Vec::new();
    fs.enumerate_directory(path, |entry| {
        if all || !entry.name.starts_with(b".") {
            names.push((entry.name.to_vec(), entry.is_directory));
        }
        false
    })?;
    names.sort();

    if names.is_empty() {
        println!("(empty directory)");
        return Ok(());
    }

    if !long {
        for (name, _) in &names {
            println!("{}", lossy(name));
        }
        return Ok(());
    }

    let mut entries = Vec::with_capacity(names.len());
    for (name, is_directory) in names {
        let full = join_entry(path.as_bytes(), &name, fs.style())?;
        let (perms, size, modified) = match fs.stat(&full) {
            Ok(info) => (
                format_permissions(info.permissions.map(|p| p.mode)),
                format_size(info.size, human),
                format_time(info.modification_time),
            ),
            Err(_) => (format_permissions(None), "-".to_string(), "-".to_string()),
        };
        entries.push(LsEntry {
            kind: format_kind(is_directory),
            perms,
            size,
            modified,
            name: lossy(&name),
        });
    }

    println!("{}", Table::new(entries));
    Ok(())
}

/// Create directories
pub fn mkdir(fs: &FileSystem, paths: &[String], verbose: bool) -> PathResult<()> {
    for path in paths {
        if verbose {
            eprintln!("Creating directory: {path}");
        }
        fs.create_directory(path)?;
        println!("Created {path}");
    }
    Ok(())
}

/// Move/rename files
pub fn mv(fs: &FileSystem, source: &str, dest: &str) -> PathResult<()> {
    match fs.move_path(source, dest)? {
        MoveMethod::Renamed => println!("Moved {source} -> {dest}"),
        MoveMethod::CopiedAndDeleted => println!(
            "Moved {source} -> {dest} {}",
            style("(copied across devices)").yellow()
        ),
    }
    Ok(())
}

/// Remove an empty directory
pub fn rmdir(fs: &FileSystem, path: &str) -> PathResult<()> {
    fs.remove_directory(path)?;
    println!("Removed {path}");
    Ok(())
}

/// Set access and modification times
pub fn touch(fs: &FileSystem, path: &str, mtime: Option<i32>) -> PathResult<()> {
    let when = mtime.map_or_else(Timestamp::now, Timestamp::from_unix_time);
    let mut mode = AttributeMode::SET_TIMES;
    let mut info = FileInfo::request(FileAttributes::NORMAL, when);

    fs.set_attributes(path, &mut mode, &mut info)?;
    println!("Touched {path} ({})", format_time(when));
    Ok(())
}

/// Mark a file read-only or writable
pub fn chmod(fs: &FileSystem, path: &str, read_only: bool) -> PathResult<()> {
    let attributes = if read_only {
        FileAttributes::READONLY
    } else {
        FileAttributes::NORMAL
    };
    let mut mode = AttributeMode::SET_PERMS;
    let mut info = FileInfo::request(attributes, Timestamp::default());

    fs.set_attributes(path, &mut mode, &mut info)?;
    println!("{path} is now {}", if read_only { "read-only" } else { "writable" });
    Ok(())
}

/// Truncate or extend a file
pub fn truncate(fs: &FileSystem, path: &str, len: u64) -> PathResult<()> {
    let mut info = fs.stat(path)?;
    let before = info.size;

    fs.set_eof(path, len, &mut info)?;
    println!("Resized {path}: {} -> {}", bytesize::ByteSize(before), bytesize::ByteSize(len));
    Ok(())
}

/// Show free space
pub fn df(fs: &FileSystem, path: &str) -> PathResult<()> {
    let available = fs.free_space(path)?;
    println!("Storage: {path}");
    println!("  Available: {}", bytesize::ByteSize(available));
    Ok(())
}

/// Show platform path conventions
pub fn info(fs: &FileSystem, json: bool) -> PathResult<()> {
    let caps = fs.platform().capabilities();

    if json {
        return print_json(caps);
    }

    let yes_no = |flag: bool| if flag { style("yes").green() } else { style("no").red() };
    println!("Platform path conventions:");
    println!("  Style:           {:?}", caps.style);
    println!("  Separator:       {}", caps.style.separator() as char);
    println!("  Max path:        {}", caps.max_path);
    println!("  Long paths:      {}", yes_no(caps.long_paths));
    println!("  Symlinks:        {}", yes_no(caps.symlinks));
    println!("  Case sensitive:  {}", yes_no(caps.case_sensitive));
    Ok(())
}

// SPDX-License-Identifier: AGPL-3.0-or-later
//! Native Path Kit CLI
//!
//! Convert, canonicalize and manipulate paths through the native path layer.

mod commands;
mod logging;

use clap::{ArgGroup, Parser, Subcommand};
use npk_core::PathStyle;
use npk_fs::FileSystem;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "npk")]
#[command(author, version, about = "Native Path Kit - cross-platform path operations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn parse_style(name: &str) -> Result<PathStyle, String> {
    PathStyle::parse(name).ok_or_else(|| format!("unknown path style '{name}' (expected posix or windows)"))
}

#[derive(Subcommand)]
enum Commands {
    /// Print the native form of a path
    Native {
        /// Path to convert
        path: String,

        /// Target path style (posix or windows), defaults to the host
        #[arg(short, long, value_parser = parse_style)]
        style: Option<PathStyle>,
    },

    /// Print the canonical absolute form of a path
    #[command(alias = "realpath")]
    Canon {
        /// Path to canonicalize
        path: String,
    },

    /// Show file or directory information
    Stat {
        /// Path to inspect
        path: String,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List directory contents
    #[command(alias = "dir")]
    Ls {
        /// Path to list (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Long format with details
        #[arg(short, long)]
        long: bool,

        /// Show all files including hidden
        #[arg(short, long)]
        all: bool,

        /// Human-readable sizes
        #[arg(short = 'H', long)]
        human: bool,
    },

    /// Create directories, including missing parents
    Mkdir {
        /// Directory path(s) to create
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Move or rename a file or directory
    Mv {
        /// Source path
        source: String,

        /// Destination path, must not exist
        dest: String,
    },

    /// Remove an empty directory
    Rmdir {
        /// Directory to remove
        path: String,
    },

    /// Set access and modification times
    Touch {
        /// File to update
        path: String,

        /// Unix time to set instead of now
        #[arg(long)]
        mtime: Option<i32>,
    },

    /// Mark a file read-only or writable
    #[command(group(ArgGroup::new("mode").required(true).args(["readonly", "writable"])))]
    Chmod {
        /// File to update
        path: String,

        /// Remove write permission
        #[arg(long)]
        readonly: bool,

        /// Restore write permission
        #[arg(long)]
        writable: bool,
    },

    /// Truncate or extend a file
    Truncate {
        /// File to resize
        path: String,

        /// New length in bytes
        len: u64,
    },

    /// Show free space on the volume holding a path
    Df {
        /// Path on the volume (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,
    },

    /// Show platform path conventions
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::set_up_logging(cli.verbose);

    let fs = FileSystem::new();
    let verbose = cli.verbose;

    let result = match cli.command {
        Commands::Native { path, style } => commands::native(&path, style.unwrap_or_default(), verbose),
        Commands::Canon { path } => commands::canon(&fs, &path),
        Commands::Stat { path, json } => commands::stat(&fs, &path, json),
        Commands::Ls { path, long, all, human } => commands::ls(&fs, &path, long, all, human),
        Commands::Mkdir { paths } => commands::mkdir(&fs, &paths, verbose),
        Commands::Mv { source, dest } => commands::mv(&fs, &source, &dest),
        Commands::Rmdir { path } => commands::rmdir(&fs, &path),
        Commands::Touch { path, mtime } => commands::touch(&fs, &path, mtime),
        Commands::Chmod { path, readonly, .. } => commands::chmod(&fs, &path, readonly),
        Commands::Truncate { path, len } => commands::truncate(&fs, &path, len),
        Commands::Df { path } => commands::df(&fs, &path),
        Commands::Info { json } => commands::info(&fs, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - CLI flags override config-file values.
//! - --debug is a shorthand for --log-level debug.
//! - A negative --prefix-length is accepted and treated as its absolute
//!   value (the sign carries no meaning); a warning is logged.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};
use crate::fs_ops::PlaceMode;

/// CLI wrapper for the gather library.
#[derive(Parser, Debug, Clone)]
#[command(
    version,
    about = "Gather files matching an extension into a flat directory (Rust)"
)]
pub struct Args {
    /// Directory that receives the matched files.
    #[arg(
        value_name = "TARGET_DIR",
        value_hint = ValueHint::DirPath,
        required_unless_present = "print_config"
    )]
    pub target_dir: Option<PathBuf>,

    /// Source directory to scan (defaults to the configured source base, or
    /// the current directory).
    #[arg(short = 'S', long, value_hint = ValueHint::DirPath, help = "Source directory to scan")]
    pub source: Option<PathBuf>,

    /// Move matched files instead of copying them.
    #[arg(short = 'M', long = "move", help = "Move files instead of copying")]
    pub move_files: bool,

    /// Digest prefix length; non-zero enables hash-prefixed destination names,
    /// grown one character at a time on collision.
    #[arg(
        short = 'P',
        long,
        allow_negative_numbers = true,
        help = "Digest prefix length; non-zero enables hash-prefixed names"
    )]
    pub prefix_length: Option<i32>,

    /// Extension to match, e.g. `.txt` (the leading dot may be omitted).
    #[arg(
        short = 'E',
        long,
        required_unless_present = "print_config",
        help = "File extension to match, e.g. .txt"
    )]
    pub extension: Option<String>,

    /// Match the extension case-sensitively (default: ignore case).
    #[arg(short = 'C', long, help = "Match the extension case-sensitively")]
    pub case_sensitive: bool,

    /// Digest algorithm used for prefixing.
    #[arg(
        short = 'A',
        long,
        help = "Digest algorithm: CRC32, MD2, MD4, MD5, SHA256, SHA384, SHA512"
    )]
    pub algorithm: Option<String>,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(
        short = 'd',
        long,
        help = "Enable debug logging (shorthand for --log-level debug)"
    )]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Print where gather will look for the config file (or GATHER_CONFIG if
    /// set), then exit.
    #[arg(long, help = "Print the config file location used by gather and exit")]
    pub print_config: bool,

    /// Dry-run: log chosen destinations but do not modify the filesystem.
    #[arg(
        long,
        help = "Show what would be done, but do not copy or move anything"
    )]
    pub dry_run: bool,

    /// Emit logs in structured JSON (includes timestamp, level, and fields).
    #[arg(long, help = "Emit logs in structured JSON")]
    pub json: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Effective prefix length: the configured magnitude, sign stripped.
    /// Returns None when the flag is absent so config defaults can apply.
    pub fn effective_prefix_length(&self) -> Option<u32> {
        self.prefix_length.map(|p| p.unsigned_abs())
    }

    /// Apply CLI overrides to a Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(src) = &self.source {
            cfg.source_dir = src.clone();
        }
        if let Some(tgt) = &self.target_dir {
            cfg.target_dir = tgt.clone();
        }
        if let Some(ext) = &self.extension {
            cfg.extension = ext.clone();
        }
        if self.move_files {
            cfg.mode = PlaceMode::Move;
        }
        if let Some(p) = self.effective_prefix_length() {
            cfg.prefix_length = p;
        }
        if self.case_sensitive {
            cfg.case_sensitive = true;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if self.dry_run {
            cfg.dry_run = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}

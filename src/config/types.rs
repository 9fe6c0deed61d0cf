//! Core configuration types.
//! - Config holds the effective settings for one run.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::fingerprint::Algorithm;
use crate::fs_ops::PlaceMode;

use super::SOURCE_BASE_DEFAULT;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Effective settings for one extraction run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the tree to scan
    pub source_dir: PathBuf,
    /// Flat directory that receives matched files
    pub target_dir: PathBuf,
    /// Extension to match (leading dot optional; normalized at scan time)
    pub extension: String,
    /// Match the extension case-sensitively
    pub case_sensitive: bool,
    /// Copy (default) or move matched files
    pub mode: PlaceMode,
    /// Initial digest prefix length; 0 disables hash-prefixed naming
    pub prefix_length: u32,
    /// Digest algorithm used when prefixing is enabled
    pub algorithm: Algorithm,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// If true, decide names and log actions but do not touch the filesystem
    pub dry_run: bool,
}

impl Config {
    /// Construct a Config with explicit paths and extension; other fields use
    /// defaults (copy mode, no prefixing, SHA512, normal logging).
    pub fn new(
        source_dir: impl Into<PathBuf>,
        target_dir: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            target_dir: target_dir.into(),
            extension: extension.into(),
            case_sensitive: false,
            mode: PlaceMode::default(),
            prefix_length: 0,
            algorithm: Algorithm::default(),
            log_level: LogLevel::default(),
            log_file: None,
            dry_run: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(SOURCE_BASE_DEFAULT, "gathered", "")
    }
}

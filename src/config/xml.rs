//! XML configuration support.
//! - Loads ambient defaults from config.xml (quick_xml).
//! - Creates a commented template if missing (unless GATHER_CONFIG is set).
//!
//! The config file carries defaults only; per-run inputs (target directory,
//! extension) always come from the command line, and CLI flags override any
//! XML value. Unknown XML fields fail loudly to surface misconfigurations.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::config::types::LogLevel;
use crate::fingerprint::Algorithm;

use super::paths::{default_config_path, default_log_path, path_has_symlink_ancestor};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "source_base")]
    source_base: Option<String>,
    #[serde(rename = "algorithm")]
    algorithm: Option<String>,
    #[serde(rename = "prefix_length")]
    prefix_length: Option<i32>,
    #[serde(rename = "case_sensitive")]
    case_sensitive: Option<bool>,
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
}

/// Ambient defaults read from the config file; all fields optional so the CLI
/// can fill the gaps.
#[derive(Debug, Clone, Default)]
pub struct XmlSettings {
    pub source_base: Option<PathBuf>,
    pub algorithm: Option<Algorithm>,
    pub prefix_length: Option<i32>,
    pub case_sensitive: Option<bool>,
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
}

/// Read settings from the config file, if any.
/// Path resolution: GATHER_CONFIG if set, else the per-platform default. When
/// the default path has no file yet, a template is written (best-effort) and
/// None is returned so the run proceeds on built-in defaults.
pub fn load_settings() -> Option<XmlSettings> {
    let env_set = env::var_os("GATHER_CONFIG").is_some();
    let cfg_path = env::var_os("GATHER_CONFIG")
        .map(PathBuf::from)
        .or_else(default_config_path)?;

    if !cfg_path.exists() {
        if !env_set {
            if let Err(e) = create_template_config(&cfg_path) {
                debug!(path = %cfg_path.display(), error = %e, "could not write template config");
            }
        }
        return None;
    }

    match load_settings_from_path(&cfg_path) {
        Ok(settings) => Some(settings),
        Err(e) => {
            let msg = e.to_string();
            // Unknown fields are a hard failure (deny_unknown_fields): refuse
            // to run with a config we only half-understand.
            if msg.contains("unknown field") {
                panic!(
                    "Unknown field in gather config {}: {}. Refusing to start.",
                    cfg_path.display(),
                    msg
                );
            }
            warn!(path = %cfg_path.display(), error = %msg, "failed to read config file; using defaults");
            None
        }
    }
}

/// Load settings from a specific XML file path (quick_xml).
pub fn load_settings_from_path(path: &Path) -> Result<XmlSettings> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig =
        from_xml_str(&contents).with_context(|| format!("parse config xml '{}'", path.display()))?;

    let algorithm = parsed.algorithm.as_deref().and_then(|s| {
        let trimmed = s.trim();
        match Algorithm::parse(trimmed) {
            Ok(a) => Some(a),
            Err(e) => {
                warn!(path = %path.display(), value = trimmed, error = %e, "ignoring invalid algorithm in config");
                None
            }
        }
    });

    Ok(XmlSettings {
        source_base: parsed
            .source_base
            .as_deref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from),
        algorithm,
        prefix_length: parsed.prefix_length,
        case_sensitive: parsed.case_sensitive,
        log_level: parsed
            .log_level
            .as_deref()
            .and_then(|s| LogLevel::parse(s.trim())),
        log_file: parsed
            .log_file
            .as_deref()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from),
    })
}

/// Create the default template config file and parent directory.
/// On Unix, conservative permissions are applied best-effort (dir 0700,
/// file 0600); failures to tighten perms do not fail creation.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        return Err(anyhow::anyhow!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(parent, fs::Permissions::from_mode(0o700));
        }
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "/path/to/gather.log".into());

    let content = format!(
        "<!--\n  gather configuration (XML)\n\n  All fields are optional defaults; CLI flags override XML values.\n\n  Fields:\n    source_base     -> directory scanned when -S/--source is not given\n    algorithm       -> CRC32 | MD2 | MD4 | MD5 | SHA256 | SHA384 | SHA512\n    prefix_length   -> digest prefix length; non-zero enables hash prefixing\n    case_sensitive  -> true to match the extension case-sensitively\n    log_level       -> quiet | normal | info | debug\n    log_file        -> path to log file (optional; stdout is always used)\n-->\n<config>\n  <source_base>.</source_base>\n  <algorithm>SHA512</algorithm>\n  <prefix_length>0</prefix_length>\n  <case_sensitive>false</case_sensitive>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n</config>\n",
        suggested_log
    );

    fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o600));
    }

    debug!("Created template config at {}", path.display());
    Ok(())
}

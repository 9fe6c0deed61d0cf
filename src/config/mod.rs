//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{XmlSettings, create_template_config, load_settings, load_settings_from_path};

/// Source tree scanned when neither CLI nor config names one.
pub const SOURCE_BASE_DEFAULT: &str = ".";

//! Configuration and settings management for LabelKit
//!
//! Supports JSON and TOML file formats stored in the platform configuration
//! directory.
//!
//! Configuration is organized into logical sections:
//! - Template storage (where named label layouts are kept)
//! - Print output (title, auto print, output directory)
//! - Designer defaults (initial label size)

use labelkit_core::SizePreset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{Result, SettingsError};

/// Application directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "labelkit";

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";

pub use labelkit_core::TEMPLATE_FILE_NAME;

/// Platform configuration directory for LabelKit.
pub fn config_dir() -> PathBuf {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// Default path of the configuration file.
pub fn default_config_path() -> PathBuf {
    config_dir().join(CONFIG_FILE_NAME)
}

/// Creates the configuration directory if needed.
pub fn ensure_config_dir() -> Result<PathBuf> {
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .map_err(|e| SettingsError::ConfigDirectory(format!("{}: {}", dir.display(), e)))?;
    Ok(dir)
}

/// Template storage settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Template file; the config directory default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl TemplateSettings {
    /// Effective template file path.
    pub fn resolved_path(&self) -> PathBuf {
        self.storage_path
            .clone()
            .unwrap_or_else(|| config_dir().join(TEMPLATE_FILE_NAME))
    }
}

/// Print settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintSettings {
    /// Open the print dialog when the print page loads
    pub auto_print: bool,
    /// Where print pages are written
    pub output_directory: PathBuf,
    /// Title of the print page
    pub page_title: String,
}

impl Default for PrintSettings {
    fn default() -> Self {
        Self {
            auto_print: true,
            output_directory: std::env::temp_dir().join(APP_DIR_NAME),
            page_title: "Print Label".to_string(),
        }
    }
}

/// Designer defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignerSettings {
    /// Label size for new designs
    pub default_preset: SizePreset,
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub templates: TemplateSettings,
    pub print: PrintSettings,
    pub designer: DesignerSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> Result<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;
        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };
        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        self.validate()?;
        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.print.page_title.trim().is_empty() {
            return Err(SettingsError::invalid(
                "print.page_title",
                "must not be empty",
            ));
        }

        if self.print.output_directory.as_os_str().is_empty() {
            return Err(SettingsError::invalid(
                "print.output_directory",
                "must not be empty",
            ));
        }

        if let Some(path) = &self.templates.storage_path {
            if path.as_os_str().is_empty() || path.is_dir() {
                return Err(SettingsError::invalid(
                    "templates.storage_path",
                    "must be a file path",
                ));
            }
        }

        Ok(())
    }
}

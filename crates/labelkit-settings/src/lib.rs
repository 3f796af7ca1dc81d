//! LabelKit Settings Crate
//!
//! Handles application configuration: where templates are stored, how
//! labels are printed and the designer's starting label size.

pub mod config;
pub mod error;

pub use config::{
    config_dir, default_config_path, ensure_config_dir, Config, DesignerSettings, PrintSettings,
    TemplateSettings,
};
pub use error::{Result, SettingsError};

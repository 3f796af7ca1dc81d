//! # LabelKit
//!
//! Product label designer:
//! - Drag, resize and rotate text, price, barcode and image elements
//! - Small, medium, large or custom label sizes
//! - Named layout templates rebound to any product
//! - Print-ready HTML output
//!
//! ## Architecture
//!
//! LabelKit is organized as a workspace with multiple crates:
//!
//! 1. **labelkit-core** - Units, product record, barcode rules, errors
//! 2. **labelkit-designer** - Label document, gestures, templates, rendering
//! 3. **labelkit-settings** - Configuration files
//! 4. **labelkit** - Logging setup and the command-line front end

pub mod cli;

pub use labelkit_core as core;
pub use labelkit_designer as designer;
pub use labelkit_settings as settings;

pub use labelkit_core::{Error, Product, Result, SizePreset};
pub use labelkit_designer::{LabelDesigner, LabelDocument, TemplateStore};
pub use labelkit_settings::Config;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so generated documents can go to stdout
/// - RUST_LOG environment variable support (INFO by default)
/// - Target, level and line numbers on every event
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

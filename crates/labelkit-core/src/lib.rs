//! # LabelKit Core
//!
//! Core types and utilities shared by the LabelKit crates.
//! Provides the millimetre/pixel conversion every label geometry goes
//! through, the product record labels are bound to, canvas size presets,
//! barcode symbology rules, and the unified error type.

pub mod barcode;
pub mod error;
pub mod preset;
pub mod product;
pub mod units;

pub use barcode::BarcodeSymbology;
pub use error::{BarcodeError, Error, PrintError, Result, TemplateError};
pub use preset::SizePreset;
pub use product::{format_price, Product};
pub use units::{mm_to_px, px_to_mm, PX_PER_MM};

/// File holding the template library, inside the configuration directory.
pub const TEMPLATE_FILE_NAME: &str = "label_templates.json";

//! Error handling for LabelKit
//!
//! The label editor itself treats most bad input as a no-op, so the error
//! surface is narrow:
//! - Barcode errors (validation before a symbol is generated)
//! - Template errors (the local template store)
//! - Print errors (rendering a design for the print surface)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Barcode error type
///
/// Raised when a barcode value does not satisfy its symbology or the
/// encoder rejects it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BarcodeError {
    /// No value was supplied
    #[error("Barcode cannot be empty.")]
    Empty,

    /// The value has the wrong shape for the symbology
    #[error("{symbology} requires {requirement}.")]
    InvalidFormat {
        /// The symbology name.
        symbology: String,
        /// Human readable requirement, e.g. "exactly 13 digits".
        requirement: String,
    },

    /// The encoder refused the value
    #[error("Invalid barcode: {reason}")]
    Encoding {
        /// The reason reported by the encoder.
        reason: String,
    },
}

/// Template error type
#[derive(Error, Debug)]
pub enum TemplateError {
    /// Template name was blank
    #[error("Template name cannot be empty")]
    EmptyName,

    /// No template with the requested name
    #[error("Template '{name}' not found")]
    NotFound {
        /// The requested template name.
        name: String,
    },

    /// The template store could not be read or written
    #[error("Template storage unavailable: {reason}")]
    Storage {
        /// The reason storage failed.
        reason: String,
    },
}

/// Print error type
#[derive(Error, Debug)]
pub enum PrintError {
    /// There is nothing on the label to print
    #[error("No label design found for this product.")]
    EmptyDesign,

    /// The print surface could not accept the document
    #[error("Print surface error: {reason}")]
    Surface {
        /// The reason the surface failed.
        reason: String,
    },
}

/// Main error type for LabelKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Barcode error
    #[error(transparent)]
    Barcode(#[from] BarcodeError),

    /// Template error
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Print error
    #[error(transparent)]
    Print(#[from] PrintError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a barcode error
    pub fn is_barcode_error(&self) -> bool {
        matches!(self, Error::Barcode(_))
    }

    /// Check if this is a template error
    pub fn is_template_error(&self) -> bool {
        matches!(self, Error::Template(_))
    }

    /// Check if this is a print error
    pub fn is_print_error(&self) -> bool {
        matches!(self, Error::Print(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;

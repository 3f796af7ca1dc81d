//! Barcode symbologies supported for product labels and the value rules
//! each one enforces before a symbol is generated.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::BarcodeError;

/// Minimum number of characters accepted for Code 128.
pub const CODE128_MIN_LEN: usize = 3;

/// Barcode symbology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BarcodeSymbology {
    /// Code 128, any printable text of at least three characters
    #[default]
    #[serde(rename = "CODE128")]
    Code128,
    /// EAN-13, exactly 13 digits
    #[serde(rename = "EAN13")]
    Ean13,
    /// UPC-A, exactly 12 digits
    #[serde(rename = "UPC")]
    Upc,
}

impl BarcodeSymbology {
    /// Get the symbology name as used in product records
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Code128 => "CODE128",
            Self::Ean13 => "EAN13",
            Self::Upc => "UPC",
        }
    }

    /// Check that `value` can be encoded with this symbology.
    pub fn validate(&self, value: &str) -> Result<(), BarcodeError> {
        if value.is_empty() {
            return Err(BarcodeError::Empty);
        }

        let invalid = |requirement: &str| BarcodeError::InvalidFormat {
            symbology: self.as_str().to_string(),
            requirement: requirement.to_string(),
        };

        match self {
            Self::Ean13 if !is_digits(value, 13) => Err(invalid("exactly 13 digits")),
            Self::Upc if !is_digits(value, 12) => Err(invalid("exactly 12 digits")),
            Self::Code128 if value.chars().count() < CODE128_MIN_LEN => {
                Err(invalid("at least 3 characters"))
            }
            _ => Ok(()),
        }
    }
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

impl fmt::Display for BarcodeSymbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BarcodeSymbology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['-', '_', ' '], "").as_str() {
            "CODE128" => Ok(Self::Code128),
            "EAN13" => Ok(Self::Ean13),
            "UPC" | "UPCA" => Ok(Self::Upc),
            _ => Err(format!("Unknown barcode symbology: {}", s)),
        }
    }
}

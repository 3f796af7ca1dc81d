//! Resolves element content from the bound product.
//!
//! Resolution is a snapshot: it runs when an element is created and when a
//! template is applied, never again afterwards.

use labelkit_core::{format_price, Product};

use crate::barcode::BarcodeImage;
use crate::document::{ElementKind, PLACEHOLDER_TEXT};

/// Shown when the product has no name.
pub const UNNAMED_PRODUCT: &str = "Unnamed Product";
/// Shown for missing batch numbers and expiry dates.
pub const NOT_AVAILABLE: &str = "N/A";

/// Content resolver bound to one product and its rendered barcode.
#[derive(Debug, Clone, Copy)]
pub struct ContentResolver<'a> {
    product: &'a Product,
    barcode: Option<&'a BarcodeImage>,
}

impl<'a> ContentResolver<'a> {
    pub fn new(product: &'a Product, barcode: Option<&'a BarcodeImage>) -> Self {
        Self { product, barcode }
    }

    /// Whether an element of `kind` can be created for this product.
    ///
    /// Barcode and product image elements need their source data.
    pub fn can_create(&self, kind: ElementKind) -> bool {
        self.resolve(kind).is_some()
    }

    /// Content for a new element of `kind`, or `None` if it cannot be created.
    pub fn resolve(&self, kind: ElementKind) -> Option<String> {
        match kind {
            ElementKind::StaticText => Some(PLACEHOLDER_TEXT.to_string()),
            ElementKind::ProductName => {
                Some(self.product.name().unwrap_or(UNNAMED_PRODUCT).to_string())
            }
            ElementKind::Price => Some(format_price(self.product.sales_price)),
            ElementKind::BatchNumber => Some(
                self.product
                    .batch_number()
                    .unwrap_or(NOT_AVAILABLE)
                    .to_string(),
            ),
            ElementKind::ExpiryDate => Some(
                self.product
                    .expiry_date()
                    .unwrap_or(NOT_AVAILABLE)
                    .to_string(),
            ),
            ElementKind::BarcodeImage => self
                .barcode
                .map(|b| b.as_content())
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            ElementKind::ProductImage => self.product.image().map(str::to_string),
        }
    }

    /// Content when rebuilding an element from a template.
    ///
    /// Static text keeps its stored literal; everything else is resolved
    /// again and renders as nothing when the source data is missing.
    pub fn rebind(&self, kind: ElementKind, stored: Option<&str>) -> String {
        match kind {
            ElementKind::StaticText => stored.unwrap_or(PLACEHOLDER_TEXT).to_string(),
            _ => self.resolve(kind).unwrap_or_default(),
        }
    }
}

/// Resolves `kind` against `product` and `barcode`.
pub fn resolve(
    kind: ElementKind,
    product: &Product,
    barcode: Option<&BarcodeImage>,
) -> Option<String> {
    ContentResolver::new(product, barcode).resolve(kind)
}

//! Value types shared by the label document and its editors.

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a label element, unique for the lifetime of a document.
pub type ElementId = u64;

/// Default size of a newly added element, in pixels.
pub const DEFAULT_ELEMENT_SIZE: Size = Size {
    width: 100.0,
    height: 50.0,
};

/// Default size of the logo, in pixels.
pub const DEFAULT_LOGO_SIZE: Size = Size {
    width: 30.0,
    height: 30.0,
};

/// Text shown by a freshly added static text element.
pub const PLACEHOLDER_TEXT: &str = "Sample Text";

/// Top-left anchored position in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Element box size in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        DEFAULT_ELEMENT_SIZE
    }
}

/// Full placement of an element or the logo.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Geometry {
    pub position: Position,
    pub size: Size,
    /// Rotation in degrees around the box center.
    pub rotation: f64,
}

impl Geometry {
    /// Geometric center of the box.
    pub fn center(&self) -> Position {
        Position::new(
            self.position.x + self.size.width / 2.0,
            self.position.y + self.size.height / 2.0,
        )
    }
}

/// Partial geometry update; `None` fields keep their previous value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GeometryPatch {
    pub position: Option<Position>,
    pub size: Option<Size>,
    pub rotation: Option<f64>,
}

impl GeometryPatch {
    pub fn position(position: Position) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn size(size: Size) -> Self {
        Self {
            size: Some(size),
            ..Default::default()
        }
    }

    pub fn rotation(rotation: f64) -> Self {
        Self {
            rotation: Some(rotation),
            ..Default::default()
        }
    }

    /// Applies the patch on top of `geometry`.
    pub fn apply_to(&self, geometry: Geometry) -> Geometry {
        Geometry {
            position: self.position.unwrap_or(geometry.position),
            size: self.size.unwrap_or(geometry.size),
            rotation: self.rotation.unwrap_or(geometry.rotation),
        }
    }
}

/// Semantic kind of a label element.
///
/// Serialized with the short names stored in saved designs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    #[serde(rename = "text", alias = "static-text")]
    StaticText,
    #[serde(rename = "name", alias = "product-name")]
    ProductName,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "batchNumber", alias = "batch-number")]
    BatchNumber,
    #[serde(rename = "expiryDate", alias = "expiry-date")]
    ExpiryDate,
    #[serde(rename = "barcode", alias = "barcode-image")]
    BarcodeImage,
    #[serde(rename = "image", alias = "product-image")]
    ProductImage,
}

impl ElementKind {
    /// All kinds in toolbar order.
    pub const ALL: [ElementKind; 7] = [
        ElementKind::StaticText,
        ElementKind::ProductName,
        ElementKind::Price,
        ElementKind::BatchNumber,
        ElementKind::ExpiryDate,
        ElementKind::BarcodeImage,
        ElementKind::ProductImage,
    ];

    /// Name used in saved designs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaticText => "text",
            Self::ProductName => "name",
            Self::Price => "price",
            Self::BatchNumber => "batchNumber",
            Self::ExpiryDate => "expiryDate",
            Self::BarcodeImage => "barcode",
            Self::ProductImage => "image",
        }
    }

    /// Toolbar caption.
    pub fn label(&self) -> &'static str {
        match self {
            Self::StaticText => "Add Text",
            Self::ProductName => "Add Product Name",
            Self::Price => "Add Price",
            Self::BatchNumber => "Add Batch Number",
            Self::ExpiryDate => "Add Expiry Date",
            Self::BarcodeImage => "Add Barcode",
            Self::ProductImage => "Add Product Image",
        }
    }

    /// Whether content comes from the bound product rather than the user.
    pub fn is_product_bound(&self) -> bool {
        !matches!(self, Self::StaticText)
    }

    /// Whether the element shows text (and can be edited in place).
    pub fn is_textual(&self) -> bool {
        !matches!(self, Self::BarcodeImage | Self::ProductImage)
    }

    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "text" | "statictext" => Some(Self::StaticText),
            "name" | "productname" => Some(Self::ProductName),
            "price" => Some(Self::Price),
            "batchnumber" | "batch" => Some(Self::BatchNumber),
            "expirydate" | "expiry" => Some(Self::ExpiryDate),
            "barcode" | "barcodeimage" => Some(Self::BarcodeImage),
            "image" | "productimage" => Some(Self::ProductImage),
            _ => None,
        }
    }
}

/// One positionable unit of label content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    /// Resolved text, inline SVG markup, or an image reference.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

impl LabelElement {
    pub fn new(id: ElementId, kind: ElementKind, content: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            content: content.into(),
        }
    }
}

/// Saved designs write `null` content for elements that had nothing to show.
pub(crate) fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_keeps_unspecified_fields() {
        let geometry = Geometry {
            position: Position::new(5.0, 6.0),
            size: Size::new(40.0, 20.0),
            rotation: 90.0,
        };
        let patched = GeometryPatch::size(Size::new(60.0, 30.0)).apply_to(geometry);
        assert_eq!(patched.position, Position::new(5.0, 6.0));
        assert_eq!(patched.size, Size::new(60.0, 30.0));
        assert_eq!(patched.rotation, 90.0);
    }

    #[test]
    fn test_center() {
        let geometry = Geometry {
            position: Position::new(10.0, 20.0),
            size: Size::new(100.0, 50.0),
            rotation: 0.0,
        };
        assert_eq!(geometry.center(), Position::new(60.0, 45.0));
    }

    #[test]
    fn test_kind_serde_names() {
        let json = serde_json::to_string(&ElementKind::BatchNumber).unwrap();
        assert_eq!(json, "\"batchNumber\"");
        let kind: ElementKind = serde_json::from_str("\"barcode-image\"").unwrap();
        assert_eq!(kind, ElementKind::BarcodeImage);
        for kind in ElementKind::ALL {
            let round: ElementKind =
                serde_json::from_str(&format!("\"{}\"", kind.as_str())).unwrap();
            assert_eq!(round, kind);
        }
    }

    #[test]
    fn test_kind_classification() {
        assert!(!ElementKind::StaticText.is_product_bound());
        assert!(ElementKind::Price.is_product_bound());
        assert!(ElementKind::ExpiryDate.is_textual());
        assert!(!ElementKind::ProductImage.is_textual());
        assert_eq!(ElementKind::parse("Product Name"), Some(ElementKind::ProductName));
        assert_eq!(ElementKind::parse("logo"), None);
    }

    #[test]
    fn test_null_content_reads_as_empty() {
        let element: LabelElement =
            serde_json::from_str(r#"{"id": 7, "type": "barcode", "content": null}"#).unwrap();
        assert_eq!(element.content, "");
        assert_eq!(element.kind, ElementKind::BarcodeImage);
    }
}

//! Serialization and deserialization for label design files.
//!
//! A design can live in a standalone `.label.json` file or be attached to a
//! product record under `labelDesign`, which is how it travels to the
//! product-save call.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use labelkit_core::Product;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, warn};

use crate::document::LabelDocument;

/// Design file format version
const FILE_FORMAT_VERSION: &str = "1.0";

/// Product field holding the attached design.
pub const LABEL_DESIGN_FIELD: &str = "labelDesign";

/// Complete design file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelDesignFile {
    pub version: String,
    pub metadata: DesignMetadata,
    pub design: LabelDocument,
}

/// Design metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DesignMetadata {
    pub name: String,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

impl LabelDesignFile {
    /// Create new design file
    pub fn new(name: impl Into<String>, design: LabelDocument) -> Self {
        let now = Utc::now();
        Self {
            version: FILE_FORMAT_VERSION.to_string(),
            metadata: DesignMetadata {
                name: name.into(),
                created: now,
                modified: now,
            },
            design,
        }
    }

    /// Save design to file
    pub fn save_to_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.metadata.modified = Utc::now();
        let json = serde_json::to_string_pretty(self).context("Failed to serialize design")?;
        std::fs::write(path.as_ref(), json)
            .with_context(|| format!("Failed to write file: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Load design from file
    ///
    /// Also accepts a bare design object without the file envelope.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        let value: serde_json::Value =
            serde_json::from_str(&content).context("Failed to parse design file")?;
        let mut file = if value.get("design").is_some() && value.get("version").is_some() {
            serde_json::from_value::<Self>(value).context("Failed to parse design file")?
        } else {
            let design: LabelDocument =
                serde_json::from_value(value).context("Failed to parse label design")?;
            let name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("Untitled")
                .to_string();
            Self::new(name, design)
        };
        file.design.last_issued_id = file.design.max_element_id();
        Ok(file)
    }
}

/// Reads and writes the design attached to a product record.
pub struct ProductLabel;

impl ProductLabel {
    /// The product's stored design, or the default document.
    ///
    /// The design may be stored as an object or as a JSON string.
    pub fn design_of(product: &Product) -> LabelDocument {
        let Some(value) = product.extra.get(LABEL_DESIGN_FIELD) else {
            return LabelDocument::new();
        };
        let parsed = match value {
            serde_json::Value::Null => return LabelDocument::new(),
            serde_json::Value::String(text) if text.trim().is_empty() => {
                return LabelDocument::new()
            }
            serde_json::Value::String(text) => LabelDocument::from_json(text),
            other => serde_json::from_value::<LabelDocument>(other.clone())
                .map(|mut doc| {
                    doc.last_issued_id = doc.max_element_id();
                    doc
                })
                .map_err(Into::into),
        };
        match parsed {
            Ok(doc) => doc,
            Err(e) => {
                warn!("Stored label design is unreadable, using defaults: {}", e);
                LabelDocument::new()
            }
        }
    }

    pub fn has_design(product: &Product) -> bool {
        product
            .extra
            .get(LABEL_DESIGN_FIELD)
            .is_some_and(|v| !v.is_null())
    }

    /// Attaches `design` to `product` for the product-save call.
    pub fn attach(product: &mut Product, design: &LabelDocument) -> labelkit_core::Result<()> {
        let value = serde_json::to_value(design)?;
        product.extra.insert(LABEL_DESIGN_FIELD.to_string(), value);
        debug!("Attached label design with {} elements", design.element_count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementKind;
    use tempfile::NamedTempFile;

    #[test]
    fn test_file_round_trip() {
        let (design, id) = LabelDocument::new().add_element(ElementKind::StaticText, "Fragile");
        let temp = NamedTempFile::new().unwrap();

        let mut file = LabelDesignFile::new("Shelf label", design.clone());
        file.save_to_file(temp.path()).unwrap();

        let loaded = LabelDesignFile::load_from_file(temp.path()).unwrap();
        assert_eq!(loaded.version, FILE_FORMAT_VERSION);
        assert_eq!(loaded.metadata.name, "Shelf label");
        assert_eq!(loaded.design.element(id), design.element(id));
        assert_eq!(loaded.design.positions, design.positions);
    }

    #[test]
    fn test_load_bare_design() {
        let temp = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        std::fs::write(
            temp.path(),
            r#"{"size":"small","width":50,"height":25,"elements":[{"id":5,"type":"price","content":"$1.00"}]}"#,
        )
        .unwrap();
        let loaded = LabelDesignFile::load_from_file(temp.path()).unwrap();
        assert_eq!(loaded.design.width_mm, 50.0);
        assert_eq!(loaded.design.element_count(), 1);
        let (_, next) = loaded.design.add_element(ElementKind::Price, "$1.00");
        assert!(next > 5);
    }

    #[test]
    fn test_missing_file() {
        assert!(LabelDesignFile::load_from_file("/nonexistent/label.json").is_err());
    }

    #[test]
    fn test_product_attachment() {
        let mut product = Product::named("Tea");
        assert!(!ProductLabel::has_design(&product));
        assert_eq!(ProductLabel::design_of(&product), LabelDocument::new());

        let (design, _) = LabelDocument::new().add_element(ElementKind::ProductName, "Tea");
        ProductLabel::attach(&mut product, &design).unwrap();
        assert!(ProductLabel::has_design(&product));

        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["labelDesign"]["elements"][0]["type"], "name");

        let restored = ProductLabel::design_of(&product);
        assert_eq!(restored.elements, design.elements);
    }

    #[test]
    fn test_string_and_broken_designs() {
        let mut product = Product::named("Tea");
        product.extra.insert(
            LABEL_DESIGN_FIELD.to_string(),
            serde_json::Value::String(r#"{"size":"large","width":150,"height":75}"#.to_string()),
        );
        assert_eq!(ProductLabel::design_of(&product).width_mm, 150.0);

        product.extra.insert(
            LABEL_DESIGN_FIELD.to_string(),
            serde_json::Value::String("{broken".to_string()),
        );
        assert_eq!(ProductLabel::design_of(&product), LabelDocument::new());
    }
}

//! Label document: canvas size, element list and per-element geometry.

mod operations;
mod types;

pub use operations::MIN_DIMENSION_MM;
pub use types::{
    ElementId, ElementKind, Geometry, GeometryPatch, LabelElement, Position, Size,
    DEFAULT_ELEMENT_SIZE, DEFAULT_LOGO_SIZE, PLACEHOLDER_TEXT,
};

use std::collections::BTreeMap;

use labelkit_core::{mm_to_px, SizePreset};
use serde::{Deserialize, Deserializer, Serialize};

/// Fallback canvas width when a stored design has none.
pub const DEFAULT_WIDTH_MM: f64 = 100.0;
/// Fallback canvas height when a stored design has none.
pub const DEFAULT_HEIGHT_MM: f64 = 50.0;

/// The full description of one printable label.
///
/// All mutation goes through the operations in this module, each of which
/// returns a new document and leaves `self` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDocument {
    #[serde(rename = "size", default)]
    pub size_preset: SizePreset,
    #[serde(rename = "width", default = "default_width", deserialize_with = "width_or_default")]
    pub width_mm: f64,
    #[serde(rename = "height", default = "default_height", deserialize_with = "height_or_default")]
    pub height_mm: f64,
    #[serde(default)]
    pub elements: Vec<LabelElement>,
    #[serde(default)]
    pub positions: BTreeMap<ElementId, Position>,
    #[serde(default)]
    pub sizes: BTreeMap<ElementId, Size>,
    #[serde(default)]
    pub rotations: BTreeMap<ElementId, f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default = "default_logo_size")]
    pub logo_size: Size,
    #[serde(default)]
    pub logo_position: Position,
    #[serde(default)]
    pub logo_rotation: f64,
    #[serde(default)]
    pub include_logo: bool,
    /// Highest id this document has handed out, so removed ids are not reissued.
    #[serde(skip)]
    pub(crate) last_issued_id: ElementId,
}

impl Default for LabelDocument {
    fn default() -> Self {
        Self::with_preset(SizePreset::Medium)
    }
}

impl LabelDocument {
    /// Creates the default document: medium preset, no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document sized by `preset`.
    ///
    /// `Custom` has no dimensions of its own and starts at the medium size.
    pub fn with_preset(preset: SizePreset) -> Self {
        let (width_mm, height_mm) = preset
            .dimensions_mm()
            .unwrap_or((DEFAULT_WIDTH_MM, DEFAULT_HEIGHT_MM));
        Self {
            size_preset: preset,
            width_mm,
            height_mm,
            elements: Vec::new(),
            positions: BTreeMap::new(),
            sizes: BTreeMap::new(),
            rotations: BTreeMap::new(),
            logo: None,
            logo_size: DEFAULT_LOGO_SIZE,
            logo_position: Position::default(),
            logo_rotation: 0.0,
            include_logo: false,
            last_issued_id: 0,
        }
    }

    /// Parses a stored design, tolerating missing fields.
    pub fn from_json(json: &str) -> labelkit_core::Result<Self> {
        let mut document: Self = serde_json::from_str(json)?;
        document.last_issued_id = document.max_element_id();
        Ok(document)
    }

    pub fn to_json(&self) -> labelkit_core::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Canvas size in pixels.
    pub fn canvas_size_px(&self) -> Size {
        Size::new(mm_to_px(self.width_mm), mm_to_px(self.height_mm))
    }

    pub fn element(&self, id: ElementId) -> Option<&LabelElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.element(id).is_some()
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Geometry of an element, with defaults filled in for missing entries.
    ///
    /// Returns `None` when the element does not exist.
    pub fn geometry(&self, id: ElementId) -> Option<Geometry> {
        self.contains(id).then(|| self.geometry_or_default(id))
    }

    pub(crate) fn geometry_or_default(&self, id: ElementId) -> Geometry {
        Geometry {
            position: self.positions.get(&id).copied().unwrap_or_default(),
            size: self.sizes.get(&id).copied().unwrap_or(DEFAULT_ELEMENT_SIZE),
            rotation: self.rotations.get(&id).copied().unwrap_or(0.0),
        }
    }

    /// Geometry of the logo slot.
    pub fn logo_geometry(&self) -> Geometry {
        Geometry {
            position: self.logo_position,
            size: self.logo_size,
            rotation: self.logo_rotation,
        }
    }

    /// Whether the logo should be drawn.
    pub fn shows_logo(&self) -> bool {
        self.include_logo && self.logo.as_deref().is_some_and(|l| !l.is_empty())
    }

    pub(crate) fn max_element_id(&self) -> ElementId {
        self.elements.iter().map(|e| e.id).max().unwrap_or(0)
    }
}

fn default_width() -> f64 {
    DEFAULT_WIDTH_MM
}

fn default_height() -> f64 {
    DEFAULT_HEIGHT_MM
}

fn default_logo_size() -> Size {
    DEFAULT_LOGO_SIZE
}

fn positive_or<'de, D>(deserializer: D, fallback: f64) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(fallback))
}

fn width_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    positive_or(deserializer, DEFAULT_WIDTH_MM)
}

fn height_or_default<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    positive_or(deserializer, DEFAULT_HEIGHT_MM)
}

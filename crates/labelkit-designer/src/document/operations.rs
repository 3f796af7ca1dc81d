//! Immutable-update operations on [`LabelDocument`].

use chrono::Utc;
use labelkit_core::SizePreset;
use tracing::debug;

use super::{ElementId, ElementKind, GeometryPatch, LabelDocument, LabelElement, Position, Size};
use super::{DEFAULT_ELEMENT_SIZE, DEFAULT_LOGO_SIZE};

/// Smallest canvas dimension accepted by [`LabelDocument::resize`], in millimetres.
pub const MIN_DIMENSION_MM: f64 = 10.0;

impl LabelDocument {
    /// Appends an element with default geometry and returns its id.
    pub fn add_element(&self, kind: ElementKind, content: impl Into<String>) -> (Self, ElementId) {
        let id = self.next_id();
        let mut doc = self.clone();
        doc.elements.push(LabelElement::new(id, kind, content));
        doc.positions.insert(id, Position::default());
        doc.sizes.insert(id, DEFAULT_ELEMENT_SIZE);
        doc.rotations.insert(id, 0.0);
        doc.last_issued_id = id;
        debug!("Added {} element {}", kind.as_str(), id);
        (doc, id)
    }

    /// Drops an element and its geometry. Unknown ids are ignored.
    pub fn remove_element(&self, id: ElementId) -> Self {
        if !self.contains(id) {
            debug!("Ignoring removal of unknown element {}", id);
            return self.clone();
        }
        let mut doc = self.clone();
        doc.elements.retain(|e| e.id != id);
        doc.positions.remove(&id);
        doc.sizes.remove(&id);
        doc.rotations.remove(&id);
        debug!("Removed element {}", id);
        doc
    }

    /// Replaces an element's content. Unknown ids are ignored.
    pub fn set_element_content(&self, id: ElementId, text: impl Into<String>) -> Self {
        let mut doc = self.clone();
        match doc.elements.iter_mut().find(|e| e.id == id) {
            Some(element) => element.content = text.into(),
            None => debug!("Ignoring content edit of unknown element {}", id),
        }
        doc
    }

    /// Partially updates an element's geometry. Unknown ids are ignored.
    pub fn set_geometry(&self, id: ElementId, patch: GeometryPatch) -> Self {
        if !self.contains(id) {
            debug!("Ignoring geometry update of unknown element {}", id);
            return self.clone();
        }
        let geometry = patch.apply_to(self.geometry_or_default(id));
        let mut doc = self.clone();
        doc.positions.insert(id, geometry.position);
        doc.sizes.insert(id, geometry.size);
        doc.rotations.insert(id, geometry.rotation);
        doc
    }

    /// Partially updates the logo geometry.
    pub fn set_logo_geometry(&self, patch: GeometryPatch) -> Self {
        let geometry = patch.apply_to(self.logo_geometry());
        let mut doc = self.clone();
        doc.logo_position = geometry.position;
        doc.logo_size = geometry.size;
        doc.logo_rotation = geometry.rotation;
        doc
    }

    /// Sets the canvas dimensions directly, switching to the custom preset.
    ///
    /// Dimensions below [`MIN_DIMENSION_MM`] are raised to it; non-finite
    /// input leaves the document unchanged.
    pub fn resize(&self, width_mm: f64, height_mm: f64) -> Self {
        if !width_mm.is_finite() || !height_mm.is_finite() {
            debug!("Ignoring non-finite label size {}x{}", width_mm, height_mm);
            return self.clone();
        }
        let mut doc = self.clone();
        doc.size_preset = SizePreset::Custom;
        doc.width_mm = width_mm.max(MIN_DIMENSION_MM);
        doc.height_mm = height_mm.max(MIN_DIMENSION_MM);
        debug!("Label resized to {}x{}mm", doc.width_mm, doc.height_mm);
        doc
    }

    /// Selects a size preset. `Custom` keeps the current dimensions.
    pub fn apply_preset(&self, preset: SizePreset) -> Self {
        let mut doc = self.clone();
        doc.size_preset = preset;
        if let Some((width_mm, height_mm)) = preset.dimensions_mm() {
            doc.width_mm = width_mm;
            doc.height_mm = height_mm;
        }
        debug!("Applied {} preset", preset.as_str());
        doc
    }

    /// Returns an empty document at the current preset and dimensions.
    pub fn reset(&self) -> Self {
        let mut doc = Self::with_preset(self.size_preset);
        doc.width_mm = self.width_mm;
        doc.height_mm = self.height_mm;
        doc.last_issued_id = self.last_issued_id.max(self.max_element_id());
        doc
    }

    /// Stores an uploaded logo image and turns the logo on.
    pub fn set_logo(&self, data_uri: impl Into<String>) -> Self {
        let mut doc = self.clone();
        doc.logo = Some(data_uri.into());
        doc.include_logo = true;
        if doc.logo_size.width <= 0.0 || doc.logo_size.height <= 0.0 {
            doc.logo_size = DEFAULT_LOGO_SIZE;
        }
        doc
    }

    pub fn set_include_logo(&self, include: bool) -> Self {
        let mut doc = self.clone();
        doc.include_logo = include;
        doc
    }

    pub fn element_size(&self, id: ElementId) -> Option<Size> {
        self.geometry(id).map(|g| g.size)
    }

    /// Ids are timestamp-derived but always strictly above anything issued before.
    fn next_id(&self) -> ElementId {
        let now = ElementId::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        now.max(self.last_issued_id + 1)
            .max(self.max_element_id() + 1)
    }
}

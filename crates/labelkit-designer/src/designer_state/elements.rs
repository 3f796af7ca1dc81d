//! Element and canvas operations for the editor session.

use labelkit_core::units::parse_length_mm;
use labelkit_core::SizePreset;
use tracing::{debug, info};

use super::LabelDesigner;
use crate::document::{ElementId, ElementKind, DEFAULT_HEIGHT_MM, DEFAULT_WIDTH_MM};

impl LabelDesigner {
    /// Whether the toolbar button for `kind` is enabled.
    pub fn can_add(&self, kind: ElementKind) -> bool {
        self.resolver().can_create(kind)
    }

    /// Adds an element with freshly resolved content.
    ///
    /// Returns `None` when the product lacks the data the kind needs.
    pub fn add_element(&mut self, kind: ElementKind) -> Option<ElementId> {
        let Some(content) = self.resolver().resolve(kind) else {
            debug!("Cannot add {} element: no source data", kind.as_str());
            return None;
        };
        let (document, id) = self.document.add_element(kind, content);
        self.commit(document);
        Some(id)
    }

    /// Deletes an element, leaving edit mode if it was being edited.
    pub fn delete_element(&mut self, id: ElementId) {
        if self.editing == Some(id) {
            self.editing = None;
        }
        let document = self.document.remove_element(id);
        self.commit(document);
    }

    /// Enters text edit mode. Only textual elements can be edited in place.
    pub fn start_editing(&mut self, id: ElementId) -> bool {
        if !self.controller.is_idle() {
            return false;
        }
        match self.document.element(id) {
            Some(element) if element.kind.is_textual() => {
                self.editing = Some(id);
                true
            }
            _ => false,
        }
    }

    /// Stores edited text and leaves edit mode.
    pub fn commit_edit(&mut self, id: ElementId, text: &str) {
        let document = self.document.set_element_content(id, text);
        self.commit(document);
        if self.editing == Some(id) {
            self.editing = None;
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    pub fn apply_preset(&mut self, preset: SizePreset) {
        let document = self.document.apply_preset(preset);
        self.commit(document);
        info!("Label size set to {}", preset);
    }

    /// Width field edited. Unparseable input falls back to the default width.
    pub fn set_width_input(&mut self, input: &str) {
        let width = parse_dimension(input, DEFAULT_WIDTH_MM);
        let document = self.document.resize(width, self.document.height_mm);
        self.commit(document);
    }

    /// Height field edited. Unparseable input falls back to the default height.
    pub fn set_height_input(&mut self, input: &str) {
        let height = parse_dimension(input, DEFAULT_HEIGHT_MM);
        let document = self.document.resize(self.document.width_mm, height);
        self.commit(document);
    }

    pub fn set_include_logo(&mut self, include: bool) {
        let document = self.document.set_include_logo(include);
        self.commit(document);
    }

    /// Clears the label back to an empty canvas of the same size.
    pub fn reset(&mut self) {
        self.editing = None;
        self.controller.pointer_up();
        let document = self.document.reset();
        self.commit(document);
        info!("Label design reset");
    }
}

fn parse_dimension(input: &str, fallback: f64) -> f64 {
    parse_length_mm(input)
        .ok()
        .filter(|v| *v > 0.0)
        .unwrap_or(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designer_state::tests::designer;
    use crate::document::MIN_DIMENSION_MM;
    use crate::interaction::{GestureKind, GestureTarget};
    use tempfile::TempDir;

    #[test]
    fn test_add_resolves_content() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        let id = designer.add_element(ElementKind::Price).unwrap();
        assert_eq!(designer.document().element(id).unwrap().content, "$4.50");
        assert!(designer.is_modified);
    }

    #[test]
    fn test_add_refused_without_source() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        assert!(!designer.can_add(ElementKind::ProductImage));
        assert!(designer.add_element(ElementKind::ProductImage).is_none());
        assert!(designer.document().is_empty());
        assert!(designer.can_add(ElementKind::BarcodeImage));
    }

    #[test]
    fn test_edit_cycle() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        let text = designer.add_element(ElementKind::StaticText).unwrap();
        let barcode = designer.add_element(ElementKind::BarcodeImage).unwrap();

        assert!(!designer.start_editing(barcode));
        assert!(designer.start_editing(text));
        assert_eq!(designer.editing(), Some(text));
        designer.commit_edit(text, "Keep refrigerated");
        assert_eq!(designer.editing(), None);
        assert_eq!(
            designer.document().element(text).unwrap().content,
            "Keep refrigerated"
        );

        designer.start_editing(text);
        designer.cancel_edit();
        assert_eq!(designer.editing(), None);
    }

    #[test]
    fn test_delete_leaves_edit_mode() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        let id = designer.add_element(ElementKind::ProductName).unwrap();
        designer.start_editing(id);
        designer.delete_element(id);
        assert_eq!(designer.editing(), None);
        assert!(designer.document().is_empty());
    }

    #[test]
    fn test_no_edit_mode_mid_gesture() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        let id = designer.add_element(ElementKind::StaticText).unwrap();
        designer.pointer_down(GestureTarget::Element(id), GestureKind::Drag);
        assert!(!designer.start_editing(id));
    }

    #[test]
    fn test_dimension_inputs() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        designer.set_width_input("80");
        assert_eq!(designer.document().size_preset, SizePreset::Custom);
        assert_eq!(designer.document().width_mm, 80.0);

        designer.set_height_input("abc");
        assert_eq!(designer.document().height_mm, DEFAULT_HEIGHT_MM);

        designer.set_width_input("3");
        assert_eq!(designer.document().width_mm, MIN_DIMENSION_MM);

        designer.set_width_input("-5");
        assert_eq!(designer.document().width_mm, DEFAULT_WIDTH_MM);
    }

    #[test]
    fn test_reset() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        designer.apply_preset(SizePreset::Small);
        designer.add_element(ElementKind::StaticText);
        designer.reset();
        assert!(designer.document().is_empty());
        assert_eq!(designer.document().width_mm, 50.0);
    }
}

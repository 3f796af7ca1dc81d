//! Pointer event routing for the editor session.

use tracing::debug;

use super::LabelDesigner;
use crate::document::Position;
use crate::interaction::{GestureKind, GestureTarget};

impl LabelDesigner {
    /// Pointer pressed on a handle. Returns `true` if the press started a gesture.
    pub fn pointer_down(&mut self, target: GestureTarget, kind: GestureKind) -> bool {
        let exists = match target {
            GestureTarget::Element(id) => self.document.contains(id),
            GestureTarget::Logo => self.document.shows_logo(),
        };
        if !exists {
            debug!("Ignoring {} on missing {:?}", kind.as_str(), target);
            return false;
        }
        self.controller.pointer_down(target, kind)
    }

    /// Pointer moved over the canvas; a no-op when no gesture is active.
    pub fn pointer_move(&mut self, x: f64, y: f64) {
        if let Some(document) = self.controller.pointer_move(&self.document, Position::new(x, y)) {
            self.commit(document);
        }
    }

    /// Pointer released anywhere.
    pub fn pointer_up(&mut self) {
        self.controller.pointer_up();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::designer_state::tests::designer;
    use crate::document::ElementKind;
    use tempfile::TempDir;

    #[test]
    fn test_drag_then_release() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        let id = designer.add_element(ElementKind::ProductName).unwrap();

        assert!(designer.pointer_down(GestureTarget::Element(id), GestureKind::Drag));
        designer.pointer_move(300.0, 200.0);
        assert_eq!(designer.document().positions[&id], Position::new(250.0, 175.0));

        designer.pointer_up();
        designer.pointer_move(10.0, 10.0);
        assert_eq!(designer.document().positions[&id], Position::new(250.0, 175.0));
    }

    #[test]
    fn test_unknown_target_refused() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        assert!(!designer.pointer_down(GestureTarget::Element(42), GestureKind::Rotate));
        assert!(designer.controller().is_idle());
    }

    #[test]
    fn test_hidden_logo_refused() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        assert!(!designer.pointer_down(GestureTarget::Logo, GestureKind::Drag));
        designer.pointer_move(200.0, 200.0);
        assert!(designer.controller().is_idle());
        assert!(!designer.is_modified);

        let shown = designer.document().set_logo("data:image/png;base64,AAAA");
        designer.commit(shown);
        assert!(designer.pointer_down(GestureTarget::Logo, GestureKind::Drag));
        designer.pointer_move(100.0, 100.0);
        assert_eq!(designer.document().logo_position, Position::new(85.0, 85.0));
    }

    #[test]
    fn test_move_while_idle_does_not_modify() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        designer.pointer_move(10.0, 10.0);
        assert!(!designer.is_modified);
    }
}

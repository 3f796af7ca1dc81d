//! Pointer gestures: drag, resize and rotate.
//!
//! One gesture may be active at a time across all elements and the logo.
//! Each gesture reads and writes geometry through [`GeometrySlot`], which is
//! implemented once for document elements and once for the logo, so the
//! gesture math is shared.

use tracing::debug;

use crate::document::{
    ElementId, Geometry, GeometryPatch, LabelDocument, Position, Size,
};

/// Minimum element width and height reachable by resizing, in pixels.
pub const MIN_ELEMENT_SIZE_PX: f64 = 20.0;

/// Rotation snaps to multiples of this angle, in degrees.
pub const ROTATION_STEP_DEG: f64 = 90.0;

/// Gesture types, one per handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Drag,
    Resize,
    Rotate,
}

impl GestureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Drag => "drag",
            Self::Resize => "resize",
            Self::Rotate => "rotate",
        }
    }
}

/// What a gesture acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureTarget {
    Element(ElementId),
    Logo,
}

/// Read/write access to one geometry slot of a document.
pub trait GeometrySlot {
    /// Current geometry, or `None` if the slot no longer exists.
    fn geometry(&self, doc: &LabelDocument) -> Option<Geometry>;

    /// Returns `doc` with `patch` applied to this slot.
    fn apply(&self, doc: &LabelDocument, patch: GeometryPatch) -> LabelDocument;
}

/// Slot of an ordinary element, addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementSlot(pub ElementId);

impl GeometrySlot for ElementSlot {
    fn geometry(&self, doc: &LabelDocument) -> Option<Geometry> {
        doc.geometry(self.0)
    }

    fn apply(&self, doc: &LabelDocument, patch: GeometryPatch) -> LabelDocument {
        doc.set_geometry(self.0, patch)
    }
}

/// The singleton logo slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoSlot;

impl GeometrySlot for LogoSlot {
    fn geometry(&self, doc: &LabelDocument) -> Option<Geometry> {
        Some(doc.logo_geometry())
    }

    fn apply(&self, doc: &LabelDocument, patch: GeometryPatch) -> LabelDocument {
        doc.set_logo_geometry(patch)
    }
}

/// Top-left position for a box of `size` centred on `pointer`, kept inside `canvas`.
pub fn drag_position(pointer: Position, size: Size, canvas: Size) -> Position {
    Position::new(
        clamp_axis(pointer.x - size.width / 2.0, canvas.width - size.width),
        clamp_axis(pointer.y - size.height / 2.0, canvas.height - size.height),
    )
}

/// `max(0, min(value, upper))`; a box larger than the canvas pins to 0.
fn clamp_axis(value: f64, upper: f64) -> f64 {
    value.min(upper).max(0.0)
}

/// Size with the bottom-right corner at `pointer`, never below the minimum.
pub fn resize_size(pointer: Position, position: Position) -> Size {
    Size::new(
        (pointer.x - position.x).max(MIN_ELEMENT_SIZE_PX),
        (pointer.y - position.y).max(MIN_ELEMENT_SIZE_PX),
    )
}

/// Angle from `center` to `pointer`, snapped to the rotation step and
/// normalized into `[0, 360)`.
pub fn snap_rotation(center: Position, pointer: Position) -> f64 {
    let angle = (pointer.y - center.y)
        .atan2(pointer.x - center.x)
        .to_degrees();
    // Halves round up: -45 snaps to 0, not -90.
    let snapped = (angle / ROTATION_STEP_DEG + 0.5).floor() * ROTATION_STEP_DEG;
    let normalized = snapped.rem_euclid(360.0);
    if normalized == 0.0 {
        0.0
    } else {
        normalized
    }
}

/// Current gesture state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    Dragging(GestureTarget),
    Resizing(GestureTarget),
    Rotating(GestureTarget),
}

/// Translates pointer events into geometry updates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionController {
    dragging: Option<GestureTarget>,
    resizing: Option<GestureTarget>,
    rotating: Option<GestureTarget>,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GestureState {
        if let Some(target) = self.dragging {
            GestureState::Dragging(target)
        } else if let Some(target) = self.resizing {
            GestureState::Resizing(target)
        } else if let Some(target) = self.rotating {
            GestureState::Rotating(target)
        } else {
            GestureState::Idle
        }
    }

    pub fn is_idle(&self) -> bool {
        self.state() == GestureState::Idle
    }

    /// The target currently mid-gesture, if any.
    pub fn active_target(&self) -> Option<GestureTarget> {
        self.dragging.or(self.resizing).or(self.rotating)
    }

    /// Pointer pressed on a handle.
    ///
    /// Returns `true` when the event was consumed and must not reach
    /// handlers underneath (such as entering text edit mode). Presses on a
    /// different target while another one is mid-gesture are refused.
    pub fn pointer_down(&mut self, target: GestureTarget, kind: GestureKind) -> bool {
        if let Some(active) = self.active_target() {
            if active != target {
                debug!(
                    "Ignoring {} on {:?} while {:?} is active",
                    kind.as_str(),
                    target,
                    active
                );
                return false;
            }
        }
        let slot = match kind {
            GestureKind::Drag => &mut self.dragging,
            GestureKind::Resize => &mut self.resizing,
            GestureKind::Rotate => &mut self.rotating,
        };
        *slot = Some(target);
        debug!("Started {} on {:?}", kind.as_str(), target);
        true
    }

    /// Pointer moved to `pointer` (canvas pixels).
    ///
    /// Returns the updated document, or `None` when idle or the target is gone.
    pub fn pointer_move(&self, doc: &LabelDocument, pointer: Position) -> Option<LabelDocument> {
        match self.active_target()? {
            GestureTarget::Element(id) => self.step(&ElementSlot(id), doc, pointer),
            GestureTarget::Logo => self.step(&LogoSlot, doc, pointer),
        }
    }

    fn step<S: GeometrySlot>(
        &self,
        slot: &S,
        doc: &LabelDocument,
        pointer: Position,
    ) -> Option<LabelDocument> {
        let geometry = slot.geometry(doc)?;
        let patch = if self.dragging.is_some() {
            GeometryPatch::position(drag_position(pointer, geometry.size, doc.canvas_size_px()))
        } else if self.resizing.is_some() {
            GeometryPatch::size(resize_size(pointer, geometry.position))
        } else {
            GeometryPatch::rotation(snap_rotation(geometry.center(), pointer))
        };
        Some(slot.apply(doc, patch))
    }

    /// Pointer released anywhere: every gesture ends.
    pub fn pointer_up(&mut self) {
        if let Some(target) = self.active_target() {
            debug!("Gesture on {:?} ended", target);
        }
        self.dragging = None;
        self.resizing = None;
        self.rotating = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ElementKind;

    fn doc_with_element() -> (LabelDocument, ElementId) {
        LabelDocument::new().add_element(ElementKind::StaticText, "Hello")
    }

    #[test]
    fn test_drag_position_clamps() {
        let canvas = Size::new(756.0, 378.0);
        let size = Size::new(100.0, 50.0);
        assert_eq!(
            drag_position(Position::new(10.0, 10.0), size, canvas),
            Position::new(0.0, 0.0)
        );
        assert_eq!(
            drag_position(Position::new(200.0, 100.0), size, canvas),
            Position::new(150.0, 75.0)
        );
        assert_eq!(
            drag_position(Position::new(1000.0, 1000.0), size, canvas),
            Position::new(656.0, 328.0)
        );
    }

    #[test]
    fn test_drag_oversized_box_pins_to_origin() {
        let canvas = Size::new(50.0, 50.0);
        let size = Size::new(100.0, 80.0);
        assert_eq!(
            drag_position(Position::new(300.0, 300.0), size, canvas),
            Position::new(0.0, 0.0)
        );
    }

    #[test]
    fn test_resize_minimum() {
        let position = Position::new(50.0, 50.0);
        assert_eq!(
            resize_size(Position::new(55.0, 300.0), position),
            Size::new(MIN_ELEMENT_SIZE_PX, 250.0)
        );
        assert_eq!(
            resize_size(Position::new(5000.0, 60.0), position),
            Size::new(4950.0, MIN_ELEMENT_SIZE_PX)
        );
    }

    #[test]
    fn test_snap_rotation() {
        let center = Position::new(0.0, 0.0);
        assert_eq!(snap_rotation(center, Position::new(10.0, 1.0)), 0.0);
        assert_eq!(snap_rotation(center, Position::new(1.0, 10.0)), 90.0);
        assert_eq!(snap_rotation(center, Position::new(-10.0, 1.0)), 180.0);
        assert_eq!(snap_rotation(center, Position::new(-10.0, -1.0)), 180.0);
        assert_eq!(snap_rotation(center, Position::new(1.0, -10.0)), 270.0);
        assert_eq!(snap_rotation(center, Position::new(10.0, -9.0)), 0.0);
        assert_eq!(snap_rotation(center, Position::new(10.0, 11.0)), 90.0);
    }

    #[test]
    fn test_drag_gesture_updates_document() {
        let (doc, id) = doc_with_element();
        let mut controller = InteractionController::new();
        assert!(controller.pointer_move(&doc, Position::new(90.0, 90.0)).is_none());

        assert!(controller.pointer_down(GestureTarget::Element(id), GestureKind::Drag));
        assert_eq!(
            controller.state(),
            GestureState::Dragging(GestureTarget::Element(id))
        );
        let doc = controller
            .pointer_move(&doc, Position::new(200.0, 100.0))
            .unwrap();
        assert_eq!(doc.positions[&id], Position::new(150.0, 75.0));

        controller.pointer_up();
        assert!(controller.is_idle());
    }

    #[test]
    fn test_resize_and_rotate_gestures() {
        let (doc, id) = doc_with_element();
        let doc = doc.set_geometry(id, GeometryPatch::position(Position::new(10.0, 10.0)));
        let mut controller = InteractionController::new();

        controller.pointer_down(GestureTarget::Element(id), GestureKind::Resize);
        let doc = controller.pointer_move(&doc, Position::new(900.0, 40.0)).unwrap();
        assert_eq!(doc.sizes[&id], Size::new(890.0, 30.0));
        controller.pointer_up();

        controller.pointer_down(GestureTarget::Element(id), GestureKind::Rotate);
        let center = doc.geometry(id).unwrap().center();
        let doc = controller
            .pointer_move(&doc, Position::new(center.x, center.y + 50.0))
            .unwrap();
        assert_eq!(doc.rotations[&id], 90.0);
    }

    #[test]
    fn test_logo_shares_gesture_math() {
        let doc = LabelDocument::new().set_logo("data:image/png;base64,AA");
        let mut controller = InteractionController::new();
        controller.pointer_down(GestureTarget::Logo, GestureKind::Drag);
        let doc = controller.pointer_move(&doc, Position::new(115.0, 115.0)).unwrap();
        assert_eq!(doc.logo_position, Position::new(100.0, 100.0));
        assert!(doc.is_empty());
    }

    #[test]
    fn test_single_target_at_a_time() {
        let (doc, a) = doc_with_element();
        let (_, b) = doc.add_element(ElementKind::Price, "$1.00");
        let mut controller = InteractionController::new();
        assert!(controller.pointer_down(GestureTarget::Element(a), GestureKind::Drag));
        assert!(!controller.pointer_down(GestureTarget::Element(b), GestureKind::Resize));
        assert!(!controller.pointer_down(GestureTarget::Logo, GestureKind::Drag));
        assert_eq!(controller.active_target(), Some(GestureTarget::Element(a)));
    }

    #[test]
    fn test_pointer_up_clears_every_slot() {
        let (_, id) = doc_with_element();
        let mut controller = InteractionController::new();
        controller.pointer_down(GestureTarget::Element(id), GestureKind::Drag);
        controller.pointer_down(GestureTarget::Element(id), GestureKind::Rotate);
        controller.pointer_up();
        assert_eq!(controller, InteractionController::default());
    }

    #[test]
    fn test_removed_target_is_ignored() {
        let (doc, id) = doc_with_element();
        let mut controller = InteractionController::new();
        controller.pointer_down(GestureTarget::Element(id), GestureKind::Drag);
        let doc = doc.remove_element(id);
        assert!(controller.pointer_move(&doc, Position::new(5.0, 5.0)).is_none());
    }
}

//! # LabelKit Designer
//!
//! Layout editor for product labels: place text, price, barcode and image
//! elements on a fixed-size canvas, move them around with pointer gestures,
//! save layouts as reusable templates and render the result for printing.
//!
//! ## Architecture
//!
//! ```text
//! LabelDesigner (editing session)
//!   ├── LabelDocument (canvas size, elements, geometry)
//!   ├── ContentResolver (product data -> element content)
//!   ├── InteractionController (drag / resize / rotate)
//!   ├── TemplateStore (named layouts on disk)
//!   └── Renderer (interactive preview, print document)
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use labelkit_designer::{ElementKind, LabelDesigner, TemplateStore};
//!
//! let mut designer = LabelDesigner::new(product, barcode, TemplateStore::open_or_empty(path));
//! let id = designer.add_element(ElementKind::ProductName);
//! let design = designer.finish();
//! ```

pub mod barcode;
pub mod designer_state;
pub mod document;
pub mod interaction;
pub mod logo;
pub mod renderer;
pub mod resolver;
pub mod serialization;
pub mod templates;

pub use barcode::{BarcodeImage, BarcodeSource, SvgBarcodeGenerator};
pub use designer_state::LabelDesigner;
pub use document::{
    ElementId, ElementKind, Geometry, GeometryPatch, LabelDocument, LabelElement, Position, Size,
};
pub use interaction::{
    ElementSlot, GeometrySlot, GestureKind, GestureState, GestureTarget, InteractionController,
    LogoSlot,
};
pub use labelkit_core::SizePreset;
pub use logo::{read_logo, LogoError};
pub use renderer::{
    font_size_for, print_label, render_preview, render_print_document, HtmlFileSurface,
    MemorySurface, PreviewOptions, PrintOptions, PrintSurface,
};
pub use resolver::{resolve, ContentResolver};
pub use serialization::{LabelDesignFile, ProductLabel};
pub use templates::{LabelTemplate, TemplateLibrary, TemplateStore};

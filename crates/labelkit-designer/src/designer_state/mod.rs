//! Label editor session.
//! Owns the document being edited and routes every UI callback through it.
//!
//! This module is split into submodules:
//! - `elements`: Adding, deleting and editing elements, canvas size
//! - `gestures`: Pointer events
//! - `templates`: Template save/apply
//! - `file_io`: Logo upload, design files, printing

mod elements;
mod file_io;
mod gestures;
mod templates;

use labelkit_core::Product;
use tracing::debug;

use crate::barcode::BarcodeImage;
use crate::document::{ElementId, LabelDocument};
use crate::interaction::InteractionController;
use crate::renderer::{render_preview, PreviewOptions};
use crate::resolver::ContentResolver;
use crate::serialization::ProductLabel;
use crate::templates::TemplateStore;

/// Editing session for one product's label.
#[derive(Debug, Clone)]
pub struct LabelDesigner {
    document: LabelDocument,
    controller: InteractionController,
    editing: Option<ElementId>,
    product: Product,
    barcode: Option<BarcodeImage>,
    templates: TemplateStore,
    pub selected_template: Option<String>,
    pub is_modified: bool,
}

impl LabelDesigner {
    /// Starts a session on `product`, resuming its stored design if it has one.
    pub fn new(product: Product, barcode: Option<BarcodeImage>, templates: TemplateStore) -> Self {
        let document = ProductLabel::design_of(&product);
        Self::with_document(product, barcode, templates, document)
    }

    /// Starts a session on an explicit document.
    pub fn with_document(
        product: Product,
        barcode: Option<BarcodeImage>,
        templates: TemplateStore,
        document: LabelDocument,
    ) -> Self {
        debug!(
            "Label designer opened with {} elements",
            document.element_count()
        );
        Self {
            document,
            controller: InteractionController::new(),
            editing: None,
            product,
            barcode,
            templates,
            selected_template: None,
            is_modified: false,
        }
    }

    pub fn document(&self) -> &LabelDocument {
        &self.document
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn barcode(&self) -> Option<&BarcodeImage> {
        self.barcode.as_ref()
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Element currently in text edit mode.
    pub fn editing(&self) -> Option<ElementId> {
        self.editing
    }

    pub(crate) fn resolver(&self) -> ContentResolver<'_> {
        ContentResolver::new(&self.product, self.barcode.as_ref())
    }

    /// Replaces the document after an operation.
    pub(crate) fn commit(&mut self, document: LabelDocument) {
        if document != self.document {
            self.document = document;
            self.is_modified = true;
        }
    }

    /// Interactive canvas HTML for the current state.
    pub fn preview_html(&self) -> String {
        let options = PreviewOptions {
            editing: self.editing,
            active: self.controller.active_target(),
        };
        render_preview(&self.document, &options)
    }

    /// Ends the session and returns the finished design.
    pub fn finish(self) -> LabelDocument {
        debug!(
            "Label designer closed with {} elements",
            self.document.element_count()
        );
        self.document
    }

    /// Ends the session and returns the product with the design attached.
    pub fn into_product(self) -> labelkit_core::Result<Product> {
        let mut product = self.product;
        ProductLabel::attach(&mut product, &self.document)?;
        Ok(product)
    }
}

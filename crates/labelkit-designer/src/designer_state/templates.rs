//! Template operations for the editor session.
//!
//! Template storage is best effort: failures are logged and the session
//! keeps its current state.

use tracing::{info, warn};

use super::LabelDesigner;

impl LabelDesigner {
    /// Saves the current layout as `name`. Returns `false` if nothing was saved.
    pub fn save_template(&mut self, name: &str) -> bool {
        match self.templates.save(name, &self.document) {
            Ok(()) => {
                self.selected_template = Some(name.trim().to_string());
                true
            }
            Err(e) => {
                warn!("Could not save label template '{}': {}", name, e);
                false
            }
        }
    }

    /// Replaces the document with template `name`, rebound to this product.
    ///
    /// The current logo image is kept. Unknown names leave the session unchanged.
    pub fn load_template(&mut self, name: &str) -> bool {
        let Some(template) = self.templates.load(name) else {
            warn!("Label template '{}' not found", name);
            return false;
        };
        let mut document =
            template.instantiate(&self.product, self.barcode.as_ref(), self.document.logo.clone());
        document.last_issued_id = document
            .last_issued_id
            .max(self.document.last_issued_id)
            .max(self.document.max_element_id());

        self.editing = None;
        self.controller.pointer_up();
        self.commit(document);
        self.selected_template = Some(name.to_string());
        info!("Applied label template '{}'", name);
        true
    }

    pub fn template_names(&self) -> Vec<&str> {
        self.templates.list()
    }

    /// Deletes template `name` from the store.
    pub fn remove_template(&mut self, name: &str) -> bool {
        match self.templates.remove(name) {
            Ok(()) => {
                if self.selected_template.as_deref() == Some(name) {
                    self.selected_template = None;
                }
                true
            }
            Err(e) => {
                warn!("Could not remove label template '{}': {}", name, e);
                false
            }
        }
    }
}

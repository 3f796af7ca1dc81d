//! File I/O operations (logo upload, design files, printing) for the editor session.

use std::path::Path;

use labelkit_core::PrintError;
use tracing::{info, warn};

use super::LabelDesigner;
use crate::logo::{read_logo, LogoError};
use crate::renderer::{print_label, PrintOptions, PrintSurface};
use crate::serialization::LabelDesignFile;

impl LabelDesigner {
    /// Reads a PNG or JPEG logo and shows it on the label.
    ///
    /// On failure the document is left as it was.
    pub async fn load_logo(&mut self, path: impl AsRef<Path>) -> Result<(), LogoError> {
        let data_uri = read_logo(path.as_ref()).await.map_err(|e| {
            warn!("Logo upload failed: {}", e);
            e
        })?;
        let document = self.document.set_logo(data_uri);
        self.commit(document);
        info!("Logo loaded from {}", path.as_ref().display());
        Ok(())
    }

    /// Save design to file.
    pub fn save_to_file(&mut self, name: &str, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let mut file = LabelDesignFile::new(name, self.document.clone());
        file.save_to_file(&path)?;
        self.is_modified = false;
        info!("Label design saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Load design from file, replacing the current document.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let file = LabelDesignFile::load_from_file(&path)?;
        self.editing = None;
        self.controller.pointer_up();
        self.document = file.design;
        self.selected_template = None;
        self.is_modified = false;
        info!("Label design loaded from {}", path.as_ref().display());
        Ok(())
    }

    /// Renders the label and hands it to `surface`.
    pub fn print<S: PrintSurface + ?Sized>(
        &self,
        options: &PrintOptions,
        surface: &mut S,
    ) -> Result<(), PrintError> {
        print_label(&self.document, options, surface)
    }
}

#[cfg(test)]
mod tests {
    use crate::designer_state::tests::designer;
    use crate::document::ElementKind;
    use crate::logo::LogoError;
    use crate::renderer::{MemorySurface, PrintOptions};
    use labelkit_core::PrintError;
    use tempfile::TempDir;

    const PNG_SIGNATURE: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[tokio::test]
    async fn test_load_logo() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, PNG_SIGNATURE).unwrap();

        let mut designer = designer(&dir);
        designer.load_logo(&path).await.unwrap();
        assert!(designer.document().shows_logo());
        assert!(designer
            .document()
            .logo
            .as_deref()
            .unwrap()
            .starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn test_rejected_logo_leaves_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logo.txt");
        std::fs::write(&path, "hello").unwrap();

        let mut designer = designer(&dir);
        let err = designer.load_logo(&path).await.unwrap_err();
        assert!(matches!(err, LogoError::UnsupportedFormat));
        assert!(!designer.document().shows_logo());
        assert!(!designer.is_modified);
    }

    #[test]
    fn test_design_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("shelf.label.json");
        let mut designer = designer(&dir);
        designer.add_element(ElementKind::Price);
        designer.save_to_file("Shelf", &path).unwrap();
        assert!(!designer.is_modified);

        let mut other = crate::designer_state::tests::designer(&dir);
        other.load_from_file(&path).unwrap();
        assert_eq!(other.document().elements, designer.document().elements);
    }

    #[test]
    fn test_print_guard() {
        let dir = TempDir::new().unwrap();
        let mut designer = designer(&dir);
        let mut surface = MemorySurface::default();
        let err = designer
            .print(&PrintOptions::default(), &mut surface)
            .unwrap_err();
        assert!(matches!(err, PrintError::EmptyDesign));

        designer.add_element(ElementKind::ProductName);
        designer.print(&PrintOptions::default(), &mut surface).unwrap();
        assert!(surface.documents[0].contains("Green Tea"));
    }
}

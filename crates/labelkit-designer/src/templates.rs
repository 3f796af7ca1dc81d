//! # Label Template Management Module
//!
//! Named, reusable snapshots of a label layout. A template keeps the canvas
//! size, element kinds and all geometry, but not the logo image or any
//! product-bound content; applying it rebinds those against whichever
//! product is active at the time.
//!
//! Templates live as one JSON list in a single file on the local machine.
//! Saving under an existing name replaces that template in place.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use labelkit_core::{Product, Result, SizePreset, TemplateError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::barcode::BarcodeImage;
use crate::document::{
    ElementId, ElementKind, LabelDocument, LabelElement, Position, Size, DEFAULT_LOGO_SIZE,
};
use crate::resolver::ContentResolver;

pub use labelkit_core::TEMPLATE_FILE_NAME;

/// Element entry of a template; content only for static text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateElement {
    pub id: ElementId,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default)]
    pub content: Option<String>,
}

/// A saved label layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelTemplate {
    pub name: String,
    #[serde(rename = "size", default)]
    pub size_preset: SizePreset,
    #[serde(rename = "width")]
    pub width_mm: f64,
    #[serde(rename = "height")]
    pub height_mm: f64,
    #[serde(default)]
    pub elements: Vec<TemplateElement>,
    #[serde(default)]
    pub positions: BTreeMap<ElementId, Position>,
    #[serde(default)]
    pub sizes: BTreeMap<ElementId, Size>,
    #[serde(default)]
    pub rotations: BTreeMap<ElementId, f64>,
    #[serde(default = "default_logo_size")]
    pub logo_size: Size,
    #[serde(default)]
    pub logo_position: Position,
    #[serde(default)]
    pub logo_rotation: f64,
    #[serde(default)]
    pub include_logo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

fn default_logo_size() -> Size {
    DEFAULT_LOGO_SIZE
}

impl LabelTemplate {
    /// Captures the layout of `doc` under `name`.
    pub fn from_document(name: impl Into<String>, doc: &LabelDocument) -> Self {
        let elements = doc
            .elements
            .iter()
            .map(|e| TemplateElement {
                id: e.id,
                kind: e.kind,
                content: (!e.kind.is_product_bound()).then(|| e.content.clone()),
            })
            .collect();

        Self {
            name: name.into(),
            size_preset: doc.size_preset,
            width_mm: doc.width_mm,
            height_mm: doc.height_mm,
            elements,
            positions: doc.positions.clone(),
            sizes: doc.sizes.clone(),
            rotations: doc.rotations.clone(),
            logo_size: doc.logo_size,
            logo_position: doc.logo_position,
            logo_rotation: doc.logo_rotation,
            include_logo: doc.include_logo,
            saved_at: Some(Utc::now()),
        }
    }

    /// Builds a document from this template for `product`.
    ///
    /// Product-bound content is resolved again; `logo` is the image the
    /// caller currently has, since templates never store one.
    pub fn instantiate(
        &self,
        product: &Product,
        barcode: Option<&BarcodeImage>,
        logo: Option<String>,
    ) -> LabelDocument {
        let resolver = ContentResolver::new(product, barcode);
        let mut doc = LabelDocument::with_preset(self.size_preset);
        doc.width_mm = self.width_mm;
        doc.height_mm = self.height_mm;
        doc.elements = self
            .elements
            .iter()
            .map(|e| LabelElement::new(e.id, e.kind, resolver.rebind(e.kind, e.content.as_deref())))
            .collect();
        doc.positions = self.positions.clone();
        doc.sizes = self.sizes.clone();
        doc.rotations = self.rotations.clone();
        doc.logo = logo;
        doc.logo_size = self.logo_size;
        doc.logo_position = self.logo_position;
        doc.logo_rotation = self.logo_rotation;
        doc.include_logo = self.include_logo;
        doc.last_issued_id = doc.max_element_id();
        doc
    }
}

/// Ordered collection of templates, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateLibrary {
    templates: Vec<LabelTemplate>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a template, replacing any existing one with the same name.
    ///
    /// A replaced template keeps its place in the list.
    pub fn upsert(&mut self, template: LabelTemplate) {
        match self.templates.iter_mut().find(|t| t.name == template.name) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    pub fn get(&self, name: &str) -> Option<&LabelTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<LabelTemplate> {
        let index = self.templates.iter().position(|t| t.name == name)?;
        Some(self.templates.remove(index))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Template names in list order.
    pub fn names(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelTemplate> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Template persistence manager
pub struct TemplatePersistence;

impl TemplatePersistence {
    /// Save template library to JSON file
    pub fn save(library: &TemplateLibrary, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(library)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load template library from JSON file; a missing file is an empty library.
    pub fn load(path: &Path) -> Result<TemplateLibrary> {
        if !path.exists() {
            return Ok(TemplateLibrary::new());
        }
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(TemplateLibrary::new());
        }
        let library = serde_json::from_str(&content)?;
        Ok(library)
    }
}

/// Template library backed by a file.
#[derive(Debug, Clone)]
pub struct TemplateStore {
    library: TemplateLibrary,
    storage_path: PathBuf,
    /// The file on disk could not be read; it is moved aside before the next write.
    unreadable: bool,
}

impl TemplateStore {
    /// Opens the store at `storage_path`.
    pub fn new(storage_path: impl Into<PathBuf>) -> Result<Self> {
        let storage_path = storage_path.into();
        let library = TemplatePersistence::load(&storage_path).map_err(|e| storage_error(&e))?;
        debug!(
            "Loaded {} label templates from {}",
            library.len(),
            storage_path.display()
        );
        Ok(Self {
            library,
            storage_path,
            unreadable: false,
        })
    }

    /// Opens the store, starting empty if the file cannot be read.
    ///
    /// An unreadable file is kept as is until the first write, which renames
    /// it to a `.bak` sibling instead of overwriting it.
    pub fn open_or_empty(storage_path: impl Into<PathBuf>) -> Self {
        let storage_path = storage_path.into();
        match Self::new(storage_path.clone()) {
            Ok(store) => store,
            Err(e) => {
                warn!("Template store unavailable, starting empty: {}", e);
                Self {
                    library: TemplateLibrary::new(),
                    unreadable: storage_path.exists(),
                    storage_path,
                }
            }
        }
    }

    /// Whether the file on disk failed to load and has not been set aside yet.
    pub fn has_unreadable_file(&self) -> bool {
        self.unreadable
    }

    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    pub fn library(&self) -> &TemplateLibrary {
        &self.library
    }

    /// Saves the layout of `doc` as `name`.
    ///
    /// The in-memory library only changes once the file write succeeded.
    pub fn save(&mut self, name: &str, doc: &LabelDocument) -> Result<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyName.into());
        }
        let mut library = self.library.clone();
        let replaced = library.contains(name);
        library.upsert(LabelTemplate::from_document(name, doc));
        self.persist(&library)?;
        self.library = library;
        info!(
            "{} label template '{}'",
            if replaced { "Replaced" } else { "Saved" },
            name
        );
        Ok(())
    }

    pub fn load(&self, name: &str) -> Option<&LabelTemplate> {
        self.library.get(name.trim())
    }

    /// Looks up `name`, failing with [`TemplateError::NotFound`].
    pub fn get(&self, name: &str) -> Result<&LabelTemplate> {
        self.load(name).ok_or_else(|| {
            TemplateError::NotFound {
                name: name.trim().to_string(),
            }
            .into()
        })
    }

    pub fn list(&self) -> Vec<&str> {
        self.library.names()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.library.contains(name.trim())
    }

    /// Deletes a template and writes the store.
    pub fn remove(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        let mut library = self.library.clone();
        if library.remove(name).is_none() {
            return Err(TemplateError::NotFound {
                name: name.to_string(),
            }
            .into());
        }
        self.persist(&library)?;
        self.library = library;
        info!("Removed label template '{}'", name);
        Ok(())
    }

    /// Re-reads the store from disk.
    pub fn reload(&mut self) -> Result<()> {
        self.library =
            TemplatePersistence::load(&self.storage_path).map_err(|e| storage_error(&e))?;
        self.unreadable = false;
        Ok(())
    }

    /// Writes `library`, first moving an unreadable file out of the way.
    fn persist(&mut self, library: &TemplateLibrary) -> Result<()> {
        if self.unreadable {
            let backup = backup_path(&self.storage_path);
            if self.storage_path.exists() {
                std::fs::rename(&self.storage_path, &backup)
                    .map_err(|e| storage_error(&labelkit_core::Error::from(e)))?;
                warn!(
                    "Moved unreadable template file to {}",
                    backup.display()
                );
            }
            self.unreadable = false;
        }
        TemplatePersistence::save(library, &self.storage_path).map_err(|e| storage_error(&e))?;
        Ok(())
    }
}

/// `<file>.bak` next to `path`, or a timestamped name if that is taken.
fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".bak");
    let candidate = path.with_file_name(&name);
    if !candidate.exists() {
        return candidate;
    }
    name.push(format!(".{}", Utc::now().format("%Y%m%d%H%M%S%3f")));
    path.with_file_name(name)
}

fn storage_error(err: &labelkit_core::Error) -> TemplateError {
    TemplateError::Storage {
        reason: err.to_string(),
    }
}

//! Static print document and print surfaces.

use std::path::{Path, PathBuf};

use htmlize::{escape_attribute, escape_text};
use labelkit_core::PrintError;
use tracing::info;

use super::{alt_text, box_style, fmt_num, font_size_for, Content};
use crate::document::LabelDocument;

/// Title of the print window.
pub const DEFAULT_PRINT_TITLE: &str = "Print Label";

/// Print page settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    pub title: String,
    /// Open the platform print dialog as soon as the page loads.
    pub auto_print: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_PRINT_TITLE.to_string(),
            auto_print: true,
        }
    }
}

/// Destination for a finished print document.
pub trait PrintSurface {
    fn present(&mut self, document: &str) -> Result<(), PrintError>;
}

/// Writes the print document to an HTML file.
#[derive(Debug, Clone)]
pub struct HtmlFileSurface {
    path: PathBuf,
}

impl HtmlFileSurface {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintSurface for HtmlFileSurface {
    fn present(&mut self, document: &str) -> Result<(), PrintError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(surface_error)?;
            }
        }
        std::fs::write(&self.path, document).map_err(surface_error)?;
        info!("Print document written to {}", self.path.display());
        Ok(())
    }
}

/// Keeps presented documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    pub documents: Vec<String>,
}

impl PrintSurface for MemorySurface {
    fn present(&mut self, document: &str) -> Result<(), PrintError> {
        self.documents.push(document.to_string());
        Ok(())
    }
}

fn surface_error(err: std::io::Error) -> PrintError {
    PrintError::Surface {
        reason: err.to_string(),
    }
}

/// Renders `doc` as a standalone page with no editor controls.
///
/// A design without elements cannot be printed.
pub fn render_print_document(doc: &LabelDocument, options: &PrintOptions) -> Result<String, PrintError> {
    if doc.is_empty() {
        return Err(PrintError::EmptyDesign);
    }

    let canvas = doc.canvas_size_px();
    let width = fmt_num(canvas.width);
    let height = fmt_num(canvas.height);

    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", escape_text(&options.title)));
    html.push_str("<style>\n");
    html.push_str("body { margin: 0; padding: 20px; font-family: Arial, sans-serif; }\n");
    html.push_str(&format!(
        ".label-container {{ position: relative; width: {}px; height: {}px; border: 1px solid #ccc; overflow: hidden; background: white; }}\n",
        width, height
    ));
    html.push_str(".label-element { display: flex; align-items: center; justify-content: center; box-sizing: border-box; overflow: hidden; }\n");
    html.push_str(".label-element .text { text-align: center; width: 100%; white-space: pre-wrap; word-wrap: break-word; }\n");
    html.push_str(".label-element svg { width: 100%; height: 100%; }\n");
    html.push_str(&format!(
        "@media print {{ body {{ padding: 0; }} .label-container {{ border: none; }} @page {{ size: {}px {}px; margin: 0; }} }}\n",
        width, height
    ));
    html.push_str("</style>\n</head>\n<body>\n<div class=\"label-container\">\n");

    for element in &doc.elements {
        let geometry = doc.geometry_or_default(element.id);
        let body = Content::of(element).to_html(alt_text(element.kind), font_size_for(&geometry));
        html.push_str(&format!(
            "<div class=\"label-element\" data-type=\"{}\" style=\"{}\">{}</div>\n",
            escape_attribute(element.kind.as_str()),
            box_style(&geometry),
            body
        ));
    }

    if doc.shows_logo() {
        let src = doc.logo.as_deref().unwrap_or_default();
        html.push_str(&format!(
            "<div class=\"label-element label-logo\" style=\"{}\"><img src=\"{}\" alt=\"Logo\" style=\"width: 100%; height: 100%; object-fit: contain;\"/></div>\n",
            box_style(&doc.logo_geometry()),
            escape_attribute(src)
        ));
    }

    html.push_str("</div>\n");
    if options.auto_print {
        html.push_str(
            "<script>\nwindow.onload = function() { setTimeout(function() { window.print(); window.close(); }, 500); };\n</script>\n",
        );
    }
    html.push_str("</body>\n</html>\n");
    Ok(html)
}

/// Renders `doc` and hands it to `surface`.
pub fn print_label<S: PrintSurface + ?Sized>(
    doc: &LabelDocument,
    options: &PrintOptions,
    surface: &mut S,
) -> Result<(), PrintError> {
    let document = render_print_document(doc, options)?;
    surface.present(&document)?;
    info!("Printed label with {} elements", doc.element_count());
    Ok(())
}

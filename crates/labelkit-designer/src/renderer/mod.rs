//! HTML rendering of label documents.
//!
//! Two targets share the same geometry and content rules:
//! - `preview`: the interactive editor canvas with handles
//! - `print`: a static page for the print surface

mod preview;
mod print;

pub use preview::{render_preview, PreviewOptions};
pub use print::{
    print_label, render_print_document, HtmlFileSurface, MemorySurface, PrintOptions,
    PrintSurface, DEFAULT_PRINT_TITLE,
};

use htmlize::{escape_attribute, escape_text};

use crate::document::{ElementKind, Geometry, LabelElement};

/// Font size used when the box-derived size is unusable.
pub const DEFAULT_FONT_SIZE_PX: f64 = 14.0;

/// Font size that keeps text inside its box.
pub fn font_size_for(geometry: &Geometry) -> f64 {
    let size = (geometry.size.width * 0.1).min(geometry.size.height * 0.5);
    if size > 0.0 {
        size
    } else {
        DEFAULT_FONT_SIZE_PX
    }
}

/// Inline CSS placing a box on the canvas, rotated about its center.
pub(crate) fn box_style(geometry: &Geometry) -> String {
    format!(
        "position: absolute; left: {}px; top: {}px; width: {}px; height: {}px; transform: rotate({}deg); transform-origin: center center;",
        fmt_num(geometry.position.x),
        fmt_num(geometry.position.y),
        fmt_num(geometry.size.width),
        fmt_num(geometry.size.height),
        fmt_num(geometry.rotation)
    )
}

/// How an element's content is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Content<'a> {
    /// Inline SVG barcode.
    Markup(&'a str),
    /// Image by reference or data URI.
    Image(&'a str),
    Text(&'a str),
    /// Missing image data; nothing is drawn.
    Nothing,
}

impl<'a> Content<'a> {
    pub(crate) fn of(element: &'a LabelElement) -> Self {
        let content = element.content.as_str();
        match element.kind {
            ElementKind::BarcodeImage if content.contains("<svg") => Self::Markup(content),
            ElementKind::BarcodeImage | ElementKind::ProductImage => {
                if content.trim().is_empty() {
                    Self::Nothing
                } else {
                    Self::Image(content)
                }
            }
            _ => Self::Text(content),
        }
    }

    /// HTML for the element body; `font_size` applies to text only.
    pub(crate) fn to_html(self, alt: &str, font_size: f64) -> String {
        match self {
            Self::Markup(svg) => format!(
                "<div class=\"barcode\" style=\"width: 100%; height: 100%;\">{}</div>",
                svg
            ),
            Self::Image(src) => format!(
                "<img src=\"{}\" alt=\"{}\" style=\"width: 100%; height: 100%; object-fit: contain;\"/>",
                escape_attribute(src),
                escape_attribute(alt)
            ),
            Self::Text(text) => format!(
                "<div class=\"text\" style=\"font-size: {}px; white-space: pre-wrap;\">{}</div>",
                fmt_num(font_size),
                escape_text(text)
            ),
            Self::Nothing => String::new(),
        }
    }
}

pub(crate) fn alt_text(kind: ElementKind) -> &'static str {
    match kind {
        ElementKind::BarcodeImage => "Barcode",
        ElementKind::ProductImage => "Product",
        _ => "",
    }
}

/// Formats a pixel value without trailing noise.
pub(crate) fn fmt_num(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        "0".to_string()
    } else if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{Position, Size};

    fn geometry(width: f64, height: f64) -> Geometry {
        Geometry {
            position: Position::new(10.0, 20.0),
            size: Size::new(width, height),
            rotation: 90.0,
        }
    }

    #[test]
    fn test_font_size() {
        assert_eq!(font_size_for(&geometry(100.0, 50.0)), 10.0);
        assert_eq!(font_size_for(&geometry(400.0, 20.0)), 10.0);
        assert_eq!(font_size_for(&geometry(0.0, 50.0)), DEFAULT_FONT_SIZE_PX);
    }

    #[test]
    fn test_box_style() {
        let style = box_style(&geometry(100.0, 50.0));
        assert!(style.contains("left: 10px; top: 20px;"));
        assert!(style.contains("width: 100px; height: 50px;"));
        assert!(style.contains("rotate(90deg)"));
    }

    #[test]
    fn test_content_classification() {
        let svg = LabelElement::new(1, ElementKind::BarcodeImage, "<svg></svg>");
        let raster = LabelElement::new(2, ElementKind::BarcodeImage, "data:image/png;base64,AA");
        let empty = LabelElement::new(3, ElementKind::ProductImage, "");
        let text = LabelElement::new(4, ElementKind::Price, "$1.00");
        assert_eq!(Content::of(&svg), Content::Markup("<svg></svg>"));
        assert_eq!(Content::of(&raster), Content::Image("data:image/png;base64,AA"));
        assert_eq!(Content::of(&empty), Content::Nothing);
        assert_eq!(Content::of(&text), Content::Text("$1.00"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = Content::Text("<b>Tea & Co</b>").to_html("", 12.0);
        assert!(html.contains("&lt;b&gt;Tea &amp; Co&lt;/b&gt;"));
        assert!(html.contains("font-size: 12px"));
    }

    #[test]
    fn test_text_keeps_line_breaks() {
        let html = Content::Text("Keep cool\nBelow 5C").to_html("", 12.0);
        assert!(html.contains("white-space: pre-wrap"));
        assert!(html.contains("Keep cool\nBelow 5C"));
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(756.0000000001), "756");
        assert_eq!(fmt_num(12.346), "12.35");
        assert_eq!(fmt_num(-0.0), "0");
    }
}

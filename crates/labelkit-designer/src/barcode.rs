//! Barcode generation for label elements.
//!
//! The designer only needs a rendered barcode to place on the label; how it
//! is produced stays behind [`BarcodeSource`]. [`SvgBarcodeGenerator`] is the
//! default source, encoding with the barcoders crate and emitting inline SVG.

use std::fmt::Write as _;

use barcoders::sym::code128::Code128;
use barcoders::sym::ean13::EAN13;
use labelkit_core::{BarcodeError, BarcodeSymbology, Result};
use tracing::debug;

/// A rendered barcode, ready to be placed on a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BarcodeImage {
    /// Inline vector markup.
    Svg(String),
    /// Raster image as a `data:` URI.
    DataUri(String),
}

impl BarcodeImage {
    /// Classifies stored element content.
    pub fn from_content(content: impl Into<String>) -> Self {
        let content = content.into();
        if content.contains("<svg") {
            Self::Svg(content)
        } else {
            Self::DataUri(content)
        }
    }

    /// The string stored as element content.
    pub fn as_content(&self) -> &str {
        match self {
            Self::Svg(markup) => markup,
            Self::DataUri(uri) => uri,
        }
    }

    pub fn is_svg(&self) -> bool {
        matches!(self, Self::Svg(_))
    }
}

/// Produces barcode images from a value and symbology.
pub trait BarcodeSource {
    fn render(&self, value: &str, symbology: BarcodeSymbology) -> Result<BarcodeImage>;
}

/// SVG barcode renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct SvgBarcodeGenerator {
    /// Width of one bar module in pixels.
    pub module_width: f64,
    pub bar_height: f64,
    /// Quiet zone around the symbol.
    pub margin: f64,
    pub font_size: f64,
    /// Print the human readable value under the bars.
    pub display_value: bool,
}

impl Default for SvgBarcodeGenerator {
    fn default() -> Self {
        Self {
            module_width: 2.0,
            bar_height: 50.0,
            margin: 10.0,
            font_size: 14.0,
            display_value: true,
        }
    }
}

impl SvgBarcodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Encodes `value` into bar modules, 1 = bar, 0 = space.
    pub fn encode(&self, value: &str, symbology: BarcodeSymbology) -> Result<Vec<u8>> {
        symbology.validate(value)?;
        let modules = match symbology {
            BarcodeSymbology::Code128 => {
                // Character set B covers all printable ASCII.
                let prefixed = format!("\u{0181}{}", value);
                Code128::new(&prefixed).map_err(encoding_error)?.encode()
            }
            // The encoder computes the check digit itself.
            BarcodeSymbology::Ean13 => EAN13::new(&value[..12]).map_err(encoding_error)?.encode(),
            // UPC-A is EAN-13 with a leading zero.
            BarcodeSymbology::Upc => EAN13::new(&format!("0{}", &value[..11]))
                .map_err(encoding_error)?
                .encode(),
        };
        Ok(modules)
    }

    fn to_svg(&self, value: &str, modules: &[u8]) -> String {
        let bars_width = modules.len() as f64 * self.module_width;
        let width = bars_width + 2.0 * self.margin;
        let text_height = if self.display_value {
            self.font_size + 2.0
        } else {
            0.0
        };
        let height = self.bar_height + text_height + 2.0 * self.margin;

        let mut svg = String::new();
        let _ = write!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = fmt_px(width),
            h = fmt_px(height)
        );
        let _ = write!(
            svg,
            "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"#ffffff\"/>",
            fmt_px(width),
            fmt_px(height)
        );

        let mut index = 0;
        while index < modules.len() {
            if modules[index] != 1 {
                index += 1;
                continue;
            }
            let start = index;
            while index < modules.len() && modules[index] == 1 {
                index += 1;
            }
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"#000000\"/>",
                fmt_px(self.margin + start as f64 * self.module_width),
                fmt_px(self.margin),
                fmt_px((index - start) as f64 * self.module_width),
                fmt_px(self.bar_height)
            );
        }

        if self.display_value {
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{}\" text-anchor=\"middle\" font-family=\"monospace\" font-size=\"{}\">{}</text>",
                fmt_px(width / 2.0),
                fmt_px(self.margin + self.bar_height + 2.0 + self.font_size),
                fmt_px(self.font_size),
                htmlize::escape_text(value)
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

impl BarcodeSource for SvgBarcodeGenerator {
    fn render(&self, value: &str, symbology: BarcodeSymbology) -> Result<BarcodeImage> {
        let modules = self.encode(value, symbology)?;
        debug!(
            "Rendered {} barcode for '{}' ({} modules)",
            symbology,
            value,
            modules.len()
        );
        Ok(BarcodeImage::Svg(self.to_svg(value, &modules)))
    }
}

fn encoding_error(err: barcoders::error::Error) -> BarcodeError {
    BarcodeError::Encoding {
        reason: err.to_string(),
    }
}

fn fmt_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{}", rounded as i64)
    } else {
        format!("{}", rounded)
    }
}

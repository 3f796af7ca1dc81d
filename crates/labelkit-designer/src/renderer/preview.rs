//! Interactive editor canvas.
//!
//! Every element gets drag, resize and rotate handles plus a delete button;
//! the logo gets handles only. Handles carry `data-action` and
//! `data-target` attributes that the host maps back to pointer events.

use htmlize::{escape_attribute, escape_text};

use super::{alt_text, box_style, fmt_num, font_size_for, Content};
use crate::document::{ElementId, Geometry, LabelDocument, LabelElement};
use crate::interaction::GestureTarget;

/// Session state that changes how the preview looks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreviewOptions {
    /// Element currently in text edit mode.
    pub editing: Option<ElementId>,
    /// Target currently mid-gesture.
    pub active: Option<GestureTarget>,
}

/// Renders the editable canvas for `doc`.
pub fn render_preview(doc: &LabelDocument, options: &PreviewOptions) -> String {
    let canvas = doc.canvas_size_px();
    let mut html = format!(
        "<div class=\"label-preview\" style=\"position: relative; width: {}px; height: {}px; border: 2px dashed #ccc; background: #fff; overflow: hidden;\">",
        fmt_num(canvas.width),
        fmt_num(canvas.height)
    );

    if doc.is_empty() {
        html.push_str(
            "<div class=\"empty-hint\">Click the buttons above to add elements to your label</div>",
        );
    }

    for element in &doc.elements {
        let geometry = doc.geometry_or_default(element.id);
        html.push_str(&render_element(element, &geometry, options));
    }

    if doc.shows_logo() {
        html.push_str(&render_logo(doc, options));
    }

    html.push_str("</div>");
    html
}

fn render_element(element: &LabelElement, geometry: &Geometry, options: &PreviewOptions) -> String {
    let target = GestureTarget::Element(element.id);
    let active = options.active == Some(target);
    let editing = options.editing == Some(element.id) && element.kind.is_textual();

    let body = if editing {
        format!(
            "<textarea class=\"inline-editor\" data-element-id=\"{}\" autofocus>{}</textarea>",
            element.id,
            escape_text(&element.content)
        )
    } else {
        Content::of(element).to_html(alt_text(element.kind), font_size_for(geometry))
    };

    format!(
        "<div class=\"label-element{}\" data-element-id=\"{}\" data-type=\"{}\" style=\"{} cursor: {};\">{}{}<button class=\"delete-handle\" data-action=\"delete\" data-target=\"{}\">×</button></div>",
        if active { " active" } else { "" },
        element.id,
        escape_attribute(element.kind.as_str()),
        box_style(geometry),
        if active { "grabbing" } else { "grab" },
        body,
        handles(&element.id.to_string()),
        element.id
    )
}

fn render_logo(doc: &LabelDocument, options: &PreviewOptions) -> String {
    let geometry = doc.logo_geometry();
    let active = options.active == Some(GestureTarget::Logo);
    let src = doc.logo.as_deref().unwrap_or_default();
    format!(
        "<div class=\"label-logo{}\" data-target=\"logo\" style=\"{} cursor: {};\"><img src=\"{}\" alt=\"Logo\" style=\"width: 100%; height: 100%; object-fit: contain;\"/>{}</div>",
        if active { " active" } else { "" },
        box_style(&geometry),
        if active { "grabbing" } else { "grab" },
        escape_attribute(src),
        handles("logo")
    )
}

fn handles(target: &str) -> String {
    format!(
        "<span class=\"drag-handle\" data-action=\"drag\" data-target=\"{t}\"></span><span class=\"resize-handle\" data-action=\"resize\" data-target=\"{t}\"></span><span class=\"rotate-handle\" data-action=\"rotate\" data-target=\"{t}\"></span>",
        t = target
    )
}

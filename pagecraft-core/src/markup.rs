//! Model-to-markup rendering.
//!
//! [`render_content`] is the single source of truth for what a block looks
//! like; the editing view and the exporter both wrap its output.

use std::fmt::Write;

use pulldown_cmark_escape::escape_html;

use crate::element::{
    ButtonContent, Choice, DividerContent, Element, ElementContent, ElementType, HeadingContent,
    ImageContent, ParagraphContent, SpacerContent,
};
use crate::Canvas;

/// Render for a type tag the factory does not recognize.
pub const UNKNOWN_ELEMENT_MARKUP: &str = "<div>Unknown Element</div>";

/// Message shown on an empty canvas.
pub const EMPTY_CANVAS_MESSAGE: &str = "Drag elements from the sidebar to start building your website";

/// Append `text` to `out` with HTML special characters escaped.
pub(crate) fn push_escaped(out: &mut String, text: &str) {
    let _ = escape_html(&mut *out, text);
}

/// Escape `text` into a new string.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    push_escaped(&mut out, text);
    out
}

/// Render the typed content of a block.
#[must_use]
pub fn render_content(content: &ElementContent) -> String {
    let mut out = String::new();
    match content {
        ElementContent::Heading(heading) => render_heading(&mut out, heading),
        ElementContent::Paragraph(paragraph) => render_paragraph(&mut out, paragraph),
        ElementContent::Image(image) => render_image(&mut out, image),
        ElementContent::Button(button) => render_button(&mut out, button),
        ElementContent::Divider(divider) => render_divider(&mut out, divider),
        ElementContent::Spacer(spacer) => render_spacer(&mut out, spacer),
    }
    out
}

/// Default render for a drag-payload tag, or the unknown-element placeholder.
#[must_use]
pub fn default_markup(tag: &str) -> String {
    tag.parse::<ElementType>().map_or_else(
        |_| UNKNOWN_ELEMENT_MARKUP.to_string(),
        |ty| render_content(&ElementContent::default_for(ty)),
    )
}

fn push_style_attr(out: &mut String, style: &str) {
    if !style.is_empty() {
        out.push_str(" style=\"");
        push_escaped(out, style);
        out.push('"');
    }
}

fn render_heading(out: &mut String, heading: &HeadingContent) {
    let tag = heading.level.as_str();
    let mut style = String::new();
    if let Some(color) = &heading.color {
        let _ = write!(style, "color:{color};");
    }
    if let Some(align) = heading.align {
        let _ = write!(style, "text-align:{};", align.as_str());
    }
    let _ = write!(out, "<{tag}");
    push_style_attr(out, &style);
    out.push('>');
    push_escaped(out, &heading.text);
    let _ = write!(out, "</{tag}>");
}

fn render_paragraph(out: &mut String, paragraph: &ParagraphContent) {
    let mut style = String::new();
    if let Some(color) = &paragraph.color {
        let _ = write!(style, "color:{color};");
    }
    if let Some(size) = paragraph.font_size_px {
        let _ = write!(style, "font-size:{size}px;");
    }
    if let Some(align) = paragraph.align {
        let _ = write!(style, "text-align:{};", align.as_str());
    }
    out.push_str("<p");
    push_style_attr(out, &style);
    out.push('>');
    push_escaped(out, &paragraph.text);
    out.push_str("</p>");
}

fn render_image(out: &mut String, image: &ImageContent) {
    let width = image.width_pct.unwrap_or(100);
    if let Some(align) = image.align {
        let _ = write!(out, "<div style=\"text-align:{};\">", align.as_str());
    }
    out.push_str("<img src=\"");
    push_escaped(out, &image.src);
    out.push_str("\" alt=\"");
    push_escaped(out, &image.alt);
    if image.align.is_some() {
        let _ = write!(out, "\" style=\"max-width:{width}%;display:block;\">");
        out.push_str("</div>");
    } else {
        let _ = write!(out, "\" style=\"max-width:{width}%;\">");
    }
}

fn render_button(out: &mut String, button: &ButtonContent) {
    if let Some(align) = button.align {
        let _ = write!(out, "<div style=\"text-align:{};\">", align.as_str());
    }
    let style = format!(
        "display:inline-block;padding:{};background:{};color:{};border:none;border-radius:4px;cursor:pointer;",
        button.size.padding(),
        button.background,
        button.text_color,
    );
    out.push_str("<button");
    push_style_attr(out, &style);
    out.push('>');
    push_escaped(out, &button.text);
    out.push_str("</button>");
    if button.align.is_some() {
        out.push_str("</div>");
    }
}

fn render_divider(out: &mut String, divider: &DividerContent) {
    let style = format!(
        "border:none;border-top:{}px {} {};margin:20px 0;",
        divider.thickness_px,
        divider.style.as_str(),
        divider.color,
    );
    out.push_str("<hr");
    push_style_attr(out, &style);
    out.push('>');
}

fn render_spacer(out: &mut String, spacer: &SpacerContent) {
    let _ = write!(out, "<div style=\"height:{}px;\"></div>", spacer.height_px);
}

/// Inline style for an element's outer spacing, empty when unset.
#[must_use]
pub fn common_style_css(element: &Element) -> String {
    let style = element.common_style;
    if style.is_zero() {
        String::new()
    } else {
        format!("margin:{}px 0;padding:{}px;", style.margin_px, style.padding_px)
    }
}

/// Render one element as it appears on the editing surface.
///
/// The wrapper carries the editing-only markers (`canvas-element`, `selected`,
/// `data-type`, `data-id`) and the move/delete affordances.
#[must_use]
pub fn render_element(element: &Element, selected: bool) -> String {
    let mut out = String::new();
    out.push_str("<div class=\"canvas-element");
    if selected {
        out.push_str(" selected");
    }
    let _ = write!(out, "\" data-type=\"{}\" data-id=\"", element.element_type());
    push_escaped(&mut out, element.id().as_str());
    out.push('"');
    push_style_attr(&mut out, &common_style_css(element));
    out.push('>');
    out.push_str(concat!(
        "<div class=\"element-actions\">",
        "<span class=\"element-action move\" title=\"Move\" draggable=\"true\">\u{22ee}</span>",
        "<span class=\"element-action delete\" title=\"Delete\">\u{d7}</span>",
        "</div>",
    ));
    out.push_str("<div class=\"element-content\">");
    out.push_str(&render_content(&element.content));
    out.push_str("</div></div>");
    out
}

/// Render the empty-state placeholder.
#[must_use]
pub fn render_placeholder() -> String {
    format!(
        "<div class=\"empty-state\"><div class=\"message\"><span class=\"material-symbols-outlined\">drag_pan</span><p>{EMPTY_CANVAS_MESSAGE}</p></div></div>"
    )
}

/// Render the whole editing surface: every element in order, or the
/// placeholder when the canvas is empty.
#[must_use]
pub fn render_canvas(canvas: &Canvas) -> String {
    if canvas.shows_placeholder() {
        return render_placeholder();
    }
    canvas
        .elements()
        .map(|element| render_element(element, canvas.is_selected(element.id())))
        .collect()
}

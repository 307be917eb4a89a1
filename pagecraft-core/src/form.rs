//! Property form generation.
//!
//! The field set is fixed per block type; initial values come from the typed
//! element model. Color fields are normalized with [`to_hex`] because a color
//! picker only accepts `#rrggbb`.

use std::fmt::Write;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::color::to_hex;
use crate::element::{
    Align, BorderStyle, ButtonSize, Choice, Element, ElementContent, ElementType, HeadingLevel,
};
use crate::markup::push_escaped;
use crate::FormValues;

/// Submitted field names.
pub mod field {
    /// Heading/paragraph/button text.
    pub const TEXT: &str = "text";
    /// Heading level or button size.
    pub const SIZE: &str = "size";
    /// Text or line color.
    pub const COLOR: &str = "color";
    /// Horizontal alignment.
    pub const ALIGN: &str = "align";
    /// Paragraph font size.
    pub const FONT_SIZE_PX: &str = "fontSizePx";
    /// Image URL.
    pub const URL: &str = "url";
    /// Image alt text.
    pub const ALT: &str = "alt";
    /// Image max width.
    pub const WIDTH_PCT: &str = "widthPct";
    /// Button background.
    pub const BG_COLOR: &str = "bgColor";
    /// Button label color.
    pub const TEXT_COLOR: &str = "textColor";
    /// Divider thickness.
    pub const THICKNESS_PX: &str = "thicknessPx";
    /// Divider line style.
    pub const STYLE: &str = "style";
    /// Spacer height.
    pub const HEIGHT_PX: &str = "heightPx";
    /// Outer vertical margin, every type.
    pub const MARGIN_PX: &str = "marginPx";
    /// Outer padding, every type.
    pub const PADDING_PX: &str = "paddingPx";
}

/// Accepted numeric ranges.
pub mod range {
    use std::ops::RangeInclusive;

    /// Paragraph font size in pixels.
    pub const FONT_SIZE_PX: RangeInclusive<u16> = 10..=36;
    /// Image width in percent.
    pub const WIDTH_PCT: RangeInclusive<u16> = 10..=100;
    /// Divider thickness in pixels.
    pub const THICKNESS_PX: RangeInclusive<u16> = 1..=10;
    /// Spacer height in pixels.
    pub const HEIGHT_PX: RangeInclusive<u16> = 10..=200;
    /// Margin and padding in pixels.
    pub const SPACING_PX: RangeInclusive<u16> = 0..=100;
}

/// Color shown for headings and paragraphs that have no explicit color yet.
pub const DEFAULT_TEXT_COLOR: &str = "#2d3748";

/// Default paragraph font size shown in the form.
pub const DEFAULT_FONT_SIZE_PX: u16 = 16;

/// One `<option>` of a select widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    /// Submitted value.
    pub value: String,
    /// Visible label.
    pub label: String,
}

/// Input widget for a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "lowercase")]
pub enum Widget {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    TextArea {
        /// Visible rows.
        rows: u8,
    },
    /// Color picker (`#rrggbb`).
    Color,
    /// Integer input.
    Number {
        /// Minimum accepted value.
        min: u16,
        /// Maximum accepted value.
        max: u16,
    },
    /// Single choice from a fixed list.
    Select {
        /// Available options.
        options: Vec<SelectOption>,
    },
}

/// A single editable property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    /// Submitted field name.
    pub name: String,
    /// Visible label.
    pub label: String,
    /// Input widget.
    #[serde(flatten)]
    pub widget: Widget,
    /// Initial value, as the widget would report it.
    pub value: String,
}

impl FormField {
    fn text(name: &str, label: &str, value: &str) -> Self {
        Self::new(name, label, Widget::Text, value.to_string())
    }

    fn text_area(name: &str, label: &str, value: &str) -> Self {
        Self::new(name, label, Widget::TextArea { rows: 4 }, value.to_string())
    }

    fn color(name: &str, label: &str, value: &str) -> Self {
        Self::new(name, label, Widget::Color, to_hex(value))
    }

    fn number(name: &str, label: &str, range: RangeInclusive<u16>, value: u16) -> Self {
        let widget = Widget::Number {
            min: *range.start(),
            max: *range.end(),
        };
        Self::new(name, label, widget, value.to_string())
    }

    fn select<C: Choice>(name: &str, label: &str, options: &[C], value: C) -> Self {
        let options = options
            .iter()
            .map(|c| SelectOption {
                value: c.as_str().to_string(),
                label: c.label().to_string(),
            })
            .collect();
        Self::new(name, label, Widget::Select { options }, value.as_str().to_string())
    }

    fn new(name: &str, label: &str, widget: Widget, value: String) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            widget,
            value,
        }
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(
            out,
            "<div class=\"form-group\"><label for=\"{0}\">{1}</label>",
            self.name, self.label
        );
        match &self.widget {
            Widget::Text => self.write_input(out, "text", ""),
            Widget::Color => self.write_input(out, "color", ""),
            Widget::Number { min, max } => {
                self.write_input(out, "number", &format!(" min=\"{min}\" max=\"{max}\""));
            }
            Widget::TextArea { rows } => {
                let _ = write!(
                    out,
                    "<textarea id=\"{0}\" name=\"{0}\" rows=\"{rows}\">",
                    self.name
                );
                push_escaped(out, &self.value);
                out.push_str("</textarea>");
            }
            Widget::Select { options } => {
                let _ = write!(out, "<select id=\"{0}\" name=\"{0}\">", self.name);
                for option in options {
                    let selected = if option.value == self.value { " selected" } else { "" };
                    let _ = write!(
                        out,
                        "<option value=\"{}\"{selected}>{}</option>",
                        option.value, option.label
                    );
                }
                out.push_str("</select>");
            }
        }
        out.push_str("</div>");
    }

    fn write_input(&self, out: &mut String, kind: &str, extra: &str) {
        let _ = write!(
            out,
            "<input type=\"{kind}\" id=\"{0}\" name=\"{0}\" value=\"",
            self.name
        );
        push_escaped(out, &self.value);
        let _ = write!(out, "\"{extra}>");
    }
}

/// The generated properties form for one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSpec {
    /// Panel heading, e.g. `"Heading Properties"`.
    pub title: String,
    /// Type of the element being edited.
    pub element_type: ElementType,
    /// Fields in display order, universal spacing fields last.
    pub fields: Vec<FormField>,
}

impl FormSpec {
    /// Build the form for `element` with values taken from its model.
    #[must_use]
    pub fn for_element(element: &Element) -> Self {
        let ty = element.element_type();
        let mut fields = content_fields(&element.content);
        let spacing = element.common_style;
        fields.push(FormField::number(
            field::MARGIN_PX,
            "Margin (px)",
            range::SPACING_PX,
            spacing.margin_px,
        ));
        fields.push(FormField::number(
            field::PADDING_PX,
            "Padding (px)",
            range::SPACING_PX,
            spacing.padding_px,
        ));
        Self {
            title: format!("{} Properties", ty.label()),
            element_type: ty,
            fields,
        }
    }

    /// Look up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Field names in display order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// The values the form would submit if nothing were edited.
    #[must_use]
    pub fn initial_values(&self) -> FormValues {
        self.fields
            .iter()
            .map(|f| (f.name.clone(), f.value.clone()))
            .collect()
    }

    /// Render the properties panel markup, ending with the submit button.
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = format!("<h4>{}</h4>", self.title);
        for field in &self.fields {
            field.write_html(&mut out);
        }
        out.push_str("<button id=\"applyProperties\" class=\"primary\">Apply Changes</button>");
        out
    }
}

fn content_fields(content: &ElementContent) -> Vec<FormField> {
    match content {
        ElementContent::Heading(h) => vec![
            FormField::text(field::TEXT, "Text", &h.text),
            FormField::select(field::SIZE, "Size", HeadingLevel::ALL, h.level),
            FormField::color(
                field::COLOR,
                "Color",
                h.color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR),
            ),
            FormField::select(field::ALIGN, "Alignment", Align::BLOCK, h.align.unwrap_or_default()),
        ],
        ElementContent::Paragraph(p) => vec![
            FormField::text_area(field::TEXT, "Text", &p.text),
            FormField::color(
                field::COLOR,
                "Color",
                p.color.as_deref().unwrap_or(DEFAULT_TEXT_COLOR),
            ),
            FormField::number(
                field::FONT_SIZE_PX,
                "Font Size (px)",
                range::FONT_SIZE_PX,
                p.font_size_px.unwrap_or(DEFAULT_FONT_SIZE_PX),
            ),
            FormField::select(field::ALIGN, "Alignment", Align::ALL, p.align.unwrap_or_default()),
        ],
        ElementContent::Image(i) => vec![
            FormField::text(field::URL, "Image URL", &i.src),
            FormField::text(field::ALT, "Alt Text", &i.alt),
            FormField::number(
                field::WIDTH_PCT,
                "Width (%)",
                range::WIDTH_PCT,
                i.width_pct.unwrap_or(100),
            ),
            FormField::select(field::ALIGN, "Alignment", Align::BLOCK, i.align.unwrap_or_default()),
        ],
        ElementContent::Button(b) => vec![
            FormField::text(field::TEXT, "Text", &b.text),
            FormField::color(field::BG_COLOR, "Background Color", &b.background),
            FormField::color(field::TEXT_COLOR, "Text Color", &b.text_color),
            FormField::select(field::SIZE, "Size", ButtonSize::ALL, b.size),
            FormField::select(field::ALIGN, "Alignment", Align::BLOCK, b.align.unwrap_or_default()),
        ],
        ElementContent::Divider(d) => vec![
            FormField::color(field::COLOR, "Color", &d.color),
            FormField::number(
                field::THICKNESS_PX,
                "Thickness (px)",
                range::THICKNESS_PX,
                d.thickness_px,
            ),
            FormField::select(field::STYLE, "Style", BorderStyle::ALL, d.style),
        ],
        ElementContent::Spacer(s) => vec![FormField::number(
            field::HEIGHT_PX,
            "Height (px)",
            range::HEIGHT_PX,
            s.height_px,
        )],
    }
}

/// What the properties panel currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "panel", rename_all = "lowercase")]
pub enum PropertiesPanel {
    /// Nothing selected.
    Empty,
    /// Form for the selected element.
    Form(FormSpec),
}

impl PropertiesPanel {
    /// Render the panel markup.
    #[must_use]
    pub fn to_html(&self) -> String {
        match self {
            Self::Empty => {
                "<div class=\"empty-state\"><p>Select an element to edit its properties</p></div>"
                    .to_string()
            }
            Self::Form(form) => form.to_html(),
        }
    }
}

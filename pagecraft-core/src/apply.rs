//! Property application: submitted form values back onto the element model.
//!
//! Every field is handled on its own. A missing or unreadable value leaves
//! that property untouched while the rest of the submission still commits.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::color::{to_hex, Rgb};
use crate::element::{
    Align, BorderStyle, ButtonSize, Choice, Element, ElementContent, HeadingLevel,
};
use crate::form::{field, range, DEFAULT_FONT_SIZE_PX, DEFAULT_TEXT_COLOR};

/// Raw submitted values keyed by field name, as a browser form reports them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    /// Create an empty submission.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Raw value of a field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Number of submitted fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing was submitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn text(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn number(&self, name: &str, range: RangeInclusive<u16>) -> Option<u16> {
        let value: f64 = self.get(name)?.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        let clamped = value
            .round()
            .clamp(f64::from(*range.start()), f64::from(*range.end()));
        Some(clamped as u16)
    }

    fn choice<C: Choice>(&self, name: &str, allowed: &[C]) -> Option<C> {
        C::parse(self.get(name)?.trim()).filter(|c| allowed.contains(c))
    }

    fn color(&self, name: &str) -> Option<String> {
        let raw = self.get(name)?;
        Rgb::parse(raw).map(|_| to_hex(raw))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<const N: usize> From<[(&str, &str); N]> for FormValues {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Tracks how many submitted fields took effect.
struct Commit<'v> {
    values: &'v FormValues,
    applied: usize,
}

impl Commit<'_> {
    fn set<T>(&mut self, slot: &mut T, value: Option<T>, name: &str) {
        match value {
            Some(value) => {
                *slot = value;
                self.applied += 1;
            }
            None if self.values.get(name).is_some() => {
                tracing::debug!(field = name, "ignoring unreadable form value");
            }
            None => {}
        }
    }

    fn set_some<T>(&mut self, slot: &mut Option<T>, value: Option<T>, name: &str) {
        self.set(slot, value.map(Some), name);
    }
}

/// Pin every unset style field to the value the properties form shows, so an
/// applied block always renders its full template.
fn fill_form_defaults(content: &mut ElementContent) {
    match content {
        ElementContent::Heading(h) => {
            h.color.get_or_insert_with(|| DEFAULT_TEXT_COLOR.to_string());
            h.align.get_or_insert(Align::Left);
        }
        ElementContent::Paragraph(p) => {
            p.color.get_or_insert_with(|| DEFAULT_TEXT_COLOR.to_string());
            p.font_size_px.get_or_insert(DEFAULT_FONT_SIZE_PX);
            p.align.get_or_insert(Align::Left);
        }
        ElementContent::Image(i) => {
            i.width_pct.get_or_insert(*range::WIDTH_PCT.end());
            i.align.get_or_insert(Align::Left);
        }
        ElementContent::Button(b) => {
            b.align.get_or_insert(Align::Left);
        }
        ElementContent::Divider(_) | ElementContent::Spacer(_) => {}
    }
}

/// Apply a form submission to `element`.
///
/// The block switches to its applied template: style fields missing from the
/// submission keep the value the form displayed. Content markup is regenerated
/// from the updated model on the next render. `marginPx`/`paddingPx` overwrite
/// the outer spacing. Returns the number of fields that took effect.
pub fn apply(element: &mut Element, values: &FormValues) -> usize {
    let mut commit = Commit { values, applied: 0 };
    fill_form_defaults(&mut element.content);
    let v = values;

    match &mut element.content {
        ElementContent::Heading(h) => {
            commit.set(&mut h.text, v.text(field::TEXT), field::TEXT);
            commit.set(
                &mut h.level,
                v.choice(field::SIZE, HeadingLevel::ALL),
                field::SIZE,
            );
            commit.set_some(&mut h.color, v.color(field::COLOR), field::COLOR);
            commit.set_some(&mut h.align, v.choice(field::ALIGN, Align::BLOCK), field::ALIGN);
        }
        ElementContent::Paragraph(p) => {
            commit.set(&mut p.text, v.text(field::TEXT), field::TEXT);
            commit.set_some(&mut p.color, v.color(field::COLOR), field::COLOR);
            commit.set_some(
                &mut p.font_size_px,
                v.number(field::FONT_SIZE_PX, range::FONT_SIZE_PX),
                field::FONT_SIZE_PX,
            );
            commit.set_some(&mut p.align, v.choice(field::ALIGN, Align::ALL), field::ALIGN);
        }
        ElementContent::Image(i) => {
            commit.set(&mut i.src, v.text(field::URL), field::URL);
            commit.set(&mut i.alt, v.text(field::ALT), field::ALT);
            commit.set_some(
                &mut i.width_pct,
                v.number(field::WIDTH_PCT, range::WIDTH_PCT),
                field::WIDTH_PCT,
            );
            commit.set_some(&mut i.align, v.choice(field::ALIGN, Align::BLOCK), field::ALIGN);
        }
        ElementContent::Button(b) => {
            commit.set(&mut b.text, v.text(field::TEXT), field::TEXT);
            commit.set(&mut b.background, v.color(field::BG_COLOR), field::BG_COLOR);
            commit.set(&mut b.text_color, v.color(field::TEXT_COLOR), field::TEXT_COLOR);
            commit.set(&mut b.size, v.choice(field::SIZE, ButtonSize::ALL), field::SIZE);
            commit.set_some(&mut b.align, v.choice(field::ALIGN, Align::BLOCK), field::ALIGN);
        }
        ElementContent::Divider(d) => {
            commit.set(&mut d.color, v.color(field::COLOR), field::COLOR);
            commit.set(
                &mut d.thickness_px,
                v.number(field::THICKNESS_PX, range::THICKNESS_PX),
                field::THICKNESS_PX,
            );
            commit.set(&mut d.style, v.choice(field::STYLE, BorderStyle::ALL), field::STYLE);
        }
        ElementContent::Spacer(s) => {
            commit.set(
                &mut s.height_px,
                v.number(field::HEIGHT_PX, range::HEIGHT_PX),
                field::HEIGHT_PX,
            );
        }
    }

    let style = &mut element.common_style;
    commit.set(
        &mut style.margin_px,
        v.number(field::MARGIN_PX, range::SPACING_PX),
        field::MARGIN_PX,
    );
    commit.set(
        &mut style.padding_px,
        v.number(field::PADDING_PX, range::SPACING_PX),
        field::PADDING_PX,
    );

    tracing::debug!(
        element = %element.id(),
        applied = commit.applied,
        submitted = values.len(),
        "applied properties"
    );
    commit.applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementId, ElementType};
    use crate::markup::{common_style_css, render_content};

    fn element(ty: ElementType) -> Element {
        Element::new(ElementId::from("element-1-1"), ty)
    }

    fn applied(ty: ElementType, values: impl Into<FormValues>) -> String {
        let mut element = element(ty);
        apply(&mut element, &values.into());
        render_content(&element.content)
    }

    #[test]
    fn test_heading_template() {
        let html = applied(
            ElementType::Heading,
            [("text", "Hi"), ("size", "h3"), ("color", "#112233"), ("align", "center")],
        );
        assert_eq!(html, "<h3 style=\"color:#112233;text-align:center;\">Hi</h3>");
    }

    #[test]
    fn test_paragraph_template() {
        let html = applied(
            ElementType::Paragraph,
            [
                ("text", "Body"),
                ("color", "#333333"),
                ("fontSizePx", "18"),
                ("align", "justify"),
            ],
        );
        assert_eq!(
            html,
            "<p style=\"color:#333333;font-size:18px;text-align:justify;\">Body</p>"
        );
    }

    #[test]
    fn test_image_template() {
        let html = applied(
            ElementType::Image,
            [
                ("url", "https://cdn.example.com/a.png"),
                ("alt", "A"),
                ("widthPct", "50"),
                ("align", "center"),
            ],
        );
        assert_eq!(
            html,
            "<div style=\"text-align:center;\"><img src=\"https://cdn.example.com/a.png\" alt=\"A\" style=\"max-width:50%;display:block;\"></div>"
        );
    }

    #[test]
    fn test_partial_submission_still_renders_full_template() {
        assert_eq!(
            applied(ElementType::Image, [("widthPct", "50")]),
            "<div style=\"text-align:left;\"><img src=\"https://via.placeholder.com/300x200\" alt=\"Placeholder Image\" style=\"max-width:50%;display:block;\"></div>"
        );
        assert_eq!(
            applied(ElementType::Paragraph, [("text", "Short")]),
            "<p style=\"color:#2d3748;font-size:16px;text-align:left;\">Short</p>"
        );
        assert!(applied(ElementType::Button, [("text", "Go")])
            .starts_with("<div style=\"text-align:left;\"><button"));
    }

    #[test]
    fn test_button_size_alone_sets_padding() {
        for (size, padding) in [("small", "6px 12px"), ("medium", "10px 20px"), ("large", "14px 28px")] {
            let html = applied(ElementType::Button, [("size", size)]);
            assert!(
                html.contains(&format!("padding:{padding};")),
                "{size} should render {padding}: {html}"
            );
        }
    }

    #[test]
    fn test_divider_and_spacer_templates() {
        assert_eq!(
            applied(
                ElementType::Divider,
                [("color", "#ff0000"), ("thicknessPx", "3"), ("style", "dashed")]
            ),
            "<hr style=\"border:none;border-top:3px dashed #ff0000;margin:20px 0;\">"
        );
        assert_eq!(
            applied(ElementType::Spacer, [("heightPx", "120")]),
            "<div style=\"height:120px;\"></div>"
        );
    }

    #[test]
    fn test_missing_and_bad_fields_are_per_field_no_ops() {
        let mut heading = element(ElementType::Heading);
        let count = apply(
            &mut heading,
            &FormValues::from([("text", "Kept"), ("size", "h9"), ("color", "not-a-color")]),
        );
        assert_eq!(count, 1);
        assert_eq!(
            render_content(&heading.content),
            "<h2 style=\"color:#2d3748;text-align:left;\">Kept</h2>"
        );
    }

    #[test]
    fn test_numbers_are_clamped() {
        assert_eq!(
            applied(ElementType::Spacer, [("heightPx", "5000")]),
            "<div style=\"height:200px;\"></div>"
        );
        assert_eq!(
            applied(ElementType::Spacer, [("heightPx", "-3")]),
            "<div style=\"height:10px;\"></div>"
        );
    }

    #[test]
    fn test_justify_rejected_for_headings() {
        assert_eq!(
            applied(ElementType::Heading, [("align", "justify")]),
            "<h2 style=\"color:#2d3748;text-align:left;\">Heading Text</h2>"
        );
    }

    #[test]
    fn test_spacing_overwrites_instead_of_adding() {
        let mut spacer = element(ElementType::Spacer);
        apply(&mut spacer, &FormValues::from([("marginPx", "20"), ("paddingPx", "8")]));
        apply(&mut spacer, &FormValues::from([("marginPx", "5"), ("paddingPx", "8")]));
        assert_eq!(common_style_css(&spacer), "margin:5px 0;padding:8px;");
    }
}

//! Canvas elements - the building blocks of a page.
//!
//! Every element owns a typed content model. Markup is always produced from
//! the model by [`crate::markup`], never read back from rendered HTML.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CanvasError, CanvasResult};

/// The fixed set of block types offered by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// A heading (`h1`..`h6`).
    Heading,
    /// A paragraph of text.
    Paragraph,
    /// An image.
    Image,
    /// A call-to-action button.
    Button,
    /// A horizontal rule.
    Divider,
    /// Fixed-height vertical whitespace.
    Spacer,
}

impl ElementType {
    /// All block types, in sidebar order.
    pub const ALL: [ElementType; 6] = [
        ElementType::Heading,
        ElementType::Paragraph,
        ElementType::Image,
        ElementType::Button,
        ElementType::Divider,
        ElementType::Spacer,
    ];

    /// The lowercase type tag carried in drag payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Heading => "heading",
            Self::Paragraph => "paragraph",
            Self::Image => "image",
            Self::Button => "button",
            Self::Divider => "divider",
            Self::Spacer => "spacer",
        }
    }

    /// Capitalized display name, e.g. `"Heading"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Heading => "Heading",
            Self::Paragraph => "Paragraph",
            Self::Image => "Image",
            Self::Button => "Button",
            Self::Divider => "Divider",
            Self::Spacer => "Spacer",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ElementType {
    type Err = CanvasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| CanvasError::UnknownElementType(s.to_string()))
    }
}

/// A closed set of string-valued options shown as a `<select>`.
pub trait Choice: Copy + PartialEq + 'static {
    /// Every option, in display order.
    const ALL: &'static [Self];

    /// The submitted form value.
    fn as_str(self) -> &'static str;

    /// The option label shown to the user.
    fn label(self) -> &'static str;

    /// Parse a submitted form value.
    fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.as_str() == value)
    }
}

/// Heading level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLevel {
    /// `<h1>`
    H1,
    /// `<h2>`
    #[default]
    H2,
    /// `<h3>`
    H3,
    /// `<h4>`
    H4,
    /// `<h5>`
    H5,
    /// `<h6>`
    H6,
}

impl Choice for HeadingLevel {
    const ALL: &'static [Self] = &[
        Self::H1,
        Self::H2,
        Self::H3,
        Self::H4,
        Self::H5,
        Self::H6,
    ];

    fn as_str(self) -> &'static str {
        match self {
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
            Self::H5 => "h5",
            Self::H6 => "h6",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::H1 => "Heading 1 (Largest)",
            Self::H2 => "Heading 2",
            Self::H3 => "Heading 3",
            Self::H4 => "Heading 4",
            Self::H5 => "Heading 5",
            Self::H6 => "Heading 6 (Smallest)",
        }
    }
}

/// Horizontal alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    /// Left aligned.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Right aligned.
    Right,
    /// Justified (paragraphs only).
    Justify,
}

impl Align {
    /// Alignments offered for block content (headings, images, buttons).
    pub const BLOCK: &'static [Align] = &[Align::Left, Align::Center, Align::Right];
}

impl Choice for Align {
    const ALL: &'static [Self] = &[Self::Left, Self::Center, Self::Right, Self::Justify];

    fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Center => "center",
            Self::Right => "right",
            Self::Justify => "justify",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Center => "Center",
            Self::Right => "Right",
            Self::Justify => "Justify",
        }
    }
}

/// Button size preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonSize {
    /// `6px 12px` padding.
    Small,
    /// `10px 20px` padding.
    #[default]
    Medium,
    /// `14px 28px` padding.
    Large,
}

impl ButtonSize {
    /// CSS padding shorthand for this size.
    #[must_use]
    pub const fn padding(self) -> &'static str {
        match self {
            Self::Small => "6px 12px",
            Self::Medium => "10px 20px",
            Self::Large => "14px 28px",
        }
    }
}

impl Choice for ButtonSize {
    const ALL: &'static [Self] = &[Self::Small, Self::Medium, Self::Large];

    fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Small => "Small",
            Self::Medium => "Medium",
            Self::Large => "Large",
        }
    }
}

/// Divider line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderStyle {
    /// Solid line.
    #[default]
    Solid,
    /// Dashed line.
    Dashed,
    /// Dotted line.
    Dotted,
}

impl Choice for BorderStyle {
    const ALL: &'static [Self] = &[Self::Solid, Self::Dashed, Self::Dotted];

    fn as_str(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dashed => "dashed",
            Self::Dotted => "dotted",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Solid => "Solid",
            Self::Dashed => "Dashed",
            Self::Dotted => "Dotted",
        }
    }
}

/// Heading block. Style fields stay `None` until the first apply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingContent {
    /// Heading text.
    pub text: String,
    /// Heading level.
    pub level: HeadingLevel,
    /// Text color.
    pub color: Option<String>,
    /// Text alignment.
    pub align: Option<Align>,
}

/// Paragraph block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphContent {
    /// Paragraph text.
    pub text: String,
    /// Text color.
    pub color: Option<String>,
    /// Font size in pixels.
    pub font_size_px: Option<u16>,
    /// Text alignment.
    pub align: Option<Align>,
}

/// Image block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageContent {
    /// Image URL.
    pub src: String,
    /// Alternative text.
    pub alt: String,
    /// Maximum width as a percentage of the container.
    pub width_pct: Option<u16>,
    /// Block alignment; once set the image is wrapped in an aligned container.
    pub align: Option<Align>,
}

/// Button block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonContent {
    /// Button label.
    pub text: String,
    /// Background color.
    pub background: String,
    /// Label color.
    pub text_color: String,
    /// Size preset.
    pub size: ButtonSize,
    /// Block alignment; once set the button is wrapped in an aligned container.
    pub align: Option<Align>,
}

/// Divider block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DividerContent {
    /// Line color.
    pub color: String,
    /// Line thickness in pixels.
    pub thickness_px: u16,
    /// Line style.
    pub style: BorderStyle,
}

/// Spacer block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacerContent {
    /// Height in pixels.
    pub height_px: u16,
}

/// Placeholder image used for freshly created image blocks.
pub const PLACEHOLDER_IMAGE_SRC: &str = "https://via.placeholder.com/300x200";

/// Alt text used for freshly created image blocks.
pub const PLACEHOLDER_IMAGE_ALT: &str = "Placeholder Image";

/// Typed content of an element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "lowercase")]
pub enum ElementContent {
    /// Heading block.
    Heading(HeadingContent),
    /// Paragraph block.
    Paragraph(ParagraphContent),
    /// Image block.
    Image(ImageContent),
    /// Button block.
    Button(ButtonContent),
    /// Divider block.
    Divider(DividerContent),
    /// Spacer block.
    Spacer(SpacerContent),
}

impl ElementContent {
    /// Default content for a freshly dropped block.
    #[must_use]
    pub fn default_for(ty: ElementType) -> Self {
        match ty {
            ElementType::Heading => Self::Heading(HeadingContent {
                text: "Heading Text".to_string(),
                level: HeadingLevel::H2,
                color: None,
                align: None,
            }),
            ElementType::Paragraph => Self::Paragraph(ParagraphContent {
                text: "This is a paragraph of text. Click to edit the content and properties."
                    .to_string(),
                color: None,
                font_size_px: None,
                align: None,
            }),
            ElementType::Image => Self::Image(ImageContent {
                src: PLACEHOLDER_IMAGE_SRC.to_string(),
                alt: PLACEHOLDER_IMAGE_ALT.to_string(),
                width_pct: None,
                align: None,
            }),
            ElementType::Button => Self::Button(ButtonContent {
                text: "Button".to_string(),
                background: "#4a6cf7".to_string(),
                text_color: "white".to_string(),
                size: ButtonSize::Medium,
                align: None,
            }),
            ElementType::Divider => Self::Divider(DividerContent {
                color: "#e2e8f0".to_string(),
                thickness_px: 1,
                style: BorderStyle::Solid,
            }),
            ElementType::Spacer => Self::Spacer(SpacerContent { height_px: 50 }),
        }
    }

    /// The block type of this content.
    #[must_use]
    pub const fn element_type(&self) -> ElementType {
        match self {
            Self::Heading(_) => ElementType::Heading,
            Self::Paragraph(_) => ElementType::Paragraph,
            Self::Image(_) => ElementType::Image,
            Self::Button(_) => ElementType::Button,
            Self::Divider(_) => ElementType::Divider,
            Self::Spacer(_) => ElementType::Spacer,
        }
    }
}

/// Outer spacing applied to every block regardless of type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CommonStyle {
    /// Vertical margin in pixels.
    pub margin_px: u16,
    /// Padding on all sides in pixels.
    pub padding_px: u16,
}

impl CommonStyle {
    /// Whether this style has no visible effect.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.margin_px == 0 && self.padding_px == 0
    }
}

/// Unique identifier for an element: `element-{timestamp_ms}-{counter}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Build an id from its creation timestamp and counter value.
    #[must_use]
    pub fn from_parts(timestamp_ms: u64, counter: u64) -> Self {
        Self(format!("element-{timestamp_ms}-{counter}"))
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The counter part of an `element-{timestamp_ms}-{counter}` id.
    #[must_use]
    pub fn counter(&self) -> Option<u64> {
        let rest = self.0.strip_prefix("element-")?;
        let (_, counter) = rest.rsplit_once('-')?;
        counter.parse().ok()
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A placed block on the canvas.
///
/// Position is implicit: it is the element's index in the canvas sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    id: ElementId,
    /// Typed content, mutated only by the property applier.
    pub content: ElementContent,
    /// Outer spacing, mutated only by the property applier.
    #[serde(default)]
    pub common_style: CommonStyle,
}

impl Element {
    /// Create an element with the default content for `ty`.
    #[must_use]
    pub fn new(id: ElementId, ty: ElementType) -> Self {
        Self::with_content(id, ElementContent::default_for(ty))
    }

    /// Create an element with explicit content.
    #[must_use]
    pub fn with_content(id: ElementId, content: ElementContent) -> Self {
        Self {
            id,
            content,
            common_style: CommonStyle::default(),
        }
    }

    /// The element's immutable id.
    #[must_use]
    pub fn id(&self) -> &ElementId {
        &self.id
    }

    /// The element's immutable block type.
    #[must_use]
    pub fn element_type(&self) -> ElementType {
        self.content.element_type()
    }
}

/// Millisecond clock used to stamp element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clock {
    /// Wall-clock time.
    #[default]
    System,
    /// A fixed instant, for reproducible ids.
    Fixed(u64),
}

impl Clock {
    /// Current time in milliseconds.
    #[must_use]
    pub fn now_ms(self) -> u64 {
        match self {
            Self::System => system_clock_ms(),
            Self::Fixed(ms) => ms,
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[cfg(all(feature = "wasm", target_arch = "wasm32"))]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn system_clock_ms() -> u64 {
    js_sys::Date::now() as u64
}

/// Current wall-clock time in milliseconds since the Unix epoch.
#[cfg(not(all(feature = "wasm", target_arch = "wasm32")))]
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn system_clock_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Builds new elements and hands out their ids.
#[derive(Debug, Clone)]
pub struct ElementFactory {
    counter: u64,
    clock: Clock,
}

impl ElementFactory {
    /// Create a factory stamped by the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Clock::System)
    }

    /// Create a factory with a custom clock (deterministic ids in tests).
    #[must_use]
    pub fn with_clock(clock: Clock) -> Self {
        Self { counter: 0, clock }
    }

    /// Continue numbering after ids that already exist, so restored
    /// elements never collide with new ones.
    #[must_use]
    pub fn resume_after<'a>(mut self, existing: impl IntoIterator<Item = &'a ElementId>) -> Self {
        let highest = existing.into_iter().filter_map(ElementId::counter).max();
        if let Some(highest) = highest {
            self.counter = self.counter.max(highest);
        }
        self
    }

    /// Allocate the next element id.
    pub fn next_id(&mut self) -> ElementId {
        self.counter += 1;
        ElementId::from_parts(self.clock.now_ms(), self.counter)
    }

    /// Create a block of a known type with its default content.
    pub fn create_type(&mut self, ty: ElementType) -> Element {
        Element::new(self.next_id(), ty)
    }

    /// Create a block from a drag-payload type tag.
    ///
    /// # Errors
    ///
    /// Returns [`CanvasError::UnknownElementType`] if `tag` is not one of the
    /// fixed block types. No id is consumed in that case.
    pub fn create(&mut self, tag: &str) -> CanvasResult<Element> {
        let ty: ElementType = tag.parse()?;
        Ok(self.create_type(ty))
    }

    /// Create an image block pointing at `src`.
    pub fn create_image(&mut self, src: &str) -> Element {
        let mut element = self.create_type(ElementType::Image);
        if let ElementContent::Image(image) = &mut element.content {
            image.src = src.to_string();
        }
        element
    }
}

impl Default for ElementFactory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXED: Clock = Clock::Fixed(1_700_000_000_000);

    #[test]
    fn test_ids_are_monotonic_and_stamped() {
        let mut factory = ElementFactory::with_clock(FIXED);
        let a = factory.create_type(ElementType::Heading);
        let b = factory.create_type(ElementType::Spacer);
        assert_eq!(a.id().as_str(), "element-1700000000000-1");
        assert_eq!(b.id().as_str(), "element-1700000000000-2");
    }

    #[test]
    fn test_unknown_tag_is_rejected_without_consuming_an_id() {
        let mut factory = ElementFactory::with_clock(FIXED);
        assert!(matches!(
            factory.create("widget"),
            Err(CanvasError::UnknownElementType(tag)) if tag == "widget"
        ));
        let next = factory.create("divider").expect("known tag");
        assert_eq!(next.id().as_str(), "element-1700000000000-1");
        assert_eq!(next.element_type(), ElementType::Divider);
    }

    #[test]
    fn test_tags_round_trip_through_from_str() {
        for ty in ElementType::ALL {
            assert_eq!(ty.as_str().parse::<ElementType>().ok(), Some(ty));
        }
        assert!("Heading".parse::<ElementType>().is_err());
    }

    #[test]
    fn test_create_image_overrides_src_only() {
        let mut factory = ElementFactory::with_clock(FIXED);
        let element = factory.create_image("https://x.com/photo.png");
        match &element.content {
            ElementContent::Image(image) => {
                assert_eq!(image.src, "https://x.com/photo.png");
                assert_eq!(image.alt, PLACEHOLDER_IMAGE_ALT);
            }
            other => panic!("expected image, got {other:?}"),
        }
    }

    #[test]
    fn test_counter_is_read_back_from_id() {
        assert_eq!(ElementId::from_parts(1_700, 12).counter(), Some(12));
        assert_eq!(ElementId::from("element-x").counter(), None);
        assert_eq!(ElementId::from("hero-banner").counter(), None);
    }

    #[test]
    fn test_resume_after_skips_existing_counters() {
        let existing = [ElementId::from_parts(5, 3), ElementId::from("custom"), ElementId::from_parts(9, 7)];
        let mut factory = ElementFactory::with_clock(FIXED).resume_after(&existing);
        assert_eq!(factory.next_id().as_str(), "element-1700000000000-8");
    }

    #[test]
    fn test_choice_parse_rejects_unknown_values() {
        assert_eq!(HeadingLevel::parse("h4"), Some(HeadingLevel::H4));
        assert_eq!(ButtonSize::parse("huge"), None);
        assert_eq!(Align::parse("justify"), Some(Align::Justify));
    }
}

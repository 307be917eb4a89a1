//! CSS color normalization for color-picker fields.
//!
//! Color pickers only accept `#rrggbb`, while block models may carry any CSS
//! color (the default button label is `white`). [`to_hex`] bridges the two and
//! falls back to black for anything it cannot read.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fallback for empty, `initial`, or unparseable colors.
pub const FALLBACK_HEX: &str = "#000000";

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\((\d+),\s*(\d+),\s*(\d+)\)$").expect("rgb() pattern is valid")
});

/// The 16 CSS basic color keywords.
const KEYWORDS: [(&str, Rgb); 16] = [
    ("black", Rgb::new(0, 0, 0)),
    ("silver", Rgb::new(192, 192, 192)),
    ("gray", Rgb::new(128, 128, 128)),
    ("white", Rgb::new(255, 255, 255)),
    ("maroon", Rgb::new(128, 0, 0)),
    ("red", Rgb::new(255, 0, 0)),
    ("purple", Rgb::new(128, 0, 128)),
    ("fuchsia", Rgb::new(255, 0, 255)),
    ("green", Rgb::new(0, 128, 0)),
    ("lime", Rgb::new(0, 255, 0)),
    ("olive", Rgb::new(128, 128, 0)),
    ("yellow", Rgb::new(255, 255, 0)),
    ("navy", Rgb::new(0, 0, 128)),
    ("blue", Rgb::new(0, 0, 255)),
    ("teal", Rgb::new(0, 128, 128)),
    ("aqua", Rgb::new(0, 255, 255)),
];

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            6 => Some(Self::new(
                u8::from_str_radix(&digits[0..2], 16).ok()?,
                u8::from_str_radix(&digits[2..4], 16).ok()?,
                u8::from_str_radix(&digits[4..6], 16).ok()?,
            )),
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..=i], 16).ok().map(|n| n * 17);
                Some(Self::new(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            _ => None,
        }
    }

    /// Parse any color form understood by [`to_hex`].
    #[must_use]
    pub fn parse(css: &str) -> Option<Self> {
        let css = css.trim();
        if css.starts_with('#') {
            return Self::from_hex(css);
        }
        if let Some(caps) = RGB_FUNCTION.captures(css) {
            let channel = |i: usize| -> u8 {
                caps[i]
                    .parse::<u32>()
                    .map_or(u8::MAX, |v| u8::try_from(v.min(255)).unwrap_or(u8::MAX))
            };
            return Some(Self::new(channel(1), channel(2), channel(3)));
        }
        let lower = css.to_ascii_lowercase();
        KEYWORDS
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, rgb)| *rgb)
    }

    /// Lowercase `#rrggbb`. Hex input is case-insensitive, so `#ABCDEF`
    /// comes back as `#abcdef`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Formats as the CSS `rgb(r, g, b)` function, as browsers report inline styles.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Normalize a CSS color to the `#rrggbb` form a color picker accepts.
///
/// A six-digit hex value is returned unchanged; `#rgb` is expanded. Empty,
/// `initial`, and unreadable values yield [`FALLBACK_HEX`].
#[must_use]
pub fn to_hex(css: &str) -> String {
    let css = css.trim();
    if css.is_empty() || css == "initial" {
        return FALLBACK_HEX.to_string();
    }
    if css.len() == 7 && Rgb::from_hex(css).is_some() {
        return css.to_string();
    }
    Rgb::parse(css).map_or_else(|| FALLBACK_HEX.to_string(), Rgb::to_hex)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_defaults_to_black() {
        assert_eq!(to_hex(""), "#000000");
        assert_eq!(to_hex("initial"), "#000000");
        assert_eq!(to_hex("hsl(0, 0%, 0%)"), "#000000");
        assert_eq!(to_hex("#12"), "#000000");
    }

    #[test]
    fn test_converts_rgb_function() {
        assert_eq!(to_hex("rgb(0,0,0)"), "#000000");
        assert_eq!(to_hex("rgb(74, 108, 247)"), "#4a6cf7");
        assert_eq!(to_hex("rgb(300, 0, 16)"), "#ff0010");
    }

    #[test]
    fn test_hex_passes_through_and_shorthand_expands() {
        assert_eq!(to_hex("#2D3748"), "#2D3748");
        assert_eq!(to_hex("#abc"), "#aabbcc");
    }

    #[test]
    fn test_basic_keywords() {
        assert_eq!(to_hex("white"), "#ffffff");
        assert_eq!(to_hex("Navy"), "#000080");
        assert_eq!(to_hex("rebeccapurple"), "#000000");
    }

    proptest! {
        #[test]
        fn prop_hex_round_trips_through_rgb(x in "#[0-9a-fA-F]{6}") {
            let rgb = Rgb::from_hex(&x).expect("generated hex parses");
            prop_assert_eq!(to_hex(&rgb.to_string()), x.to_ascii_lowercase());
            prop_assert_eq!(rgb.to_hex(), x.to_ascii_lowercase());
        }
    }
}

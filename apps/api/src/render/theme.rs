use tracing::debug;

use crate::render::slots::{SlotSink, ThemeVar};

/// How much darker the hover/accent variant of the primary colour is, in percent.
pub const DARKEN_PERCENT: u8 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Parses `#rrggbb` (the leading `#` is optional). Anything else is `None`.
    pub fn parse_hex(input: &str) -> Option<Rgb> {
        let digits = input.trim();
        let digits = digits.strip_prefix('#').unwrap_or(digits);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
        Some(Rgb {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Scales each channel down by `percent`, rounding toward zero.
    pub fn darken(self, percent: u8) -> Rgb {
        let keep = u16::from(100 - percent.min(100));
        let scale = |c: u8| u8::try_from(u16::from(c) * keep / 100).unwrap_or(u8::MAX);
        Rgb {
            r: scale(self.r),
            g: scale(self.g),
            b: scale(self.b),
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Applies the primary colour and its darker variant.
///
/// A missing or malformed colour leaves the current theme untouched.
/// Returns whether the theme changed.
pub fn apply_theme(color: Option<&str>, sink: &mut impl SlotSink) -> bool {
    let Some(raw) = color else {
        return false;
    };
    let Some(primary) = Rgb::parse_hex(raw) else {
        debug!("Ignoring invalid primary colour '{raw}'");
        return false;
    };

    sink.set_theme(ThemeVar::Primary, &primary.to_hex());
    sink.set_theme(ThemeVar::PrimaryDark, &primary.darken(DARKEN_PERCENT).to_hex());
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::slots::{PageDocument, DEFAULT_PRIMARY};

    fn darken(hex: &str, percent: u8) -> Option<String> {
        Rgb::parse_hex(hex).map(|c| c.darken(percent).to_hex())
    }

    #[test]
    fn test_darken_floors_each_channel() {
        // (56,16,0) * 0.8 = (44.8, 12.8, 0) → (44, 12, 0)
        assert_eq!(darken("#381000", 20).as_deref(), Some("#2c0c00"));
    }

    #[test]
    fn test_darken_default_sky_blue() {
        // (56,189,248) → (44,151,198)
        assert_eq!(darken("#38BDF8", 20).as_deref(), Some("#2c97c6"));
    }

    #[test]
    fn test_darken_edges() {
        assert_eq!(darken("#ffffff", 0).as_deref(), Some("#ffffff"));
        assert_eq!(darken("#ffffff", 100).as_deref(), Some("#000000"));
        assert_eq!(darken("ffffff", 200).as_deref(), Some("#000000"));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in ["", "#fff", "#12345g", "#1234567", "blue", "#38bdf8 extra"] {
            assert_eq!(Rgb::parse_hex(bad), None, "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_apply_theme_sets_both_vars() {
        let mut page = PageDocument::default();
        assert!(apply_theme(Some("#FF0000"), &mut page));
        assert_eq!(page.theme(ThemeVar::Primary), "#ff0000");
        assert_eq!(page.theme(ThemeVar::PrimaryDark), "#cc0000");
    }

    #[test]
    fn test_apply_theme_invalid_leaves_theme_untouched() {
        let mut page = PageDocument::default();
        assert!(!apply_theme(Some("not-a-colour"), &mut page));
        assert!(!apply_theme(None, &mut page));
        assert_eq!(page.theme(ThemeVar::Primary), DEFAULT_PRIMARY);
    }
}

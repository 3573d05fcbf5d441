//! Hex color value object and brightness shading.

use core::str::FromStr;

use serde::{Deserialize, Serialize, de, Deserializer, Serializer};

use sitedesk_core::CoreError;

/// A 6-hex-digit RGB color.
///
/// Malformed input is rejected at the parse boundary; every constructed value
/// is valid, so shading is infallible.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Brightness-shifted variant of this color.
    ///
    /// Adds `round(2.55 * percent)` to each channel independently and clamps
    /// to `[0, 255]`. Negative percentages darken, positive lighten.
    pub fn shade(self, percent: i32) -> Self {
        let amt = (2.55 * f64::from(percent)).round() as i32;
        let adjust = |channel: u8| i32::from(channel).saturating_add(amt).clamp(0, 255) as u8;
        Self {
            r: adjust(self.r),
            g: adjust(self.g),
            b: adjust(self.b),
        }
    }
}

impl core::fmt::Display for HexColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for HexColor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::validation(format!(
                "expected a 6-hex-digit color, got {s:?}"
            )));
        }
        let channel = |range: core::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| CoreError::validation(format!("bad color channel in {s:?}: {e}")))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn golden_hover_shade() {
        let base: HexColor = "#2563eb".parse().unwrap();
        assert_eq!(base.shade(-20).to_string(), "#0030b8");
    }

    #[test]
    fn shade_is_deterministic() {
        let base: HexColor = "#2563eb".parse().unwrap();
        assert_eq!(base.shade(-20), base.shade(-20));
    }

    #[test]
    fn clamps_at_the_extremes() {
        let white: HexColor = "#ffffff".parse().unwrap();
        assert_eq!(white.shade(90), white);

        let black: HexColor = "#000000".parse().unwrap();
        assert_eq!(black.shade(-30), black);
    }

    #[test]
    fn shade_is_total_over_extreme_offsets() {
        let mid: HexColor = "#808080".parse().unwrap();
        assert_eq!(mid.shade(i32::MAX).to_string(), "#ffffff");
        assert_eq!(mid.shade(i32::MIN).to_string(), "#000000");
    }

    #[test]
    fn parse_accepts_with_and_without_hash() {
        let with: HexColor = "#112233".parse().unwrap();
        let without: HexColor = "112233".parse().unwrap();
        assert_eq!(with, without);
    }

    #[test]
    fn parse_rejects_malformed_input() {
        for bad in ["", "#fff", "#12345", "#1234567", "#gg0011", "blue"] {
            assert!(bad.parse::<HexColor>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn serde_uses_the_string_form() {
        let color: HexColor = "#112233".parse().unwrap();
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#112233\"");
        let back: HexColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }

    proptest! {
        #[test]
        fn shade_never_leaves_channel_range(r: u8, g: u8, b: u8, percent: i32) {
            // Channels are u8 by construction; the property worth checking is
            // that shading neither panics nor mangles the textual form.
            let shaded = HexColor::from_rgb(r, g, b).shade(percent);
            let text = shaded.to_string();
            prop_assert_eq!(text.len(), 7);
            prop_assert_eq!(text.parse::<HexColor>().unwrap(), shaded);
        }

        #[test]
        fn display_parse_roundtrip(r: u8, g: u8, b: u8) {
            let color = HexColor::from_rgb(r, g, b);
            prop_assert_eq!(color.to_string().parse::<HexColor>().unwrap(), color);
        }
    }
}

//! Shade palette derived from a single base color.

use crate::color::HexColor;

/// Standard offsets used for interactive states.
pub const HOVER_OFFSET: i32 = -20;
pub const ACTIVE_OFFSET: i32 = -30;
pub const LIGHT_OFFSET: i32 = 90;

/// The variants derived from one base color.
///
/// Never persisted; recomputed on every theme application.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    pub base: HexColor,
    pub hover: HexColor,
    pub active: HexColor,
    pub light: HexColor,
}

impl Palette {
    pub fn derive(base: HexColor) -> Self {
        Self {
            base,
            hover: base.shade(HOVER_OFFSET),
            active: base.shade(ACTIVE_OFFSET),
            light: base.shade(LIGHT_OFFSET),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_uses_the_standard_offsets() {
        let base: HexColor = "#2563eb".parse().unwrap();
        let palette = Palette::derive(base);

        assert_eq!(palette.base, base);
        assert_eq!(palette.hover, base.shade(-20));
        assert_eq!(palette.active, base.shade(-30));
        assert_eq!(palette.light, base.shade(90));
    }
}

//! Planet colour palette and gradients.

use crate::GRADIENT_LIGHTEN_PERCENT;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// RGB
// =============================================================================

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("expected 6 hex digits, got {0:?}")]
    InvalidLength(String),

    #[error("invalid hex digit in {0:?}")]
    InvalidDigit(String),

    #[error("{0} is not a palette colour")]
    NotInPalette(String),
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `rrggbb`.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ColorParseError::InvalidLength(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Scale every channel by `1 + percent / 100`, clamped to `[0, 255]` and
/// rounded half-up. Negative percentages darken.
pub fn adjust_brightness(color: Rgb, percent: i32) -> Rgb {
    let adjust = |c: u8| {
        let c = f64::from(c);
        let scaled = (c + c * f64::from(percent) / 100.0).clamp(0.0, 255.0);
        (scaled + 0.5).floor() as u8
    };
    Rgb::new(adjust(color.r), adjust(color.g), adjust(color.b))
}

// =============================================================================
// PALETTE
// =============================================================================

/// The 16 planet colours, in palette order.
///
/// The order is part of the derivation: `color_for` indexes into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlanetColor {
    Purple,
    Pink,
    Cyan,
    Emerald,
    Amber,
    Red,
    Blue,
    Lime,
    Orange,
    Indigo,
    Teal,
    Violet,
    Green,
    Yellow,
    Rose,
    Sky,
}

impl PlanetColor {
    pub const ALL: [PlanetColor; 16] = [
        PlanetColor::Purple,
        PlanetColor::Pink,
        PlanetColor::Cyan,
        PlanetColor::Emerald,
        PlanetColor::Amber,
        PlanetColor::Red,
        PlanetColor::Blue,
        PlanetColor::Lime,
        PlanetColor::Orange,
        PlanetColor::Indigo,
        PlanetColor::Teal,
        PlanetColor::Violet,
        PlanetColor::Green,
        PlanetColor::Yellow,
        PlanetColor::Rose,
        PlanetColor::Sky,
    ];

    /// Palette entry at `index`, wrapping modulo the palette size.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn hex(self) -> &'static str {
        match self {
            PlanetColor::Purple => "#8b5cf6",
            PlanetColor::Pink => "#ec4899",
            PlanetColor::Cyan => "#06b6d4",
            PlanetColor::Emerald => "#10b981",
            PlanetColor::Amber => "#f59e0b",
            PlanetColor::Red => "#ef4444",
            PlanetColor::Blue => "#3b82f6",
            PlanetColor::Lime => "#84cc16",
            PlanetColor::Orange => "#f97316",
            PlanetColor::Indigo => "#6366f1",
            PlanetColor::Teal => "#14b8a6",
            PlanetColor::Violet => "#a855f7",
            PlanetColor::Green => "#22c55e",
            PlanetColor::Yellow => "#eab308",
            PlanetColor::Rose => "#e11d48",
            PlanetColor::Sky => "#0ea5e9",
        }
    }

    pub fn rgb(self) -> Rgb {
        match self {
            PlanetColor::Purple => Rgb::new(139, 92, 246),
            PlanetColor::Pink => Rgb::new(236, 72, 153),
            PlanetColor::Cyan => Rgb::new(6, 182, 212),
            PlanetColor::Emerald => Rgb::new(16, 185, 129),
            PlanetColor::Amber => Rgb::new(245, 158, 11),
            PlanetColor::Red => Rgb::new(239, 68, 68),
            PlanetColor::Blue => Rgb::new(59, 130, 246),
            PlanetColor::Lime => Rgb::new(132, 204, 22),
            PlanetColor::Orange => Rgb::new(249, 115, 22),
            PlanetColor::Indigo => Rgb::new(99, 102, 241),
            PlanetColor::Teal => Rgb::new(20, 184, 166),
            PlanetColor::Violet => Rgb::new(168, 85, 247),
            PlanetColor::Green => Rgb::new(34, 197, 94),
            PlanetColor::Yellow => Rgb::new(234, 179, 8),
            PlanetColor::Rose => Rgb::new(225, 29, 72),
            PlanetColor::Sky => Rgb::new(14, 165, 233),
        }
    }
}

impl fmt::Display for PlanetColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}

impl FromStr for PlanetColor {
    type Err = ColorParseError;

    /// Accepts any hex spelling of a palette colour (`#EC4899`, `ec4899`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rgb = Rgb::from_hex(s)?;
        Self::ALL
            .into_iter()
            .find(|c| c.rgb() == rgb)
            .ok_or_else(|| ColorParseError::NotInPalette(s.to_string()))
    }
}

impl Serialize for PlanetColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

impl<'de> Deserialize<'de> for PlanetColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// CSS background for a planet: the base colour fading into a 30% lighter
/// shade.
pub fn gradient_for(color: PlanetColor) -> String {
    let lighter = adjust_brightness(color.rgb(), GRADIENT_LIGHTEN_PERCENT);
    format!("linear-gradient(135deg, {} 0%, {} 100%)", color.hex(), lighter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn palette_order_is_fixed() {
        let hexes: Vec<&str> = PlanetColor::ALL.iter().map(|c| c.hex()).collect();
        assert_eq!(
            hexes,
            vec![
                "#8b5cf6", "#ec4899", "#06b6d4", "#10b981", "#f59e0b", "#ef4444", "#3b82f6",
                "#84cc16", "#f97316", "#6366f1", "#14b8a6", "#a855f7", "#22c55e", "#eab308",
                "#e11d48", "#0ea5e9",
            ]
        );
    }

    #[test]
    fn index_round_trips_and_wraps() {
        for (i, color) in PlanetColor::ALL.into_iter().enumerate() {
            assert_eq!(color.index(), i);
            assert_eq!(PlanetColor::from_index(i), color);
        }
        assert_eq!(PlanetColor::from_index(16), PlanetColor::Purple);
        assert_eq!(PlanetColor::from_index(33), PlanetColor::Pink);
    }

    #[test]
    fn rgb_matches_hex() {
        for color in PlanetColor::ALL {
            assert_eq!(color.rgb().to_hex(), color.hex());
            assert_eq!(Rgb::from_hex(color.hex()), Ok(color.rgb()));
        }
    }

    #[test]
    fn rgb_parse_errors() {
        assert_eq!(
            Rgb::from_hex("#fff"),
            Err(ColorParseError::InvalidLength("#fff".into()))
        );
        assert_eq!(
            Rgb::from_hex("#gg0000"),
            Err(ColorParseError::InvalidDigit("#gg0000".into()))
        );
        assert_eq!("A855F7".parse::<Rgb>(), Ok(Rgb::new(168, 85, 247)));
    }

    #[test]
    fn planet_color_from_str() {
        assert_eq!("#EC4899".parse::<PlanetColor>(), Ok(PlanetColor::Pink));
        assert_eq!(
            "#000000".parse::<PlanetColor>(),
            Err(ColorParseError::NotInPalette("#000000".into()))
        );
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ColorParseError::NotInPalette("#000000".into()).to_string(),
            "#000000 is not a palette colour"
        );
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&PlanetColor::Sky).unwrap();
        assert_eq!(json, "\"#0ea5e9\"");
        let back: PlanetColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PlanetColor::Sky);
        assert!(serde_json::from_str::<PlanetColor>("\"#123456\"").is_err());
    }

    #[test]
    fn brightness_clamps_and_rounds() {
        // 139 * 1.3 = 180.7, 92 * 1.3 = 119.6, 246 * 1.3 = 319.8 -> 255
        assert_eq!(
            adjust_brightness(Rgb::new(139, 92, 246), 30),
            Rgb::new(181, 120, 255)
        );
        // 5 * 1.3 = 6.5 rounds up
        assert_eq!(adjust_brightness(Rgb::new(5, 0, 0), 30).r, 7);
        assert_eq!(
            adjust_brightness(Rgb::new(100, 50, 0), -200),
            Rgb::new(0, 0, 0)
        );
        assert_eq!(
            adjust_brightness(Rgb::new(12, 34, 56), 0),
            Rgb::new(12, 34, 56)
        );
    }

    #[test]
    fn lightened_palette() {
        let lighter: Vec<String> = PlanetColor::ALL
            .iter()
            .map(|c| adjust_brightness(c.rgb(), 30).to_hex())
            .collect();
        assert_eq!(
            lighter,
            vec![
                "#b578ff", "#ff5ec7", "#08edff", "#15f1a8", "#ffcd0e", "#ff5858", "#4da9ff",
                "#acff1d", "#ff961d", "#8185ff", "#1aefd8", "#da6fff", "#2cff7a", "#ffe90a",
                "#ff265e", "#12d7ff",
            ]
        );
    }

    #[test]
    fn gradient_css() {
        assert_eq!(
            gradient_for(PlanetColor::Purple),
            "linear-gradient(135deg, #8b5cf6 0%, #b578ff 100%)"
        );
    }
}

//! Colours and stroke styles used to paint the wave.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque RGB colour, written as `#RRGGBB` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl FromStr for Rgb {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| anyhow!("Colour '{s}' must start with '#'"))?;

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow!("Colour '{s}' must have the form #RRGGBB"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| anyhow!("Invalid colour '{s}': {e}"))
        };

        Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Light blue surface background.
pub const DEFAULT_BACKGROUND: Rgb = Rgb::new(0xBB, 0xDE, 0xFB);
/// Stroke colour of the primary wave.
pub const DEFAULT_PRIMARY: Rgb = Rgb::new(0x64, 0xB5, 0xF6);
/// Stroke colour of the peak wave.
pub const DEFAULT_PEAK: Rgb = Rgb::new(0x21, 0x96, 0xF3);
pub const DEFAULT_STROKE_WIDTH: f32 = 2.0;

/// How a path is stroked onto the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgb,
    pub width: f32,
    pub anti_alias: bool,
}

impl Stroke {
    pub fn new(color: Rgb, width: f32) -> Self {
        Self {
            color,
            width,
            anti_alias: true,
        }
    }
}

/// Fill and stroke styles for one wave view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgb,
    pub primary: Stroke,
    pub peak: Stroke,
    /// The peak wave is always computed but only stroked when this is set.
    pub draw_peak: bool,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: DEFAULT_BACKGROUND,
            primary: Stroke::new(DEFAULT_PRIMARY, DEFAULT_STROKE_WIDTH),
            peak: Stroke::new(DEFAULT_PEAK, DEFAULT_STROKE_WIDTH),
            draw_peak: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colour() {
        assert_eq!("#BBDEFB".parse::<Rgb>().unwrap(), DEFAULT_BACKGROUND);
        assert_eq!("#64b5f6".parse::<Rgb>().unwrap(), DEFAULT_PRIMARY);
        assert_eq!(" #2196F3 ".parse::<Rgb>().unwrap(), DEFAULT_PEAK);
    }

    #[test]
    fn test_invalid_colours_are_rejected() {
        assert!("BBDEFB".parse::<Rgb>().is_err());
        assert!("#BBDEF".parse::<Rgb>().is_err());
        assert!("#BBDEFBAA".parse::<Rgb>().is_err());
        assert!("#GGDEFB".parse::<Rgb>().is_err());
        assert!("#ÿÿÿ".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_display_round_trips_through_config_form() {
        assert_eq!(DEFAULT_PEAK.to_string(), "#2196F3");
    }

    #[test]
    fn test_default_palette() {
        let palette = Palette::default();
        assert_eq!(palette.background, DEFAULT_BACKGROUND);
        assert_eq!(palette.primary.color, DEFAULT_PRIMARY);
        assert_eq!(palette.primary.width, 2.0);
        assert!(palette.primary.anti_alias);
        assert!(!palette.draw_peak);
    }
}

//! Color values used for QR customization

use crate::error::{Error, Result};
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An RGBA color parsed from CSS-style notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel (255 = opaque)
    pub a: u8,
}

impl Color {
    /// Opaque black, the default foreground
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white, the default background and the logo backdrop
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Build an opaque color from its channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa` or a basic CSS color name.
    pub fn parse(value: &str) -> Result<Self> {
        let trimmed = value.trim();
        let invalid = || Error::InvalidColor(value.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
            return match hex.len() {
                3 => {
                    let mut out = [0u8; 3];
                    for (slot, digit) in out.iter_mut().zip(hex.chars()) {
                        let v = digit.to_digit(16).ok_or_else(invalid)? as u8;
                        *slot = v * 17;
                    }
                    Ok(Color::rgb(out[0], out[1], out[2]))
                }
                6 | 8 => {
                    let r = channel(&hex[0..2])?;
                    let g = channel(&hex[2..4])?;
                    let b = channel(&hex[4..6])?;
                    let a = if hex.len() == 8 {
                        channel(&hex[6..8])?
                    } else {
                        255
                    };
                    Ok(Color { r, g, b, a })
                }
                _ => Err(invalid()),
            };
        }

        let named = match trimmed.to_ascii_lowercase().as_str() {
            "black" => Color::BLACK,
            "white" => Color::WHITE,
            "red" => Color::rgb(255, 0, 0),
            "green" => Color::rgb(0, 128, 0),
            "blue" => Color::rgb(0, 0, 255),
            "orange" => Color::rgb(255, 165, 0),
            "purple" => Color::rgb(128, 0, 128),
            "gray" | "grey" => Color::rgb(128, 128, 128),
            "transparent" => Color {
                r: 0,
                g: 0,
                b: 0,
                a: 0,
            },
            _ => return Err(invalid()),
        };
        Ok(named)
    }

    /// Convert to an `image` pixel
    pub fn to_rgba(self) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, self.a])
    }

    /// Perceived luminance in 0..=255, used to judge contrast
    pub fn luminance(self) -> u8 {
        let l = 0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32;
        l.round().clamp(0.0, 255.0) as u8
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::parse(value)
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_forms() {
        assert_eq!(Color::parse("#000000").unwrap(), Color::BLACK);
        assert_eq!(Color::parse("#FFF").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("#ff8800").unwrap(), Color::rgb(0xff, 0x88, 0x00));
        assert_eq!(
            Color::parse("#11223380").unwrap(),
            Color {
                r: 0x11,
                g: 0x22,
                b: 0x33,
                a: 0x80
            }
        );
    }

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!(Color::parse("Black").unwrap(), Color::BLACK);
        assert_eq!(Color::parse(" white ").unwrap(), Color::WHITE);
        assert_eq!(Color::parse("grey").unwrap(), Color::parse("gray").unwrap());
    }

    #[test]
    fn rejects_garbage() {
        for bad in ["", "#12", "#12345", "#gggggg", "chartreuse-ish", "#ééé", "#+f+f+f"] {
            assert!(
                matches!(Color::parse(bad), Err(Error::InvalidColor(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn display_uses_lowercase_hex() {
        assert_eq!(Color::rgb(0xAB, 0xCD, 0xEF).to_string(), "#abcdef");
        assert_eq!(Color::parse("transparent").unwrap().to_string(), "#00000000");
    }

    #[test]
    fn serde_uses_string_form() {
        let json = serde_json::to_string(&Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(json, "\"#010203\"");
        let back: Color = serde_json::from_str("\"#fff\"").unwrap();
        assert_eq!(back, Color::WHITE);
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }

    #[test]
    fn luminance_orders_black_below_white() {
        assert_eq!(Color::BLACK.luminance(), 0);
        assert_eq!(Color::WHITE.luminance(), 255);
    }
}

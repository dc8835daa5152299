//! QR code rendering with color and logo customization
//!
//! Encoding is delegated to the `qrcode` crate; this module turns the module
//! matrix into a fixed-size canvas, composites an optional logo and verifies
//! that the result still scans.

mod decoder;
mod encoder;
mod logo;

pub use decoder::QrDecoder;
pub use encoder::{CANVAS_SIZE_RANGE, DEFAULT_CANVAS_SIZE, QrEncoder};
pub use logo::{LOGO_BACKDROP_PADDING, LOGO_SIZE_RANGE, overlay_logo};

use crate::color::Color;
use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default logo side as a percentage of the canvas
pub const DEFAULT_LOGO_SIZE: u8 = 20;

/// A QR payload as raw bytes plus its text form when valid UTF-8
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPayload {
    /// The raw data
    pub data: Vec<u8>,
    /// String representation if valid UTF-8
    pub text: Option<String>,
}

impl QrPayload {
    /// Create a new QR payload from raw bytes
    pub fn from_bytes(data: Vec<u8>) -> Self {
        let text = String::from_utf8(data.clone()).ok();
        Self { data, text }
    }

    /// Create a new QR payload from a string
    pub fn from_string(s: String) -> Self {
        Self {
            data: s.as_bytes().to_vec(),
            text: Some(s),
        }
    }

    /// Get the payload as a string, if valid UTF-8
    pub fn as_str(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Whether there is nothing meaningful to encode
    pub fn is_blank(&self) -> bool {
        match self.as_str() {
            Some(text) => text.trim().is_empty(),
            None => self.data.is_empty(),
        }
    }
}

/// User-selected colors and logo
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Customization {
    /// Color of dark modules
    pub foreground: Color,
    /// Color of light modules and the canvas
    pub background: Color,
    /// Optional image drawn at the centre of the code
    pub logo: Option<PathBuf>,
    /// Logo side as a percentage of the canvas, 10..=30
    pub logo_size: u8,
}

impl Default for Customization {
    fn default() -> Self {
        Self {
            foreground: Color::BLACK,
            background: Color::WHITE,
            logo: None,
            logo_size: DEFAULT_LOGO_SIZE,
        }
    }
}

impl Customization {
    /// Logo size clamped to the supported range
    pub fn effective_logo_size(&self) -> u8 {
        self.logo_size
            .clamp(*LOGO_SIZE_RANGE.start(), *LOGO_SIZE_RANGE.end())
    }

    /// Whether the chosen colors are likely too close for scanners
    pub fn low_contrast(&self) -> bool {
        self.foreground
            .luminance()
            .abs_diff(self.background.luminance())
            < 64
    }
}

/// Where a rendered image came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "provider", rename_all = "lowercase")]
pub enum RenderSource {
    /// Rendered in-process with customization applied
    Local,
    /// Fetched from a remote image API; customization is not applied
    Remote(&'static str),
}

/// A rendered QR code ready for download or sharing
#[derive(Debug, Clone)]
pub struct RenderedQr {
    /// Encoded text
    pub payload: String,
    /// Rendered canvas
    pub image: RgbaImage,
    /// Which renderer produced the image
    pub source: RenderSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qr_payload_from_string() {
        let payload = QrPayload::from_string("hello world".to_string());
        assert_eq!(payload.as_str(), Some("hello world"));
        assert_eq!(payload.as_bytes(), b"hello world");
    }

    #[test]
    fn test_qr_payload_from_bytes() {
        let payload = QrPayload::from_bytes(vec![0xFF, 0xFE]);
        assert!(payload.as_str().is_none());
        assert!(!payload.is_blank());
    }

    #[test]
    fn whitespace_payload_is_blank() {
        assert!(QrPayload::from_string("  \n".into()).is_blank());
        assert!(QrPayload::from_bytes(Vec::new()).is_blank());
    }

    #[test]
    fn logo_size_is_clamped() {
        let mut c = Customization {
            logo_size: 5,
            ..Customization::default()
        };
        assert_eq!(c.effective_logo_size(), 10);
        c.logo_size = 90;
        assert_eq!(c.effective_logo_size(), 30);
        c.logo_size = 22;
        assert_eq!(c.effective_logo_size(), 22);
    }

    #[test]
    fn default_colors_have_contrast() {
        assert!(!Customization::default().low_contrast());
        let washed = Customization {
            foreground: Color::rgb(200, 200, 200),
            ..Customization::default()
        };
        assert!(washed.low_contrast());
    }
}

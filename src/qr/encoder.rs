//! QR code encoder

use crate::error::{Error, Result};
use crate::qr::logo::{load_logo, overlay_logo};
use crate::qr::{Customization, QrPayload};
use image::{Rgba, RgbaImage, imageops};
use qrcode::render::{svg, unicode};
use qrcode::{EcLevel, QrCode};

/// Side of the rendered canvas in pixels
pub const DEFAULT_CANVAS_SIZE: u32 = 300;

/// Accepted canvas sides; a version 1 code needs 21 px, larger canvases only cost memory
pub const CANVAS_SIZE_RANGE: std::ops::RangeInclusive<u32> = 21..=4096;

/// QR code encoder
#[derive(Debug, Clone)]
pub struct QrEncoder {
    /// Error correction level
    ecc_level: EcLevel,
    /// Canvas side in pixels
    canvas_size: u32,
}

impl QrEncoder {
    /// Create an encoder with high error correction, so a logo can cover the centre
    pub fn new() -> Self {
        Self {
            ecc_level: EcLevel::H,
            canvas_size: DEFAULT_CANVAS_SIZE,
        }
    }

    /// Override the error correction level
    pub fn with_ecc_level(mut self, ecc_level: EcLevel) -> Self {
        self.ecc_level = ecc_level;
        self
    }

    /// Override the canvas side in pixels, clamped to [`CANVAS_SIZE_RANGE`]
    pub fn with_canvas_size(mut self, size: u32) -> Self {
        self.canvas_size = size.clamp(*CANVAS_SIZE_RANGE.start(), *CANVAS_SIZE_RANGE.end());
        self
    }

    /// Canvas side in pixels
    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    fn code(&self, payload: &QrPayload) -> Result<QrCode> {
        if payload.is_blank() {
            return Err(Error::EmptyPayload);
        }
        QrCode::with_error_correction_level(payload.as_bytes(), self.ecc_level)
            .map_err(|e| Error::QrEncode(format!("Failed to create QR code: {}", e)))
    }

    /// Render the payload onto a square canvas with the chosen colors and logo.
    pub fn encode(&self, payload: &QrPayload, customization: &Customization) -> Result<RgbaImage> {
        let code = self.code(payload)?;
        let background = customization.background.to_rgba();

        // Four modules of quiet zone on each side
        let modules = code.width() as u32 + 8;
        let module_px = (self.canvas_size / modules).max(1);

        let matrix = code
            .render::<Rgba<u8>>()
            .dark_color(customization.foreground.to_rgba())
            .light_color(background)
            .quiet_zone(true)
            .module_dimensions(module_px, module_px)
            .build();

        let mut canvas = if matrix.width() < self.canvas_size {
            let mut canvas = RgbaImage::from_pixel(self.canvas_size, self.canvas_size, background);
            let offset = i64::from((self.canvas_size - matrix.width()) / 2);
            imageops::replace(&mut canvas, &matrix, offset, offset);
            canvas
        } else {
            matrix
        };

        tracing::debug!(
            version_width = code.width(),
            module_px,
            canvas = canvas.width(),
            "Rendered QR matrix"
        );

        if let Some(path) = &customization.logo {
            let logo = load_logo(path)?;
            overlay_logo(&mut canvas, &logo, customization.effective_logo_size());
        }

        Ok(canvas)
    }

    /// Encode a string with the given customization
    pub fn encode_string(&self, data: &str, customization: &Customization) -> Result<RgbaImage> {
        let payload = QrPayload::from_string(data.to_string());
        self.encode(&payload, customization)
    }

    /// Render the payload as an SVG document. Logos are not embedded.
    pub fn to_svg(&self, payload: &QrPayload, customization: &Customization) -> Result<String> {
        let code = self.code(payload)?;
        let dark = customization.foreground.to_string();
        let light = customization.background.to_string();

        Ok(code
            .render::<svg::Color<'_>>()
            .min_dimensions(self.canvas_size, self.canvas_size)
            .dark_color(svg::Color(&dark))
            .light_color(svg::Color(&light))
            .build())
    }

    /// Render the payload with half-block characters for a terminal.
    pub fn to_terminal(&self, payload: &QrPayload) -> Result<String> {
        let code = self.code(payload)?;
        Ok(code
            .render::<unicode::Dense1x2>()
            .dark_color(unicode::Dense1x2::Light)
            .light_color(unicode::Dense1x2::Dark)
            .build())
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

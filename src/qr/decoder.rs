//! QR code decoder using rqrr, used to check that customized codes still scan

use crate::error::{Error, Result};
use crate::qr::QrPayload;
use image::{DynamicImage, GrayImage, RgbaImage};

/// QR code decoder
#[derive(Debug, Default)]
pub struct QrDecoder {}

impl QrDecoder {
    /// Create a new QR decoder with default settings
    pub fn new() -> Self {
        Self {}
    }

    /// Decode a QR code from a rendered canvas
    pub fn decode(&self, img: &RgbaImage) -> Result<QrPayload> {
        let gray = DynamicImage::ImageRgba8(img.clone()).to_luma8();
        self.decode_gray(gray)
    }

    /// Decode a QR code from a grayscale image
    pub fn decode_gray(&self, img: GrayImage) -> Result<QrPayload> {
        let mut prepared = rqrr::PreparedImage::prepare(img);
        let grids = prepared.detect_grids();

        let Some(grid) = grids.first() else {
            return Err(Error::NoQrCodeFound);
        };

        match grid.decode() {
            Ok((meta, content)) => {
                tracing::debug!(
                    "Decoded QR: version={:?}, ecc_level={:?}, length={}",
                    meta.version,
                    meta.ecc_level,
                    content.len()
                );

                Ok(QrPayload::from_bytes(content.into_bytes()))
            }
            Err(e) => Err(Error::QrDecode(format!("Decode failed: {:?}", e))),
        }
    }

    /// Whether `img` decodes back to exactly `expected`
    pub fn verify(&self, img: &RgbaImage, expected: &str) -> bool {
        match self.decode(img) {
            Ok(payload) => payload.as_str() == Some(expected),
            Err(err) => {
                tracing::debug!("Verification decode failed: {err}");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn blank_image_has_no_code() {
        let decoder = QrDecoder::new();
        let blank = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 255]));
        assert!(matches!(decoder.decode(&blank), Err(Error::NoQrCodeFound)));
        assert!(!decoder.verify(&blank, "anything"));
    }
}

//! PNG QR renderer.
//!
//! Encodes payloads at error-correction level L with 10 pixel modules and
//! the standard four-module quiet zone, then embeds the PNG as a base64
//! `data:` URI.

use std::io::Cursor;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::domain::ports::{QrImage, QrRenderError, QrRenderer};

const MODULE_PIXELS: u32 = 10;
const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Renders QR symbols as PNG data URIs.
#[derive(Debug, Clone, Copy)]
pub struct QrCodePngRenderer {
    ec_level: EcLevel,
    module_pixels: u32,
}

impl QrCodePngRenderer {
    /// Renderer with the default symbol settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ec_level: EcLevel::L,
            module_pixels: MODULE_PIXELS,
        }
    }

    fn png_bytes(&self, payload: &str) -> Result<Vec<u8>, QrRenderError> {
        let code = QrCode::with_error_correction_level(payload.as_bytes(), self.ec_level)
            .map_err(|err| QrRenderError::encode(err.to_string()))?;
        let buffer = code
            .render::<Luma<u8>>()
            .module_dimensions(self.module_pixels, self.module_pixels)
            .quiet_zone(true)
            .build();

        let mut bytes = Vec::new();
        DynamicImage::ImageLuma8(buffer)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|err| QrRenderError::image(err.to_string()))?;
        Ok(bytes)
    }
}

impl Default for QrCodePngRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl QrRenderer for QrCodePngRenderer {
    fn render(&self, payload: &str) -> Result<QrImage, QrRenderError> {
        let bytes = self.png_bytes(payload)?;
        Ok(QrImage::from_data_uri(format!(
            "{DATA_URI_PREFIX}{}",
            STANDARD.encode(bytes)
        )))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];

    fn decode(image: &QrImage) -> Vec<u8> {
        let encoded = image
            .as_data_uri()
            .strip_prefix(DATA_URI_PREFIX)
            .expect("png data uri");
        STANDARD.decode(encoded).expect("valid base64")
    }

    #[test]
    fn renders_png_data_uri() {
        let image = QrCodePngRenderer::new()
            .render("1:1700000000:0b5e4a1c-6b0e-4f43-9a37-2f9a7d1c8e11")
            .expect("render");
        let bytes = decode(&image);
        assert!(bytes.starts_with(&PNG_SIGNATURE));
    }

    #[test]
    fn image_dimensions_include_quiet_zone() {
        let image = QrCodePngRenderer::new().render("1:1000:n").expect("render");
        let decoded = image::load_from_memory(&decode(&image)).expect("decode png");
        // Version 1 symbol: 21 modules plus 4 quiet modules per side.
        assert_eq!(decoded.width(), (21 + 8) * MODULE_PIXELS);
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn oversized_payloads_fail_to_encode() {
        let payload = "x".repeat(8_000);
        let result = QrCodePngRenderer::new().render(&payload);
        assert!(matches!(result, Err(QrRenderError::Encode { .. })));
    }
}

use crate::EncodeError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode, Version};
use qrshare_config::{ErrorCorrection, QrSettings};
use std::io::Cursor;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// Turns a link into a scannable PNG, black modules on white
#[derive(Debug, Clone, Copy)]
pub struct LinkEncoder {
    settings: QrSettings,
}

impl LinkEncoder {
    pub fn new(settings: QrSettings) -> Self {
        Self { settings }
    }

    /// PNG bytes, base64 encoded for embedding in JSON
    pub fn encode_base64(&self, link: &str) -> Result<String, EncodeError> {
        let png = self.encode_png(link)?;
        Ok(STANDARD.encode(png))
    }

    pub fn encode_png(&self, link: &str) -> Result<Vec<u8>, EncodeError> {
        if link.is_empty() {
            return Err(EncodeError::EmptyInput);
        }

        tracing::debug!("Generating QR code for: {}", link);

        let code = self.build_code(link.as_bytes())?;
        let image = self.render(&code);

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
        Ok(png)
    }

    /// Configured version first; data that does not fit gets the smallest version that does
    fn build_code(&self, data: &[u8]) -> Result<QrCode, EncodeError> {
        let level = ec_level(self.settings.error_correction);

        match QrCode::with_version(data, Version::Normal(self.settings.version), level) {
            Ok(code) => Ok(code),
            Err(e) => {
                tracing::debug!(
                    "Data does not fit QR version {} ({}), selecting a larger version",
                    self.settings.version,
                    e
                );
                QrCode::with_error_correction_level(data, level)
                    .map_err(|e| EncodeError::Qr(e.to_string()))
            }
        }
    }

    fn render(&self, code: &QrCode) -> GrayImage {
        let modules = code.width() as u32;
        let colors = code.to_colors();
        let box_size = self.settings.box_size;
        let border = self.settings.border;
        let side = (modules + 2 * border) * box_size;

        GrayImage::from_fn(side, side, |x, y| {
            let (mx, my) = (x / box_size, y / box_size);
            if mx < border || my < border || mx >= border + modules || my >= border + modules {
                return LIGHT;
            }
            let index = ((my - border) * modules + (mx - border)) as usize;
            match colors[index] {
                Color::Dark => DARK,
                Color::Light => LIGHT,
            }
        })
    }
}

fn ec_level(level: ErrorCorrection) -> EcLevel {
    match level {
        ErrorCorrection::L => EcLevel::L,
        ErrorCorrection::M => EcLevel::M,
        ErrorCorrection::Q => EcLevel::Q,
        ErrorCorrection::H => EcLevel::H,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_png(png: &[u8]) -> GrayImage {
        image::load_from_memory_with_format(png, ImageFormat::Png)
            .unwrap()
            .to_luma8()
    }

    #[test]
    fn test_deterministic_output() {
        let encoder = LinkEncoder::new(QrSettings::default());
        let link = "https://drive.google.com/file/d/1AbCdEf/view?usp=sharing";

        assert_eq!(encoder.encode_base64(link).unwrap(), encoder.encode_base64(link).unwrap());
        assert_ne!(
            encoder.encode_base64(link).unwrap(),
            encoder.encode_base64("http://localhost:5000/files/x.pdf").unwrap()
        );
    }

    #[test]
    fn test_dimensions_follow_settings() {
        let settings = QrSettings {
            version: 1,
            error_correction: ErrorCorrection::L,
            box_size: 3,
            border: 2,
        };
        let image = decode_png(&LinkEncoder::new(settings).encode_png("hi").unwrap());

        // Version 1 is 21 modules wide
        assert_eq!(image.width(), (21 + 2 * 2) * 3);
        assert_eq!(image.height(), image.width());

        // Quiet zone is white, finder pattern corner is black
        assert_eq!(*image.get_pixel(0, 0), LIGHT);
        assert_eq!(*image.get_pixel(2 * 3, 2 * 3), DARK);
    }

    #[test]
    fn test_long_links_grow_the_version() {
        let encoder = LinkEncoder::new(QrSettings::default());
        let link = format!("https://example.com/files/{}", "a".repeat(600));

        let image = decode_png(&encoder.encode_png(&link).unwrap());
        assert!(image.width() > (21 + 8) * 10);
    }

    #[test]
    fn test_rejects_empty_and_oversized_input() {
        let encoder = LinkEncoder::new(QrSettings::default());

        assert!(matches!(encoder.encode_base64(""), Err(EncodeError::EmptyInput)));
        assert!(matches!(
            encoder.encode_base64(&"x".repeat(8000)),
            Err(EncodeError::Qr(_))
        ));
    }
}

//! QR symbol rasterisation.

use image::{DynamicImage, Rgb, RgbImage};
use qrcode::{EcLevel, QrCode};
use tracing::debug;

use crate::{RenderError, Result};

/// Module colour (`#000000`).
pub const DARK: Rgb<u8> = Rgb([0, 0, 0]);
/// Background colour (`#ffffff`).
pub const LIGHT: Rgb<u8> = Rgb([255, 255, 255]);

/// Generate a QR code image of exactly `width x height` pixels.
///
/// Modules are drawn with the largest integer scale that fits the smaller
/// side; the symbol is centred and the leftover border is filled with
/// `light`.
pub fn generate_qr(
    data: &str,
    width: u32,
    height: u32,
    dark: Rgb<u8>,
    light: Rgb<u8>,
    ec_level: EcLevel,
) -> Result<DynamicImage> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidSize { width, height });
    }

    let code = QrCode::with_error_correction_level(data.as_bytes(), ec_level)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    let modules = code.to_colors();
    let module_count = code.width() as u32;

    let scale = width.min(height) / module_count;
    if scale == 0 {
        return Err(RenderError::DoesNotFit {
            modules: module_count,
            width,
            height,
        });
    }
    let symbol_size = module_count * scale;
    let offset_x = (width - symbol_size) / 2;
    let offset_y = (height - symbol_size) / 2;

    debug!(module_count, scale, width, height, "Rasterising QR symbol");

    let mut img = RgbImage::from_pixel(width, height, light);

    for (i, color) in modules.iter().enumerate() {
        let x = (i as u32) % module_count;
        let y = (i as u32) / module_count;

        if *color == qrcode::Color::Dark {
            for dx in 0..scale {
                for dy in 0..scale {
                    img.put_pixel(
                        offset_x + x * scale + dx,
                        offset_y + y * scale + dy,
                        dark,
                    );
                }
            }
        }
    }

    Ok(DynamicImage::ImageRgb8(img))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(data: &str, size: u32) -> Result<DynamicImage> {
        generate_qr(data, size, size, DARK, LIGHT, EcLevel::L)
    }

    #[test]
    fn generate_qr_matches_requested_size_exactly() {
        for size in [64, 100, 256, 333, 2048] {
            let img = render("https://example.com", size).unwrap();
            assert_eq!(img.width(), size);
            assert_eq!(img.height(), size);
        }
    }

    #[test]
    fn generate_qr_uses_only_dark_and_light() {
        let img = render("https://example.com", 256).unwrap().to_rgb8();
        assert!(img.pixels().all(|p| *p == DARK || *p == LIGHT));
        assert!(img.pixels().any(|p| *p == DARK));
    }

    #[test]
    fn generate_qr_centres_symbol_with_light_border() {
        // 19 bytes at level L needs version 2 (25 modules): scale 10, border 3.
        let img = render("https://example.com", 256).unwrap().to_rgb8();
        assert_eq!(*img.get_pixel(0, 0), LIGHT);
        assert_eq!(*img.get_pixel(255, 255), LIGHT);
        // Top-left finder pattern corner.
        assert_eq!(*img.get_pixel(3, 3), DARK);
    }

    #[test]
    fn generate_qr_supports_rectangles() {
        let img = render_rect("hello", 120, 80);
        assert_eq!((img.width(), img.height()), (120, 80));
    }

    fn render_rect(data: &str, w: u32, h: u32) -> DynamicImage {
        generate_qr(data, w, h, DARK, LIGHT, EcLevel::L).unwrap()
    }

    #[test]
    fn generate_qr_rejects_target_smaller_than_symbol() {
        let err = render("https://example.com", 10).unwrap_err();
        assert!(matches!(err, RenderError::DoesNotFit { modules: 25, .. }));
    }

    #[test]
    fn generate_qr_rejects_zero_size() {
        let err = generate_qr("x", 0, 64, DARK, LIGHT, EcLevel::L).unwrap_err();
        assert!(matches!(err, RenderError::InvalidSize { .. }));
    }

    #[test]
    fn generate_qr_rejects_oversized_payload() {
        let data = "a".repeat(8000);
        let err = render(&data, 2048).unwrap_err();
        assert!(matches!(err, RenderError::Encode(_)));
    }
}

//! PNG and data-URI export.

use std::io::Cursor;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{DynamicImage, ImageFormat};

use crate::{RenderError, Result};

/// Encode an image as PNG bytes.
pub fn encode_png(img: &DynamicImage) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| RenderError::Png(e.to_string()))?;
    Ok(png)
}

/// Wrap PNG bytes in a `data:image/png;base64,` URI.
pub fn to_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DARK, EcLevel, LIGHT, generate_qr};

    #[test]
    fn encode_png_roundtrips_dimensions() {
        let img = generate_qr("https://example.com", 128, 128, DARK, LIGHT, EcLevel::L).unwrap();
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (128, 128));
    }

    #[test]
    fn to_data_uri_encodes_base64_png() {
        let uri = to_data_uri(b"\x89PNG");
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }
}

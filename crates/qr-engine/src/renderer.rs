//! Async rendering contract.

use image::Rgb;
use qrcode::EcLevel;
use tracing::{debug, warn};

use crate::export::{encode_png, to_data_uri};
use crate::qr::{DARK, LIGHT, generate_qr};
use crate::{RenderError, Result};

/// Everything the renderer needs to draw one symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    pub content: String,
    pub width: u32,
    pub height: u32,
    pub dark: Rgb<u8>,
    pub light: Rgb<u8>,
    pub ec_level: EcLevel,
}

impl RenderRequest {
    /// Square, black on white, lowest error-correction level.
    pub fn new(content: impl Into<String>, size: u32) -> Self {
        Self {
            content: content.into(),
            width: size,
            height: size,
            dark: DARK,
            light: LIGHT,
            ec_level: EcLevel::L,
        }
    }
}

/// A finished QR bitmap, PNG encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedQr {
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

impl RenderedQr {
    pub fn to_data_uri(&self) -> String {
        to_data_uri(&self.png)
    }
}

/// Capability that turns a [`RenderRequest`] into an image.
///
/// The returned future resolves exactly once, with the finished image or an
/// explicit error.
pub trait QrRenderer: Send + Sync {
    fn render(
        &self,
        request: RenderRequest,
    ) -> impl Future<Output = Result<RenderedQr>> + Send;
}

/// Renderer backed by the `qrcode` crate.
///
/// Rasterisation and PNG encoding run on the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrCodeRenderer;

impl QrCodeRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl QrRenderer for QrCodeRenderer {
    async fn render(&self, request: RenderRequest) -> Result<RenderedQr> {
        debug!(
            width = request.width,
            height = request.height,
            content_len = request.content.len(),
            "Rendering QR code"
        );

        let result = tokio::task::spawn_blocking(move || render_blocking(&request))
            .await
            .map_err(|e| RenderError::Task(e.to_string()))?;

        if let Err(e) = &result {
            warn!("QR render failed: {e}");
        }
        result
    }
}

fn render_blocking(request: &RenderRequest) -> Result<RenderedQr> {
    let img = generate_qr(
        &request.content,
        request.width,
        request.height,
        request.dark,
        request.light,
        request.ec_level,
    )?;
    let png = encode_png(&img)?;
    Ok(RenderedQr {
        width: img.width(),
        height: img.height(),
        png,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_request_defaults_to_black_on_white_level_l() {
        let req = RenderRequest::new("https://example.com", 300);
        assert_eq!((req.width, req.height), (300, 300));
        assert_eq!(req.dark, DARK);
        assert_eq!(req.light, LIGHT);
        assert_eq!(req.ec_level, EcLevel::L);
    }

    #[tokio::test]
    async fn qrcode_renderer_produces_png_of_requested_size() {
        let qr = QrCodeRenderer::new()
            .render(RenderRequest::new("https://example.com", 256))
            .await
            .unwrap();
        assert_eq!((qr.width, qr.height), (256, 256));

        let decoded = image::load_from_memory(&qr.png).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (256, 256));
        assert!(qr.to_data_uri().starts_with("data:image/png;base64,"));
    }

    #[tokio::test]
    async fn qrcode_renderer_reports_explicit_failure() {
        let err = QrCodeRenderer::new()
            .render(RenderRequest::new("https://example.com", 8))
            .await
            .unwrap_err();
        assert!(matches!(err, RenderError::DoesNotFit { .. }));
    }
}

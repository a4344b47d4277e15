//! QR rendering capability.
//!
//! Turns a text payload into an exact `width x height` black-on-white bitmap,
//! exports it as PNG or a `data:` URI, and exposes the work as an async
//! renderer whose future resolves once with the finished image or an error.

pub mod export;
pub mod qr;
pub mod renderer;

// Re-exports for convenience
pub use export::{encode_png, to_data_uri};
pub use qr::{DARK, LIGHT, generate_qr};
pub use qrcode::EcLevel;
pub use renderer::{QrCodeRenderer, QrRenderer, RenderRequest, RenderedQr};

/// Errors that can occur while producing a QR image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("QR encode error: {0}")]
    Encode(String),

    #[error("QR symbol of {modules} modules does not fit in {width}x{height}px")]
    DoesNotFit { modules: u32, width: u32, height: u32 },

    #[error("Invalid image size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("PNG export error: {0}")]
    Png(String),

    #[error("Render task failed: {0}")]
    Task(String),
}

/// Result type alias for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;

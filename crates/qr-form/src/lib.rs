//! Form controller for the QR generator page.
//!
//! Validates what the user typed, computes the informational expiration
//! date, builds the QR payload (bare URL or JSON envelope), drives the
//! renderer and exposes a single view state for the result panels.
//! The QR never expires on its own; the dates are a reference only.

pub mod controller;
pub mod error;
pub mod input;
pub mod payload;
pub mod view;

// Re-exports for convenience
pub use controller::{Download, FormConfig, FormController, PendingRender};
pub use error::SubmitError;
pub use input::{FormDefaults, FormInput};
pub use payload::{ExpirationMetadata, QrPayload};
pub use view::{Notice, PanelVisibility, ResultView, UrlFieldState};

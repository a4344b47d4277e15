//! Submission errors.
//!
//! Display strings are shown to the user as-is (blocking alert in the page,
//! error line in the CLI).

use crate::input::{EXPIRATION_MONTHS_RANGE, SIZE_RANGE};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitError {
    #[error("Por favor ingresa una URL válida")]
    EmptyUrl,

    #[error("Por favor ingresa una URL válida (debe comenzar con http:// o https://)")]
    InvalidUrl,

    #[error(
        "La expiración debe estar entre {lo} y {hi} meses (recibido {0})",
        lo = EXPIRATION_MONTHS_RANGE.start(),
        hi = EXPIRATION_MONTHS_RANGE.end()
    )]
    ExpirationOutOfRange(i64),

    #[error(
        "El tamaño debe estar entre {lo} y {hi} px (recibido {0})",
        lo = SIZE_RANGE.start(),
        hi = SIZE_RANGE.end()
    )]
    SizeOutOfRange(i64),

    #[error("Error al generar el código QR: {0}")]
    RenderFailure(String),

    #[error("La generación fue reemplazada por una solicitud más reciente")]
    Superseded,
}

impl SubmitError {
    /// Stable identifier for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyUrl => "empty_url",
            Self::InvalidUrl => "invalid_url",
            Self::ExpirationOutOfRange(_) => "expiration_out_of_range",
            Self::SizeOutOfRange(_) => "size_out_of_range",
            Self::RenderFailure(_) => "render_failure",
            Self::Superseded => "superseded",
        }
    }

    /// Whether the error comes from user input rather than rendering.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyUrl
                | Self::InvalidUrl
                | Self::ExpirationOutOfRange(_)
                | Self::SizeOutOfRange(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(SubmitError::EmptyUrl.to_string(), "Por favor ingresa una URL válida");
        assert!(SubmitError::InvalidUrl.to_string().contains("http://"));
        assert_eq!(
            SubmitError::SizeOutOfRange(10).to_string(),
            "El tamaño debe estar entre 64 y 2048 px (recibido 10)"
        );
        assert_eq!(
            SubmitError::ExpirationOutOfRange(-2).to_string(),
            "La expiración debe estar entre 1 y 120 meses (recibido -2)"
        );
    }

    #[test]
    fn kind_and_validation_flags() {
        assert_eq!(SubmitError::EmptyUrl.kind(), "empty_url");
        assert!(SubmitError::InvalidUrl.is_validation());
        assert!(!SubmitError::RenderFailure("x".into()).is_validation());
        assert_eq!(SubmitError::Superseded.kind(), "superseded");
    }
}

//! Result panel view state.
//!
//! The page has a placeholder, a result panel, a reset button and two
//! mutually exclusive notice boxes. All of their visibility is derived from
//! one [`ResultView`] so the flags cannot drift apart.

use std::fmt::Display;

use chrono::{DateTime, Locale, TimeZone};
use serde::Serialize;

/// Which explanatory box accompanies a rendered QR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Notice {
    /// Bare URL: nothing enforces the expiration.
    Warning,
    /// JSON envelope: a validating app is required.
    Info,
}

impl Notice {
    pub fn for_metadata(include_metadata: bool) -> Self {
        if include_metadata { Self::Info } else { Self::Warning }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultView {
    #[default]
    Empty,
    Rendered {
        notice: Notice,
        /// Shown only for bare-URL payloads.
        url_text: Option<String>,
        expiration_text: String,
    },
}

/// Visibility of every panel on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PanelVisibility {
    pub placeholder: bool,
    pub result: bool,
    pub reset_button: bool,
    pub url_info: bool,
    pub expiration_info: bool,
    pub warning_box: bool,
    pub info_box: bool,
}

impl ResultView {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }

    pub fn panels(&self) -> PanelVisibility {
        match self {
            Self::Empty => PanelVisibility {
                placeholder: true,
                result: false,
                reset_button: false,
                url_info: false,
                expiration_info: false,
                warning_box: false,
                info_box: false,
            },
            Self::Rendered {
                notice, url_text, ..
            } => PanelVisibility {
                placeholder: false,
                result: true,
                reset_button: true,
                url_info: url_text.is_some(),
                expiration_info: true,
                warning_box: *notice == Notice::Warning,
                info_box: *notice == Notice::Info,
            },
        }
    }
}

/// Inline marker on the URL field, independent of the result panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlFieldState {
    #[default]
    Valid,
    Invalid,
}

impl UrlFieldState {
    pub fn is_invalid(self) -> bool {
        self == Self::Invalid
    }
}

/// Spanish long date, e.g. `19 de octubre de 2026`.
pub fn format_long_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format_localized("%-d de %B de %Y", Locale::es_ES)
        .to_string()
}

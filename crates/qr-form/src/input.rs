//! Raw form input, lenient number parsing and help texts.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use url::Url;

/// Accepted expiration, in months.
pub const EXPIRATION_MONTHS_RANGE: RangeInclusive<i64> = 1..=120;
/// Accepted image side, in pixels.
pub const SIZE_RANGE: RangeInclusive<i64> = 64..=2048;

pub const METADATA_ON_HELP: &str =
    "El QR contendrá un JSON con la URL y fechas. Necesitarás una app que valide la fecha.";
pub const METADATA_OFF_HELP: &str =
    "El QR contendrá solo la URL. No hay validación real de expiración.";

/// Form fields exactly as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormInput {
    pub url: String,
    pub expiration: String,
    pub size: String,
    pub include_metadata: bool,
}

impl FormInput {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn expiration(mut self, months: impl ToString) -> Self {
        self.expiration = months.to_string();
        self
    }

    pub fn size(mut self, px: impl ToString) -> Self {
        self.size = px.to_string();
        self
    }

    pub fn metadata(mut self, include: bool) -> Self {
        self.include_metadata = include;
        self
    }
}

/// Values used when a numeric field is empty, unparsable or zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormDefaults {
    pub expiration_months: u32,
    pub size: u32,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            expiration_months: 12,
            size: 256,
        }
    }
}

/// Whether `s` parses as an absolute URL (scheme required).
pub fn is_valid_url(s: &str) -> bool {
    Url::parse(s).is_ok()
}

/// Parse the leading integer of `raw`, ignoring leading whitespace and any
/// trailing garbage (`"12abc"` -> 12, `"3.9"` -> 3). Saturates on overflow.
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        &digits[..end]
    };
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

/// Submission value for a numeric field: zero and unparsable fall back to
/// `default`.
pub fn number_or_default(raw: &str, default: u32) -> i64 {
    parse_leading_int(raw)
        .filter(|n| *n != 0)
        .unwrap_or(i64::from(default))
}

/// `"1 mes desde ahora"` / `"{n} meses desde ahora"`. Zero and unparsable
/// input read as one month.
pub fn expiration_help(raw: &str) -> String {
    let months = parse_leading_int(raw).filter(|n| *n != 0).unwrap_or(1);
    let unit = if months == 1 { "mes" } else { "meses" };
    format!("{months} {unit} desde ahora")
}

/// `"{n}x{n}px"`; unparsable input shows `default`.
pub fn size_help(raw: &str, default: u32) -> String {
    let size = parse_leading_int(raw).unwrap_or(i64::from(default));
    format!("{size}x{size}px")
}

pub fn metadata_help(checked: bool) -> &'static str {
    if checked {
        METADATA_ON_HELP
    } else {
        METADATA_OFF_HELP
    }
}

//! QR payload construction and expiration arithmetic.

use chrono::offset::LocalResult;
use chrono::{DateTime, Datelike, Days, NaiveDate, SecondsFormat, TimeDelta, TimeZone, Utc};
use serde::{Deserialize, Serialize};

pub const METADATA_NOTE: &str =
    "Este QR contiene metadata. Tu aplicación debe validar la fecha de expiración.";

/// JSON envelope encoded when metadata mode is on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpirationMetadata {
    pub url: String,
    pub creado: String,
    pub expira: String,
    pub nota: String,
}

/// The string that ends up inside the QR symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrPayload {
    Url(String),
    Metadata(ExpirationMetadata),
}

impl QrPayload {
    pub fn build(
        url: &str,
        include_metadata: bool,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        if !include_metadata {
            return Self::Url(url.to_string());
        }
        Self::Metadata(ExpirationMetadata {
            url: url.to_string(),
            creado: iso_timestamp(&created_at),
            expira: iso_timestamp(&expires_at),
            nota: METADATA_NOTE.to_string(),
        })
    }

    pub fn encode(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Url(url) => Ok(url.clone()),
            Self::Metadata(meta) => serde_json::to_string(meta),
        }
    }
}

/// Calendar-month addition in the zone of `from`.
///
/// Only the month field moves; a day past the end of the target month rolls
/// into the next one (Jan 31 + 1 month = Mar 3, or Mar 2 in a leap year).
/// A wall time that falls in a DST gap is pushed forward by an hour.
pub fn add_months<Tz: TimeZone>(from: &DateTime<Tz>, months: u32) -> Option<DateTime<Tz>> {
    let local = from.naive_local();
    let month0 = i64::from(local.month0()) + i64::from(months);
    let year = i32::try_from(i64::from(local.year()) + month0.div_euclid(12)).ok()?;
    let month = u32::try_from(month0.rem_euclid(12)).ok()? + 1;

    let date = NaiveDate::from_ymd_opt(year, month, 1)?
        .checked_add_days(Days::new(u64::from(local.day() - 1)))?;
    let wall = date.and_time(local.time());

    let tz = from.timezone();
    match tz.from_local_datetime(&wall) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => Some(at),
        LocalResult::None => tz
            .from_local_datetime(&(wall + TimeDelta::hours(1)))
            .earliest(),
    }
}

/// `2026-10-19T08:30:00.000Z`
pub fn iso_timestamp(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

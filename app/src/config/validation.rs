//! Setting value validation.

use std::net::IpAddr;

use qr_form::input::{EXPIRATION_MONTHS_RANGE, SIZE_RANGE};

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "SERVER_PORT" => validate_int_range(value, 1, 65535)?,
        "BIND_ADDRESS" => {
            value
                .parse::<IpAddr>()
                .map_err(|_| "must be an IPv4 or IPv6 address")?;
        }
        "QR_DEFAULT_EXPIRATION_MONTHS" => validate_int_range(
            value,
            *EXPIRATION_MONTHS_RANGE.start(),
            *EXPIRATION_MONTHS_RANGE.end(),
        )?,
        "QR_DEFAULT_SIZE" => validate_int_range(value, *SIZE_RANGE.start(), *SIZE_RANGE.end())?,
        "QR_RENDER_TIMEOUT_MS" => validate_int_range(value, 100, 60_000)?,
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if v < min || v > max {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

//! Local validation of callback URLs and phone numbers

use crate::{DarajaError, Result};
use url::Url;

// Safaricom-assigned 7xx prefix windows.
const SAF_PREFIXES: [(u32, u32); 4] = [(700, 729), (757, 759), (768, 769), (790, 792)];

/// Check if a given string is a valid callback URL.
///
/// Callback URLs must be http(s), name a host, and carry an explicit path
/// component.
pub fn is_url(value: &str) -> bool {
    let parsed = match Url::parse(value) {
        Ok(parsed) => parsed,
        Err(_) => return false,
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }
    if !parsed.has_host() {
        return false;
    }

    // Url normalizes a missing path to "/", so a bare origin is only
    // accepted when the trailing slash was actually written out.
    parsed.path() != "/" || value.ends_with('/')
}

/// Validate a callback URL, passing the value through unchanged.
pub fn checked_url(value: String) -> Result<String> {
    if is_url(&value) {
        Ok(value)
    } else {
        Err(DarajaError::invalid_url(value))
    }
}

/// Normalize a Safaricom phone number to its `254…` form.
///
/// Accepts `07…`, `7…`, `2547…` and `+2547…` renditions and rejects numbers
/// outside the Safaricom prefix windows.
pub fn format_saf_number(value: &str) -> Result<String> {
    let subscriber = value
        .strip_prefix("+254")
        .or_else(|| value.strip_prefix("254"))
        .or_else(|| value.strip_prefix('0'))
        .unwrap_or(value);

    if subscriber.len() != 9 || !subscriber.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DarajaError::invalid_phone_number(value));
    }

    let prefix: u32 = subscriber[..3]
        .parse()
        .map_err(|_| DarajaError::invalid_phone_number(value))?;
    let allowed = SAF_PREFIXES
        .iter()
        .any(|(lo, hi)| (*lo..=*hi).contains(&prefix));
    if !allowed {
        return Err(DarajaError::invalid_phone_number(value));
    }

    Ok(format!("254{}", subscriber))
}

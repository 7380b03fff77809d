//! Checkout password derivation

use base64::{engine::general_purpose, Engine as _};
use chrono::{Duration, Utc};

// The checkout endpoints expect East Africa Time (GMT+3).
const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

/// Derive the checkout password for a short code and passkey.
///
/// Returns the base64-encoded password together with the timestamp it was
/// derived from, since both must be sent in the same request.
pub fn stk_password(short_code: &str, passkey: &str) -> (String, String) {
    let timestamp = (Utc::now() + Duration::hours(3))
        .format(TIMESTAMP_FORMAT)
        .to_string();
    let password =
        general_purpose::STANDARD.encode(format!("{}{}{}", short_code, passkey, timestamp));
    (password, timestamp)
}

//! Request identifier generation
//!
//! Ids are carried on the wire but never used for matching: each call owns its
//! own connection, so uniqueness here is best-effort.

use rand::Rng;

/// Get current timestamp in milliseconds since Unix epoch
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Generate a request ID for one remote call
///
/// Format: `{timestamp_ms}-{random_hex}`
/// Example: `1738300800123-0a1b2c3d`
pub fn generate_request_id() -> String {
    let timestamp = now_ms();
    let random: u32 = rand::rng().random();
    format!("{}-{:08x}", timestamp, random)
}

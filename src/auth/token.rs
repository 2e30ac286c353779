// src/auth/token.rs
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;

/// Random bytes behind every entity id; encodes to 22 characters.
pub const ID_BYTES: usize = 16;

/// Opaque id for a new record: OS randomness, URL-safe base64 without padding.
pub fn new_id() -> String {
    let mut raw = [0u8; ID_BYTES];
    OsRng.fill_bytes(&mut raw);
    URL_SAFE_NO_PAD.encode(raw)
}

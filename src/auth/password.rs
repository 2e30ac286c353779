// src/auth/password.rs
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::errors::AccountError;

pub const SALT_BYTES: usize = 16;

/// Special characters accepted by the password policy.
const SPECIALS: &str = "!@#$%^&*";

/// Salted SHA-256 of a password. Serialized as `{ "salt": .., "digest": .. }`,
/// both URL-safe base64.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash {
    pub salt: String,
    pub digest: String,
}

impl PasswordHash {
    /// Hash `password` under a fresh random salt.
    pub fn new(password: &str) -> Self {
        let mut salt = [0u8; SALT_BYTES];
        OsRng.fill_bytes(&mut salt);
        Self::with_salt(password, &salt)
    }

    pub fn with_salt(password: &str, salt: &[u8]) -> Self {
        Self {
            salt: URL_SAFE_NO_PAD.encode(salt),
            digest: URL_SAFE_NO_PAD.encode(salted_digest(salt, password)),
        }
    }

    pub fn verify(&self, password: &str) -> bool {
        let (Ok(salt), Ok(expected)) = (
            URL_SAFE_NO_PAD.decode(&self.salt),
            URL_SAFE_NO_PAD.decode(&self.digest),
        ) else {
            return false;
        };
        digests_match(&salted_digest(&salt, password), &expected)
    }
}

fn salted_digest(salt: &[u8], password: &str) -> [u8; 32] {
    let out = Sha256::new()
        .chain_update(salt)
        .chain_update(password.as_bytes())
        .finalize();
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&out);
    digest
}

/// Touches every byte whatever the position of the first mismatch.
fn digests_match(computed: &[u8; 32], stored: &[u8]) -> bool {
    stored.len() == computed.len()
        && computed
            .iter()
            .zip(stored)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

/// Policy for changed passwords: at least 8 chars with an uppercase letter,
/// a lowercase letter, a digit and one of `!@#$%^&*`.
pub fn validate_new_password(password: &str) -> Result<(), AccountError> {
    let checks = [
        (password.chars().count() >= 8, "at least 8 characters"),
        (password.chars().any(|c| c.is_ascii_uppercase()), "an uppercase letter"),
        (password.chars().any(|c| c.is_ascii_lowercase()), "a lowercase letter"),
        (password.chars().any(|c| c.is_ascii_digit()), "a number"),
        (password.chars().any(|c| SPECIALS.contains(c)), "a special character"),
    ];

    let missing: Vec<&str> = checks
        .iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, what)| *what)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AccountError::InvalidPassword(format!(
            "password needs {}",
            missing.join(", ")
        )))
    }
}

//! One-way salted password hashing (argon2id, PHC string format).

use argon2::{password_hash::{PasswordHasher, PasswordVerifier, SaltString}, Argon2, PasswordHash};
use once_cell::sync::Lazy;
use rand::rngs::OsRng;

use super::errors::AuthError;

/// Verified against when the username is unknown so both paths cost one hash.
static DUMMY_HASH: Lazy<Option<String>> = Lazy::new(|| hash_password("carwash-timing-equalizer").ok());

pub fn hash_password(plain: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthError::HashError(e.to_string()))
}

/// False on mismatch and on an unparseable stored hash.
pub fn verify_password(plain: &str, digest: &str) -> bool {
    match PasswordHash::new(digest) {
        Ok(parsed) => Argon2::default().verify_password(plain.as_bytes(), &parsed).is_ok(),
        Err(_) => false,
    }
}

pub(crate) fn burn_verification(plain: &str) {
    if let Some(hash) = DUMMY_HASH.as_deref() {
        let _ = verify_password(plain, hash);
    }
}

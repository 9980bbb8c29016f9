//! Argon2 password hashing and verification.
//!
//! Hashing is deliberately slow and salted; the cost lands on the handling
//! worker only. Verification reports every failure — wrong password and
//! unparseable stored hash alike — as one uniform credential mismatch.
use super::AuthError;
use argon2::Argon2;
use argon2::PasswordHash;
use argon2::PasswordHasher;
use argon2::PasswordVerifier;
use argon2::password_hash::SaltString;

fn salt() -> SaltString {
    use rand::Rng;
    let ref mut bytes = [0u8; 16];
    rand::rng().fill(bytes);
    SaltString::encode_b64(bytes).expect("salt")
}

/// One-way hash for storage on the user row. Fails only on underlying
/// library faults, which are fatal to the calling request.
pub fn hash(password: &str) -> Result<String, AuthError> {
    Argon2::default()
        .hash_password(password.as_bytes(), &salt())
        .map(|h| h.to_string())
        .map_err(AuthError::upstream)
}

/// Checks a candidate password against a stored hash.
pub fn verify(hashword: &str, password: &str) -> Result<(), AuthError> {
    PasswordHash::new(hashword)
        .ok()
        .filter(|hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), hash)
                .is_ok()
        })
        .map(|_| ())
        .ok_or(AuthError::CredentialMismatch)
}

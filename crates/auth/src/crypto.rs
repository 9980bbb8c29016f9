use super::*;
use smush_core::ID;
use std::time::Duration;
use std::time::SystemTime;

/// Access tokens authorize API calls for five minutes.
const ACCESS_TOKEN_DURATION: Duration = Duration::from_secs(5 * 60);
/// Refresh tokens gate silent access-token rotation for a day.
const REFRESH_TOKEN_DURATION: Duration = Duration::from_secs(24 * 60 * 60);
/// Reset tokens authorize a password change for fifteen minutes.
const RESET_TOKEN_DURATION: Duration = Duration::from_secs(15 * 60);

/// Token manager: issues, validates, refreshes, and decodes signed tokens.
///
/// The signing secret is a process-lifetime constant loaded once at startup;
/// it is never rotated at runtime. Validation is pure and stateless — only
/// the signature and the embedded expiry are trusted.
pub struct Crypto {
    encoding: jsonwebtoken::EncodingKey,
    decoding: jsonwebtoken::DecodingKey,
}

impl Crypto {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: jsonwebtoken::EncodingKey::from_secret(secret),
            decoding: jsonwebtoken::DecodingKey::from_secret(secret),
        }
    }
    /// Missing `JWT_SECRET` is a fatal startup condition, not a request error.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("JWT_SECRET")
                .expect("JWT_SECRET must be set")
                .as_bytes(),
        )
    }
    /// Signs new claims for a user with the given absolute expiry.
    pub fn issue(&self, user: ID<Member>, expires: SystemTime) -> Result<String, AuthError> {
        let ref claims = Claims::new(user, expires);
        jsonwebtoken::encode(&jsonwebtoken::Header::default(), claims, &self.encoding)
            .map_err(AuthError::upstream)
    }
    /// Verifies signature and expiry. Every failure collapses to TokenInvalid.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Self::strict())
            .map(|data| data.claims)
            .map_err(|_| AuthError::TokenInvalid)
    }
    /// Re-signs the claims of an existing token with a new expiry.
    ///
    /// The old token may already be expired — refresh exists to revive an
    /// access token after its short lifetime — so only the signature is
    /// checked here. The refresh token gating the operation is validated
    /// separately by the caller.
    pub fn refresh(&self, token: &str, expires: SystemTime) -> Result<String, AuthError> {
        self.decode(token)
            .and_then(|claims| self.issue(claims.user(), expires))
    }
    /// Extracts the subject without requiring non-expiry.
    pub fn subject(&self, token: &str) -> Result<ID<Member>, AuthError> {
        self.decode(token).map(|claims| claims.user())
    }
    /// Signature-only decode; expiry is deliberately not checked.
    fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Self::lenient())
            .map(|data| data.claims)
            .map_err(|_| AuthError::TokenInvalid)
    }
    /// Sha256 digest of a token string, for constant-time comparison.
    pub fn digest(token: &str) -> [u8; 32] {
        use sha2::Digest;
        sha2::Sha256::digest(token.as_bytes()).into()
    }
    fn strict() -> jsonwebtoken::Validation {
        let mut validation = jsonwebtoken::Validation::default();
        validation.leeway = 0;
        validation
    }
    fn lenient() -> jsonwebtoken::Validation {
        let mut validation = jsonwebtoken::Validation::default();
        validation.validate_exp = false;
        validation
    }
    pub const fn access_ttl() -> Duration {
        ACCESS_TOKEN_DURATION
    }
    pub const fn refresh_ttl() -> Duration {
        REFRESH_TOKEN_DURATION
    }
    pub const fn reset_ttl() -> Duration {
        RESET_TOKEN_DURATION
    }
}

use super::*;
use std::time::SystemTime;

/// Password-reset link construction and redemption checks.
///
/// The reset token is a short-lived signed token that is additionally gated
/// server-side: redemption requires it to equal the copy persisted on the
/// user row, so a superseded or already-used token cannot be replayed.
pub struct Reset {
    base: String,
}

impl Reset {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
    /// Missing `APP_URL` is a fatal startup condition.
    pub fn from_env() -> Self {
        Self::new(std::env::var("APP_URL").expect("APP_URL must be set"))
    }
    /// Reset link embedding the token and its expiry (unix millis) as query
    /// parameters. The token alphabet is URL-safe already.
    pub fn url(&self, token: &str, expires: SystemTime) -> String {
        format!(
            "{}/reset-password/token?t={}&e={}",
            self.base.trim_end_matches('/'),
            token,
            claims::unix(expires) * 1000,
        )
    }
    /// Constant-time equality between a submitted token and the stored copy.
    /// An empty stored copy (cleared or never set) never matches.
    pub fn matches(submitted: &str, stored: &str) -> bool {
        !stored.is_empty() && Crypto::digest(submitted) == Crypto::digest(stored)
    }
}

/// Errors surfaced by the authentication core.
///
/// Several distinct internal causes deliberately collapse into one variant
/// (signature mismatch, malformed token, and expiry all become
/// [`AuthError::TokenInvalid`]) so callers learn nothing beyond
/// "invalid/expired".
#[derive(Debug, Clone)]
pub enum AuthError {
    /// Wrong password, or a stored hash that could not be parsed.
    CredentialMismatch,
    /// Bad signature, malformed structure, or expired token.
    TokenInvalid,
    /// Token verifies but is not the currently-active reset token.
    ResetTokenMismatch,
    /// No such user or email address.
    NotFound,
    /// Database, signing, or mail transport failure.
    Upstream(String),
}

impl AuthError {
    /// Wraps a collaborator failure, keeping only its message.
    pub fn upstream(e: impl std::fmt::Display) -> Self {
        Self::Upstream(e.to_string())
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CredentialMismatch => write!(f, "invalid email or password"),
            Self::TokenInvalid => write!(f, "invalid or expired token"),
            Self::ResetTokenMismatch => write!(f, "invalid or expired reset request"),
            Self::NotFound => write!(f, "no such user"),
            Self::Upstream(s) => write!(f, "upstream failure: {}", s),
        }
    }
}

impl std::error::Error for AuthError {}

#[cfg(feature = "server")]
impl actix_web::ResponseError for AuthError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        use actix_web::http::StatusCode;
        match self {
            Self::CredentialMismatch => StatusCode::UNAUTHORIZED,
            Self::TokenInvalid => StatusCode::UNAUTHORIZED,
            Self::ResetTokenMismatch => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

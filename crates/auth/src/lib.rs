//! Authentication and session lifecycle management.
//!
//! JWT-based dual-token sessions with Argon2 password hashing. An access
//! token (short-lived) authorizes API calls; a refresh token (long-lived)
//! silently mints replacement access tokens until it expires itself. Token
//! validation is purely cryptographic — no session table is consulted.
//!
//! ## Core
//!
//! - [`Crypto`] — token issuance, validation, refresh, and subject extraction
//! - [`Claims`] — signed token payload (subject id + expiry)
//! - [`password`] — Argon2 hashing and verification
//! - [`Reset`] — password-reset links and redemption checks
//!
//! ## HTTP layer (feature `server`)
//!
//! - [`Gate`] — middleware guarding protected route prefixes
//! - [`Auth`] / [`Admin`] — identity and role extractors
//! - [`session`] — the cookie contract binding tokens to HTTP exchanges
//! - handlers for register, login, logout, refresh, and password reset
mod claims;
mod crypto;
mod dto;
mod error;
mod member;
mod reset;
mod role;
pub mod password;

pub use claims::*;
pub use crypto::*;
pub use dto::*;
pub use error::*;
pub use member::*;
pub use reset::*;
pub use role::*;

#[cfg(feature = "database")]
mod repository;
#[cfg(feature = "database")]
pub use repository::*;

#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod mailer;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub mod session;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use mailer::*;
#[cfg(feature = "server")]
pub use middleware::*;

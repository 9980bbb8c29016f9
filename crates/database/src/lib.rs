//! PostgreSQL integration for the smush backend.
//!
//! Low-level database connectivity and table metadata. Entity row mapping
//! lives next to the domain types that own it; this crate only knows how to
//! connect and what the tables are called.
//!
//! ## Connectivity
//!
//! - [`db()`] — Establishes a database connection from `DB_URL`
//!
//! ## Metadata
//!
//! - [`Schema`] — Table metadata and DDL generation
//! - Table name constants for all persistent entities
mod schema;

pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes the PostgreSQL connection from `DB_URL` and returns an
/// `Arc<Client>` suitable for sharing across async tasks. The connection
/// task is detached onto the runtime.
///
/// # Panics
///
/// A missing `DB_URL` or an unreachable database is fatal at startup.
pub async fn db() -> Arc<Client> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let ref url = std::env::var("DB_URL").expect("DB_URL must be set");
    let (client, connection) = tokio_postgres::connect(url, tls)
        .await
        .expect("database connection failed");
    tokio::spawn(connection);
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await
        .expect("set client_min_messages");
    Arc::new(client)
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for registered user accounts and their persisted tokens.
#[rustfmt::skip]
pub const USERS:      &str = "users";
/// Table for role definitions.
#[rustfmt::skip]
pub const ROLES:      &str = "roles";
/// Table for user/role assignments.
#[rustfmt::skip]
pub const USER_ROLES: &str = "user_roles";

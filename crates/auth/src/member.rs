use smush_core::ID;
use smush_core::Unique;

/// Registered user with verified identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    id: ID<Self>,
    username: String,
    email: String,
}

impl Member {
    pub fn new(id: ID<Self>, username: String, email: String) -> Self {
        Self {
            id,
            username,
            email,
        }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
    pub fn email(&self) -> &str {
        &self.email
    }
}

impl Unique for Member {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// Login credentials as stored on the user row. The hash is produced once at
/// registration and replaced on password change/reset; the plaintext never
/// crosses the server boundary.
#[derive(Debug, Clone)]
pub struct Credential {
    user: ID<Member>,
    email: String,
    hashword: String,
}

impl Credential {
    pub fn new(user: ID<Member>, email: String, hashword: String) -> Self {
        Self {
            user,
            email,
            hashword,
        }
    }
    pub fn user(&self) -> ID<Member> {
        self.user
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn hashword(&self) -> &str {
        &self.hashword
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use smush_database::*;

    /// Schema for the users table. The row carries three columns invisible
    /// to the Member domain type: the password hash and the persisted
    /// refresh/reset token copies.
    impl Schema for Member {
        fn name() -> &'static str {
            USERS
        }
        fn columns() -> &'static [tokio_postgres::types::Type] {
            &[
                tokio_postgres::types::Type::UUID,
                tokio_postgres::types::Type::VARCHAR,
                tokio_postgres::types::Type::VARCHAR,
                tokio_postgres::types::Type::TEXT,
                tokio_postgres::types::Type::TEXT,
                tokio_postgres::types::Type::TEXT,
            ]
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id             UUID PRIMARY KEY,
                    username       VARCHAR(32) UNIQUE NOT NULL,
                    email          VARCHAR(255) UNIQUE NOT NULL,
                    hashword       TEXT NOT NULL,
                    refresh_token  TEXT NOT NULL DEFAULT '',
                    reset_token    TEXT NOT NULL DEFAULT ''
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_username ON ",
                USERS,
                " (username);
                 CREATE INDEX IF NOT EXISTS idx_users_email ON ",
                USERS,
                " (email);"
            )
        }
    }
}

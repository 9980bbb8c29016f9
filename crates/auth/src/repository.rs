use super::*;
use async_trait::async_trait;
use smush_core::ID;
use smush_core::Unique;
use smush_database::*;
use tokio_postgres::Client;

/// Capability interface over the relational store.
///
/// Abstracts SQL from the auth core so handlers and middleware can run
/// against in-memory fakes. Every persisted-token operation is a single
/// independent row update; last writer wins.
#[async_trait]
pub trait Database: Send + Sync {
    async fn credential(&self, email: &str) -> Result<Option<Credential>, AuthError>;
    async fn profile(&self, user: ID<Member>) -> Result<Option<Member>, AuthError>;
    async fn roles(&self, user: ID<Member>) -> Result<Vec<Role>, AuthError>;
    async fn exists(&self, email: &str) -> Result<bool, AuthError>;
    async fn create(&self, member: &Member, hashword: &str) -> Result<(), AuthError>;
    async fn update_refresh_token(&self, user: ID<Member>, token: &str) -> Result<(), AuthError>;
    async fn update_reset_token(&self, user: ID<Member>, token: &str) -> Result<(), AuthError>;
    async fn reset_token(&self, user: ID<Member>) -> Result<Option<String>, AuthError>;
    async fn update_hashword(&self, user: ID<Member>, hashword: &str) -> Result<(), AuthError>;
}

#[async_trait]
impl Database for Client {
    async fn credential(&self, email: &str) -> Result<Option<Credential>, AuthError> {
        self.query_opt(
            const_format::concatcp!("SELECT id, email, hashword FROM ", USERS, " WHERE email = $1"),
            &[&email],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                Credential::new(
                    ID::from(row.get::<_, uuid::Uuid>(0)),
                    row.get::<_, String>(1),
                    row.get::<_, String>(2),
                )
            })
        })
        .map_err(AuthError::upstream)
    }

    async fn profile(&self, user: ID<Member>) -> Result<Option<Member>, AuthError> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, username, email FROM ",
                USERS,
                " WHERE id = $1"
            ),
            &[&user.inner()],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                Member::new(
                    ID::from(row.get::<_, uuid::Uuid>(0)),
                    row.get::<_, String>(1),
                    row.get::<_, String>(2),
                )
            })
        })
        .map_err(AuthError::upstream)
    }

    async fn roles(&self, user: ID<Member>) -> Result<Vec<Role>, AuthError> {
        self.query(
            const_format::concatcp!(
                "SELECT r.id, r.name FROM ",
                ROLES,
                " r JOIN ",
                USER_ROLES,
                " ur ON ur.role_id = r.id WHERE ur.user_id = $1"
            ),
            &[&user.inner()],
        )
        .await
        .map(|rows| {
            rows.into_iter()
                .map(|row| {
                    Role::new(
                        ID::from(row.get::<_, uuid::Uuid>(0)),
                        row.get::<_, String>(1),
                    )
                })
                .collect()
        })
        .map_err(AuthError::upstream)
    }

    async fn exists(&self, email: &str) -> Result<bool, AuthError> {
        self.query_opt(
            const_format::concatcp!("SELECT 1 FROM ", USERS, " WHERE email = $1"),
            &[&email],
        )
        .await
        .map(|opt| opt.is_some())
        .map_err(AuthError::upstream)
    }

    async fn create(&self, member: &Member, hashword: &str) -> Result<(), AuthError> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (id, username, email, hashword) VALUES ($1, $2, $3, $4)"
            ),
            &[
                &member.id().inner(),
                &member.username(),
                &member.email(),
                &hashword,
            ],
        )
        .await
        .map(|_| ())
        .map_err(AuthError::upstream)
    }

    async fn update_refresh_token(&self, user: ID<Member>, token: &str) -> Result<(), AuthError> {
        self.execute(
            const_format::concatcp!("UPDATE ", USERS, " SET refresh_token = $2 WHERE id = $1"),
            &[&user.inner(), &token],
        )
        .await
        .map(|_| ())
        .map_err(AuthError::upstream)
    }

    async fn update_reset_token(&self, user: ID<Member>, token: &str) -> Result<(), AuthError> {
        self.execute(
            const_format::concatcp!("UPDATE ", USERS, " SET reset_token = $2 WHERE id = $1"),
            &[&user.inner(), &token],
        )
        .await
        .map(|_| ())
        .map_err(AuthError::upstream)
    }

    async fn reset_token(&self, user: ID<Member>) -> Result<Option<String>, AuthError> {
        self.query_opt(
            const_format::concatcp!("SELECT reset_token FROM ", USERS, " WHERE id = $1"),
            &[&user.inner()],
        )
        .await
        .map(|opt| opt.map(|row| row.get::<_, String>(0)))
        .map_err(AuthError::upstream)
    }

    async fn update_hashword(&self, user: ID<Member>, hashword: &str) -> Result<(), AuthError> {
        self.execute(
            const_format::concatcp!("UPDATE ", USERS, " SET hashword = $2 WHERE id = $1"),
            &[&user.inner(), &hashword],
        )
        .await
        .map(|_| ())
        .map_err(AuthError::upstream)
    }
}

/// Creates tables and indices, and seeds the admin role.
/// Idempotent; runs at server startup.
pub async fn migrate(client: &Client) -> Result<(), AuthError> {
    for ddl in [
        Member::creates(),
        Member::indices(),
        Role::creates(),
        Role::indices(),
        Assignment::creates(),
        Assignment::indices(),
    ] {
        client.batch_execute(ddl).await.map_err(AuthError::upstream)?;
    }
    client
        .execute(
            const_format::concatcp!(
                "INSERT INTO ",
                ROLES,
                " (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING"
            ),
            &[&uuid::Uuid::now_v7(), &smush_core::ADMIN_ROLE],
        )
        .await
        .map(|_| ())
        .map_err(AuthError::upstream)
}

use super::*;
use smush_core::ID;
use smush_core::Unique;

/// Role definition. Read-only to this subsystem; assignments answer only
/// "does this user hold the admin role".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Role {
    id: ID<Self>,
    name: String,
}

impl Role {
    pub fn new(id: ID<Self>, name: String) -> Self {
        Self { id, name }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn admin(&self) -> bool {
        self.name == smush_core::ADMIN_ROLE
    }
}

impl Unique for Role {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

/// User/role assignment, persisted in the join table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Assignment {
    user: ID<Member>,
    role: ID<Role>,
}

impl Assignment {
    pub fn new(user: ID<Member>, role: ID<Role>) -> Self {
        Self { user, role }
    }
    pub fn user(&self) -> ID<Member> {
        self.user
    }
    pub fn role(&self) -> ID<Role> {
        self.role
    }
}

#[cfg(feature = "database")]
mod schema {
    use super::*;
    use smush_database::*;

    impl Schema for Role {
        fn name() -> &'static str {
            ROLES
        }
        fn columns() -> &'static [tokio_postgres::types::Type] {
            &[
                tokio_postgres::types::Type::UUID,
                tokio_postgres::types::Type::VARCHAR,
            ]
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                ROLES,
                " (
                    id    UUID PRIMARY KEY,
                    name  VARCHAR(32) UNIQUE NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_roles_name ON ",
                ROLES,
                " (name);"
            )
        }
    }

    impl Schema for Assignment {
        fn name() -> &'static str {
            USER_ROLES
        }
        fn columns() -> &'static [tokio_postgres::types::Type] {
            &[
                tokio_postgres::types::Type::UUID,
                tokio_postgres::types::Type::UUID,
            ]
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USER_ROLES,
                " (
                    user_id  UUID NOT NULL REFERENCES ",
                USERS,
                "(id) ON DELETE CASCADE,
                    role_id  UUID NOT NULL REFERENCES ",
                ROLES,
                "(id) ON DELETE CASCADE,
                    PRIMARY KEY (user_id, role_id)
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_user_roles_user ON ",
                USER_ROLES,
                " (user_id);"
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn admin_is_keyed_by_name() {
        assert!(Role::new(ID::default(), "admin".into()).admin());
        assert!(!Role::new(ID::default(), "moderator".into()).admin());
    }
}

use super::*;
use serde::Deserialize;
use serde::Serialize;
use smush_core::Unique;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct UserInfo {
    pub id: String,
    pub username: String,
    pub email: String,
    pub roles: Vec<String>,
}

impl UserInfo {
    pub fn new(member: &Member, roles: &[Role]) -> Self {
        Self {
            id: member.id().to_string(),
            username: member.username().to_string(),
            email: member.email().to_string(),
            roles: roles.iter().map(|r| r.name().to_string()).collect(),
        }
    }
}

/// Expirations are unix seconds so the client can schedule its next
/// proactive refresh.
#[derive(Serialize)]
pub struct LoginResponse {
    pub user: UserInfo,
    pub access_expiration: i64,
    pub refresh_expiration: i64,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub access_expiration: i64,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub id: String,
}

use super::*;
use actix_web::HttpRequest;
use actix_web::HttpResponse;
use actix_web::web;
use smush_core::ACCESS_COOKIE;
use smush_core::ID;
use smush_core::REFRESH_COOKIE;
use smush_core::Unique;
use std::time::SystemTime;

pub async fn register(
    db: web::Data<dyn Database>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AuthError> {
    if req.username.len() < 3 || req.username.len() > 32 {
        return Ok(HttpResponse::BadRequest().body("username must be 3-32 characters"));
    }
    if req.password.len() < 8 {
        return Ok(HttpResponse::BadRequest().body("password must be at least 8 characters"));
    }
    if db.exists(&req.email).await? {
        return Ok(HttpResponse::Conflict().body("email already registered"));
    }
    let hashword = password::hash(&req.password)?;
    let member = Member::new(ID::default(), req.username.clone(), req.email.clone());
    db.create(&member, &hashword).await?;
    log::info!("registered member {}", member.id());
    Ok(HttpResponse::Ok().json(RegisterResponse {
        id: member.id().to_string(),
    }))
}

pub async fn login(
    db: web::Data<dyn Database>,
    crypto: web::Data<Crypto>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AuthError> {
    let credential = db.credential(&req.email).await?.ok_or(AuthError::NotFound)?;
    password::verify(credential.hashword(), &req.password)?;
    let user = credential.user();
    let access_expiration = SystemTime::now() + Crypto::access_ttl();
    let refresh_expiration = SystemTime::now() + Crypto::refresh_ttl();
    let access = crypto.issue(user, access_expiration)?;
    let refresh = crypto.issue(user, refresh_expiration)?;
    db.update_refresh_token(user, &refresh).await?;
    let member = db.profile(user).await?.ok_or(AuthError::NotFound)?;
    let roles = db.roles(user).await?;
    log::info!("login for member {}", user);
    Ok(HttpResponse::Ok()
        .cookie(session::access_cookie(access, access_expiration))
        .cookie(session::refresh_cookie(refresh, refresh_expiration))
        .json(LoginResponse {
            user: UserInfo::new(&member, &roles),
            access_expiration: claims::unix(access_expiration),
            refresh_expiration: claims::unix(refresh_expiration),
        }))
}

/// Clears the persisted refresh token and drops both cookies. The subject is
/// taken from whichever cookie still parses — expiry is irrelevant here.
pub async fn logout(
    db: web::Data<dyn Database>,
    crypto: web::Data<Crypto>,
    req: HttpRequest,
) -> Result<HttpResponse, AuthError> {
    let cookie = req
        .cookie(REFRESH_COOKIE)
        .or_else(|| req.cookie(ACCESS_COOKIE))
        .ok_or(AuthError::TokenInvalid)?;
    let user = crypto.subject(cookie.value())?;
    db.update_refresh_token(user, "").await?;
    log::info!("logout for member {}", user);
    Ok(HttpResponse::Ok()
        .cookie(session::expired_access_cookie())
        .cookie(session::expired_refresh_cookie())
        .json(serde_json::json!({"status": "logged_out"})))
}

/// Client-initiated silent refresh. Only the refresh token's own validity
/// gates the operation; the refresh token itself is never extended.
pub async fn refresh(
    crypto: web::Data<Crypto>,
    req: HttpRequest,
) -> Result<HttpResponse, AuthError> {
    let cookie = req.cookie(REFRESH_COOKIE).ok_or(AuthError::TokenInvalid)?;
    let claims = crypto.validate(cookie.value())?;
    let expires = SystemTime::now() + Crypto::access_ttl();
    let token = match req.cookie(ACCESS_COOKIE) {
        Some(stale) => crypto.refresh(stale.value(), expires)?,
        None => crypto.issue(claims.user(), expires)?,
    };
    Ok(HttpResponse::Ok()
        .cookie(session::access_cookie(token, expires))
        .json(RefreshResponse {
            access_expiration: claims::unix(expires),
        }))
}

pub async fn forgot_password(
    db: web::Data<dyn Database>,
    crypto: web::Data<Crypto>,
    reset: web::Data<Reset>,
    mailer: web::Data<dyn Emailer>,
    req: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, AuthError> {
    let credential = db.credential(&req.email).await?.ok_or(AuthError::NotFound)?;
    let user = credential.user();
    let expires = SystemTime::now() + Crypto::reset_ttl();
    let token = crypto.issue(user, expires)?;
    // persisted copy supersedes any earlier reset token for this user
    db.update_reset_token(user, &token).await?;
    mailer
        .send_reset_email(credential.email(), &reset.url(&token, expires))
        .await?;
    log::info!("reset email sent for member {}", user);
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "sent"})))
}

/// Redeems a reset token. Every token failure — bad signature, expiry, or a
/// mismatch with the persisted copy — collapses into one generic response.
pub async fn reset_password(
    db: web::Data<dyn Database>,
    crypto: web::Data<Crypto>,
    req: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AuthError> {
    let claims = crypto
        .validate(&req.token)
        .map_err(|_| AuthError::ResetTokenMismatch)?;
    let user = claims.user();
    let stored = db.reset_token(user).await?.unwrap_or_default();
    if !Reset::matches(&req.token, &stored) {
        return Err(AuthError::ResetTokenMismatch);
    }
    let hashword = password::hash(&req.password)?;
    db.update_hashword(user, &hashword).await?;
    db.update_reset_token(user, "").await?;
    log::info!("password reset for member {}", user);
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "reset"})))
}

pub async fn me(db: web::Data<dyn Database>, auth: Auth) -> Result<HttpResponse, AuthError> {
    let member = db.profile(auth.user()).await?.ok_or(AuthError::NotFound)?;
    let roles = db.roles(auth.user()).await?;
    Ok(HttpResponse::Ok().json(UserInfo::new(&member, &roles)))
}

/// Admin-only view of a user's role assignments.
pub async fn roles(
    db: web::Data<dyn Database>,
    _admin: Admin,
    path: web::Path<uuid::Uuid>,
) -> Result<HttpResponse, AuthError> {
    let user = ID::from(path.into_inner());
    let roles = db.roles(user).await?;
    Ok(HttpResponse::Ok().json(
        roles
            .iter()
            .map(|role| role.name().to_string())
            .collect::<Vec<_>>(),
    ))
}

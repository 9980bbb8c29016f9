use super::*;
use actix_web::FromRequest;
use actix_web::HttpMessage;
use actix_web::HttpRequest;
use actix_web::dev::Payload;
use actix_web::dev::Service;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::dev::Transform;
use actix_web::web;
use smush_core::ACCESS_COOKIE;
use smush_core::ID;
use smush_core::REFRESH_COOKIE;
use std::future::Future;
use std::future::Ready;
use std::future::ready;
use std::pin::Pin;
use std::rc::Rc;
use std::time::SystemTime;

/// Middleware guarding protected route prefixes.
///
/// A valid access-token cookie passes the request through untouched.
/// Failing that, a valid refresh-token cookie gates a silent rotation: a new
/// access token is minted (refreshing the stale cookie if one is present,
/// issuing a fresh one for the refresh token's subject otherwise) and set on
/// the response. With neither cookie usable the request is rejected with 401.
/// The authenticated claims ride the request extensions for extractors.
pub struct Gate;

impl<S, B> Transform<S, ServiceRequest> for Gate
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Transform = GateMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;
    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(GateMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct GateMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for GateMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    actix_web::dev::forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let crypto = req
                .app_data::<web::Data<Crypto>>()
                .cloned()
                .ok_or_else(|| {
                    actix_web::error::ErrorInternalServerError("token service not configured")
                })?;
            let access = req.cookie(ACCESS_COOKIE).map(|c| c.value().to_owned());
            if let Some(claims) = access.as_deref().and_then(|t| crypto.validate(t).ok()) {
                req.extensions_mut().insert(claims);
                return service.call(req).await;
            }
            let refresh = req.cookie(REFRESH_COOKIE).map(|c| c.value().to_owned());
            let claims = refresh
                .as_deref()
                .and_then(|t| crypto.validate(t).ok())
                .ok_or(AuthError::TokenInvalid)?;
            let expires = SystemTime::now() + Crypto::access_ttl();
            let token = match access.as_deref() {
                Some(stale) => crypto.refresh(stale, expires)?,
                None => crypto.issue(claims.user(), expires)?,
            };
            req.extensions_mut().insert(Claims::new(claims.user(), expires));
            let mut res = service.call(req).await?;
            res.response_mut()
                .add_cookie(&session::access_cookie(token, expires))
                .map_err(actix_web::error::ErrorInternalServerError)?;
            Ok(res)
        })
    }
}

/// Extractor for the authenticated caller's claims.
///
/// Prefers the claims the [`Gate`] stashed in the request extensions and
/// falls back to validating the access cookie directly, so handlers work
/// both inside and outside gated scopes.
pub struct Auth(pub Claims);

impl Auth {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
    pub fn user(&self) -> ID<Member> {
        self.0.user()
    }
}

impl FromRequest for Auth {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<Claims>().cloned();
        let crypto = req.app_data::<web::Data<Crypto>>().cloned();
        let cookie = req.cookie(ACCESS_COOKIE).map(|c| c.value().to_owned());
        Box::pin(async move {
            if let Some(claims) = claims {
                return Ok(Auth(claims));
            }
            let crypto = crypto.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("token service not configured")
            })?;
            let token = cookie.ok_or(AuthError::TokenInvalid)?;
            let claims = crypto.validate(&token)?;
            Ok(Auth(claims))
        })
    }
}

/// Extractor for admin-only routes: authentication plus a role check
/// against the store. Missing the admin role is Unauthorized regardless of
/// token validity.
pub struct Admin(pub Claims);

impl Admin {
    pub fn claims(&self) -> &Claims {
        &self.0
    }
    pub fn user(&self) -> ID<Member> {
        self.0.user()
    }
}

impl FromRequest for Admin {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;
    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let auth = Auth::from_request(req, payload);
        let db = req.app_data::<web::Data<dyn Database>>().cloned();
        Box::pin(async move {
            let Auth(claims) = auth.await?;
            let db = db.ok_or_else(|| {
                actix_web::error::ErrorInternalServerError("database not configured")
            })?;
            let roles = db.roles(claims.user()).await?;
            match roles.iter().any(Role::admin) {
                true => Ok(Admin(claims)),
                false => Err(actix_web::error::ErrorUnauthorized("admin role required")),
            }
        })
    }
}

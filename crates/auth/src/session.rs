//! Cookie-level session protocol.
//!
//! Two cookies bind the dual tokens to HTTP exchanges, both scoped to the
//! API path prefix with `Expires` equal to the embedded token expiry.
//! Logout replaces both with empty, already-expired cookies.
use actix_web::cookie::Cookie;
use actix_web::cookie::time::OffsetDateTime;
use smush_core::ACCESS_COOKIE;
use smush_core::COOKIE_PATH;
use smush_core::REFRESH_COOKIE;
use std::time::SystemTime;

pub fn access_cookie(token: String, expires: SystemTime) -> Cookie<'static> {
    cookie(ACCESS_COOKIE, token, expires)
}

pub fn refresh_cookie(token: String, expires: SystemTime) -> Cookie<'static> {
    cookie(REFRESH_COOKIE, token, expires)
}

pub fn expired_access_cookie() -> Cookie<'static> {
    cookie(ACCESS_COOKIE, String::new(), std::time::UNIX_EPOCH)
}

pub fn expired_refresh_cookie() -> Cookie<'static> {
    cookie(REFRESH_COOKIE, String::new(), std::time::UNIX_EPOCH)
}

fn cookie(name: &'static str, token: String, expires: SystemTime) -> Cookie<'static> {
    Cookie::build(name, token)
        .path(COOKIE_PATH)
        .expires(OffsetDateTime::from(expires))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn session_cookies_are_scoped_to_the_api_path() {
        let expires = SystemTime::now() + Duration::from_secs(300);
        let access = access_cookie("token".into(), expires);
        let refresh = refresh_cookie("token".into(), expires);
        assert_eq!(access.name(), ACCESS_COOKIE);
        assert_eq!(refresh.name(), REFRESH_COOKIE);
        assert_eq!(access.path(), Some(COOKIE_PATH));
        assert_eq!(refresh.path(), Some(COOKIE_PATH));
    }

    #[test]
    fn cookie_expiry_mirrors_token_expiry() {
        let expires = SystemTime::now() + Duration::from_secs(300);
        let access = access_cookie("token".into(), expires);
        assert_eq!(
            access.expires_datetime(),
            Some(OffsetDateTime::from(expires))
        );
    }

    #[test]
    fn logout_cookies_are_empty_and_stale() {
        for cookie in [expired_access_cookie(), expired_refresh_cookie()] {
            assert_eq!(cookie.value(), "");
            assert_eq!(
                cookie.expires_datetime(),
                Some(OffsetDateTime::UNIX_EPOCH)
            );
        }
    }
}

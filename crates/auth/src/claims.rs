use super::*;
use smush_core::ID;
use std::time::SystemTime;

/// Seconds since the unix epoch, saturating at zero for earlier instants.
pub(crate) fn unix(time: SystemTime) -> i64 {
    time.duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Signed token payload: subject id and absolute expiry.
///
/// Access, refresh, and reset tokens all share this shape; only their
/// lifetimes differ. A token is immutable once signed — "refreshing" always
/// produces a brand-new instance.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: ID<Member>, expires: SystemTime) -> Self {
        Self {
            sub: user.inner(),
            exp: unix(expires),
        }
    }
    pub fn expired(&self) -> bool {
        self.exp < unix(SystemTime::now())
    }
    pub fn user(&self) -> ID<Member> {
        ID::from(self.sub)
    }
    pub fn expires_at(&self) -> SystemTime {
        std::time::UNIX_EPOCH + std::time::Duration::from_secs(self.exp.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    #[test]
    fn claims_in_the_future_are_not_expired() {
        let claims = Claims::new(ID::default(), SystemTime::now() + Duration::from_secs(60));
        assert!(!claims.expired());
    }
    #[test]
    fn claims_in_the_past_are_expired() {
        let claims = Claims::new(ID::default(), SystemTime::now() - Duration::from_secs(60));
        assert!(claims.expired());
    }
    #[test]
    fn claims_preserve_their_subject() {
        let user = ID::default();
        let claims = Claims::new(user, SystemTime::now());
        assert_eq!(claims.user(), user);
    }
}

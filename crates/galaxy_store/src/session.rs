//! Admin session guard.
//!
//! A single shared secret unlocks the admin pages. A successful login writes
//! a token and its expiry into two places: durable client storage, checked
//! when the client starts, and a cookie jar, checked by the server on every
//! protected request. Expired sessions are purged from both as soon as a
//! check notices them.

use crate::SessionError;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

pub const SESSION_KEY: &str = "galaxy_admin_session";
pub const SESSION_EXPIRES_KEY: &str = "galaxy_admin_session_expires";
pub const SESSION_TOKEN: &str = "authenticated";
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

/// Where unauthenticated admin requests are sent.
pub const LOGIN_REDIRECT: &str = "/";

/// `session:` section of the galaxy config.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ttl_hours: i64,
    /// Usually supplied through `GALAXY_ADMIN_SECRET` instead.
    #[serde(skip_serializing)]
    pub admin_secret: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            admin_secret: None,
        }
    }
}

impl std::fmt::Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("ttl_hours", &self.ttl_hours)
            .field("admin_secret", &self.admin_secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.ttl_hours <= 0 {
            return Err(SessionError::InvalidTtl(self.ttl_hours));
        }
        Ok(())
    }
}

// =============================================================================
// STORAGE
// =============================================================================

/// String key/value storage holding one copy of the session.
pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemorySessionStorage {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

// =============================================================================
// GUARD
// =============================================================================

/// Outcome of a server-side request check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    Authorized,
    /// 303 See Other to `location`.
    Redirect { location: &'static str },
}

impl Authorization {
    fn redirect() -> Self {
        Authorization::Redirect {
            location: LOGIN_REDIRECT,
        }
    }
}

fn digest(secret: &str) -> String {
    hex::encode(Sha256::digest(secret.as_bytes()))
}

/// Token present and not yet expired. Unparseable expiries count as expired.
fn session_state(storage: &dyn SessionStorage, now: DateTime<Utc>) -> Option<bool> {
    let token = storage.get(SESSION_KEY)?;
    let expires = storage.get(SESSION_EXPIRES_KEY)?;
    let expires_ms = expires.parse::<i64>().unwrap_or(i64::MIN);
    Some(token == SESSION_TOKEN && now.timestamp_millis() < expires_ms)
}

fn purge(storage: &dyn SessionStorage) {
    storage.remove(SESSION_KEY);
    storage.remove(SESSION_EXPIRES_KEY);
}

pub struct SessionGuard {
    secret_digest: String,
    ttl: Duration,
    durable: Arc<dyn SessionStorage>,
    cookies: Arc<dyn SessionStorage>,
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionGuard")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionGuard {
    pub fn new(
        config: &SessionConfig,
        durable: Arc<dyn SessionStorage>,
        cookies: Arc<dyn SessionStorage>,
    ) -> Result<Self, SessionError> {
        config.validate()?;
        let secret = config
            .admin_secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(SessionError::MissingSecret)?;
        Ok(Self {
            secret_digest: digest(secret),
            ttl: Duration::hours(config.ttl_hours),
            durable,
            cookies,
        })
    }

    /// Check `secret` and, if it matches, open a session expiring after the
    /// configured ttl. Returns whether the login succeeded.
    pub fn login(&self, secret: &str, now: DateTime<Utc>) -> bool {
        if digest(secret) != self.secret_digest {
            warn!("admin login rejected");
            return false;
        }

        let expires = (now + self.ttl).timestamp_millis().to_string();
        for storage in [&self.durable, &self.cookies] {
            storage.set(SESSION_KEY, SESSION_TOKEN);
            storage.set(SESSION_EXPIRES_KEY, &expires);
        }
        info!(expires_ms = %expires, "admin session opened");
        true
    }

    /// Client-side check against durable storage. An expired session is
    /// purged from both copies.
    pub fn check(&self, now: DateTime<Utc>) -> bool {
        match session_state(self.durable.as_ref(), now) {
            Some(true) => true,
            Some(false) => {
                debug!("admin session expired, purging");
                self.logout();
                false
            }
            None => false,
        }
    }

    pub fn logout(&self) {
        purge(self.durable.as_ref());
        purge(self.cookies.as_ref());
    }

    /// Expiry of the current durable session, if any.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let ms = self.durable.get(SESSION_EXPIRES_KEY)?.parse().ok()?;
        DateTime::from_timestamp_millis(ms)
    }

    /// Server-side check of a request's cookies. Expired cookies are purged.
    pub fn authorize_request(cookies: &dyn SessionStorage, now: DateTime<Utc>) -> Authorization {
        match session_state(cookies, now) {
            Some(true) => Authorization::Authorized,
            Some(false) => {
                debug!("expired admin cookie, redirecting");
                purge(cookies);
                Authorization::redirect()
            }
            None => Authorization::redirect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    const SECRET: &str = "correct horse battery staple";

    struct Fixture {
        guard: SessionGuard,
        durable: MemorySessionStorage,
        cookies: MemorySessionStorage,
    }

    fn fixture() -> Fixture {
        let durable = MemorySessionStorage::new();
        let cookies = MemorySessionStorage::new();
        let config = SessionConfig {
            admin_secret: Some(SECRET.into()),
            ..Default::default()
        };
        let guard =
            SessionGuard::new(&config, Arc::new(durable.clone()), Arc::new(cookies.clone()))
                .unwrap();
        Fixture {
            guard,
            durable,
            cookies,
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn config_requires_secret_and_positive_ttl() {
        let storage = || -> Arc<dyn SessionStorage> { Arc::new(MemorySessionStorage::new()) };
        let err = SessionGuard::new(&SessionConfig::default(), storage(), storage()).unwrap_err();
        assert_eq!(err, SessionError::MissingSecret);

        let config = SessionConfig {
            ttl_hours: 0,
            admin_secret: Some(SECRET.into()),
        };
        let err = SessionGuard::new(&config, storage(), storage()).unwrap_err();
        assert_eq!(err, SessionError::InvalidTtl(0));
    }

    #[test]
    fn wrong_secret_writes_nothing() {
        let f = fixture();
        assert!(!f.guard.login("hunter2", noon()));
        assert!(f.durable.is_empty());
        assert!(f.cookies.is_empty());
        assert!(!f.guard.check(noon()));
    }

    #[test]
    fn login_writes_both_copies() {
        let f = fixture();
        assert!(f.guard.login(SECRET, noon()));

        let expected = (noon() + Duration::hours(24)).timestamp_millis().to_string();
        for storage in [&f.durable, &f.cookies] {
            assert_eq!(storage.get(SESSION_KEY).as_deref(), Some(SESSION_TOKEN));
            assert_eq!(storage.get(SESSION_EXPIRES_KEY), Some(expected.clone()));
        }
        assert_eq!(f.guard.expires_at(), Some(noon() + Duration::hours(24)));
    }

    #[test]
    fn session_valid_until_expiry() {
        let f = fixture();
        f.guard.login(SECRET, noon());

        assert!(f.guard.check(noon() + Duration::hours(23)));
        assert!(!f.guard.check(noon() + Duration::hours(24)));
    }

    #[test]
    fn expired_check_purges_both_copies() {
        let f = fixture();
        f.guard.login(SECRET, noon());

        assert!(!f.guard.check(noon() + Duration::days(2)));
        assert!(f.durable.is_empty());
        assert!(f.cookies.is_empty());
    }

    #[test]
    fn logout_purges() {
        let f = fixture();
        f.guard.login(SECRET, noon());
        f.guard.logout();

        assert!(!f.guard.check(noon()));
        assert_eq!(f.guard.expires_at(), None);
        assert!(f.cookies.is_empty());
    }

    #[test]
    fn authorize_request_paths() {
        let f = fixture();
        let redirect = Authorization::Redirect { location: "/" };

        assert_eq!(
            SessionGuard::authorize_request(&f.cookies, noon()),
            redirect
        );

        f.guard.login(SECRET, noon());
        assert_eq!(
            SessionGuard::authorize_request(&f.cookies, noon() + Duration::hours(1)),
            Authorization::Authorized
        );

        assert_eq!(
            SessionGuard::authorize_request(&f.cookies, noon() + Duration::hours(25)),
            redirect
        );
        assert!(f.cookies.is_empty());
        // Durable copy is only purged by the client-side check
        assert!(!f.durable.is_empty());
    }

    #[test]
    fn garbage_expiry_counts_as_expired() {
        let cookies = MemorySessionStorage::new();
        cookies.set(SESSION_KEY, SESSION_TOKEN);
        cookies.set(SESSION_EXPIRES_KEY, "tomorrow");

        assert_eq!(
            SessionGuard::authorize_request(&cookies, noon()),
            Authorization::redirect()
        );
        assert!(cookies.is_empty());
    }

    #[test]
    fn debug_redacts_secret() {
        let config = SessionConfig {
            admin_secret: Some(SECRET.into()),
            ..Default::default()
        };
        let debug = format!("{config:?}");
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("ttl_hours: 24"));
    }
}

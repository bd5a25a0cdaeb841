use std::env;

use super::env_flag;

/// One week
const DEFAULT_SESSION_TTL_SECS: i64 = 604_800;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_ttl_secs: i64,
    /// Adds the `Secure` attribute to the session cookie
    pub secure_cookies: bool,
    /// Admin account ensured at startup; skipped unless both are set
    pub bootstrap_email: Option<String>,
    pub bootstrap_password: Option<String>,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            session_ttl_secs: env::var("TRACKER_SESSION_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|ttl: &i64| *ttl > 0)
                .unwrap_or(DEFAULT_SESSION_TTL_SECS),
            secure_cookies: env_flag("TRACKER_SECURE_COOKIES"),
            bootstrap_email: env::var("TRACKER_ADMIN_EMAIL").ok().filter(|v| !v.is_empty()),
            bootstrap_password: env::var("TRACKER_ADMIN_PASSWORD").ok().filter(|v| !v.is_empty()),
        }
    }
}

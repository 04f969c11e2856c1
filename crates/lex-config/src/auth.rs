//! Session token and password policy configuration.

use serde::{Deserialize, Serialize};

/// Seven days.
const fn default_token_ttl_secs() -> u64 {
    7 * 24 * 60 * 60
}

fn default_cookie_name() -> String {
    "lex_session".to_string()
}

const fn default_min_password_len() -> usize {
    8
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// HMAC secret for signing session tokens.
    #[serde(default)]
    pub jwt_secret: String,

    /// Session lifetime, also used as the cookie `Max-Age`.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,

    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    /// Add the `Secure` attribute to the session cookie (enable behind HTTPS).
    #[serde(default)]
    pub cookie_secure: bool,

    #[serde(default = "default_min_password_len")]
    pub min_password_len: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: default_token_ttl_secs(),
            cookie_name: default_cookie_name(),
            cookie_secure: false,
            min_password_len: default_min_password_len(),
        }
    }
}

impl AuthConfig {
    /// A signing secret is required before the server can issue sessions.
    pub fn is_configured(&self) -> bool {
        !self.jwt_secret.is_empty()
    }
}

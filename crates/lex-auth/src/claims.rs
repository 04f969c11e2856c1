use chrono::{DateTime, Utc};
use lex_core::identity::AuthIdentity;

/// Verified session token claims.
///
/// Produced by [`crate::TokenSigner::verify`], consumed by the server's
/// authentication extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexClaims {
    /// User ID (`sub` claim).
    pub user_id: String,
    pub email: String,
    /// Token expiration time (from `exp` claim).
    pub expires_at: DateTime<Utc>,
}

impl LexClaims {
    /// Convert to a lightweight `AuthIdentity` for cross-crate passing.
    #[must_use]
    pub fn to_identity(&self) -> AuthIdentity {
        AuthIdentity {
            user_id: self.user_id.clone(),
            email: self.email.clone(),
        }
    }

    /// Check if the token is expired or expires within `buffer_secs`.
    #[must_use]
    pub fn is_near_expiry(&self, buffer_secs: i64) -> bool {
        let threshold = Utc::now() + chrono::TimeDelta::seconds(buffer_secs);
        self.expires_at <= threshold
    }
}

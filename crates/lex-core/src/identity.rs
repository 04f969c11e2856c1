use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Lightweight authenticated user identity for cross-crate passing.
///
/// Produced by `lex-auth` token verification, consumed by `lex-server`
/// handlers to scope every query to the requesting lawyer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuthIdentity {
    /// User ID (token `sub` claim).
    pub user_id: String,
    /// Email the token was issued for.
    pub email: String,
}

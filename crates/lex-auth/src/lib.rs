//! # lex-auth
//!
//! Authentication primitives shared by `lexd` and the `lex` CLI.
//!
//! Server side: Argon2id password hashing (`argon2`), HS256 session tokens
//! (`jsonwebtoken`), and session cookie handling. Client side: credential
//! storage in the OS keychain (`keyring`), a `LEX_TOKEN` env override, and a
//! file fallback.

pub mod claims;
pub mod error;
pub mod password;
pub mod session;
pub mod token;
pub mod token_store;

pub use claims::LexClaims;
pub use error::AuthError;
pub use token::{IssuedToken, TokenSigner};

/// Resolve the best available CLI token.
///
/// Priority: keyring → env var → file. Does NOT validate the token; the
/// server does that on every request.
#[must_use]
pub fn resolve_token() -> Option<String> {
    token_store::load()
}

/// Clear stored CLI credentials.
///
/// # Errors
///
/// Returns `AuthError::TokenStoreError` if the credentials file cannot be removed.
pub fn logout() -> Result<(), AuthError> {
    token_store::delete()
}

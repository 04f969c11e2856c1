use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated, run `lex auth login`")]
    NotAuthenticated,

    #[error("invalid session token")]
    InvalidToken,

    #[error("session token expired, run `lex auth login`")]
    TokenExpired,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    WeakPassword(String),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),

    #[error("token signing failed: {0}")]
    Signing(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),
}

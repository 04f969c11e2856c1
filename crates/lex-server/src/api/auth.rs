//! Account and session endpoints.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::SET_COOKIE;
use axum::response::{IntoResponse, Response};
use lex_auth::password::{check_password_policy, hash_password, verify_password};
use lex_auth::AuthError;
use lex_auth::session::{clear_cookie, session_cookie};
use lex_core::entities::User;
use lex_core::identity::AuthIdentity;
use lex_core::input::{LoginRequest, SignupRequest, validate_email};
use lex_core::responses::{MessageResponse, SessionResponse, UserView};
use lex_db::error::DatabaseError;

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::state::AppState;

pub async fn signup(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<SignupRequest>,
) -> Result<Response, ApiError> {
    req.validate()?;
    check_password_policy(&req.password, state.auth.min_password_len)?;

    let password = req.password;
    let hash = blocking(move || hash_password(&password)).await?;

    let user = state
        .service
        .create_user(&req.email, &req.name, &hash)
        .await
        .map_err(|e| match e {
            DatabaseError::Conflict(_) => ApiError::BadRequest("E-mail já cadastrado".into()),
            other => other.into(),
        })?;

    start_session(&state, &user, StatusCode::CREATED)
}

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> Result<Response, ApiError> {
    validate_email(&req.email)?;
    if req.password.is_empty() {
        return Err(ApiError::BadRequest("Senha não informada".into()));
    }

    let Some(user) = state.service.find_user_by_email(&req.email).await? else {
        tracing::info!("login for unknown email");
        return Err(AuthError::InvalidCredentials.into());
    };

    let password = req.password;
    let hash = user.password_hash.clone();
    if !blocking(move || verify_password(&password, &hash)).await? {
        tracing::info!(user_id = %user.id, "login with wrong password");
        return Err(AuthError::InvalidCredentials.into());
    }

    start_session(&state, &user, StatusCode::OK)
}

pub async fn logout(State(state): State<AppState>) -> Response {
    let cookie = clear_cookie(&state.auth.cookie_name, state.auth.cookie_secure);
    (
        [(SET_COOKIE, cookie)],
        Json(MessageResponse::new("Sessão encerrada")),
    )
        .into_response()
}

pub async fn session(AuthUser(user): AuthUser) -> Json<UserView> {
    Json(UserView::from(&user))
}

fn start_session(state: &AppState, user: &User, status: StatusCode) -> Result<Response, ApiError> {
    let issued = state.signer.issue(&AuthIdentity {
        user_id: user.id.clone(),
        email: user.email.clone(),
    })?;
    let cookie = session_cookie(
        &state.auth.cookie_name,
        &issued.token,
        state.signer.ttl().num_seconds(),
        state.auth.cookie_secure,
    );
    tracing::info!(user_id = %user.id, "session started");

    let body = SessionResponse {
        user: UserView::from(user),
        token: issued.token,
        expires_at: issued.expires_at,
    };
    Ok((status, [(SET_COOKIE, cookie)], Json(body)).into_response())
}

/// Argon2 is deliberately slow; keep it off the async workers.
async fn blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(format!("password task failed: {e}")))?
        .map_err(ApiError::from)
}

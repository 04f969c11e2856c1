//! Request extractors: the authenticated user, plus JSON bodies and query
//! strings with API-shaped rejections.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::HeaderName;
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::http::request::Parts;
use lex_auth::session::extract_token;
use lex_core::entities::User;
use lex_db::error::DatabaseError;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::state::AppState;

/// The user behind a verified session token.
///
/// The user row is re-read on every request, so a token outliving its user
/// is rejected with 401.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn id(&self) -> &str {
        &self.0.id
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = |name: HeaderName| parts.headers.get(name).and_then(|v| v.to_str().ok());
        let token = extract_token(header(COOKIE), header(AUTHORIZATION), &state.auth.cookie_name)
            .ok_or_else(ApiError::unauthenticated)?;

        let claims = state.signer.verify(&token).map_err(|e| {
            tracing::debug!(error = %e, "session token rejected");
            ApiError::unauthenticated()
        })?;

        let user = state
            .service
            .get_user(&claims.user_id)
            .await
            .map_err(|e| match e {
                DatabaseError::NoResult => ApiError::unauthenticated(),
                other => other.into(),
            })?;
        Ok(Self(user))
    }
}

/// `Json<T>` whose rejection is a 400 with the standard error body.
#[derive(Debug, Clone)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                ApiError::BadRequest(format!("Requisição inválida: {}", rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}

/// `Query<T>` whose rejection is a 400 with the standard error body.
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                ApiError::BadRequest(format!("Parâmetros inválidos: {}", rejection.body_text()))
            })?;
        Ok(Self(value))
    }
}

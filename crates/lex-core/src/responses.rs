//! HTTP API response types returned as JSON by `lexd` and consumed by `lex`.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Petition, User};
use crate::enums::JobStatus;

/// A user as exposed over the API (no credential hash).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: user.created_at,
        }
    }
}

/// Response from `POST /api/auth/signup` and `POST /api/auth/login`.
///
/// The token is also set as an HTTP-only cookie; it is repeated in the body
/// for bearer-header clients.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionResponse {
    pub user: UserView,
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Response from `POST /api/petitions/generate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenerationAccepted {
    pub job_id: String,
    pub status: JobStatus,
}

/// Response from `GET /api/petitions/generate/{job_id}`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenerationStatusResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub attempts: u32,
    pub petition: Option<Petition>,
    pub error: Option<String>,
}

/// Response from `GET /api/petitions/{id}/download`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DocumentDownload {
    pub filename: String,
    pub mime_type: String,
    /// Base64 (standard alphabet, padded) of the `.docx` bytes.
    pub content: String,
}

/// Generic acknowledgement body (logout, delete).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorResponse {
    pub error: String,
}

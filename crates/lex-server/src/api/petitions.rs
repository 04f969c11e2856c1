//! Petition CRUD and `.docx` export.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use lex_core::entities::{Customer, Petition};
use lex_core::input::PetitionInput;
use lex_core::responses::{DocumentDownload, MessageResponse};
use lex_db::error::DatabaseError;
use lex_db::service::LexService;
use lex_db::updates::petition::PetitionUpdate;
use serde::Deserialize;

use crate::api::ListQuery;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery, AuthUser};
use crate::state::AppState;

pub const MSG_PETITION_NOT_FOUND: &str = "Petição não encontrada";

/// Body of `POST /api/petitions`: the form fields plus already written text.
#[derive(Debug, Deserialize)]
pub struct CreatePetitionRequest {
    #[serde(flatten)]
    pub input: PetitionInput,
    #[serde(default)]
    pub content: String,
}

pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<Petition>>, ApiError> {
    let limit = state.list_limit(query.limit);
    Ok(Json(state.service.list_petitions(user.id(), limit).await?))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(req): ApiJson<CreatePetitionRequest>,
) -> Result<(StatusCode, Json<Petition>), ApiError> {
    req.input.validate()?;
    if req.content.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "Campo obrigatório não informado: conteúdo".into(),
        ));
    }
    let petition = state
        .service
        .create_petition(user.id(), &req.input, &req.content)
        .await?;
    Ok((StatusCode::CREATED, Json(petition)))
}

pub async fn get(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Petition>, ApiError> {
    let petition = state
        .service
        .get_petition(user.id(), &id)
        .await
        .map_err(|e| ApiError::db(e, MSG_PETITION_NOT_FOUND))?;
    Ok(Json(petition))
}

pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<PetitionUpdate>,
) -> Result<Json<Petition>, ApiError> {
    update.validate()?;
    let petition = state
        .service
        .update_petition(user.id(), &id, update)
        .await
        .map_err(|e| ApiError::db(e, MSG_PETITION_NOT_FOUND))?;
    Ok(Json(petition))
}

pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .service
        .delete_petition(user.id(), &id)
        .await
        .map_err(|e| ApiError::db(e, MSG_PETITION_NOT_FOUND))?;
    Ok(Json(MessageResponse::new("Petição excluída")))
}

pub async fn download(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<Json<DocumentDownload>, ApiError> {
    let petition = state
        .service
        .get_petition(user.id(), &id)
        .await
        .map_err(|e| ApiError::db(e, MSG_PETITION_NOT_FOUND))?;
    let customer = linked_customer(&state.service, &petition).await?;

    let bytes = lex_docx::render_petition(&petition, customer.as_ref())?;
    tracing::debug!(petition_id = %petition.id, size = bytes.len(), "petition rendered");

    Ok(Json(DocumentDownload {
        filename: lex_docx::document_filename(&petition),
        mime_type: lex_docx::DOCX_MIME_TYPE.to_string(),
        content: lex_docx::encode_base64(&bytes),
    }))
}

/// The petition's customer, if it still exists.
pub(crate) async fn linked_customer(
    service: &LexService,
    petition: &Petition,
) -> Result<Option<Customer>, ApiError> {
    let Some(customer_id) = petition.customer_id.as_deref() else {
        return Ok(None);
    };
    match service.get_customer(&petition.user_id, customer_id).await {
        Ok(customer) => Ok(Some(customer)),
        Err(DatabaseError::NoResult) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

//! Submit-then-poll petition generation.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use lex_core::enums::JobStatus;
use lex_core::input::PetitionInput;
use lex_core::responses::{GenerationAccepted, GenerationStatusResponse};
use lex_db::error::DatabaseError;

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::jobs;
use crate::state::AppState;

/// Queue a job and return at once; the draft is produced in the background.
pub async fn start(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<PetitionInput>,
) -> Result<(StatusCode, Json<GenerationAccepted>), ApiError> {
    input.validate()?;
    if let Some(customer_id) = input.normalized().customer_id {
        state
            .service
            .get_customer(user.id(), &customer_id)
            .await
            .map_err(|e| ApiError::db(e, "Cliente não encontrado"))?;
    }

    let job = state.service.create_job(user.id(), &input).await?;
    tracing::info!(job_id = %job.id, user_id = %user.id(), kind = %input.kind, "generation queued");

    tokio::spawn(jobs::run_generation(state.clone(), job.id.clone()));

    Ok((
        StatusCode::ACCEPTED,
        Json(GenerationAccepted {
            job_id: job.id,
            status: job.status,
        }),
    ))
}

pub async fn status(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<String>,
) -> Result<Json<GenerationStatusResponse>, ApiError> {
    let job = state
        .service
        .get_job(user.id(), &job_id)
        .await
        .map_err(|e| ApiError::db(e, "Geração não encontrada"))?;

    let petition = match (job.status, job.petition_id.as_deref()) {
        (JobStatus::Completed, Some(petition_id)) => {
            match state.service.get_petition(user.id(), petition_id).await {
                Ok(petition) => Some(petition),
                // Deleted after generation.
                Err(DatabaseError::NoResult) => None,
                Err(e) => return Err(e.into()),
            }
        }
        _ => None,
    };

    Ok(Json(GenerationStatusResponse {
        job_id: job.id,
        status: job.status,
        attempts: job.attempts,
        petition,
        error: job.error,
    }))
}

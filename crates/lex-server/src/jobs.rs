//! Background runner for generation jobs.
//!
//! `pending → processing → completed | failed`. The runner owns the job from
//! the moment the handler spawns it; every outcome ends in a terminal state.
//! Jobs a restart cut short are failed at startup with `MSG_JOB_INTERRUPTED`.

use chrono::Utc;
use lex_core::entities::{AuditEntry, Customer, GenerationJob};
use lex_core::enums::{AuditAction, EntityType, JobStatus};
use lex_core::ids::PREFIX_AUDIT;
use lex_db::error::DatabaseError;
use lex_llm::{Draft, LlmError, build_prompt};
use serde_json::json;

use crate::state::AppState;

pub const MSG_SAVE_FAILED: &str = "A petição foi gerada, mas não pôde ser salva.";
pub const MSG_JOB_CRASHED: &str = "Erro interno ao processar a geração.";
pub const MSG_JOB_INTERRUPTED: &str =
    "A geração foi interrompida pela reinicialização do servidor. Tente novamente.";

/// Drive one job to a terminal state. Spawned by the generate handler.
#[tracing::instrument(skip(state))]
pub async fn run_generation(state: AppState, job_id: String) {
    if let Err(error) = generate(&state, &job_id).await {
        tracing::error!(%error, "generation job failed unexpectedly");
        if let Err(error) = state.service.fail_job(&job_id, MSG_JOB_CRASHED).await {
            tracing::warn!(%error, "could not mark job as failed");
        }
    }
}

async fn generate(state: &AppState, job_id: &str) -> Result<(), DatabaseError> {
    let job = state
        .service
        .transition_job(job_id, JobStatus::Processing)
        .await?;
    let customer = job_customer(state, &job).await?;
    let prompt = build_prompt(&job.input, customer.as_ref());

    match state.drafter.draft(&prompt).await {
        Ok(draft) => store_draft(state, &job, draft).await,
        Err(error) => {
            let attempts = match &error {
                LlmError::Exhausted { attempts, .. } => *attempts,
                _ => 0,
            };
            tracing::warn!(%error, attempts, "drafting failed");
            state.service.record_job_attempts(job_id, attempts).await?;
            state.service.fail_job(job_id, &error.client_message()).await?;
            Ok(())
        }
    }
}

async fn store_draft(state: &AppState, job: &GenerationJob, draft: Draft) -> Result<(), DatabaseError> {
    state.service.record_job_attempts(&job.id, draft.attempts).await?;

    let petition = match state
        .service
        .create_petition(&job.user_id, &job.input, &draft.text)
        .await
    {
        Ok(petition) => petition,
        Err(error) => {
            tracing::warn!(%error, "generated petition could not be stored");
            state.service.fail_job(&job.id, MSG_SAVE_FAILED).await?;
            return Ok(());
        }
    };

    state
        .service
        .append_audit(&AuditEntry {
            id: state.service.db().generate_id(PREFIX_AUDIT).await?,
            user_id: Some(job.user_id.clone()),
            entity_type: EntityType::Petition,
            entity_id: petition.id.clone(),
            action: AuditAction::Generated,
            detail: Some(json!({
                "provider": draft.provider,
                "attempts": draft.attempts,
                "job_id": job.id,
            })),
            created_at: Utc::now(),
        })
        .await?;

    state.service.complete_job(&job.id, &petition.id).await?;
    tracing::info!(petition_id = %petition.id, provider = %draft.provider, "generation completed");
    Ok(())
}

/// The customer named by the job input. A customer deleted since submission
/// is drafted without.
async fn job_customer(state: &AppState, job: &GenerationJob) -> Result<Option<Customer>, DatabaseError> {
    let Some(customer_id) = job.input.customer_id.as_deref() else {
        return Ok(None);
    };
    match state.service.get_customer(&job.user_id, customer_id).await {
        Ok(customer) => Ok(Some(customer)),
        Err(DatabaseError::NoResult) => Ok(None),
        Err(e) => Err(e),
    }
}

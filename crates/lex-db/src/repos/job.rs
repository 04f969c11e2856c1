//! Generation job repository — creation, polling reads, and status transitions.
//!
//! Jobs are created by the generate handler and advanced by the background
//! runner, which addresses them by ID alone. Client-facing reads are owner
//! scoped.

use chrono::Utc;

use lex_core::entities::GenerationJob;
use lex_core::enums::{AuditAction, EntityType, JobStatus};
use lex_core::ids::PREFIX_JOB;
use lex_core::input::PetitionInput;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, get_u32, parse_datetime, parse_enum, parse_json};
use crate::service::LexService;

const SELECT_COLS: &str =
    "id, user_id, status, input, petition_id, error, attempts, created_at, updated_at";

fn row_to_job(row: &libsql::Row) -> Result<GenerationJob, DatabaseError> {
    Ok(GenerationJob {
        id: row.get(0)?,
        user_id: row.get(1)?,
        status: parse_enum(&row.get::<String>(2)?)?,
        input: parse_json(&row.get::<String>(3)?)?,
        petition_id: get_opt_string(row, 4)?,
        error: get_opt_string(row, 5)?,
        attempts: get_u32(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
        updated_at: parse_datetime(&row.get::<String>(8)?)?,
    })
}

impl LexService {
    /// Queue a generation request in `pending`.
    pub async fn create_job(
        &self,
        user_id: &str,
        input: &PetitionInput,
    ) -> Result<GenerationJob, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_JOB).await?;
        let input = input.normalized();
        let input_json =
            serde_json::to_string(&input).map_err(|e| DatabaseError::Other(e.into()))?;

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO generation_jobs ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, NULL, NULL, 0, ?5, ?6)"),
                libsql::params![
                    id.as_str(),
                    user_id,
                    JobStatus::Pending.as_str(),
                    input_json,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        self.audit(
            Some(user_id),
            EntityType::GenerationJob,
            &id,
            AuditAction::Created,
            None,
        )
        .await?;

        Ok(GenerationJob {
            id,
            user_id: user_id.to_string(),
            status: JobStatus::Pending,
            input,
            petition_id: None,
            error: None,
            attempts: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// `DatabaseError::NoResult` when missing or owned by another user.
    pub async fn get_job(&self, user_id: &str, id: &str) -> Result<GenerationJob, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM generation_jobs WHERE id = ?1 AND user_id = ?2"),
                [id, user_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_job(&row)
    }

    async fn get_job_by_id(&self, id: &str) -> Result<GenerationJob, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM generation_jobs WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_job(&row)
    }

    /// Move a job along `pending → processing → completed | failed`.
    ///
    /// # Errors
    ///
    /// `DatabaseError::InvalidState` for a transition the state machine forbids.
    pub async fn transition_job(
        &self,
        job_id: &str,
        new_status: JobStatus,
    ) -> Result<GenerationJob, DatabaseError> {
        self.transition_job_with(job_id, new_status, None, None).await
    }

    /// Persist the number of LLM attempts consumed so far.
    pub async fn record_job_attempts(&self, job_id: &str, attempts: u32) -> Result<(), DatabaseError> {
        let updated = self
            .db()
            .conn()
            .execute(
                "UPDATE generation_jobs SET attempts = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![attempts, Utc::now().to_rfc3339(), job_id],
            )
            .await?;
        if updated == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    /// Mark the job completed and link the petition it produced.
    pub async fn complete_job(
        &self,
        job_id: &str,
        petition_id: &str,
    ) -> Result<GenerationJob, DatabaseError> {
        self.transition_job_with(job_id, JobStatus::Completed, Some(petition_id), None)
            .await
    }

    /// Mark the job failed with a client-facing message.
    pub async fn fail_job(&self, job_id: &str, error: &str) -> Result<GenerationJob, DatabaseError> {
        self.transition_job_with(job_id, JobStatus::Failed, None, Some(error))
            .await
    }

    /// Fail every job still `pending` or `processing`.
    ///
    /// Runners do not survive a restart, so this runs at startup before any
    /// new job can be created. Returns the number of jobs failed.
    pub async fn fail_stale_jobs(&self, error: &str) -> Result<usize, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT id FROM generation_jobs WHERE status IN (?1, ?2) ORDER BY created_at",
                [JobStatus::Pending.as_str(), JobStatus::Processing.as_str()],
            )
            .await?;
        let mut ids = Vec::new();
        while let Some(row) = rows.next().await? {
            ids.push(row.get::<String>(0)?);
        }
        drop(rows);

        for id in &ids {
            self.fail_job(id, error).await?;
        }
        if !ids.is_empty() {
            tracing::warn!(count = ids.len(), "failed jobs left unfinished by a previous run");
        }
        Ok(ids.len())
    }

    async fn transition_job_with(
        &self,
        job_id: &str,
        new_status: JobStatus,
        petition_id: Option<&str>,
        error: Option<&str>,
    ) -> Result<GenerationJob, DatabaseError> {
        let current = self.get_job_by_id(job_id).await?;

        if !current.status.can_transition_to(new_status) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition job {} from {} to {}",
                job_id, current.status, new_status
            )));
        }

        let now = Utc::now();
        self.db()
            .conn()
            .execute(
                "UPDATE generation_jobs
                 SET status = ?1,
                     petition_id = COALESCE(?2, petition_id),
                     error = COALESCE(?3, error),
                     updated_at = ?4
                 WHERE id = ?5",
                libsql::params![new_status.as_str(), petition_id, error, now.to_rfc3339(), job_id],
            )
            .await?;

        self.audit(
            Some(&current.user_id),
            EntityType::GenerationJob,
            job_id,
            AuditAction::StatusChanged,
            Some(serde_json::json!({
                "from": current.status,
                "to": new_status,
            })),
        )
        .await?;

        tracing::debug!(job_id, from = %current.status, to = %new_status, "job transitioned");
        self.get_job_by_id(job_id).await
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DatabaseError;
    use crate::repos::audit::AuditFilter;
    use crate::service::LexService;
    use crate::test_support::{create_test_user, sample_input, test_service};
    use lex_core::enums::{AuditAction, JobStatus};
    use rstest::rstest;

    #[tokio::test]
    async fn create_job_starts_pending() {
        let svc = test_service().await;
        let user = create_test_user(&svc, "ana@example.com").await;
        let job = svc.create_job(&user.id, &sample_input()).await.unwrap();

        assert!(job.id.starts_with("job-"));
        assert_eq!(job.status, JobStatus::Pending);
        assert_eq!(job.attempts, 0);

        let fetched = svc.get_job(&user.id, &job.id).await.unwrap();
        pretty_assertions::assert_eq!(fetched.input, sample_input());
        assert_eq!(fetched.petition_id, None);
    }

    #[tokio::test]
    async fn foreign_job_is_invisible() {
        let svc = test_service().await;
        let ana = create_test_user(&svc, "ana@example.com").await;
        let bob = create_test_user(&svc, "bob@example.com").await;
        let job = svc.create_job(&ana.id, &sample_input()).await.unwrap();

        assert!(matches!(
            svc.get_job(&bob.id, &job.id).await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn happy_path_completes_with_petition() {
        let svc = test_service().await;
        let user = create_test_user(&svc, "ana@example.com").await;
        let job = svc.create_job(&user.id, &sample_input()).await.unwrap();

        svc.transition_job(&job.id, JobStatus::Processing).await.unwrap();
        svc.record_job_attempts(&job.id, 2).await.unwrap();
        let petition = svc
            .create_petition(&user.id, &job.input, "texto gerado")
            .await
            .unwrap();
        let done = svc.complete_job(&job.id, &petition.id).await.unwrap();

        assert_eq!(done.status, JobStatus::Completed);
        assert_eq!(done.attempts, 2);
        assert_eq!(done.petition_id.as_deref(), Some(petition.id.as_str()));
        assert!(done.status.is_terminal());

        let changes = svc
            .query_audit(&AuditFilter {
                entity_id: Some(job.id),
                action: Some(AuditAction::StatusChanged),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes[0].detail,
            Some(serde_json::json!({"from": "processing", "to": "completed"}))
        );
    }

    #[tokio::test]
    async fn fail_records_error() {
        let svc = test_service().await;
        let user = create_test_user(&svc, "ana@example.com").await;
        let job = svc.create_job(&user.id, &sample_input()).await.unwrap();

        let failed = svc.fail_job(&job.id, "Serviço indisponível").await.unwrap();
        assert_eq!(failed.status, JobStatus::Failed);
        assert_eq!(failed.error.as_deref(), Some("Serviço indisponível"));
    }

    #[rstest]
    #[case::skip_processing(JobStatus::Completed)]
    #[case::back_to_pending(JobStatus::Pending)]
    #[tokio::test]
    async fn invalid_transition_from_pending(#[case] target: JobStatus) {
        let svc = test_service().await;
        let user = create_test_user(&svc, "ana@example.com").await;
        let job = svc.create_job(&user.id, &sample_input()).await.unwrap();

        assert!(matches!(
            svc.transition_job(&job.id, target).await,
            Err(DatabaseError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn terminal_jobs_do_not_move() {
        let svc = test_service().await;
        let user = create_test_user(&svc, "ana@example.com").await;
        let job = svc.create_job(&user.id, &sample_input()).await.unwrap();
        svc.fail_job(&job.id, "erro").await.unwrap();

        assert!(matches!(
            svc.transition_job(&job.id, JobStatus::Processing).await,
            Err(DatabaseError::InvalidState(_))
        ));
    }

    #[tokio::test]
    async fn attempts_on_missing_job() {
        let svc = test_service().await;
        assert!(matches!(
            svc.record_job_attempts("job-00000000", 1).await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn stale_jobs_fail_after_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lex.db");
        let path = path.to_str().unwrap();

        let (user_id, pending, processing, done) = {
            let svc = LexService::new_local(path).await.unwrap();
            let user = create_test_user(&svc, "ana@example.com").await;
            let pending = svc.create_job(&user.id, &sample_input()).await.unwrap();
            let processing = svc.create_job(&user.id, &sample_input()).await.unwrap();
            svc.transition_job(&processing.id, JobStatus::Processing).await.unwrap();
            let done = svc.create_job(&user.id, &sample_input()).await.unwrap();
            svc.fail_job(&done.id, "erro anterior").await.unwrap();
            (user.id, pending.id, processing.id, done.id)
        };

        let svc = LexService::new_local(path).await.unwrap();
        assert_eq!(
            svc.get_job(&user_id, &processing).await.unwrap().status,
            JobStatus::Processing
        );
        assert_eq!(svc.fail_stale_jobs("Geração interrompida").await.unwrap(), 2);

        for id in [&pending, &processing] {
            let job = svc.get_job(&user_id, id).await.unwrap();
            assert_eq!(job.status, JobStatus::Failed);
            assert_eq!(job.error.as_deref(), Some("Geração interrompida"));
        }
        let untouched = svc.get_job(&user_id, &done).await.unwrap();
        assert_eq!(untouched.error.as_deref(), Some("erro anterior"));

        let changes = svc
            .query_audit(&AuditFilter {
                entity_id: Some(processing),
                action: Some(AuditAction::StatusChanged),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(
            changes[0].detail,
            Some(serde_json::json!({"from": "processing", "to": "failed"}))
        );

        assert_eq!(svc.fail_stale_jobs("Geração interrompida").await.unwrap(), 0);
    }
}

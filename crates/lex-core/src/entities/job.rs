use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::JobStatus;
use crate::input::PetitionInput;

/// A background petition generation request, polled by clients.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenerationJob {
    pub id: String,
    pub user_id: String,
    pub status: JobStatus,
    pub input: PetitionInput,
    /// Set once the job completes.
    pub petition_id: Option<String>,
    /// Client-facing failure message, set once the job fails.
    pub error: Option<String>,
    /// LLM attempts consumed.
    pub attempts: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//! Petition kinds, job statuses, entity types, and audit actions for Lex.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! The same string is stored in SQL, so `as_str()` and serde always agree.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// PetitionKind
// ---------------------------------------------------------------------------

/// The kind of legal petition being drafted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum PetitionKind {
    /// Recurso administrativo against an agency decision.
    AdministrativeAppeal,
    /// Pedido de reajuste / reequilíbrio of contract rates.
    RateAdjustment,
    /// Contrarrazões answering the other party's appeal.
    Rebuttal,
    /// Defesa prévia in a sanctioning proceeding.
    SanctionDefense,
}

impl PetitionKind {
    pub const ALL: [Self; 4] = [
        Self::AdministrativeAppeal,
        Self::RateAdjustment,
        Self::Rebuttal,
        Self::SanctionDefense,
    ];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AdministrativeAppeal => "administrative_appeal",
            Self::RateAdjustment => "rate_adjustment",
            Self::Rebuttal => "rebuttal",
            Self::SanctionDefense => "sanction_defense",
        }
    }

    /// Title used in prompts and as the document heading.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::AdministrativeAppeal => "Recurso Administrativo",
            Self::RateAdjustment => "Pedido de Reajuste",
            Self::Rebuttal => "Contrarrazões",
            Self::SanctionDefense => "Defesa Prévia",
        }
    }
}

impl fmt::Display for PetitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// JobStatus
// ---------------------------------------------------------------------------

/// Status of an asynchronous petition generation job.
///
/// ```text
/// pending → processing → completed
///                      → failed
/// pending → failed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Processing, Self::Failed],
            Self::Processing => &[Self::Completed, Self::Failed],
            Self::Completed | Self::Failed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// A terminal job will never change again; pollers stop here.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AuditAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Created,
    Updated,
    Deleted,
    Generated,
    StatusChanged,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Deleted => "deleted",
            Self::Generated => "generated",
            Self::StatusChanged => "status_changed",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the system, used in the audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    User,
    Customer,
    Petition,
    GenerationJob,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Customer => "customer",
            Self::Petition => "petition",
            Self::GenerationJob => "generation_job",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PetitionKind;

/// A drafted legal petition. Always owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Petition {
    pub id: String,
    pub user_id: String,
    pub customer_id: Option<String>,
    pub process_number: String,
    pub kind: PetitionKind,
    /// Agency or company the petition is addressed to.
    pub entity: String,
    pub reason: String,
    pub description: String,
    pub arguments: String,
    pub request: String,
    pub authority: Option<String>,
    pub counterparty: Option<String>,
    pub city: Option<String>,
    /// `YYYY-MM-DD`.
    pub document_date: Option<String>,
    pub attorney_name: Option<String>,
    /// OAB registration, e.g. `SP 123.456`.
    pub attorney_bar_number: Option<String>,
    /// Generated or edited petition text.
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

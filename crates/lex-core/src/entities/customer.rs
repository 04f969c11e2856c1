use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A client of the lawyer, referenced by petitions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Customer {
    pub id: String,
    pub user_id: String,
    /// Razão social / full legal name.
    pub legal_name: String,
    /// CPF or CNPJ, digits only.
    pub tax_id: String,
    pub street: String,
    pub number: String,
    pub complement: Option<String>,
    pub district: String,
    pub city: String,
    /// Two-letter state code (UF).
    pub state: String,
    pub postal_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// One-line address used in document headers and prompts.
    #[must_use]
    pub fn address_line(&self) -> String {
        let mut line = format!("{}, {}", self.street, self.number);
        if let Some(complement) = self.complement.as_deref().filter(|c| !c.is_empty()) {
            line.push_str(", ");
            line.push_str(complement);
        }
        line.push_str(&format!(
            " - {}, {}/{}, CEP {}",
            self.district, self.city, self.state, self.postal_code
        ));
        line
    }
}

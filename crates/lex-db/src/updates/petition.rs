//! Petition update payload and builder.
//!
//! Also the request body of `PUT /api/petitions/{id}`: an absent field is left
//! alone, an explicit `null` clears a nullable field.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use lex_core::enums::PetitionKind;
use lex_core::errors::CoreError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetitionUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub process_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PetitionKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arguments: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_id: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub authority: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub counterparty: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub city: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub document_date: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub attorney_name: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub attorney_bar_number: Option<Option<String>>,
}

/// Distinguish an explicit `null` (`Some(None)`) from an absent field (`None`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PetitionUpdate {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Required fields may be replaced but not blanked.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank required field or a
    /// malformed document date.
    pub fn validate(&self) -> Result<(), CoreError> {
        let required = [
            (&self.process_number, "número do processo"),
            (&self.entity, "órgão/entidade"),
            (&self.reason, "motivo"),
            (&self.description, "descrição dos fatos"),
            (&self.arguments, "fundamentos"),
            (&self.request, "pedido"),
        ];
        for (value, label) in required {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(CoreError::Validation(format!(
                    "Campo obrigatório não informado: {label}"
                )));
            }
        }

        if let Some(Some(date)) = &self.document_date {
            let date = date.trim();
            if !date.is_empty() && NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
                return Err(CoreError::Validation(format!(
                    "Data do documento inválida: '{date}' (use AAAA-MM-DD)"
                )));
            }
        }
        Ok(())
    }
}

pub struct PetitionUpdateBuilder(PetitionUpdate);

impl PetitionUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(PetitionUpdate::default())
    }

    #[must_use]
    pub fn process_number(mut self, process_number: impl Into<String>) -> Self {
        self.0.process_number = Some(process_number.into());
        self
    }

    #[must_use]
    pub const fn kind(mut self, kind: PetitionKind) -> Self {
        self.0.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn entity(mut self, entity: impl Into<String>) -> Self {
        self.0.entity = Some(entity.into());
        self
    }

    #[must_use]
    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.0.reason = Some(reason.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.0.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn arguments(mut self, arguments: impl Into<String>) -> Self {
        self.0.arguments = Some(arguments.into());
        self
    }

    #[must_use]
    pub fn request(mut self, request: impl Into<String>) -> Self {
        self.0.request = Some(request.into());
        self
    }

    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.0.content = Some(content.into());
        self
    }

    #[must_use]
    pub fn customer_id(mut self, customer_id: Option<String>) -> Self {
        self.0.customer_id = Some(customer_id);
        self
    }

    #[must_use]
    pub fn authority(mut self, authority: Option<String>) -> Self {
        self.0.authority = Some(authority);
        self
    }

    #[must_use]
    pub fn counterparty(mut self, counterparty: Option<String>) -> Self {
        self.0.counterparty = Some(counterparty);
        self
    }

    #[must_use]
    pub fn city(mut self, city: Option<String>) -> Self {
        self.0.city = Some(city);
        self
    }

    #[must_use]
    pub fn document_date(mut self, document_date: Option<String>) -> Self {
        self.0.document_date = Some(document_date);
        self
    }

    #[must_use]
    pub fn attorney_name(mut self, attorney_name: Option<String>) -> Self {
        self.0.attorney_name = Some(attorney_name);
        self
    }

    #[must_use]
    pub fn attorney_bar_number(mut self, attorney_bar_number: Option<String>) -> Self {
        self.0.attorney_bar_number = Some(attorney_bar_number);
        self
    }

    #[must_use]
    pub fn build(self) -> PetitionUpdate {
        self.0
    }
}

impl Default for PetitionUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//! Form payloads submitted by clients, and the rules they must satisfy.
//!
//! Validation messages are client-facing (pt-BR); handlers return them as-is
//! in 400 responses.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::PetitionKind;
use crate::errors::CoreError;

/// Petition fields collected by the drafting form.
///
/// Used both for direct creation (`POST /api/petitions`) and as the input of
/// a generation job, where the LLM fills in `content`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PetitionInput {
    pub process_number: String,
    pub kind: PetitionKind,
    pub entity: String,
    pub reason: String,
    pub description: String,
    pub arguments: String,
    pub request: String,
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub authority: Option<String>,
    #[serde(default)]
    pub counterparty: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub document_date: Option<String>,
    #[serde(default)]
    pub attorney_name: Option<String>,
    #[serde(default)]
    pub attorney_bar_number: Option<String>,
}

impl PetitionInput {
    /// Check required fields and formats.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first offending field.
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
            require(value, label)?;
        }

        if let Some(date) = non_blank(self.document_date.as_deref()) {
            NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                CoreError::Validation(format!(
                    "Data do documento inválida: '{date}' (use AAAA-MM-DD)"
                ))
            })?;
        }
        Ok(())
    }

    /// Copy with every optional text field trimmed and blanks turned into `None`.
    #[must_use]
    pub fn normalized(&self) -> Self {
        let opt = |v: &Option<String>| non_blank(v.as_deref()).map(str::to_string);
        Self {
            process_number: self.process_number.trim().to_string(),
            kind: self.kind,
            entity: self.entity.trim().to_string(),
            reason: self.reason.trim().to_string(),
            description: self.description.trim().to_string(),
            arguments: self.arguments.trim().to_string(),
            request: self.request.trim().to_string(),
            customer_id: opt(&self.customer_id),
            authority: opt(&self.authority),
            counterparty: opt(&self.counterparty),
            city: opt(&self.city),
            document_date: opt(&self.document_date),
            attorney_name: opt(&self.attorney_name),
            attorney_bar_number: opt(&self.attorney_bar_number),
        }
    }
}

/// Customer record fields collected by the customer form.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewCustomer {
    pub legal_name: String,
    pub tax_id: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub number: String,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub district: String,
    pub city: String,
    pub state: String,
    #[serde(default)]
    pub postal_code: String,
}

impl NewCustomer {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank required fields or a tax ID
    /// that is neither a CPF (11 digits) nor a CNPJ (14 digits).
    pub fn validate(&self) -> Result<(), CoreError> {
        require(&self.legal_name, "razão social")?;
        require(&self.tax_id, "CPF/CNPJ")?;
        require(&self.city, "cidade")?;
        require(&self.state, "UF")?;

        let digits = normalize_tax_id(&self.tax_id);
        if digits.len() != 11 && digits.len() != 14 {
            return Err(CoreError::Validation(format!(
                "CPF/CNPJ inválido: '{}'",
                self.tax_id
            )));
        }
        Ok(())
    }
}

/// Body of `POST /api/auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    /// Name and email checks. Password strength is checked by `lex-auth`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank name or malformed email.
    pub fn validate(&self) -> Result<(), CoreError> {
        require(&self.name, "nome")?;
        validate_email(&self.email)
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Strip everything but ASCII digits from a CPF/CNPJ.
#[must_use]
pub fn normalize_tax_id(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Format a CPF (`000.000.000-00`) or CNPJ (`00.000.000/0000-00`).
///
/// Inputs with any other digit count are returned normalized but unformatted.
#[must_use]
pub fn format_tax_id(raw: &str) -> String {
    let d = normalize_tax_id(raw);
    match d.len() {
        11 => format!("{}.{}.{}-{}", &d[0..3], &d[3..6], &d[6..9], &d[9..11]),
        14 => format!(
            "{}.{}.{}/{}-{}",
            &d[0..2],
            &d[2..5],
            &d[5..8],
            &d[8..12],
            &d[12..14]
        ),
        _ => d,
    }
}

/// Lowercase and trim an email for storage and comparison.
#[must_use]
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// # Errors
///
/// Returns `CoreError::Validation` if the address is not `local@domain.tld`-shaped.
pub fn validate_email(raw: &str) -> Result<(), CoreError> {
    let email = raw.trim();
    let invalid = || CoreError::Validation(format!("E-mail inválido: '{email}'"));

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty()
        || domain.contains('@')
        || email.contains(char::is_whitespace)
        || !domain.contains('.')
        || domain.starts_with('.')
        || domain.ends_with('.')
    {
        return Err(invalid());
    }
    Ok(())
}

fn require(value: &str, label: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!(
            "Campo obrigatório não informado: {label}"
        )));
    }
    Ok(())
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

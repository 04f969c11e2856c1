//! Petition repository. Every query is scoped by the owning user.

use chrono::Utc;

use lex_core::entities::Petition;
use lex_core::enums::{AuditAction, EntityType};
use lex_core::ids::PREFIX_PETITION;
use lex_core::input::PetitionInput;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, opt_value, parse_datetime, parse_enum};
use crate::service::LexService;
use crate::updates::petition::PetitionUpdate;

const SELECT_COLS: &str = "id, user_id, customer_id, process_number, kind, entity, reason, \
     description, arguments, request, authority, counterparty, city, document_date, \
     attorney_name, attorney_bar_number, content, created_at, updated_at";

fn row_to_petition(row: &libsql::Row) -> Result<Petition, DatabaseError> {
    Ok(Petition {
        id: row.get(0)?,
        user_id: row.get(1)?,
        customer_id: get_opt_string(row, 2)?,
        process_number: row.get(3)?,
        kind: parse_enum(&row.get::<String>(4)?)?,
        entity: row.get(5)?,
        reason: row.get(6)?,
        description: row.get(7)?,
        arguments: row.get(8)?,
        request: row.get(9)?,
        authority: get_opt_string(row, 10)?,
        counterparty: get_opt_string(row, 11)?,
        city: get_opt_string(row, 12)?,
        document_date: get_opt_string(row, 13)?,
        attorney_name: get_opt_string(row, 14)?,
        attorney_bar_number: get_opt_string(row, 15)?,
        content: row.get(16)?,
        created_at: parse_datetime(&row.get::<String>(17)?)?,
        updated_at: parse_datetime(&row.get::<String>(18)?)?,
    })
}

/// Trimmed value, with blanks stored as NULL.
fn nullable(value: Option<&str>) -> libsql::Value {
    opt_value(value.map(str::trim).filter(|v| !v.is_empty()))
}

impl LexService {
    /// Store a petition owned by `user_id`.
    ///
    /// # Errors
    ///
    /// `DatabaseError::InvalidReference` when `input.customer_id` names a
    /// customer the user does not own.
    pub async fn create_petition(
        &self,
        user_id: &str,
        input: &PetitionInput,
        content: &str,
    ) -> Result<Petition, DatabaseError> {
        let input = input.normalized();
        if let Some(customer_id) = input.customer_id.as_deref() {
            self.ensure_customer_owned(user_id, customer_id).await?;
        }

        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PETITION).await?;

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO petitions ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)"
                ),
                libsql::params![
                    id.as_str(),
                    user_id,
                    input.customer_id.as_deref(),
                    input.process_number.as_str(),
                    input.kind.as_str(),
                    input.entity.as_str(),
                    input.reason.as_str(),
                    input.description.as_str(),
                    input.arguments.as_str(),
                    input.request.as_str(),
                    input.authority.as_deref(),
                    input.counterparty.as_deref(),
                    input.city.as_deref(),
                    input.document_date.as_deref(),
                    input.attorney_name.as_deref(),
                    input.attorney_bar_number.as_deref(),
                    content,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        self.audit(
            Some(user_id),
            EntityType::Petition,
            &id,
            AuditAction::Created,
            None,
        )
        .await?;

        Ok(Petition {
            id,
            user_id: user_id.to_string(),
            customer_id: input.customer_id,
            process_number: input.process_number,
            kind: input.kind,
            entity: input.entity,
            reason: input.reason,
            description: input.description,
            arguments: input.arguments,
            request: input.request,
            authority: input.authority,
            counterparty: input.counterparty,
            city: input.city,
            document_date: input.document_date,
            attorney_name: input.attorney_name,
            attorney_bar_number: input.attorney_bar_number,
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// # Errors
    ///
    /// `DatabaseError::NoResult` when missing or owned by another user.
    pub async fn get_petition(&self, user_id: &str, id: &str) -> Result<Petition, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM petitions WHERE id = ?1 AND user_id = ?2"),
                [id, user_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_petition(&row)
    }

    /// The caller's petitions, newest first.
    pub async fn list_petitions(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Petition>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM petitions WHERE user_id = ?1
                     ORDER BY created_at DESC, rowid DESC LIMIT {limit}"
                ),
                [user_id],
            )
            .await?;

        let mut petitions = Vec::new();
        while let Some(row) = rows.next().await? {
            petitions.push(row_to_petition(&row)?);
        }
        Ok(petitions)
    }

    /// Apply the `Some` fields of `update`. An empty update returns the
    /// petition unchanged and records nothing.
    ///
    /// # Errors
    ///
    /// `NoResult` for a missing or foreign petition, `InvalidReference` for a
    /// customer the user does not own.
    pub async fn update_petition(
        &self,
        user_id: &str,
        petition_id: &str,
        update: PetitionUpdate,
    ) -> Result<Petition, DatabaseError> {
        let current = self.get_petition(user_id, petition_id).await?;
        if let Some(Some(customer_id)) = update.customer_id.as_ref() {
            self.ensure_customer_owned(user_id, customer_id).await?;
        }

        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();
        let mut idx = 1usize;

        let required = [
            ("process_number", &update.process_number),
            ("entity", &update.entity),
            ("reason", &update.reason),
            ("description", &update.description),
            ("arguments", &update.arguments),
            ("request", &update.request),
        ];
        for (column, value) in required {
            if let Some(value) = value {
                sets.push(format!("{column} = ?{idx}"));
                params.push(value.trim().to_string().into());
                idx += 1;
            }
        }
        if let Some(kind) = update.kind {
            sets.push(format!("kind = ?{idx}"));
            params.push(kind.as_str().into());
            idx += 1;
        }
        if let Some(ref content) = update.content {
            sets.push(format!("content = ?{idx}"));
            params.push(content.clone().into());
            idx += 1;
        }

        let nullable_fields = [
            ("customer_id", &update.customer_id),
            ("authority", &update.authority),
            ("counterparty", &update.counterparty),
            ("city", &update.city),
            ("document_date", &update.document_date),
            ("attorney_name", &update.attorney_name),
            ("attorney_bar_number", &update.attorney_bar_number),
        ];
        for (column, value) in nullable_fields {
            if let Some(value) = value {
                sets.push(format!("{column} = ?{idx}"));
                params.push(nullable(value.as_deref()));
                idx += 1;
            }
        }

        if sets.is_empty() {
            return Ok(current);
        }

        let now = Utc::now();
        sets.push(format!("updated_at = ?{idx}"));
        params.push(now.to_rfc3339().into());
        idx += 1;

        params.push(petition_id.into());
        params.push(user_id.into());
        let sql = format!(
            "UPDATE petitions SET {} WHERE id = ?{idx} AND user_id = ?{}",
            sets.join(", "),
            idx + 1
        );
        self.db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        let updated = self.get_petition(user_id, petition_id).await?;

        self.audit(
            Some(user_id),
            EntityType::Petition,
            petition_id,
            AuditAction::Updated,
            Some(serde_json::to_value(&update).map_err(|e| DatabaseError::Other(e.into()))?),
        )
        .await?;

        Ok(updated)
    }

    /// # Errors
    ///
    /// `DatabaseError::NoResult` when missing or owned by another user.
    pub async fn delete_petition(&self, user_id: &str, petition_id: &str) -> Result<(), DatabaseError> {
        let deleted = self
            .db()
            .conn()
            .execute(
                "DELETE FROM petitions WHERE id = ?1 AND user_id = ?2",
                [petition_id, user_id],
            )
            .await?;
        if deleted == 0 {
            return Err(DatabaseError::NoResult);
        }

        self.audit(
            Some(user_id),
            EntityType::Petition,
            petition_id,
            AuditAction::Deleted,
            None,
        )
        .await?;

        tracing::info!(petition_id, "petition deleted");
        Ok(())
    }
}

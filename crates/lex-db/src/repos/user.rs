//! User repository. Accounts are looked up by ID (session) or email (login).

use chrono::Utc;

use lex_core::entities::{AuditEntry, User};
use lex_core::enums::{AuditAction, EntityType};
use lex_core::ids::{PREFIX_AUDIT, PREFIX_USER};
use lex_core::input::normalize_email;

use crate::error::{DatabaseError, is_unique_violation};
use crate::helpers::parse_datetime;
use crate::service::LexService;

const SELECT_COLS: &str = "id, email, name, password_hash, created_at, updated_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        email: row.get(1)?,
        name: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl LexService {
    /// Create an account. The email is stored normalized.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Conflict` when the email is already registered.
    pub async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> Result<User, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_USER).await?;
        let email = normalize_email(email);
        let name = name.trim();

        self.db()
            .conn()
            .execute(
                &format!("INSERT INTO users ({SELECT_COLS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
                libsql::params![
                    id.as_str(),
                    email.as_str(),
                    name,
                    password_hash,
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DatabaseError::Conflict(format!("email already registered: {email}"))
                } else {
                    e.into()
                }
            })?;

        let audit_id = self.db().generate_id(PREFIX_AUDIT).await?;
        self.append_audit(&AuditEntry {
            id: audit_id,
            user_id: Some(id.clone()),
            entity_type: EntityType::User,
            entity_id: id.clone(),
            action: AuditAction::Created,
            detail: None,
            created_at: now,
        })
        .await?;

        tracing::info!(user_id = %id, "user created");
        Ok(User {
            id,
            email,
            name: name.to_string(),
            password_hash: password_hash.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn get_user(&self, id: &str) -> Result<User, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_user(&row)
    }

    /// Case-insensitive lookup. `Ok(None)` when no account matches.
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let email = normalize_email(email);
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE email = ?1"),
                [email.as_str()],
            )
            .await?;
        match rows.next().await? {
            Some(row) => Ok(Some(row_to_user(&row)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DatabaseError;
    use crate::repos::audit::AuditFilter;
    use crate::test_support::test_service;
    use lex_core::enums::{AuditAction, EntityType};

    #[tokio::test]
    async fn create_and_get_user() {
        let svc = test_service().await;
        let user = svc
            .create_user("  Ana@Example.com ", " Ana Souza ", "$argon2id$hash")
            .await
            .unwrap();
        assert!(user.id.starts_with("usr-"));
        assert_eq!(user.email, "ana@example.com");
        assert_eq!(user.name, "Ana Souza");

        let fetched = svc.get_user(&user.id).await.unwrap();
        assert_eq!(fetched.email, "ana@example.com");
        assert_eq!(fetched.password_hash, "$argon2id$hash");
    }

    #[tokio::test]
    async fn duplicate_email_conflicts_case_insensitively() {
        let svc = test_service().await;
        svc.create_user("ana@example.com", "Ana", "h").await.unwrap();
        let err = svc
            .create_user("ANA@example.com", "Other", "h")
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Conflict(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn find_by_email() {
        let svc = test_service().await;
        let user = svc.create_user("ana@example.com", "Ana", "h").await.unwrap();

        let found = svc.find_user_by_email("Ana@Example.COM").await.unwrap();
        assert_eq!(found.map(|u| u.id), Some(user.id));
        assert!(svc.find_user_by_email("bob@example.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_missing_user_is_no_result() {
        let svc = test_service().await;
        assert!(matches!(
            svc.get_user("usr-00000000").await,
            Err(DatabaseError::NoResult)
        ));
    }

    #[tokio::test]
    async fn create_user_is_audited() {
        let svc = test_service().await;
        let user = svc.create_user("ana@example.com", "Ana", "h").await.unwrap();
        let entries = svc
            .query_audit(&AuditFilter {
                entity_type: Some(EntityType::User),
                entity_id: Some(user.id.clone()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].action, AuditAction::Created);
    }
}

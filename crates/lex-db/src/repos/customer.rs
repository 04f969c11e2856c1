//! Customer repository. Customers are private to the user who created them.

use chrono::Utc;

use lex_core::entities::Customer;
use lex_core::enums::{AuditAction, EntityType};
use lex_core::ids::PREFIX_CUSTOMER;
use lex_core::input::{NewCustomer, normalize_tax_id};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::LexService;

const SELECT_COLS: &str = "id, user_id, legal_name, tax_id, street, number, complement, \
     district, city, state, postal_code, created_at, updated_at";

fn row_to_customer(row: &libsql::Row) -> Result<Customer, DatabaseError> {
    Ok(Customer {
        id: row.get(0)?,
        user_id: row.get(1)?,
        legal_name: row.get(2)?,
        tax_id: row.get(3)?,
        street: row.get(4)?,
        number: row.get(5)?,
        complement: get_opt_string(row, 6)?,
        district: row.get(7)?,
        city: row.get(8)?,
        state: row.get(9)?,
        postal_code: row.get(10)?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
        updated_at: parse_datetime(&row.get::<String>(12)?)?,
    })
}

impl LexService {
    /// Insert a customer owned by `user_id`. Text fields are trimmed, the tax
    /// ID is stored as digits only and the state upper-cased.
    pub async fn create_customer(
        &self,
        user_id: &str,
        input: &NewCustomer,
    ) -> Result<Customer, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_CUSTOMER).await?;
        let customer = Customer {
            id: id.clone(),
            user_id: user_id.to_string(),
            legal_name: input.legal_name.trim().to_string(),
            tax_id: normalize_tax_id(&input.tax_id),
            street: input.street.trim().to_string(),
            number: input.number.trim().to_string(),
            complement: input
                .complement
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(String::from),
            district: input.district.trim().to_string(),
            city: input.city.trim().to_string(),
            state: input.state.trim().to_uppercase(),
            postal_code: input.postal_code.trim().to_string(),
            created_at: now,
            updated_at: now,
        };

        self.db()
            .conn()
            .execute(
                &format!(
                    "INSERT INTO customers ({SELECT_COLS})
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)"
                ),
                libsql::params![
                    customer.id.as_str(),
                    user_id,
                    customer.legal_name.as_str(),
                    customer.tax_id.as_str(),
                    customer.street.as_str(),
                    customer.number.as_str(),
                    customer.complement.as_deref(),
                    customer.district.as_str(),
                    customer.city.as_str(),
                    customer.state.as_str(),
                    customer.postal_code.as_str(),
                    now.to_rfc3339(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        self.audit(
            Some(user_id),
            EntityType::Customer,
            &id,
            AuditAction::Created,
            None,
        )
        .await?;

        Ok(customer)
    }

    /// The caller's customers, alphabetically by legal name.
    pub async fn list_customers(
        &self,
        user_id: &str,
        limit: u32,
    ) -> Result<Vec<Customer>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM customers WHERE user_id = ?1
                     ORDER BY legal_name COLLATE NOCASE, created_at LIMIT {limit}"
                ),
                [user_id],
            )
            .await?;

        let mut customers = Vec::new();
        while let Some(row) = rows.next().await? {
            customers.push(row_to_customer(&row)?);
        }
        Ok(customers)
    }

    /// # Errors
    ///
    /// `DatabaseError::NoResult` when the customer is missing or owned by
    /// another user.
    pub async fn get_customer(&self, user_id: &str, id: &str) -> Result<Customer, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM customers WHERE id = ?1 AND user_id = ?2"),
                [id, user_id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_customer(&row)
    }

    /// Map a missing customer reference to `InvalidReference`.
    pub(crate) async fn ensure_customer_owned(
        &self,
        user_id: &str,
        customer_id: &str,
    ) -> Result<(), DatabaseError> {
        match self.get_customer(user_id, customer_id).await {
            Ok(_) => Ok(()),
            Err(DatabaseError::NoResult) => Err(DatabaseError::InvalidReference(format!(
                "customer {customer_id}"
            ))),
            Err(e) => Err(e),
        }
    }
}

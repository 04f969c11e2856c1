//! Shared test utilities for lex-db tests.

use lex_core::entities::{Customer, User};
use lex_core::enums::PetitionKind;
use lex_core::input::{NewCustomer, PetitionInput};

use crate::service::LexService;

/// Create an in-memory `LexService`.
pub async fn test_service() -> LexService {
    LexService::new_local(":memory:").await.unwrap()
}

/// Create a user with a placeholder hash.
pub async fn create_test_user(svc: &LexService, email: &str) -> User {
    svc.create_user(email, "Test Lawyer", "$argon2id$placeholder")
        .await
        .unwrap()
}

pub fn sample_customer() -> NewCustomer {
    NewCustomer {
        legal_name: "Construtora Alfa Ltda".into(),
        tax_id: "12.345.678/0001-95".into(),
        street: "Rua das Flores".into(),
        number: "100".into(),
        complement: None,
        district: "Centro".into(),
        city: "Campinas".into(),
        state: "SP".into(),
        postal_code: "13010-000".into(),
    }
}

pub async fn create_test_customer(svc: &LexService, user_id: &str) -> Customer {
    svc.create_customer(user_id, &sample_customer()).await.unwrap()
}

pub fn sample_input() -> PetitionInput {
    PetitionInput {
        process_number: "0001234-56.2024.8.26.0100".into(),
        kind: PetitionKind::AdministrativeAppeal,
        entity: "Prefeitura de Campinas".into(),
        reason: "Inabilitação indevida".into(),
        description: "A empresa foi inabilitada no pregão 12/2024.".into(),
        arguments: "Atendimento integral ao edital.".into(),
        request: "Reforma da decisão.".into(),
        customer_id: None,
        authority: Some("Pregoeiro".into()),
        counterparty: None,
        city: Some("Campinas".into()),
        document_date: Some("2024-10-01".into()),
        attorney_name: Some("Ana Souza".into()),
        attorney_bar_number: Some("SP 123.456".into()),
    }
}

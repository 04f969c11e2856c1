//! Route handlers, one module per resource.

pub mod auth;
pub mod customers;
pub mod generation;
pub mod petitions;

use axum::Json;
use serde::Deserialize;
use serde_json::{Value, json};

/// `?limit=` on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

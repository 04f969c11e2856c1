use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use lex_core::entities::Customer;
use lex_core::input::NewCustomer;

use crate::api::ListQuery;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery, AuthUser};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Vec<Customer>>, ApiError> {
    let limit = state.list_limit(query.limit);
    let customers = state.service.list_customers(user.id(), limit).await?;
    Ok(Json(customers))
}

pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    ApiJson(input): ApiJson<NewCustomer>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    input.validate()?;
    let customer = state.service.create_customer(user.id(), &input).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

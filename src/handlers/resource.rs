//! Resource handlers, generic over the record kind: list, create, update, delete.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::models::Record;
use crate::service::CrudService;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use std::collections::HashMap;

/// Responds 200 with every stored record as a JSON array, `[]` when empty.
pub async fn list<R: Record>(State(state): State<AppState>) -> Result<Json<Vec<R>>, AppError> {
    let rows = CrudService::list::<R>(state.store.as_ref()).await?;
    Ok(Json(rows))
}

/// Responds 200 with the stored record, including a generated id where the table assigns one.
pub async fn create<R: Record>(
    State(state): State<AppState>,
    JsonBody(record): JsonBody<R>,
) -> Result<Json<R>, AppError> {
    let record = CrudService::create(state.store.as_ref(), record).await?;
    tracing::info!(table = R::SPEC.table, "record created");
    Ok(Json(record))
}

/// Replaces the value columns of the keyed row; 404 when no row matched.
pub async fn update<R: Record>(
    State(state): State<AppState>,
    JsonBody(record): JsonBody<R>,
) -> Result<Json<R>, AppError> {
    let record = CrudService::update(state.store.as_ref(), record).await?;
    Ok(Json(record))
}

/// Key comes from query parameters named after the table's key columns.
pub async fn delete<R: Record>(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<StatusCode, AppError> {
    let key = R::SPEC.key_from_query(&params)?;
    CrudService::delete::<R>(state.store.as_ref(), key).await?;
    tracing::info!(table = R::SPEC.table, "record deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for every method the resource does not serve.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

//! Lookup catalog: public reads, administrative writes.

use super::parse_id;
use crate::domain::error::ApiError;
use crate::domain::response::ApiResponse;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use shared_types::{LookupEntry, LookupId};

#[derive(Deserialize)]
pub struct CreateLookup {
    #[serde(default)]
    pub name: String,
}

/// `GET /lookup-entries`
pub async fn list(State(state): State<AppState>) -> Result<ApiResponse<Vec<LookupEntry>>, ApiError> {
    Ok(ApiResponse::ok("Lookup entries", state.catalog.list().await?))
}

/// `GET /lookup-entries/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<LookupEntry>, ApiError> {
    let id: LookupId = parse_id(&id, "Lookup entry")?;
    Ok(ApiResponse::ok("Lookup entry", state.catalog.get(id).await?))
}

/// `POST /lookup-entries`
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateLookup>, JsonRejection>,
) -> Result<ApiResponse<LookupEntry>, ApiError> {
    let Json(body) = payload?;
    let entry = state.catalog.create(&body.name).await?;
    Ok(ApiResponse::created("Lookup entry created", entry))
}

/// `DELETE /lookup-entries/:id`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, ApiError> {
    let id: LookupId = parse_id(&id, "Lookup entry")?;
    state.catalog.delete(id).await?;
    Ok(ApiResponse::ok("Lookup entry deleted", ()))
}

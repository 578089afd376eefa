//! Bonafide requests: student submission and history, administrative queue
//! and transitions.

use super::parse_id;
use crate::domain::error::ApiError;
use crate::domain::response::ApiResponse;
use crate::extract::CurrentCaller;
use crate::state::AppState;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use bf_01_validator::FieldViolation;
use serde::Deserialize;
use shared_types::{BonafideRequest, RequestId, RequestStatus, RequestSummary};

#[derive(Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub reason: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRequest {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub document_ref: Option<String>,
}

#[derive(Deserialize)]
pub struct QueueQuery {
    pub status: Option<String>,
}

fn parse_status(raw: &str) -> Result<RequestStatus, ApiError> {
    raw.trim()
        .parse()
        .map_err(|reason: String| FieldViolation::new("status", reason).into())
}

/// `POST /bonafide-requests`
pub async fn submit(
    State(state): State<AppState>,
    caller: CurrentCaller,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<ApiResponse<BonafideRequest>, ApiError> {
    let Json(body) = payload?;
    let identity = state.identities.get(caller.session.identity_id).await?;
    let request = state.ledger.submit(&identity, &body.reason).await?;
    Ok(ApiResponse::created("Bonafide request submitted", request))
}

/// `GET /bonafide-requests`, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    caller: CurrentCaller,
) -> Result<ApiResponse<Vec<BonafideRequest>>, ApiError> {
    let requests = state.ledger.list_for(caller.session.identity_id).await?;
    Ok(ApiResponse::ok("Bonafide requests", requests))
}

/// `GET /bonafide-requests/summary`
pub async fn summary(
    State(state): State<AppState>,
    caller: CurrentCaller,
) -> Result<ApiResponse<RequestSummary>, ApiError> {
    let summary = state.ledger.summary_for(caller.session.identity_id).await?;
    Ok(ApiResponse::ok("Bonafide request summary", summary))
}

/// `GET /admin/bonafide-requests?status=`, oldest first.
pub async fn queue(
    State(state): State<AppState>,
    query: Result<Query<QueueQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<BonafideRequest>>, ApiError> {
    let Query(query) = query?;
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let requests = state.ledger.list_all(status).await?;
    Ok(ApiResponse::ok("Bonafide request queue", requests))
}

/// `PATCH /bonafide-requests/:id`
pub async fn transition(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<TransitionRequest>, JsonRejection>,
) -> Result<ApiResponse<BonafideRequest>, ApiError> {
    let id: RequestId = parse_id(&id, "Bonafide request")?;
    let Json(body) = payload?;
    let status = parse_status(&body.status)?;

    let updated = state.ledger.transition(id, status, body.document_ref).await?;
    Ok(ApiResponse::ok(
        format!("Bonafide request {}", updated.status),
        updated,
    ))
}

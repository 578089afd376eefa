//! Login and logout.

use crate::domain::error::ApiError;
use crate::domain::response::ApiResponse;
use crate::extract::CurrentCaller;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use shared_types::IdentityId;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    /// When present, must belong to the same identity as `email`.
    #[serde(default)]
    pub identifier: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedToken {
    pub token: String,
    /// Unix seconds.
    pub expires_at: i64,
    pub identity_id: IdentityId,
}

/// `POST /sessions`
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<ApiResponse<IssuedToken>, ApiError> {
    let Json(request) = payload?;
    let identifier = request
        .identifier
        .as_deref()
        .map(str::trim)
        .filter(|i| !i.is_empty());

    let session = state
        .sessions
        .authenticate(&request.email, &request.password, identifier)
        .await?;
    let token = state.sessions.issue_token(&session)?;

    Ok(ApiResponse::ok(
        "Login successful",
        IssuedToken {
            token,
            expires_at: session.expires_at,
            identity_id: session.identity_id,
        },
    ))
}

/// `DELETE /sessions`
pub async fn logout(
    State(state): State<AppState>,
    caller: CurrentCaller,
) -> Result<ApiResponse<()>, ApiError> {
    state.sessions.revoke(&caller.token)?;
    Ok(ApiResponse::ok("Logged out", ()))
}

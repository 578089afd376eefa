//! Registration and profile.

use crate::domain::error::ApiError;
use crate::domain::response::ApiResponse;
use crate::extract::CurrentCaller;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use bf_01_validator::{validate_registration, FieldViolation, RegistrationForm};
use bf_02_identity_store::IdentityCandidate;
use shared_types::{Gender, Identity};

/// `POST /identities`
///
/// Syntax first (every violation reported at once), then department
/// membership, then hashing, then the atomic uniqueness-checked insert.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegistrationForm>, JsonRejection>,
) -> Result<ApiResponse<Identity>, ApiError> {
    let Json(form) = payload?;
    validate_registration(&form)?;

    if !state.catalog.contains(&form.department).await? {
        return Err(FieldViolation::new("department", "must be one of the listed departments").into());
    }

    let gender: Gender = form
        .gender
        .parse()
        .map_err(|reason: String| FieldViolation::new("gender", reason))?;
    let password_verifier = state.sessions.hash_password(&form.password).await?;

    let identity = state
        .identities
        .register(IdentityCandidate {
            first_name: form.first_name.trim().to_owned(),
            last_name: form.last_name.trim().to_owned(),
            identifier: form.identifier.trim().to_owned(),
            phone: form.phone,
            email: form.email,
            department: form.department.trim().to_owned(),
            gender,
            password_verifier,
        })
        .await?;

    Ok(ApiResponse::created("Student registered successfully", identity))
}

/// `GET /identities/me`
pub async fn me(
    State(state): State<AppState>,
    caller: CurrentCaller,
) -> Result<ApiResponse<Identity>, ApiError> {
    let identity = state.identities.get(caller.session.identity_id).await?;
    Ok(ApiResponse::ok("Student profile", identity))
}

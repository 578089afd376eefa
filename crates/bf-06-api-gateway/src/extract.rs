//! Bearer-token extractor.

use crate::domain::error::ApiError;
use crate::state::AppState;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use shared_types::Session;

/// The authenticated caller of a bearer-protected route.
///
/// Resolution checks signature, expiry and revocation; it never touches the
/// store.
#[derive(Debug, Clone)]
pub struct CurrentCaller {
    pub session: Session,
    /// Raw token, kept for logout.
    pub token: String,
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentCaller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or_else(|| {
            tracing::debug!(path = %parts.uri.path(), "Missing bearer token");
            ApiError::unauthorized()
        })?;

        let session = state.sessions.resolve_token(token)?;
        Ok(Self {
            session,
            token: token.to_owned(),
        })
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    let value = parts.headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

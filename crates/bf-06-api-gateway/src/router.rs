//! Route table.

use crate::domain::config::GatewayConfig;
use crate::handlers::{health, identities, lookups, requests, sessions};
use crate::middleware::{create_cors_layer, AdminAuthLayer, TracingLayer};
use crate::state::AppState;
use crate::API_PREFIX;
use axum::routing::{get, patch, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;

/// Build the full HTTP router.
///
/// Administrative routes sit behind [`AdminAuthLayer`]; bearer-protected
/// routes authenticate in their handlers through
/// [`CurrentCaller`](crate::extract::CurrentCaller).
pub fn build_router(state: AppState, config: &GatewayConfig) -> Router {
    let public = Router::new()
        .route("/health", get(health::health_check))
        .route("/identities", post(identities::register))
        .route("/identities/me", get(identities::me))
        .route("/sessions", post(sessions::login).delete(sessions::logout))
        .route(
            "/bonafide-requests",
            post(requests::submit).get(requests::list_mine),
        )
        .route("/bonafide-requests/summary", get(requests::summary))
        .route("/lookup-entries", get(lookups::list))
        .route("/lookup-entries/:id", get(lookups::get));

    let admin = Router::new()
        .route("/admin/bonafide-requests", get(requests::queue))
        .route("/bonafide-requests/:id", patch(requests::transition))
        .route("/lookup-entries", post(lookups::create))
        .route("/lookup-entries/:id", axum::routing::delete(lookups::delete))
        .route_layer(AdminAuthLayer::new(config.admin.api_key.clone()));

    let middleware = ServiceBuilder::new()
        .layer(create_cors_layer(&config.cors))
        .layer(TracingLayer::new());

    // merge joins same-path routes per method, so the admin layer wraps only
    // POST/DELETE /lookup-entries while GET stays public
    Router::new()
        .nest(API_PREFIX, public.merge(admin))
        .layer(middleware)
        // outermost: it changes the request body type
        .layer(RequestBodyLimitLayer::new(config.limits.max_body_bytes))
        .with_state(state)
}

//! Administrative API-key middleware.
//!
//! Wraps only the administrative routes. A request passes when its
//! `X-Api-Key` header equals the configured key; with no key configured every
//! administrative request is refused.

use crate::domain::error::ApiError;
use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Header carrying the admin key.
pub const ADMIN_KEY_HEADER: &str = "x-api-key";

/// Admin authentication layer
#[derive(Clone)]
pub struct AdminAuthLayer {
    api_key: Arc<Option<String>>,
}

impl AdminAuthLayer {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key: Arc::new(api_key),
        }
    }
}

impl<S> Layer<S> for AdminAuthLayer {
    type Service = AdminAuthService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        AdminAuthService {
            inner,
            api_key: Arc::clone(&self.api_key),
        }
    }
}

/// Admin authentication service
#[derive(Clone)]
pub struct AdminAuthService<S> {
    inner: S,
    api_key: Arc<Option<String>>,
}

impl<S> Service<Request<Body>> for AdminAuthService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let api_key = Arc::clone(&self.api_key);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let Some(expected) = api_key.as_deref() else {
                warn!(path = %req.uri().path(), "Admin request refused: no admin key configured");
                return Ok(ApiError::unauthorized().into_response());
            };

            if !check_api_key(&req, expected) {
                warn!(path = %req.uri().path(), "Admin request refused: bad or missing API key");
                return Ok(ApiError::unauthorized().into_response());
            }

            debug!(path = %req.uri().path(), "Admin request authorized");
            inner.call(req).await
        })
    }
}

fn check_api_key<B>(req: &Request<B>, expected: &str) -> bool {
    req.headers()
        .get(ADMIN_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|presented| constant_time_compare(presented, expected))
}

/// Constant-time string comparison to prevent timing attacks.
///
/// Runs in time independent of how many bytes match; a length mismatch is
/// folded into the same constant-time result.
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    use subtle::ConstantTimeEq;

    let max_len = std::cmp::max(a.len(), b.len());

    // different pad bytes so unequal lengths never compare equal
    let mut a_padded = vec![0u8; max_len];
    let mut b_padded = vec![0xFFu8; max_len];

    a_padded[..a.len()].copy_from_slice(a.as_bytes());
    b_padded[..b.len()].copy_from_slice(b.as_bytes());

    let lengths_equal = a.len().ct_eq(&b.len());
    let contents_equal = a_padded.ct_eq(&b_padded);

    (lengths_equal & contents_equal).into()
}

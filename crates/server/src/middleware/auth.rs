use axum::{
    Json,
    body::Body,
    extract::Request,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ErrorBody;

/// Header carrying the client's API key
pub const API_KEY_HEADER: &str = "X-API-Key";

/// API Key authentication state
#[derive(Clone)]
pub struct ApiKeyAuth {
    api_key: Option<String>,
}

impl ApiKeyAuth {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }

    /// A request passes when no key is configured or the header matches.
    fn allows(&self, headers: &HeaderMap) -> bool {
        match &self.api_key {
            None => true,
            Some(expected) => headers
                .get(API_KEY_HEADER)
                .and_then(|value| value.to_str().ok())
                .is_some_and(|presented| presented == expected),
        }
    }
}

/// Middleware gating protected routes behind the configured API key
pub async fn auth_middleware(request: Request<Body>, next: Next) -> Response {
    let allowed = request
        .extensions()
        .get::<ApiKeyAuth>()
        .map(|auth| auth.allows(request.headers()))
        .unwrap_or(true);

    if !allowed {
        tracing::warn!(path = %request.uri().path(), "Rejected request with invalid API key");
        let body = ErrorBody {
            error: "Invalid or missing API key".to_string(),
        };
        return (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    }

    next.run(request).await
}

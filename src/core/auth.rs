//! API-key authentication for the catalog routes.
//!
//! The guard is only mounted when an `Auth.ApiKey` is configured. The
//! `Authorization` header must then carry that key, either bare or as
//! `ApiKey <key>`.

use axum::extract::State;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use subtle::ConstantTimeEq;
use tracing::{debug, info};
use crate::core::controller::{AppState, ServerError};

pub const API_KEY_SCHEME: &str = "ApiKey";

/// Identity attached to authenticated requests.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub name: String,
    pub scheme: String,
}

impl Principal {
    fn api_client() -> Self {
        Self {
            name: "api-client".to_string(),
            scheme: API_KEY_SCHEME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AuthError {
    MissingKey,
    InvalidKey,
}

impl AuthError {
    fn message(&self) -> &'static str {
        match self {
            AuthError::MissingKey => "Missing API key",
            AuthError::InvalidKey => "Invalid API key",
        }
    }
}

pub fn authenticate(headers: &HeaderMap, expected_key: &str) -> Result<Principal, AuthError> {
    let header = headers.get(AUTHORIZATION).ok_or(AuthError::MissingKey)?;
    let value = header.to_str().map_err(|_| AuthError::InvalidKey)?.trim();
    let presented = match value.split_once(char::is_whitespace) {
        Some((scheme, key)) if scheme == API_KEY_SCHEME => key.trim_start(),
        _ => value,
    };
    if bool::from(presented.as_bytes().ct_eq(expected_key.as_bytes())) {
        Ok(Principal::api_client())
    } else {
        Err(AuthError::InvalidKey)
    }
}

pub(crate) async fn require_api_key<B>(
    State(state): State<AppState>,
    mut req: Request<B>,
    next: Next<B>) -> Result<Response, ServerError> {
    let Some(expected_key) = state.config.auth.api_key.as_deref() else {
        return Ok(next.run(req).await);
    };
    match authenticate(req.headers(), expected_key) {
        Ok(principal) => {
            debug!(principal = principal.name.as_str(), "request authenticated");
            req.extensions_mut().insert(principal);
            Ok(next.run(req).await)
        }
        Err(err) => {
            info!(path = req.uri().path(), reason = err.message(), "request rejected");
            Err(ServerError::message(StatusCode::UNAUTHORIZED, err.message()))
        }
    }
}

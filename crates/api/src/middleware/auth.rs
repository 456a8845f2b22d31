//! Bearer token authentication middleware.
//!
//! Verifies identity-provider access tokens and stores the verified
//! principal in request extensions for extractors and rate limiting.

use axum::{
    async_trait,
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// Verified token principal: who the identity provider says is calling.
///
/// This is the token's claims only; the portal user record may not exist
/// yet (first-login registration creates it).
#[derive(Debug, Clone)]
pub struct AuthPrincipal {
    pub user_id: Uuid,
    pub email: String,
}

/// Middleware that requires a valid Bearer access token.
///
/// On success the [`AuthPrincipal`] is inserted into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let principal = match verify_bearer(&state, req.headers()) {
        Ok(principal) => principal,
        Err(err) => return err.into_response(),
    };

    req.extensions_mut().insert(principal);
    next.run(req).await
}

/// Verifies the Authorization header against the identity provider secret.
pub fn verify_bearer(
    state: &AppState,
    headers: &axum::http::HeaderMap,
) -> Result<AuthPrincipal, ApiError> {
    let auth_header = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::Unauthorized("Invalid Authorization header format".to_string()))?;

    let claims = state
        .verifier
        .verify(token)
        .map_err(|_| ApiError::Unauthorized("Invalid or expired token".to_string()))?;

    let user_id = claims
        .user_id()
        .map_err(|_| ApiError::Unauthorized("Invalid token subject".to_string()))?;

    Ok(AuthPrincipal {
        user_id,
        email: claims.email,
    })
}

#[async_trait]
impl FromRequestParts<AppState> for AuthPrincipal {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(principal) = parts.extensions.get::<AuthPrincipal>() {
            return Ok(principal.clone());
        }

        verify_bearer(state, &parts.headers)
    }
}

//! User registration and profile endpoints.
//!
//! Authentication happens at the identity provider; these endpoints link the
//! token principal to a portal user row.

use axum::{extract::State, http::StatusCode, Json};
use domain::models::{CreateUserRequest, UserResponse};
use persistence::repositories::UserRepository;
use tracing::info;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::AuthPrincipal;

/// POST /api/users
///
/// First-login registration. Uses the raw token principal rather than
/// `AuthUser` because no user row exists yet. The row id is the identity
/// provider's subject, so repeat calls hit the primary key and conflict.
pub async fn register_user(
    State(state): State<AppState>,
    principal: AuthPrincipal,
    Json(request): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    request.validate()?;

    if !request.email.eq_ignore_ascii_case(&principal.email) {
        return Err(ApiError::Forbidden(
            "Email does not match the authenticated identity".to_string(),
        ));
    }

    let repo = UserRepository::new(state.pool.clone());
    let user = repo
        .create(principal.user_id, &request.email, &request.name)
        .await
        .map_err(|err| match ApiError::from(err) {
            ApiError::Conflict(_) => ApiError::Conflict("User already registered".to_string()),
            other => other,
        })?;

    info!(user_id = %user.id, "User registered");

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users/me
pub async fn current_user(auth: AuthUser) -> Json<UserResponse> {
    Json(UserResponse::from(auth.user))
}

//! Authenticated user extractors.
//!
//! [`AuthUser`] resolves the verified token principal to the portal user
//! record; [`AdminUser`] additionally requires the `ADMIN` role.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use domain::models::user::User;
use persistence::repositories::UserRepository;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::auth::AuthPrincipal;

/// Authenticated portal user.
///
/// Rejects with 401 when the token is missing/invalid and 404 when the
/// principal has not completed first-login registration yet.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user: User,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let principal = AuthPrincipal::from_request_parts(parts, state).await?;

        let user = UserRepository::new(state.pool.clone())
            .find_by_id(principal.user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not registered".to_string()))?;

        Ok(AuthUser { user })
    }
}

/// Authenticated administrator.
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub user: User,
}

#[async_trait]
impl FromRequestParts<AppState> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser { user } = AuthUser::from_request_parts(parts, state).await?;

        if !user.role.is_admin() {
            return Err(ApiError::Forbidden("Administrator role required".to_string()));
        }

        Ok(AdminUser { user })
    }
}

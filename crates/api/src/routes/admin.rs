//! Administrator read surface.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use domain::models::{AdminUsersQuery, AdminUsersResponse, GraduateResponse, GuestResponse};
use persistence::repositories::{GraduateRepository, GuestRepository, UserRepository};
use shared::pagination::{PageInfo, PageParams};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;

/// GET /api/admin/users?page&limit&search
///
/// Paginated user directory with per-user guest counts, graduate flags and
/// portal-wide registration totals.
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminUser,
    Query(query): Query<AdminUsersQuery>,
) -> Result<Json<AdminUsersResponse>, ApiError> {
    let repo = UserRepository::new(state.pool.clone());
    let (users, total) = repo.list_admin(&query).await?;
    let stats = repo.stats().await?;

    let params = PageParams {
        page: query.page,
        limit: query.limit,
    };

    Ok(Json(AdminUsersResponse {
        users,
        pagination: PageInfo::new(&params, total),
        stats,
    }))
}

/// GET /api/admin/users/:user_id/guests
pub async fn user_guests(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<GuestResponse>>, ApiError> {
    let repo = GuestRepository::new(state.pool.clone());
    let guests = repo
        .list_for_user(user_id)
        .await?
        .into_iter()
        .map(|(guest, qr_code)| GuestResponse::new(guest, qr_code))
        .collect();

    Ok(Json(guests))
}

/// GET /api/admin/graduates/:user_id
pub async fn user_graduate(
    State(state): State<AppState>,
    _admin: AdminUser,
    Path(user_id): Path<Uuid>,
) -> Result<Json<GraduateResponse>, ApiError> {
    let repo = GraduateRepository::new(state.pool.clone());
    let (graduate, qr_code) = repo
        .find_by_user_id(user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Graduate not found".to_string()))?;

    Ok(Json(GraduateResponse::new(graduate, qr_code)))
}

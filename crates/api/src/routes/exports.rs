//! Roster export endpoints.
//!
//! Exports render a PDF roster, upload it to object storage and hand back
//! a short-lived presigned download URL instead of streaming the file.

use axum::{extract::State, Json};
use persistence::repositories::{GraduateRepository, GuestRepository};
use serde::Serialize;
use tracing::info;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::services::storage::{export_key, StorageService};
use crate::services::pdf;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResponse {
    pub url: String,
    pub expires_in_secs: u64,
}

/// GET /api/export/guests
pub async fn export_guests(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<ExportResponse>, ApiError> {
    let rows = GuestRepository::new(state.pool.clone()).list_all().await?;
    let document = pdf::guest_roster(&rows)?;

    upload_export(&state, "guests", document).await
}

/// GET /api/export/graduates
pub async fn export_graduates(
    State(state): State<AppState>,
    _admin: AdminUser,
) -> Result<Json<ExportResponse>, ApiError> {
    let rows = GraduateRepository::new(state.pool.clone()).list_all().await?;
    let document = pdf::graduate_roster(&rows)?;

    upload_export(&state, "graduates", document).await
}

async fn upload_export(
    state: &AppState,
    name: &str,
    document: Vec<u8>,
) -> Result<Json<ExportResponse>, ApiError> {
    let storage: &StorageService = state
        .storage
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("File storage is not configured".to_string()))?;

    let key = export_key(name);
    storage.put(&key, document).await?;
    let url = storage.signed_get_url(&key).await?;

    info!(export = name, key = %key, "Roster export generated");

    Ok(Json(ExportResponse {
        url: url.to_string(),
        expires_in_secs: storage.signed_url_expiry_secs(),
    }))
}

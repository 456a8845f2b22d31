//! Presigned download URLs for stored documents.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::routes::exports::ExportResponse;

#[derive(Debug, Deserialize)]
pub struct SignedUrlRequest {
    pub path: String,
}

/// POST /api/storage/signed-url
///
/// Exchanges a storage key for a short-lived presigned GET URL. Buckets are
/// private; this is the only way clients read uploaded documents back.
pub async fn signed_url(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(request): Json<SignedUrlRequest>,
) -> Result<Json<ExportResponse>, ApiError> {
    if request.path.is_empty() || request.path.contains("..") {
        return Err(ApiError::Validation("Invalid storage path".to_string()));
    }

    let storage = state
        .storage
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("File storage is not configured".to_string()))?;

    let url = storage.signed_get_url(&request.path).await?;

    Ok(Json(ExportResponse {
        url: url.to_string(),
        expires_in_secs: storage.signed_url_expiry_secs(),
    }))
}

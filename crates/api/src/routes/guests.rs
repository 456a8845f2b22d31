//! Guest registration endpoints.
//!
//! A user registers guests up to their quota. Each successful registration
//! stores the identity document, creates the guest together with its QR
//! code in one transaction, and emails the code to the guest.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use domain::models::{verify_url, CreateGuestRequest, GuestResponse};
use persistence::repositories::GuestRepository;
use shared::validation::{file_extension, validate_id_document_type};
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::metrics::record_code_issued;
use crate::routes::upload::{field_error, file_field, missing_field, text_field, UploadedFile};
use crate::services::{qr, storage::document_key};

/// GET /api/guests
pub async fn list_guests(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Vec<GuestResponse>>, ApiError> {
    let repo = GuestRepository::new(state.pool.clone());
    let guests = repo
        .list_for_user(auth.user.id)
        .await?
        .into_iter()
        .map(|(guest, qr_code)| GuestResponse::new(guest, qr_code))
        .collect();

    Ok(Json(guests))
}

/// POST /api/guests (multipart/form-data)
///
/// Text fields: firstName, lastName, governmentId, phoneNumber, email.
/// File field: idImage (PDF or image).
pub async fn create_guest(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<GuestResponse>), ApiError> {
    let mut first_name = None;
    let mut last_name = None;
    let mut government_id = None;
    let mut phone_number = None;
    let mut email = None;
    let mut id_image: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::Validation("Malformed multipart body".to_string()))?
    {
        match field.name().unwrap_or("") {
            "firstName" => first_name = Some(text_field(field).await?),
            "lastName" => last_name = Some(text_field(field).await?),
            "governmentId" => government_id = Some(text_field(field).await?),
            "phoneNumber" => phone_number = Some(text_field(field).await?),
            "email" => email = Some(text_field(field).await?),
            "idImage" => id_image = Some(file_field(field).await?),
            _ => {}
        }
    }

    let request = CreateGuestRequest {
        first_name: first_name.ok_or_else(|| missing_field("firstName"))?,
        last_name: last_name.ok_or_else(|| missing_field("lastName"))?,
        government_id: government_id.ok_or_else(|| missing_field("governmentId"))?,
        phone_number: phone_number.ok_or_else(|| missing_field("phoneNumber"))?,
        email: email.ok_or_else(|| missing_field("email"))?,
    };
    request.validate()?;

    let file = id_image.ok_or_else(|| missing_field("idImage"))?;
    validate_id_document_type(&file.content_type).map_err(field_error)?;

    let repo = GuestRepository::new(state.pool.clone());
    let count = repo.count_for_user(auth.user.id).await?;
    if count >= auth.user.max_guests as i64 {
        return Err(ApiError::Validation(format!(
            "Guest limit reached ({} maximum)",
            auth.user.max_guests
        )));
    }

    let storage = state
        .storage
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("File storage is not configured".to_string()))?;

    let key = document_key("government-ids", &file_extension(&file.filename));
    storage.put(&key, file.bytes).await?;

    let (guest, qr_code) = repo.create_with_code(auth.user.id, &request, &key).await?;
    record_code_issued("guest");

    info!(guest_id = %guest.id, user_id = %auth.user.id, "Guest registered");

    let url = verify_url(&state.config.server.app_base_url, &qr_code.code);
    let png = qr::render_png(&url)?;
    if let Err(err) = state
        .email
        .send_guest_code(&guest.email, &guest.first_name, &url, png)
        .await
    {
        // The guest and code rows stay; the code can be re-sent manually.
        warn!(guest_id = %guest.id, error = %err, "Failed to email guest code");
        return Err(err.into());
    }

    Ok((StatusCode::CREATED, Json(GuestResponse::new(guest, Some(qr_code)))))
}

/// DELETE /api/guests/:guest_id
///
/// Removes the guest and its QR code. The stored identity document is
/// deleted best effort; a storage failure does not block the delete.
pub async fn delete_guest(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(guest_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let repo = GuestRepository::new(state.pool.clone());
    let (guest, _) = repo
        .find_for_user(guest_id, auth.user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Guest not found".to_string()))?;

    if let Some(storage) = &state.storage {
        if let Err(err) = storage.delete(&guest.id_image_url).await {
            warn!(guest_id = %guest_id, error = %err, "Failed to delete identity document");
        }
    }

    let deleted = repo.delete(guest_id, auth.user.id).await?;
    if !deleted {
        return Err(ApiError::NotFound("Guest not found".to_string()));
    }

    info!(guest_id = %guest_id, user_id = %auth.user.id, "Guest deleted");

    Ok(StatusCode::NO_CONTENT)
}

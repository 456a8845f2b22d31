//! Graduate registration endpoints.
//!
//! One graduate record per user. Registration stores the identity document,
//! creates the graduate together with its QR code, renders the entry ticket
//! PDF and emails it to the account holder.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;
use domain::models::{verify_url, CreateGraduateRequest, GraduateResponse};
use persistence::repositories::{GraduateRepository, NewGraduate};
use shared::validation::{file_extension, validate_id_document_type};
use tracing::{info, warn};
use validator::Validate;

use crate::app::AppState;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::middleware::metrics::record_code_issued;
use crate::routes::upload::{field_error, file_field, missing_field, text_field, UploadedFile};
use crate::services::{pdf, qr, storage::document_key};

/// GET /api/graduates
///
/// Returns the caller's graduate record, or null when none is registered.
pub async fn current_graduate(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Option<GraduateResponse>>, ApiError> {
    let repo = GraduateRepository::new(state.pool.clone());
    let graduate = repo
        .find_by_user_id(auth.user.id)
        .await?
        .map(|(graduate, qr_code)| GraduateResponse::new(graduate, qr_code));

    Ok(Json(graduate))
}

/// POST /api/graduates (multipart/form-data)
///
/// Text fields: name, major, dateOfBirth (YYYY-MM-DD), gafIdNumber,
/// governmentId. File field: idImage (PDF or image).
pub async fn create_graduate(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<GraduateResponse>), ApiError> {
    let mut name = None;
    let mut major = None;
    let mut date_of_birth = None;
    let mut gaf_id_number = None;
    let mut government_id = None;
    let mut id_image: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ApiError::Validation("Malformed multipart body".to_string()))?
    {
        match field.name().unwrap_or("") {
            "name" => name = Some(text_field(field).await?),
            "major" => major = Some(text_field(field).await?),
            "dateOfBirth" => date_of_birth = Some(text_field(field).await?),
            "gafIdNumber" => gaf_id_number = Some(text_field(field).await?),
            "governmentId" => government_id = Some(text_field(field).await?),
            "idImage" => id_image = Some(file_field(field).await?),
            _ => {}
        }
    }

    let date_of_birth = date_of_birth
        .ok_or_else(|| missing_field("dateOfBirth"))
        .and_then(|raw| {
            NaiveDate::parse_from_str(&raw, "%Y-%m-%d").map_err(|_| {
                ApiError::Validation("dateOfBirth must be a YYYY-MM-DD date".to_string())
            })
        })?;

    let request = CreateGraduateRequest {
        name: name.ok_or_else(|| missing_field("name"))?,
        major: major.ok_or_else(|| missing_field("major"))?,
        date_of_birth,
        gaf_id_number: gaf_id_number.ok_or_else(|| missing_field("gafIdNumber"))?,
        government_id: government_id.ok_or_else(|| missing_field("governmentId"))?,
    };
    request.validate()?;

    let file = id_image.ok_or_else(|| missing_field("idImage"))?;
    validate_id_document_type(&file.content_type).map_err(field_error)?;

    let storage = state
        .storage
        .as_ref()
        .ok_or_else(|| ApiError::ServiceUnavailable("File storage is not configured".to_string()))?;

    let key = document_key("graduate-ids", &file_extension(&file.filename));
    storage.put(&key, file.bytes).await?;

    let repo = GraduateRepository::new(state.pool.clone());
    let (graduate, qr_code) = repo
        .create_with_code(
            auth.user.id,
            NewGraduate {
                name: &request.name,
                major: &request.major,
                date_of_birth: request.date_of_birth,
                gaf_id_number: &request.gaf_id_number,
                government_id: &request.government_id,
                id_image_url: &key,
            },
        )
        .await
        .map_err(|err| match ApiError::from(err) {
            ApiError::Conflict(_) => {
                ApiError::Conflict("A graduate is already registered for this account".to_string())
            }
            other => other,
        })?;
    record_code_issued("graduate");

    info!(graduate_id = %graduate.id, user_id = %auth.user.id, "Graduate registered");

    let url = verify_url(&state.config.server.app_base_url, &qr_code.code);
    let qr_image = qr::render_luma(&url)?;
    let ticket = pdf::graduate_ticket(&graduate, &qr_image)?;
    if let Err(err) = state
        .email
        .send_graduate_ticket(&auth.user.email, &graduate.name, ticket)
        .await
    {
        // The graduate and code rows stay; the ticket can be re-sent manually.
        warn!(graduate_id = %graduate.id, error = %err, "Failed to email graduation ticket");
        return Err(err.into());
    }

    Ok((
        StatusCode::CREATED,
        Json(GraduateResponse::new(graduate, Some(qr_code))),
    ))
}

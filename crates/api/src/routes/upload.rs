//! Helpers for the multipart registration forms.

use axum::extract::multipart::Field;

use crate::error::ApiError;

/// A file part lifted out of a multipart form.
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Reads a text part, reporting truncated or malformed bodies as a
/// validation error.
pub async fn text_field(field: Field<'_>) -> Result<String, ApiError> {
    let name = field.name().unwrap_or("field").to_string();
    field
        .text()
        .await
        .map_err(|_| ApiError::Validation(format!("Invalid value for {}", name)))
}

/// Reads a file part with its metadata.
pub async fn file_field(field: Field<'_>) -> Result<UploadedFile, ApiError> {
    let name = field.name().unwrap_or("file").to_string();
    let filename = field.file_name().unwrap_or_default().to_string();
    let content_type = field.content_type().unwrap_or_default().to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|_| ApiError::Validation(format!("Invalid file upload for {}", name)))?
        .to_vec();

    if bytes.is_empty() {
        return Err(ApiError::Validation(format!("Empty file upload for {}", name)));
    }

    Ok(UploadedFile {
        filename,
        content_type,
        bytes,
    })
}

/// Missing required multipart field.
pub fn missing_field(name: &str) -> ApiError {
    ApiError::Validation(format!("Missing required field: {}", name))
}

/// Maps a custom validator error to the API error body.
pub fn field_error(err: validator::ValidationError) -> ApiError {
    ApiError::Validation(
        err.message
            .map(|m| m.to_string())
            .unwrap_or_else(|| "Invalid value".to_string()),
    )
}

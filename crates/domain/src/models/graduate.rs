//! Graduate registration domain model.
//!
//! Each portal user may hold at most one graduate registration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::qr_code::QrCode;

/// A graduate registration. Owns exactly one QR code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Graduate {
    pub id: Uuid,
    pub name: String,
    pub major: String,
    pub date_of_birth: NaiveDate,
    /// University-issued graduation attendance form number.
    pub gaf_id_number: String,
    pub government_id: String,
    pub id_image_url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Field portion of the graduate registration form.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGraduateRequest {
    #[validate(length(min = 1, max = 120, message = "Name must be 1-120 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 120, message = "Major must be 1-120 characters"))]
    pub major: String,
    pub date_of_birth: NaiveDate,
    #[validate(length(min = 1, max = 40, message = "GAF ID must be 1-40 characters"))]
    pub gaf_id_number: String,
    #[validate(length(min = 1, max = 40, message = "Government ID must be 1-40 characters"))]
    pub government_id: String,
}

/// Graduate as returned to clients, with its code attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraduateResponse {
    pub id: Uuid,
    pub name: String,
    pub major: String,
    pub date_of_birth: NaiveDate,
    pub gaf_id_number: String,
    pub government_id: String,
    pub id_image_url: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<QrCode>,
}

impl GraduateResponse {
    pub fn new(graduate: Graduate, qr_code: Option<QrCode>) -> Self {
        Self {
            id: graduate.id,
            name: graduate.name,
            major: graduate.major,
            date_of_birth: graduate.date_of_birth,
            gaf_id_number: graduate.gaf_id_number,
            government_id: graduate.government_id,
            id_image_url: graduate.id_image_url,
            user_id: graduate.user_id,
            created_at: graduate.created_at,
            qr_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreateGraduateRequest {
        CreateGraduateRequest {
            name: "Jane Doe".to_string(),
            major: "Computer Science".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2001, 6, 15).unwrap(),
            gaf_id_number: "GAF-2026-0042".to_string(),
            government_id: "X1".to_string(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_major() {
        let mut request = valid_request();
        request.major = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_rejects_oversized_gaf_id() {
        let mut request = valid_request();
        request.gaf_id_number = "G".repeat(41);
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_date_of_birth_wire_format() {
        let request = valid_request();
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["dateOfBirth"], "2001-06-15");
    }
}

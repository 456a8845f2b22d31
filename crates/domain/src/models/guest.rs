//! Guest invitee domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::qr_code::QrCode;
use shared::validation::validate_phone_number;

/// A guest invited by a portal user. Owns exactly one QR code once
/// registration completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub government_id: String,
    /// Object-storage location of the uploaded identity document.
    pub id_image_url: String,
    pub phone_number: String,
    pub email: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Field portion of the guest registration form (the identity document file
/// arrives alongside it in the same multipart request).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuestRequest {
    #[validate(length(min = 1, max = 80, message = "First name must be 1-80 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 80, message = "Last name must be 1-80 characters"))]
    pub last_name: String,
    #[validate(length(min = 1, max = 40, message = "Government ID must be 1-40 characters"))]
    pub government_id: String,
    #[validate(custom(function = "validate_phone_number"))]
    pub phone_number: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
}

/// Guest as returned to clients, with its code attached.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub government_id: String,
    pub id_image_url: String,
    pub phone_number: String,
    pub email: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub qr_code: Option<QrCode>,
}

impl GuestResponse {
    pub fn new(guest: Guest, qr_code: Option<QrCode>) -> Self {
        Self {
            id: guest.id,
            first_name: guest.first_name,
            last_name: guest.last_name,
            government_id: guest.government_id,
            id_image_url: guest.id_image_url,
            phone_number: guest.phone_number,
            email: guest.email,
            user_id: guest.user_id,
            created_at: guest.created_at,
            qr_code,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fake::faker::internet::en::SafeEmail;
    use fake::faker::name::en::{FirstName, LastName};
    use fake::Fake;

    fn valid_request() -> CreateGuestRequest {
        CreateGuestRequest {
            first_name: FirstName().fake(),
            last_name: LastName().fake(),
            government_id: "X1".to_string(),
            phone_number: "+447911123456".to_string(),
            email: SafeEmail().fake(),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(valid_request().validate().is_ok());
    }

    #[test]
    fn test_rejects_empty_first_name() {
        let mut request = valid_request();
        request.first_name = String::new();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_phone() {
        let mut request = valid_request();
        request.phone_number = "call me".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_email() {
        let mut request = valid_request();
        request.email = "nope".to_string();
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_response_omits_missing_code() {
        let guest = Guest {
            id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            government_id: "X1".to_string(),
            id_image_url: "government-ids/abc.pdf".to_string(),
            phone_number: "+447911123456".to_string(),
            email: "jane@example.edu".to_string(),
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(GuestResponse::new(guest, None)).unwrap();
        assert!(json.get("qrCode").is_none());
        assert_eq!(json["firstName"], "Jane");
    }
}

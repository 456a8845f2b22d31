//! Guest entities.

use chrono::{DateTime, Utc};
use domain::models::guest::Guest;
use domain::models::qr_code::QrCode;
use sqlx::FromRow;
use uuid::Uuid;

use crate::entities::qr_code::{QrKindDb, QrStatusDb};

/// Database entity for guests.
#[derive(Debug, Clone, FromRow)]
pub struct GuestEntity {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub government_id: String,
    pub id_image_url: String,
    pub phone_number: String,
    pub email: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl From<GuestEntity> for Guest {
    fn from(entity: GuestEntity) -> Self {
        Guest {
            id: entity.id,
            first_name: entity.first_name,
            last_name: entity.last_name,
            government_id: entity.government_id,
            id_image_url: entity.id_image_url,
            phone_number: entity.phone_number,
            email: entity.email,
            user_id: entity.user_id,
            created_at: entity.created_at,
        }
    }
}

/// Guest row left-joined with its ledger row.
///
/// The qr_* columns are nullable; a guest whose code row is absent is
/// surfaced as "not yet issued".
#[derive(Debug, Clone, FromRow)]
pub struct GuestWithCodeEntity {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub government_id: String,
    pub id_image_url: String,
    pub phone_number: String,
    pub email: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub qr_id: Option<Uuid>,
    pub qr_code: Option<String>,
    pub qr_kind: Option<QrKindDb>,
    pub qr_status: Option<QrStatusDb>,
    pub qr_scanned_at: Option<DateTime<Utc>>,
    pub qr_created_at: Option<DateTime<Utc>>,
}

impl GuestWithCodeEntity {
    /// Splits the joined row into the guest and its optional code.
    pub fn into_parts(self) -> (Guest, Option<QrCode>) {
        let code = match (
            self.qr_id,
            self.qr_code.clone(),
            self.qr_kind,
            self.qr_status,
            self.qr_created_at,
        ) {
            (Some(id), Some(code), Some(kind), Some(status), Some(created_at)) => Some(QrCode {
                id,
                code,
                kind: kind.into(),
                status: status.into(),
                scanned_at: self.qr_scanned_at,
                created_at,
                guest_id: Some(self.id),
                graduate_id: None,
            }),
            _ => None,
        };

        let guest = Guest {
            id: self.id,
            first_name: self.first_name,
            last_name: self.last_name,
            government_id: self.government_id,
            id_image_url: self.id_image_url,
            phone_number: self.phone_number,
            email: self.email,
            user_id: self.user_id,
            created_at: self.created_at,
        };

        (guest, code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::models::qr_code::{QrCodeKind, QrCodeStatus};

    fn joined_row(with_code: bool) -> GuestWithCodeEntity {
        let now = Utc::now();
        GuestWithCodeEntity {
            id: Uuid::new_v4(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            government_id: "X1".to_string(),
            id_image_url: "government-ids/abc.pdf".to_string(),
            phone_number: "+447911123456".to_string(),
            email: "jane@example.edu".to_string(),
            user_id: Uuid::new_v4(),
            created_at: now,
            qr_id: with_code.then(Uuid::new_v4),
            qr_code: with_code.then(|| "def-456".to_string()),
            qr_kind: with_code.then_some(QrKindDb::Guest),
            qr_status: with_code.then_some(QrStatusDb::Valid),
            qr_scanned_at: None,
            qr_created_at: with_code.then_some(now),
        }
    }

    #[test]
    fn test_into_parts_with_code() {
        let (guest, code) = joined_row(true).into_parts();
        let code = code.expect("Code should be present");
        assert_eq!(code.kind, QrCodeKind::Guest);
        assert_eq!(code.status, QrCodeStatus::Valid);
        assert_eq!(code.guest_id, Some(guest.id));
    }

    #[test]
    fn test_into_parts_without_code() {
        let (_, code) = joined_row(false).into_parts();
        assert!(code.is_none());
    }
}

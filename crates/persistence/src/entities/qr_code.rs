//! Redemption ledger entity.

use chrono::{DateTime, Utc};
use domain::models::qr_code::{QrCode, QrCodeKind, QrCodeStatus};
use sqlx::FromRow;
use uuid::Uuid;

/// Database representation of the `qr_code_kind` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "qr_code_kind", rename_all = "UPPERCASE")]
pub enum QrKindDb {
    Guest,
    Graduate,
}

impl From<QrKindDb> for QrCodeKind {
    fn from(kind: QrKindDb) -> Self {
        match kind {
            QrKindDb::Guest => QrCodeKind::Guest,
            QrKindDb::Graduate => QrCodeKind::Graduate,
        }
    }
}

impl From<QrCodeKind> for QrKindDb {
    fn from(kind: QrCodeKind) -> Self {
        match kind {
            QrCodeKind::Guest => QrKindDb::Guest,
            QrCodeKind::Graduate => QrKindDb::Graduate,
        }
    }
}

/// Database representation of the `qr_code_status` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "qr_code_status", rename_all = "UPPERCASE")]
pub enum QrStatusDb {
    Valid,
    Used,
}

impl From<QrStatusDb> for QrCodeStatus {
    fn from(status: QrStatusDb) -> Self {
        match status {
            QrStatusDb::Valid => QrCodeStatus::Valid,
            QrStatusDb::Used => QrCodeStatus::Used,
        }
    }
}

/// Database entity for ledger rows.
#[derive(Debug, Clone, FromRow)]
pub struct QrCodeEntity {
    pub id: Uuid,
    pub code: String,
    pub kind: QrKindDb,
    pub status: QrStatusDb,
    pub scanned_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub guest_id: Option<Uuid>,
    pub graduate_id: Option<Uuid>,
}

impl From<QrCodeEntity> for QrCode {
    fn from(entity: QrCodeEntity) -> Self {
        QrCode {
            id: entity.id,
            code: entity.code,
            kind: entity.kind.into(),
            status: entity.status.into(),
            scanned_at: entity.scanned_at,
            created_at: entity.created_at,
            guest_id: entity.guest_id,
            graduate_id: entity.graduate_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_to_domain() {
        let now = Utc::now();
        let guest_id = Uuid::new_v4();
        let entity = QrCodeEntity {
            id: Uuid::new_v4(),
            code: "def-456".to_string(),
            kind: QrKindDb::Guest,
            status: QrStatusDb::Valid,
            scanned_at: None,
            created_at: now,
            guest_id: Some(guest_id),
            graduate_id: None,
        };

        let code: QrCode = entity.clone().into();
        assert_eq!(code.id, entity.id);
        assert_eq!(code.code, "def-456");
        assert_eq!(code.kind, QrCodeKind::Guest);
        assert_eq!(code.status, QrCodeStatus::Valid);
        assert_eq!(code.guest_id, Some(guest_id));
        assert!(code.is_consistent());
    }

    #[test]
    fn test_used_entity_to_domain() {
        let now = Utc::now();
        let entity = QrCodeEntity {
            id: Uuid::new_v4(),
            code: "abc-123".to_string(),
            kind: QrKindDb::Graduate,
            status: QrStatusDb::Used,
            scanned_at: Some(now),
            created_at: now,
            guest_id: None,
            graduate_id: Some(Uuid::new_v4()),
        };

        let code: QrCode = entity.into();
        assert_eq!(code.status, QrCodeStatus::Used);
        assert_eq!(code.scanned_at, Some(now));
        assert!(code.is_consistent());
    }

    #[test]
    fn test_kind_roundtrip() {
        assert_eq!(QrKindDb::from(QrCodeKind::Guest), QrKindDb::Guest);
        assert_eq!(QrKindDb::from(QrCodeKind::Graduate), QrKindDb::Graduate);
    }
}

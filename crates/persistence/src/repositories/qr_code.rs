//! Redemption ledger repository.

use domain::models::qr_code::{split_display_name, Attendee, QrCode, Redemption};
use sqlx::PgPool;

use crate::entities::qr_code::QrCodeEntity;

/// Repository for ledger rows and the redeem operation.
#[derive(Clone)]
pub struct QrCodeRepository {
    pool: PgPool,
}

impl QrCodeRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a ledger row by its opaque code.
    pub async fn find_by_code(&self, code: &str) -> Result<Option<QrCode>, sqlx::Error> {
        let entity = sqlx::query_as::<_, QrCodeEntity>(
            r#"
            SELECT id, code, kind, status, scanned_at, created_at, guest_id, graduate_id
            FROM qr_codes
            WHERE code = $1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Redeem a code: flip VALID to USED in a single conditional update.
    ///
    /// The update only matches a row that is still VALID, so under concurrent
    /// scans of the same code exactly one caller gets the row back and every
    /// other caller falls through to the already-used / not-found lookup.
    pub async fn redeem(&self, code: &str) -> Result<Redemption, sqlx::Error> {
        let redeemed = sqlx::query_as::<_, QrCodeEntity>(
            r#"
            UPDATE qr_codes
            SET status = 'USED', scanned_at = NOW()
            WHERE code = $1 AND status = 'VALID'
            RETURNING id, code, kind, status, scanned_at, created_at, guest_id, graduate_id
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        match redeemed {
            Some(entity) => {
                let row: QrCode = entity.into();
                // The update just set scanned_at; a missing value means the
                // scanned-iff-used constraint is broken and must surface.
                let scanned_at = row.scanned_at.ok_or_else(|| {
                    sqlx::Error::Protocol("redeemed ledger row has no scanned_at".into())
                })?;
                let attendee = self.load_attendee(&row).await?;
                Ok(Redemption::Success {
                    attendee,
                    scanned_at,
                })
            }
            None => {
                // Lost the race or the code never existed; a plain read tells
                // the two apart.
                match self.find_by_code(code).await? {
                    Some(existing) => Ok(Redemption::AlreadyUsed {
                        scanned_at: existing.scanned_at,
                    }),
                    None => Ok(Redemption::NotFound),
                }
            }
        }
    }

    /// Resolve the attendee named on a redeemed row.
    async fn load_attendee(&self, row: &QrCode) -> Result<Attendee, sqlx::Error> {
        if let Some(guest_id) = row.guest_id {
            let (first_name, last_name, government_id): (String, String, String) =
                sqlx::query_as(
                    r#"
                    SELECT first_name, last_name, government_id
                    FROM guests
                    WHERE id = $1
                    "#,
                )
                .bind(guest_id)
                .fetch_one(&self.pool)
                .await?;

            return Ok(Attendee {
                first_name,
                last_name,
                government_id,
            });
        }

        let graduate_id = row.graduate_id.ok_or(sqlx::Error::RowNotFound)?;
        let (name, government_id): (String, String) = sqlx::query_as(
            r#"
            SELECT name, government_id
            FROM graduates
            WHERE id = $1
            "#,
        )
        .bind(graduate_id)
        .fetch_one(&self.pool)
        .await?;

        let (first_name, last_name) = split_display_name(&name);
        Ok(Attendee {
            first_name,
            last_name,
            government_id,
        })
    }
}

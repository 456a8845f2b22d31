//! Guest repository.

use domain::models::guest::{CreateGuestRequest, Guest};
use domain::models::qr_code::{generate_code, QrCode};
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::guest::{GuestEntity, GuestWithCodeEntity};
use crate::entities::qr_code::QrCodeEntity;

const GUEST_WITH_CODE_SELECT: &str = r#"
    SELECT g.id, g.first_name, g.last_name, g.government_id, g.id_image_url,
           g.phone_number, g.email, g.user_id, g.created_at,
           q.id AS qr_id, q.code AS qr_code, q.kind AS qr_kind,
           q.status AS qr_status, q.scanned_at AS qr_scanned_at,
           q.created_at AS qr_created_at
    FROM guests g
    LEFT JOIN qr_codes q ON q.guest_id = g.id
"#;

/// Repository for guest database operations.
#[derive(Clone)]
pub struct GuestRepository {
    pool: PgPool,
}

impl GuestRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a guest together with its ledger row in one transaction.
    ///
    /// The code row is born VALID; a guest must never exist without a
    /// redeemable code.
    pub async fn create_with_code(
        &self,
        user_id: Uuid,
        request: &CreateGuestRequest,
        id_image_url: &str,
    ) -> Result<(Guest, QrCode), sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        let guest = sqlx::query_as::<_, GuestEntity>(
            r#"
            INSERT INTO guests (first_name, last_name, government_id, id_image_url, phone_number, email, user_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, first_name, last_name, government_id, id_image_url, phone_number, email, user_id, created_at
            "#,
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .bind(&request.government_id)
        .bind(id_image_url)
        .bind(&request.phone_number)
        .bind(&request.email)
        .bind(user_id)
        .fetch_one(&mut *tx)
        .await?;

        let code = sqlx::query_as::<_, QrCodeEntity>(
            r#"
            INSERT INTO qr_codes (code, kind, guest_id)
            VALUES ($1, 'GUEST', $2)
            RETURNING id, code, kind, status, scanned_at, created_at, guest_id, graduate_id
            "#,
        )
        .bind(generate_code())
        .bind(guest.id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((guest.into(), code.into()))
    }

    /// List a user's guests with their codes, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<(Guest, Option<QrCode>)>, sqlx::Error> {
        let query = format!(
            "{} WHERE g.user_id = $1 ORDER BY g.created_at DESC",
            GUEST_WITH_CODE_SELECT
        );
        let entities = sqlx::query_as::<_, GuestWithCodeEntity>(&query)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(GuestWithCodeEntity::into_parts).collect())
    }

    /// Find one of a user's guests by id.
    pub async fn find_for_user(
        &self,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<(Guest, Option<QrCode>)>, sqlx::Error> {
        let query = format!(
            "{} WHERE g.id = $1 AND g.user_id = $2",
            GUEST_WITH_CODE_SELECT
        );
        let entity = sqlx::query_as::<_, GuestWithCodeEntity>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(entity.map(GuestWithCodeEntity::into_parts))
    }

    /// Delete one of a user's guests. The ledger row follows via cascade.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM guests WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count a user's guests, used to enforce the per-user cap.
    pub async fn count_for_user(&self, user_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM guests WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// List every guest in the system, for the admin roster export.
    pub async fn list_all(&self) -> Result<Vec<(Guest, Option<QrCode>)>, sqlx::Error> {
        let query = format!(
            "{} ORDER BY g.last_name, g.first_name",
            GUEST_WITH_CODE_SELECT
        );
        let entities = sqlx::query_as::<_, GuestWithCodeEntity>(&query)
            .fetch_all(&self.pool)
            .await?;

        Ok(entities.into_iter().map(GuestWithCodeEntity::into_parts).collect())
    }
}
